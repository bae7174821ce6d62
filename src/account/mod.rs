//! Account records and the operations on them
//!
//! - `types`: the persisted record and operation inputs
//! - `store`: the in-memory collection, lookup, create/show/delete/update
//! - `balance`: deposits and withdrawals
//! - `auth`: PIN format checks
//! - `number`: account number generation

pub mod auth;
pub mod balance;
pub mod number;
pub mod store;
pub mod types;

pub use store::AccountStore;
pub use types::{Account, AccountNo, AccountUpdate, NewAccount, Pin};
