pub mod account;
pub mod cli;
pub mod config;
pub mod error;
pub mod interactive;
pub mod storage;

pub use account::{Account, AccountStore};
pub use error::{BankError, Result};
