//! Account record as persisted in the data file

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Nine decimal digits, the lookup key for an account
pub type AccountNo = String;

/// Stored PIN, compared numerically
pub type Pin = u16;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Account {
    pub name: String,
    pub age: u32,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    pub email: String,
    pub pin: Pin,
    #[serde(rename = "accountNo", alias = "accountNo.")]
    pub account_no: AccountNo,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

/// Input for creating an account, before validation
#[derive(Debug, Clone, Default)]
pub struct NewAccount {
    pub name: String,
    pub age: u32,
    pub phone: String,
    pub address: String,
    pub email: String,
    pub pin: String,
}

/// Replacement contact details and PIN for the update flow
#[derive(Debug, Clone, Default)]
pub struct AccountUpdate {
    pub phone: String,
    pub address: String,
    pub email: String,
    pub new_pin: String,
}

/// Whether `balance` reads back unchanged after going through the float
/// encoding of the data file.
pub fn storable_balance(balance: Decimal) -> bool {
    balance
        .to_f64()
        .and_then(|f| Decimal::from_str(&f.to_string()).ok())
        == Some(balance)
}

impl Account {
    /// Whether this record answers to the given account number and numeric PIN.
    pub fn matches(&self, account_no: &str, pin: u64) -> bool {
        self.account_no == account_no && u64::from(self.pin) == pin
    }
}
