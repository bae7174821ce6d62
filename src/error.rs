use rust_decimal::Decimal;
use thiserror::Error;

/// Malformed or out-of-policy input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("You must be at least {min_age} years old.")]
    Underage { min_age: u32 },
    #[error("PIN must be exactly 4 digits (numbers).")]
    BadPinFormat,
    #[error("Amount must not be negative.")]
    NegativeAmount,
}

/// No account matches the given account-number + PIN pair. Deliberately says
/// nothing about which half was wrong.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid account or PIN.")]
    InvalidCredentials,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LimitError {
    #[error("Withdrawal limit is {cap}.")]
    ExceedsWithdrawalCap { cap: Decimal },
    #[error("Resulting balance is too large or too precise to be stored.")]
    BalanceOutOfRange,
}

#[derive(Error, Debug)]
pub enum BankError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Limit(#[from] LimitError),
    #[error("Insufficient balance (asked {requested} while {available} available).")]
    InsufficientFunds { requested: Decimal, available: Decimal },
    #[error("Verify your account before saving changes.")]
    NotVerified,
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BankError {
    /// Domain errors are reported to the user and the session carries on;
    /// the rest come from the filesystem.
    pub fn is_domain(&self) -> bool {
        !matches!(self, Self::Storage(_) | Self::Serialization(_))
    }
}

pub type Result<T> = std::result::Result<T, BankError>;
