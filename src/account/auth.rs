//! PIN checks shared by every operation

use super::types::Pin;
use crate::error::{AuthError, BankError, ValidationError};

pub const PIN_LEN: usize = 4;

/// Validate a PIN being set (create, update). Exactly four ASCII digits.
pub fn parse_new_pin(input: &str) -> Result<Pin, ValidationError> {
    if input.len() != PIN_LEN || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::BadPinFormat);
    }
    input.parse().map_err(|_| ValidationError::BadPinFormat)
}

/// Validate a PIN offered as a credential. Any non-empty run of digits is
/// accepted and compared as an integer, so "0042" and "42" are the same PIN.
/// A number too large to be a stored PIN can never match.
pub fn parse_credential_pin(input: &str) -> Result<u64, BankError> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::BadPinFormat.into());
    }
    input
        .parse::<u64>()
        .ok()
        .filter(|pin| *pin <= u64::from(Pin::MAX))
        .ok_or_else(|| AuthError::InvalidCredentials.into())
}
