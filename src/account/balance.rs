//! Deposits and withdrawals

use rust_decimal::Decimal;
use tracing::{debug, info};

use super::store::AccountStore;
use super::types::storable_balance;
use crate::error::{BankError, LimitError, Result, ValidationError};

impl AccountStore {
    /// Credit `amount` to the account and return the new balance.
    /// There is no policy cap on deposits; the only bound is a balance the
    /// data file can hold exactly.
    pub fn deposit(&mut self, account_no: &str, pin: &str, amount: Decimal) -> Result<Decimal> {
        check_amount(amount)?;
        let index = self.position(account_no, pin)?;

        let account = self.account_at_mut(index);
        let balance = settle(account.balance.checked_add(amount))?;
        account.balance = balance;
        self.persist()?;

        info!("deposited {} into {}", amount, account_no);
        Ok(balance)
    }

    /// Debit `amount` from the account and return the new balance. Fails
    /// above the withdrawal cap or the available balance, leaving the
    /// account untouched.
    pub fn withdraw(&mut self, account_no: &str, pin: &str, amount: Decimal) -> Result<Decimal> {
        check_amount(amount)?;
        let index = self.position(account_no, pin)?;

        let cap = self.policy().withdrawal_cap();
        if amount > cap {
            debug!("withdrawal of {} over cap {}", amount, cap);
            return Err(LimitError::ExceedsWithdrawalCap { cap }.into());
        }

        let account = self.account_at_mut(index);
        if account.balance < amount {
            return Err(BankError::InsufficientFunds {
                requested: amount,
                available: account.balance,
            });
        }
        let balance = settle(account.balance.checked_sub(amount))?;
        account.balance = balance;
        self.persist()?;

        info!("withdrew {} from {}", amount, account_no);
        Ok(balance)
    }
}

fn settle(balance: Option<Decimal>) -> Result<Decimal> {
    match balance {
        Some(balance) if storable_balance(balance) => Ok(balance),
        _ => {
            debug!("resulting balance cannot be stored exactly");
            Err(LimitError::BalanceOutOfRange.into())
        }
    }
}

fn check_amount(amount: Decimal) -> Result<()> {
    if amount < Decimal::ZERO {
        return Err(ValidationError::NegativeAmount.into());
    }
    Ok(())
}
