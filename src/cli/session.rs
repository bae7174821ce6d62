//! Verification state for the two-phase account update

use tracing::debug;

use crate::account::{Account, AccountNo, AccountStore, AccountUpdate};
use crate::error::{BankError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UpdateState {
    #[default]
    Unverified,
    /// Credentials proven for this account. The PIN is kept so colliding
    /// account numbers still resolve to the verified record.
    Verified { account_no: AccountNo, pin: u64 },
}

/// Scoped to one interactive run; nothing here is persisted.
#[derive(Debug, Default)]
pub struct UpdateSession {
    state: UpdateState,
}

impl UpdateSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &UpdateState {
        &self.state
    }

    pub fn is_verified(&self) -> bool {
        matches!(self.state, UpdateState::Verified { .. })
    }

    /// Verify phase. Any failure clears an earlier verification.
    pub fn verify<'a>(
        &mut self,
        store: &'a AccountStore,
        account_no: &str,
        pin: &str,
    ) -> Result<&'a Account> {
        match store.account_details(account_no, pin) {
            Ok(account) => {
                self.state = UpdateState::Verified {
                    account_no: account.account_no.clone(),
                    pin: u64::from(account.pin),
                };
                Ok(account)
            }
            Err(e) => {
                self.reset();
                Err(e)
            }
        }
    }

    /// Current values of the verified account, for pre-filling the edit form
    pub fn verified_account<'a>(&self, store: &'a AccountStore) -> Option<&'a Account> {
        match &self.state {
            UpdateState::Verified { account_no, pin } => store.find(account_no, *pin),
            UpdateState::Unverified => None,
        }
    }

    /// Edit phase. A malformed new PIN keeps the session open for another
    /// try; success or any other failure ends it.
    pub fn save(&mut self, store: &mut AccountStore, update: &AccountUpdate) -> Result<()> {
        let (account_no, pin) = match &self.state {
            UpdateState::Verified { account_no, pin } => (account_no.clone(), *pin),
            UpdateState::Unverified => return Err(BankError::NotVerified),
        };

        match store.apply_update(&account_no, pin, update) {
            Ok(()) => {
                self.reset();
                Ok(())
            }
            Err(e @ BankError::Validation(_)) => Err(e),
            Err(e) => {
                debug!("update of {} abandoned: {}", account_no, e);
                self.reset();
                Err(e)
            }
        }
    }

    pub fn reset(&mut self) {
        self.state = UpdateState::Unverified;
    }
}
