//! Account storage and management

use rand::Rng;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::auth::{parse_credential_pin, parse_new_pin};
use super::number;
use super::types::{Account, AccountNo, AccountUpdate, NewAccount};
use crate::config::PolicyConfig;
use crate::error::{AuthError, Result, ValidationError};
use crate::storage::Storage;

/// Ordered collection of accounts, optionally mirrored to a JSON file.
/// Every mutation rewrites the whole file.
#[derive(Debug, Clone)]
pub struct AccountStore {
    accounts: Vec<Account>,
    storage: Option<Storage>,
    policy: PolicyConfig,
}

impl AccountStore {
    /// Create an empty store with no backing file
    pub fn new() -> Self {
        Self {
            accounts: Vec::new(),
            storage: None,
            policy: PolicyConfig::default(),
        }
    }

    /// Load every account from `storage` and persist to it from now on
    pub fn open(storage: Storage) -> Self {
        let accounts = storage.load_accounts();
        info!("loaded {} accounts from {}", accounts.len(), storage.path().display());
        Self {
            accounts,
            storage: Some(storage),
            policy: PolicyConfig::default(),
        }
    }

    pub fn with_policy(mut self, policy: PolicyConfig) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Create a new account and return its number
    pub fn create_account(&mut self, new: NewAccount) -> Result<AccountNo> {
        self.create_account_with(new, &mut rand::thread_rng())
    }

    pub fn create_account_with<R: Rng>(
        &mut self,
        new: NewAccount,
        rng: &mut R,
    ) -> Result<AccountNo> {
        if new.age < self.policy.min_age {
            debug!("create rejected: underage");
            return Err(ValidationError::Underage { min_age: self.policy.min_age }.into());
        }
        let pin = parse_new_pin(&new.pin)?;

        let account_no = number::generate_with(rng);
        // Uniqueness is not enforced; a hardened build would reject and redraw here.
        if self.accounts.iter().any(|a| a.account_no == account_no) {
            warn!("account number {} already in use", account_no);
        }

        self.accounts.push(Account {
            name: new.name,
            age: new.age,
            phone: new.phone,
            address: new.address,
            email: new.email,
            pin,
            account_no: account_no.clone(),
            balance: Decimal::ZERO,
        });
        self.persist()?;

        info!("created account {}", account_no);
        Ok(account_no)
    }

    /// Full record for the given credentials, PIN included
    pub fn account_details(&self, account_no: &str, pin: &str) -> Result<&Account> {
        let index = self.position(account_no, pin)?;
        Ok(&self.accounts[index])
    }

    /// Remove the first account matching the credentials
    pub fn delete_account(&mut self, account_no: &str, pin: &str) -> Result<Account> {
        let index = self.position(account_no, pin)?;
        let removed = self.accounts.remove(index);
        self.persist()?;

        info!("deleted account {}", removed.account_no);
        Ok(removed)
    }

    /// Overwrite contact details and PIN of the account verified as
    /// (`account_no`, `pin`). The new PIN is checked before the lookup.
    pub fn apply_update(&mut self, account_no: &str, pin: u64, update: &AccountUpdate) -> Result<()> {
        let new_pin = parse_new_pin(&update.new_pin)?;
        let index = self
            .find_position(account_no, pin)
            .ok_or(AuthError::InvalidCredentials)?;

        let account = &mut self.accounts[index];
        account.phone = update.phone.clone();
        account.address = update.address.clone();
        account.email = update.email.clone();
        account.pin = new_pin;
        self.persist()?;

        info!("updated account {}", account_no);
        Ok(())
    }

    /// Record for an already-parsed credential pair, if any
    pub fn find(&self, account_no: &str, pin: u64) -> Option<&Account> {
        self.find_position(account_no, pin).map(|i| &self.accounts[i])
    }

    /// Index of the first account matching the credentials. Unknown account
    /// and wrong PIN are the same error.
    pub(crate) fn position(&self, account_no: &str, pin: &str) -> Result<usize> {
        let pin = parse_credential_pin(pin)?;
        self.find_position(account_no, pin).ok_or_else(|| {
            debug!("no account matches the supplied credentials");
            AuthError::InvalidCredentials.into()
        })
    }

    fn find_position(&self, account_no: &str, pin: u64) -> Option<usize> {
        self.accounts.iter().position(|a| a.matches(account_no, pin))
    }

    pub(crate) fn account_at_mut(&mut self, index: usize) -> &mut Account {
        &mut self.accounts[index]
    }

    pub(crate) fn persist(&self) -> Result<()> {
        match &self.storage {
            Some(storage) => storage.save_accounts(&self.accounts),
            None => Ok(()),
        }
    }
}

impl Default for AccountStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BankError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn alice() -> NewAccount {
        NewAccount {
            name: "Alice".to_string(),
            age: 25,
            phone: "555-0100".to_string(),
            address: "1 Main St".to_string(),
            email: "alice@example.com".to_string(),
            pin: "1234".to_string(),
        }
    }

    #[test]
    fn test_create_account() {
        let mut store = AccountStore::new();
        let no = store.create_account(alice()).unwrap();

        assert_eq!(no.len(), 9);
        assert!(no.chars().all(|c| c.is_ascii_digit()));
        let account = store.account_details(&no, "1234").unwrap();
        assert_eq!(account.name, "Alice");
        assert_eq!(account.pin, 1234);
        assert_eq!(account.balance, Decimal::ZERO);
    }

    #[test]
    fn test_underage_leaves_store_untouched() {
        let mut store = AccountStore::new();
        let result = store.create_account(NewAccount { age: 17, ..alice() });

        assert!(matches!(
            result,
            Err(BankError::Validation(ValidationError::Underage { min_age: 18 }))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_age_is_checked_before_pin() {
        let mut store = AccountStore::new();
        let result = store.create_account(NewAccount {
            age: 3,
            pin: "12".to_string(),
            ..alice()
        });
        assert!(matches!(
            result,
            Err(BankError::Validation(ValidationError::Underage { .. }))
        ));
    }

    #[test]
    fn test_bad_pin_on_create() {
        let mut store = AccountStore::new();
        for pin in ["123", "12345", "abcd", ""] {
            let result = store.create_account(NewAccount {
                pin: pin.to_string(),
                ..alice()
            });
            assert!(matches!(
                result,
                Err(BankError::Validation(ValidationError::BadPinFormat))
            ));
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_custom_min_age() {
        let policy = PolicyConfig { min_age: 21, ..PolicyConfig::default() };
        let mut store = AccountStore::new().with_policy(policy);
        assert!(store.create_account(NewAccount { age: 20, ..alice() }).is_err());
        assert!(store.create_account(NewAccount { age: 21, ..alice() }).is_ok());
    }

    #[test]
    fn test_details_lookup_is_idempotent() {
        let mut store = AccountStore::new();
        let no = store.create_account(alice()).unwrap();

        let first = store.account_details(&no, "1234").unwrap().clone();
        let second = store.account_details(&no, "1234").unwrap().clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_wrong_pin_and_unknown_account_look_the_same() {
        let mut store = AccountStore::new();
        let no = store.create_account(alice()).unwrap();

        assert!(matches!(
            store.account_details(&no, "4321"),
            Err(BankError::Auth(AuthError::InvalidCredentials))
        ));
        assert!(matches!(
            store.account_details("000000000", "1234"),
            Err(BankError::Auth(AuthError::InvalidCredentials))
        ));
        assert!(matches!(
            store.account_details(&no, "12a4"),
            Err(BankError::Validation(ValidationError::BadPinFormat))
        ));
    }

    #[test]
    fn test_pin_with_leading_zeros_matches_numerically() {
        let mut store = AccountStore::new();
        let no = store
            .create_account(NewAccount { pin: "0042".to_string(), ..alice() })
            .unwrap();
        assert!(store.account_details(&no, "0042").is_ok());
        assert!(store.account_details(&no, "42").is_ok());
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let mut store = AccountStore::new();
        let a = store.create_account(alice()).unwrap();
        let b = store
            .create_account(NewAccount { name: "Bob".to_string(), ..alice() })
            .unwrap();

        let removed = store.delete_account(&a, "1234").unwrap();
        assert_eq!(removed.account_no, a);
        assert_eq!(store.len(), 1);
        assert_eq!(store.accounts()[0].account_no, b);
    }

    #[test]
    fn test_delete_with_wrong_credentials_is_noop() {
        let mut store = AccountStore::new();
        let a = store.create_account(alice()).unwrap();
        let before = store.accounts().to_vec();

        assert!(store.delete_account(&a, "9999").is_err());
        assert_eq!(store.accounts(), &before[..]);
    }

    #[test]
    fn test_colliding_numbers_are_still_created() {
        let mut store = AccountStore::new();
        let a = store.create_account_with(alice(), &mut StdRng::seed_from_u64(3)).unwrap();
        let b = store
            .create_account_with(
                NewAccount { name: "Twin".to_string(), ..alice() },
                &mut StdRng::seed_from_u64(3),
            )
            .unwrap();

        assert_eq!(a, b);
        assert_eq!(store.len(), 2);
        // First match wins on lookup and delete.
        assert_eq!(store.account_details(&a, "1234").unwrap().name, "Alice");
        store.delete_account(&a, "1234").unwrap();
        assert_eq!(store.accounts()[0].name, "Twin");
    }

    #[test]
    fn test_apply_update_overwrites_fields() {
        let mut store = AccountStore::new();
        let no = store.create_account(alice()).unwrap();
        let update = AccountUpdate {
            phone: "555-0199".to_string(),
            address: "2 Side St".to_string(),
            email: "a@new.example".to_string(),
            new_pin: "4321".to_string(),
        };

        store.apply_update(&no, 1234, &update).unwrap();
        let account = store.account_details(&no, "4321").unwrap();
        assert_eq!(account.phone, "555-0199");
        assert_eq!(account.address, "2 Side St");
        assert_eq!(account.email, "a@new.example");
        assert_eq!(account.name, "Alice");
        assert!(store.account_details(&no, "1234").is_err());
    }

    #[test]
    fn test_mutations_are_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");

        let mut store = AccountStore::open(Storage::new(&path));
        let a = store.create_account(alice()).unwrap();
        let b = store
            .create_account(NewAccount { name: "Bob".to_string(), ..alice() })
            .unwrap();
        store.delete_account(&a, "1234").unwrap();

        let reopened = AccountStore::open(Storage::new(&path));
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.accounts()[0].account_no, b);
        assert_eq!(reopened.accounts(), store.accounts());
    }
}
