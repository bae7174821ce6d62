use crate::account::{AccountStore, AccountUpdate, NewAccount};
use crate::cli::session::UpdateSession;
use crate::cli::Commands;
use crate::error::Result;

pub fn created_message(account_no: &str) -> String {
    format!("Account created! Please save your account number: {}", account_no)
}

/// Run one subcommand against the store and return what to print.
pub fn handle_command(cmd: Commands, store: &mut AccountStore) -> Result<String> {
    match cmd {
        Commands::Create { name, age, phone, address, email, pin } => {
            let account_no = store.create_account(NewAccount {
                name,
                age,
                phone,
                address,
                email,
                pin,
            })?;
            Ok(created_message(&account_no))
        }
        Commands::Deposit { account, pin, amount } => {
            let balance = store.deposit(&account, &pin, amount)?;
            Ok(format!("Deposit successful. Balance: {}", balance))
        }
        Commands::Withdraw { account, pin, amount } => {
            let balance = store.withdraw(&account, &pin, amount)?;
            Ok(format!("Withdrawal successful. Balance: {}", balance))
        }
        Commands::Show { account, pin } => {
            let record = store.account_details(&account, &pin)?;
            Ok(serde_json::to_string_pretty(record)?)
        }
        Commands::Update { account, pin, new_pin, phone, address, email } => {
            let mut session = UpdateSession::new();
            let current = session.verify(store, &account, &pin)?;
            let update = AccountUpdate {
                phone: phone.unwrap_or_else(|| current.phone.clone()),
                address: address.unwrap_or_else(|| current.address.clone()),
                email: email.unwrap_or_else(|| current.email.clone()),
                new_pin,
            };
            session.save(store, &update)?;
            Ok("Account information updated.".to_string())
        }
        Commands::Delete { account, pin } => {
            store.delete_account(&account, &pin)?;
            Ok("Account deleted.".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BankError, LimitError};
    use rust_decimal::Decimal;

    fn create(store: &mut AccountStore) -> String {
        let out = handle_command(
            Commands::Create {
                name: "Alice".to_string(),
                age: 25,
                phone: "555-0100".to_string(),
                address: "1 Main St".to_string(),
                email: "alice@example.com".to_string(),
                pin: "1234".to_string(),
            },
            store,
        )
        .unwrap();
        out.rsplit(' ').next().unwrap().to_string()
    }

    #[test]
    fn test_create_reports_account_number() {
        let mut store = AccountStore::new();
        let no = create(&mut store);
        assert_eq!(store.accounts()[0].account_no, no);
    }

    #[test]
    fn test_show_prints_full_record() {
        let mut store = AccountStore::new();
        let no = create(&mut store);
        let out = handle_command(
            Commands::Show { account: no.clone(), pin: "1234".to_string() },
            &mut store,
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["accountNo"], no.as_str());
        assert_eq!(value["pin"], 1234);
        assert_eq!(value["name"], "Alice");
    }

    #[test]
    fn test_withdraw_over_cap() {
        let mut store = AccountStore::new();
        let no = create(&mut store);
        let result = handle_command(
            Commands::Withdraw {
                account: no,
                pin: "1234".to_string(),
                amount: Decimal::from(10_001),
            },
            &mut store,
        );
        assert!(matches!(
            result,
            Err(BankError::Limit(LimitError::ExceedsWithdrawalCap { .. }))
        ));
    }

    #[test]
    fn test_update_keeps_omitted_fields() {
        let mut store = AccountStore::new();
        let no = create(&mut store);
        handle_command(
            Commands::Update {
                account: no.clone(),
                pin: "1234".to_string(),
                new_pin: "4321".to_string(),
                phone: None,
                address: Some("2 Side St".to_string()),
                email: None,
            },
            &mut store,
        )
        .unwrap();

        let account = store.account_details(&no, "4321").unwrap();
        assert_eq!(account.phone, "555-0100");
        assert_eq!(account.address, "2 Side St");
        assert_eq!(account.email, "alice@example.com");
    }

    #[test]
    fn test_delete() {
        let mut store = AccountStore::new();
        let no = create(&mut store);
        let out = handle_command(
            Commands::Delete { account: no, pin: "1234".to_string() },
            &mut store,
        )
        .unwrap();
        assert_eq!(out, "Account deleted.");
        assert!(store.is_empty());
    }
}
