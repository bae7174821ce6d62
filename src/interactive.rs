use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use tracing::warn;

use crate::account::{AccountStore, AccountUpdate, NewAccount};
use crate::cli::ops::created_message;
use crate::cli::session::UpdateSession;
use crate::error::{BankError, Result};

const MENU: [&str; 7] = [
    "Create Account",
    "Deposit Money",
    "Withdraw Money",
    "Show Account Details",
    "Update Account Info",
    "Delete Account",
    "Exit",
];

/// Menu-driven front end over any line reader and writer. Holds the update
/// session for the lifetime of one run.
pub struct Console<R, W> {
    input: R,
    output: W,
    session: UpdateSession,
}

/// Whether the menu loop should keep going. Input running dry ends it.
type Flow = io::Result<bool>;

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            session: UpdateSession::new(),
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn run(&mut self, store: &mut AccountStore) -> io::Result<()> {
        writeln!(self.output, "========================================")?;
        writeln!(self.output, "         QUICK ACCOUNT BANK             ")?;
        writeln!(self.output, "========================================")?;

        loop {
            writeln!(self.output)?;
            for (i, item) in MENU.iter().enumerate() {
                writeln!(self.output, "{}. {}", i + 1, item)?;
            }
            let Some(choice) = self.prompt("Select Option")? else {
                return Ok(());
            };

            let more = match choice.trim() {
                "1" => self.create_account(store)?,
                "2" => self.deposit(store)?,
                "3" => self.withdraw(store)?,
                "4" => self.show_details(store)?,
                "5" => self.update_info(store)?,
                "6" => self.delete_account(store)?,
                "7" | "q" => false,
                _ => {
                    writeln!(self.output, "Invalid option.")?;
                    true
                }
            };
            if !more {
                return Ok(());
            }
        }
    }

    fn create_account(&mut self, store: &mut AccountStore) -> Flow {
        writeln!(self.output, "\n--- Create a New Account ---")?;
        let Some(name) = self.prompt("Full Name")? else { return Ok(false) };
        let Some(age) = self.prompt("Age")? else { return Ok(false) };
        let Some(phone) = self.prompt("Phone Number")? else { return Ok(false) };
        let Some(address) = self.prompt("Address")? else { return Ok(false) };
        let Some(email) = self.prompt("Email")? else { return Ok(false) };
        let Some(pin) = self.prompt("4-digit PIN")? else { return Ok(false) };

        let Ok(age) = age.trim().parse::<u32>() else {
            writeln!(self.output, "Error: Age must be a whole number.")?;
            return Ok(true);
        };
        let result = store
            .create_account(NewAccount { name, age, phone, address, email, pin })
            .map(|no| created_message(&no));
        self.report(result)
    }

    fn deposit(&mut self, store: &mut AccountStore) -> Flow {
        writeln!(self.output, "\n--- Deposit Funds ---")?;
        let Some((account, pin, amount)) = self.transfer_form("Amount to Deposit")? else {
            return Ok(false);
        };
        let Some(amount) = self.parse_amount(&amount)? else { return Ok(true) };
        let result = store
            .deposit(&account, &pin, amount)
            .map(|balance| format!("Deposit successful. Balance: {}", balance));
        self.report(result)
    }

    fn withdraw(&mut self, store: &mut AccountStore) -> Flow {
        let cap = store.policy().withdrawal_cap();
        writeln!(self.output, "\n--- Withdraw Funds (max {}) ---", cap)?;
        let Some((account, pin, amount)) = self.transfer_form("Amount to Withdraw")? else {
            return Ok(false);
        };
        let Some(amount) = self.parse_amount(&amount)? else { return Ok(true) };
        let result = store
            .withdraw(&account, &pin, amount)
            .map(|balance| format!("Withdrawal successful. Balance: {}", balance));
        self.report(result)
    }

    fn show_details(&mut self, store: &mut AccountStore) -> Flow {
        writeln!(self.output, "\n--- Account Details ---")?;
        let Some((account, pin)) = self.credentials("PIN")? else { return Ok(false) };
        let result = store
            .account_details(&account, &pin)
            .and_then(|record| Ok(serde_json::to_string_pretty(record)?));
        self.report(result)
    }

    fn update_info(&mut self, store: &mut AccountStore) -> Flow {
        writeln!(self.output, "\n--- Update Account Information ---")?;
        let Some((account, pin)) = self.credentials("Current PIN")? else { return Ok(false) };

        let current = match self.session.verify(store, &account, &pin) {
            Ok(record) => record.clone(),
            Err(e) => return self.report(Err(e)),
        };
        writeln!(self.output, "Verified! Edit your info below (blank keeps the current value).")?;

        let Some(phone) = self.prompt_with_default("Phone Number", &current.phone)? else {
            return Ok(false);
        };
        let Some(address) = self.prompt_with_default("Address", &current.address)? else {
            return Ok(false);
        };
        let Some(email) = self.prompt_with_default("Email Address", &current.email)? else {
            return Ok(false);
        };

        loop {
            let Some(new_pin) = self.prompt("New 4-digit PIN (required)")? else {
                return Ok(false);
            };
            let update = AccountUpdate {
                phone: phone.clone(),
                address: address.clone(),
                email: email.clone(),
                new_pin,
            };
            match self.session.save(store, &update) {
                Err(e @ BankError::Validation(_)) => {
                    writeln!(self.output, "Error: {}", e)?;
                }
                result => {
                    return self.report(result.map(|()| "Account information updated.".to_string()));
                }
            }
        }
    }

    fn delete_account(&mut self, store: &mut AccountStore) -> Flow {
        writeln!(self.output, "\n--- Delete Account ---")?;
        let Some((account, pin)) = self.credentials("PIN")? else { return Ok(false) };
        let result = store
            .delete_account(&account, &pin)
            .map(|_| "Account deleted.".to_string());
        self.report(result)
    }

    fn credentials(&mut self, pin_label: &str) -> io::Result<Option<(String, String)>> {
        let Some(account) = self.prompt("Account Number")? else { return Ok(None) };
        let Some(pin) = self.prompt(pin_label)? else { return Ok(None) };
        Ok(Some((account, pin)))
    }

    fn transfer_form(&mut self, amount_label: &str) -> io::Result<Option<(String, String, String)>> {
        let Some((account, pin)) = self.credentials("PIN")? else { return Ok(None) };
        let Some(amount) = self.prompt(amount_label)? else { return Ok(None) };
        Ok(Some((account, pin, amount)))
    }

    fn parse_amount(&mut self, raw: &str) -> io::Result<Option<Decimal>> {
        match Decimal::from_str(raw.trim()) {
            Ok(amount) => Ok(Some(amount)),
            Err(_) => {
                writeln!(self.output, "Error: Amount must be a number.")?;
                Ok(None)
            }
        }
    }

    fn report(&mut self, result: Result<String>) -> Flow {
        match result {
            Ok(message) => writeln!(self.output, "{}", message)?,
            Err(e) => {
                if !e.is_domain() {
                    warn!("operation failed: {}", e);
                }
                writeln!(self.output, "Error: {}", e)?;
            }
        }
        Ok(true)
    }

    fn prompt_with_default(&mut self, label: &str, current: &str) -> io::Result<Option<String>> {
        let answer = self.prompt(&format!("{} [{}]", label, current))?;
        Ok(answer.map(|a| if a.is_empty() { current.to_string() } else { a }))
    }

    /// Print `label`, read one line without its line ending; the rest is
    /// kept verbatim. `None` once input is exhausted.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let len = line.trim_end_matches(&['\r', '\n'][..]).len();
        line.truncate(len);
        Ok(Some(line))
    }
}

/// Run the menu on the process's stdin and stdout.
pub fn start(store: &mut AccountStore) -> io::Result<()> {
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    console.run(store)
}
