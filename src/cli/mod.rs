pub mod ops;
pub mod session;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quick_bank")]
#[command(about = "Quick account bank: create, fund and manage accounts in a JSON file", long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, default_value = "bank.toml")]
    pub config: PathBuf,
    /// Account data file (overrides the config)
    #[arg(long)]
    pub data_file: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// One-shot operations. Without a subcommand the interactive menu runs.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new account
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        age: u32,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        address: String,
        #[arg(long, default_value = "")]
        email: String,
        /// 4-digit PIN
        #[arg(long)]
        pin: String,
    },
    /// Deposit money
    Deposit {
        #[arg(long)]
        account: String,
        #[arg(long)]
        pin: String,
        #[arg(long, allow_hyphen_values = true)]
        amount: Decimal,
    },
    /// Withdraw money
    Withdraw {
        #[arg(long)]
        account: String,
        #[arg(long)]
        pin: String,
        #[arg(long, allow_hyphen_values = true)]
        amount: Decimal,
    },
    /// Show account details
    Show {
        #[arg(long)]
        account: String,
        #[arg(long)]
        pin: String,
    },
    /// Update contact info and PIN; omitted fields keep their current value
    Update {
        #[arg(long)]
        account: String,
        /// Current PIN
        #[arg(long)]
        pin: String,
        /// New 4-digit PIN (required)
        #[arg(long)]
        new_pin: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Delete an account
    Delete {
        #[arg(long)]
        account: String,
        #[arg(long)]
        pin: String,
    },
}
