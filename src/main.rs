use std::process::ExitCode;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use quick_bank::cli::{ops, Cli};
use quick_bank::config::{BankConfig, ConfigSource};
use quick_bank::interactive;
use quick_bank::storage::Storage;
use quick_bank::AccountStore;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let (config, source) = BankConfig::load_or_default(&cli.config);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match source {
        ConfigSource::File => info!("config loaded from {}", cli.config.display()),
        ConfigSource::CreatedDefault => {
            info!("config not found, wrote defaults to {}", cli.config.display())
        }
        ConfigSource::Fallback(reason) => warn!("{}; using defaults", reason),
    }

    let data_file = cli
        .data_file
        .unwrap_or_else(|| config.storage.data_file.clone().into());
    let mut store = AccountStore::open(Storage::new(data_file)).with_policy(config.policy);

    match cli.command {
        Some(command) => {
            match ops::handle_command(command, &mut store) {
                Ok(message) => {
                    println!("{}", message);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    if !e.is_domain() {
                        warn!("operation failed: {}", e);
                    }
                    eprintln!("Error: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        None => match interactive::start(&mut store) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Console error: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}
