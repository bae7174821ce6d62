use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BankConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct StorageConfig {
    #[serde(default = "default_data_file")]
    pub data_file: String,
}

/// Limits applied by the account operations.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct PolicyConfig {
    #[serde(default = "default_min_age")]
    pub min_age: u32,
    #[serde(default = "default_withdrawal_cap")]
    pub withdrawal_cap: u64,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_data_file() -> String {
    "data.json".to_string()
}

fn default_min_age() -> u32 {
    18
}

fn default_withdrawal_cap() -> u64 {
    10_000
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
        }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            min_age: default_min_age(),
            withdrawal_cap: default_withdrawal_cap(),
        }
    }
}

impl PolicyConfig {
    pub fn withdrawal_cap(&self) -> Decimal {
        Decimal::from(self.withdrawal_cap)
    }
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            storage: StorageConfig::default(),
            policy: PolicyConfig::default(),
        }
    }
}

/// Where the active configuration came from. Reported once logging is up,
/// since the log level itself lives in the config.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    File,
    CreatedDefault,
    Fallback(String),
}

impl BankConfig {
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, ConfigSource) {
        let path = path.as_ref();
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(s) => match toml::from_str(&s) {
                    Ok(c) => (c, ConfigSource::File),
                    Err(e) => (
                        Self::default(),
                        ConfigSource::Fallback(format!("error parsing config: {}", e)),
                    ),
                },
                Err(e) => (
                    Self::default(),
                    ConfigSource::Fallback(format!("error reading config: {}", e)),
                ),
            }
        } else {
            let config = Self::default();
            let written = toml::to_string_pretty(&config)
                .map_err(|e| e.to_string())
                .and_then(|s| std::fs::write(path, s).map_err(|e| e.to_string()));
            match written {
                Ok(()) => (config, ConfigSource::CreatedDefault),
                Err(e) => (
                    config,
                    ConfigSource::Fallback(format!("could not write default config: {}", e)),
                ),
            }
        }
    }
}
