use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::account::Account;
use crate::error::Result;

/// Flat JSON file holding every account. The whole file is rewritten on
/// each save; there is no locking and no temp-file swap.
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Storage { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all accounts. A missing, unreadable or malformed file is replaced
    /// by an empty collection on disk.
    pub fn load_accounts(&self) -> Vec<Account> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Vec::new(),
            Ok(content) => match serde_json::from_str(&content) {
                Ok(accounts) => accounts,
                Err(e) => {
                    warn!("{} holds invalid data ({}), starting fresh", self.path.display(), e);
                    self.reset()
                }
            },
            Err(e) => {
                debug!("{} not readable ({}), starting fresh", self.path.display(), e);
                self.reset()
            }
        }
    }

    pub fn save_accounts(&self, accounts: &[Account]) -> Result<()> {
        let json = serde_json::to_string_pretty(accounts)?;
        fs::write(&self.path, json)?;
        debug!("wrote {} accounts to {}", accounts.len(), self.path.display());
        Ok(())
    }

    fn reset(&self) -> Vec<Account> {
        if let Err(e) = fs::write(&self.path, "[]") {
            warn!("could not reset {}: {}", self.path.display(), e);
        }
        Vec::new()
    }
}
