// User accounts - credentials plus one library each
// Persisted as a single JSON map; a bad file just means starting fresh

pub mod password;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::error::{Error, Result};
use crate::library::Library;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    username: String,
    salt: String,          // base64, 16 random bytes
    password_hash: String, // argon2id PHC string
    created_at: DateTime<Utc>,
    library: Library,
}

impl Account {
    pub fn new(username: impl Into<String>, password: &str) -> Result<Self> {
        let salt = password::generate_salt()?;
        let password_hash = password::hash_password(password, &salt)?;
        Ok(Self {
            username: username.into(),
            salt,
            password_hash,
            created_at: Utc::now(),
            library: Library::new(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn check_password(&self, password: &str) -> bool {
        password::verify_password(password, &self.password_hash)
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn library_mut(&mut self) -> &mut Library {
        &mut self.library
    }
}

/// All known accounts, keyed by case-sensitive username.
#[derive(Debug, Default)]
pub struct AccountDirectory {
    accounts: BTreeMap<String, Account>,
    path: Option<PathBuf>, // None = never touches disk
}

impl AccountDirectory {
    /// Directory that lives only in memory.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load accounts from `path`. Missing or corrupt files give an empty directory.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let accounts = match read_accounts(&path) {
            Ok(Some(accounts)) => {
                info!("Loaded {} accounts from {}", accounts.len(), path.display());
                accounts
            }
            Ok(None) => {
                info!("No account file at {}, starting fresh", path.display());
                BTreeMap::new()
            }
            Err(e) => {
                error!("Error loading accounts, starting fresh: {}", e);
                BTreeMap::new()
            }
        };

        Self {
            accounts,
            path: Some(path),
        }
    }

    /// Write every account to disk. No-op for in-memory directories.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(&self.accounts)?;
        fs::write(path, json).map_err(|e| Error::io(path, e))?;
        info!("Saved {} accounts to {}", self.accounts.len(), path.display());
        Ok(())
    }

    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        self.accounts
            .get(username)
            .map(|account| account.check_password(password))
            .unwrap_or(false)
    }

    /// Create (or replace) an account and save the directory.
    ///
    /// An existing account with the same username is overwritten, library and all.
    /// A failed save is logged; the account still exists in memory.
    pub fn create_user(&mut self, username: &str, password: &str) -> Result<&mut Account> {
        let account = Account::new(username, password)?;
        if self
            .accounts
            .insert(username.to_string(), account.clone())
            .is_some()
        {
            warn!("Account '{}' already existed and was replaced", username);
        } else {
            info!("Created account '{}'", username);
        }

        if let Err(e) = self.save() {
            error!("Error saving accounts: {}", e);
        }

        Ok(self.accounts.entry(username.to_string()).or_insert(account))
    }

    pub fn get(&self, username: &str) -> Option<&Account> {
        self.accounts.get(username)
    }

    pub fn get_mut(&mut self, username: &str) -> Option<&mut Account> {
        self.accounts.get_mut(username)
    }

    pub fn contains(&self, username: &str) -> bool {
        self.accounts.contains_key(username)
    }

    pub fn usernames(&self) -> Vec<String> {
        self.accounts.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

fn read_accounts(path: &Path) -> Result<Option<BTreeMap<String, Account>>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let accounts = serde_json::from_str(&content)?;
    Ok(Some(accounts))
}
