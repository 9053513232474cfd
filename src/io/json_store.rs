//! Synchronous JSON file store
//!
//! Reads and writes the whole registry as one JSON document using blocking
//! `std::fs` calls. Format concerns are delegated to the json_format module.
//!
//! ```no_run
//! use rust_bank_ledger::core::RegistryStore;
//! use rust_bank_ledger::io::JsonFileStore;
//!
//! let store = JsonFileStore::new("data/users.json");
//! let registry = store.load().unwrap();
//! println!("{} users", registry.len());
//! ```
//!
//! # Error Handling
//!
//! - A missing file is not an error; it loads as an empty registry
//! - Unreadable files and malformed JSON are returned as storage errors
//! - Saving writes a sibling temp file first and renames it over the target,
//!   so a failed save leaves the previous file intact

use crate::core::{RegistryStore, UserRegistry};
use crate::io::json_format::{parse_registry, registry_to_json};
use crate::types::BankError;
use std::fs;
use std::path::{Path, PathBuf};

/// Registry store backed by a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Sibling path used for atomic replacement of `path`
pub(crate) fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

impl RegistryStore for JsonFileStore {
    fn load(&self) -> Result<UserRegistry, BankError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no data file yet, starting empty");
            return Ok(UserRegistry::new());
        }
        let json = fs::read_to_string(&self.path)?;
        let registry = parse_registry(&json)?;
        tracing::debug!(path = %self.path.display(), users = registry.len(), "loaded registry");
        Ok(registry)
    }

    fn save(&self, registry: &UserRegistry) -> Result<(), BankError> {
        let json = registry_to_json(registry)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp = temp_path(&self.path);
        fs::write(&temp, json)?;
        fs::rename(&temp, &self.path)?;
        tracing::debug!(path = %self.path.display(), users = registry.len(), "saved registry");
        Ok(())
    }
}
