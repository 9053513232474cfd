//! I/O module
//!
//! Handles persistence of the user registry.
//!
//! # Components
//!
//! - `json_format` - JSON format handling (records, conversion, rendering)
//! - `json_store` - Synchronous file store
//! - `async_store` - Tokio-backed file store

pub mod async_store;
pub mod json_format;
pub mod json_store;

pub use async_store::AsyncJsonFileStore;
pub use json_format::{parse_registry, registry_to_json, AccountRecord, TransactionRecord, UserRecord};
pub use json_store::JsonFileStore;

use crate::cli::StorageType;
use crate::core::RegistryStore;
use std::path::Path;

/// Create a registry store based on the specified storage type
///
/// # Arguments
///
/// * `storage_type` - Which file store implementation to use
/// * `path` - Location of the JSON data file
pub fn create_store(storage_type: StorageType, path: &Path) -> Box<dyn RegistryStore> {
    match storage_type {
        StorageType::Sync => Box::new(JsonFileStore::new(path)),
        StorageType::Async => Box::new(AsyncJsonFileStore::new(path)),
    }
}
