//! Core traits for registry persistence
//!
//! The core never touches the file system. Whoever drives it passes in a
//! `RegistryStore`, so the synchronous and the asynchronous file stores can
//! be used interchangeably.

use crate::core::registry::UserRegistry;
use crate::types::BankError;

/// Trait for loading and saving the user registry
pub trait RegistryStore {
    /// Load the full registry
    ///
    /// A store with nothing saved yet yields an empty registry.
    fn load(&self) -> Result<UserRegistry, BankError>;

    /// Replace the stored registry with `registry`
    fn save(&self, registry: &UserRegistry) -> Result<(), BankError>;
}
