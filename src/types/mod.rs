//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `currency`: Supported currency codes
//! - `transaction`: Identifiers and the transaction record
//! - `error`: Error types for the ledger

pub mod currency;
pub mod error;
pub mod transaction;

pub use currency::Currency;
pub use error::{BankError, ErrorKind};
pub use transaction::{AccountId, Transaction, TransactionId, TransactionKind, UserId};
