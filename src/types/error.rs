//! Error types for the bank ledger
//!
//! This module defines all error types that can occur while operating on
//! users, accounts and the persisted registry. Errors are designed to be
//! descriptive and user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **Validation**: non-positive amounts, currency mismatches, insufficient funds
//! - **Duplicate**: an account or user identifier that is already taken
//! - **Not found**: lookups of unknown accounts or users
//! - **Storage**: file I/O and JSON (de)serialization failures

use super::currency::Currency;
use super::transaction::{AccountId, UserId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Coarse classification of a [`BankError`]
///
/// Callers that only care about the category of a failure (for example to
/// pick an exit code or a test assertion) match on this instead of the
/// individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The operation was rejected by input or balance validation
    Validation,
    /// An identifier that must be unique already exists
    Duplicate,
    /// A referenced account or user does not exist
    NotFound,
    /// Reading or writing the registry failed
    Storage,
}

/// Main error type for the bank ledger
///
/// Every variant carries enough context to explain the failure without
/// further lookups. A failed operation never mutates account state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BankError {
    /// Amount is zero or negative
    #[error("Invalid amount {amount} for {operation}: amount must be positive")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
        /// Operation that was attempted
        operation: String,
    },

    /// Operation currency differs from the account currency
    #[error("Currency mismatch on account {account}: account holds {expected}, got {actual}")]
    CurrencyMismatch {
        /// Account ID
        account: AccountId,
        /// Currency of the account
        expected: Currency,
        /// Currency of the attempted operation
        actual: Currency,
    },

    /// Withdrawal or transfer exceeds the current balance
    #[error("Insufficient funds on account {account}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Account ID
        account: AccountId,
        /// Current balance
        balance: Decimal,
        /// Requested amount
        requested: Decimal,
    },

    /// Source and destination of a transfer are the same account
    #[error("Cannot transfer from account {account} to itself")]
    SameAccountTransfer {
        /// Account ID
        account: AccountId,
    },

    /// Account would be created or restored with a negative balance
    #[error("Account {account} cannot have a negative balance ({balance})")]
    NegativeBalance {
        /// Account ID
        account: AccountId,
        /// The offending balance
        balance: Decimal,
    },

    /// Currency code is not one of the supported codes
    #[error("Unsupported currency '{code}'")]
    UnsupportedCurrency {
        /// The unrecognised code
        code: String,
    },

    /// Arithmetic overflow would occur
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account ID
        account: AccountId,
    },

    /// Account ID already exists for this user
    #[error("Account {account} already exists for user {user}")]
    DuplicateAccount {
        /// User ID
        user: UserId,
        /// Duplicated account ID
        account: AccountId,
    },

    /// User ID already exists in the registry
    #[error("User {user} already exists")]
    DuplicateUser {
        /// Duplicated user ID
        user: UserId,
    },

    /// Account not found for this user
    #[error("Account {account} not found for user {user}")]
    AccountNotFound {
        /// User ID
        user: UserId,
        /// Missing account ID
        account: AccountId,
    },

    /// User not found in the registry
    #[error("User {user} not found")]
    UserNotFound {
        /// Missing user ID
        user: UserId,
    },

    /// I/O error occurred while reading or writing the registry file
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// JSON could not be parsed or produced
    #[error("Serialization error: {message}")]
    Serialization {
        /// Description of the serde error
        message: String,
    },

    /// A stored record is well-formed JSON but violates the data model
    #[error("Invalid record: {message}")]
    InvalidRecord {
        /// What is wrong with the record
        message: String,
    },
}

impl From<std::io::Error> for BankError {
    fn from(error: std::io::Error) -> Self {
        BankError::Io {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for BankError {
    fn from(error: serde_json::Error) -> Self {
        BankError::Serialization {
            message: error.to_string(),
        }
    }
}

impl BankError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BankError::InvalidAmount { .. }
            | BankError::CurrencyMismatch { .. }
            | BankError::InsufficientFunds { .. }
            | BankError::SameAccountTransfer { .. }
            | BankError::NegativeBalance { .. }
            | BankError::UnsupportedCurrency { .. }
            | BankError::ArithmeticOverflow { .. } => ErrorKind::Validation,
            BankError::DuplicateAccount { .. } | BankError::DuplicateUser { .. } => {
                ErrorKind::Duplicate
            }
            BankError::AccountNotFound { .. } | BankError::UserNotFound { .. } => {
                ErrorKind::NotFound
            }
            BankError::Io { .. }
            | BankError::Serialization { .. }
            | BankError::InvalidRecord { .. } => ErrorKind::Storage,
        }
    }
}

// Helper functions for creating common errors

impl BankError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal, operation: &str) -> Self {
        BankError::InvalidAmount {
            amount,
            operation: operation.to_string(),
        }
    }

    /// Create a CurrencyMismatch error
    pub fn currency_mismatch(account: AccountId, expected: Currency, actual: Currency) -> Self {
        BankError::CurrencyMismatch {
            account,
            expected,
            actual,
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account: AccountId, balance: Decimal, requested: Decimal) -> Self {
        BankError::InsufficientFunds {
            account,
            balance,
            requested,
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account: AccountId) -> Self {
        BankError::ArithmeticOverflow {
            operation: operation.to_string(),
            account,
        }
    }

    /// Create an UnsupportedCurrency error
    pub fn unsupported_currency(code: &str) -> Self {
        BankError::UnsupportedCurrency {
            code: code.to_string(),
        }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(user: UserId, account: AccountId) -> Self {
        BankError::AccountNotFound { user, account }
    }

    /// Create a UserNotFound error
    pub fn user_not_found(user: UserId) -> Self {
        BankError::UserNotFound { user }
    }

    /// Create an InvalidRecord error
    pub fn invalid_record(message: impl Into<String>) -> Self {
        BankError::InvalidRecord {
            message: message.into(),
        }
    }
}
