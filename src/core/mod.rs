//! Core business logic module
//!
//! This module contains the ledger components:
//! - `account` - Single-currency balance with transaction history
//! - `transfer` - All-or-nothing movement of funds between two accounts
//! - `user` - Account owner, balance aggregation and summary report
//! - `registry` - The set of all users
//! - `traits` - Persistence abstraction passed into the service
//! - `service` - Load, apply, save orchestration of ledger operations

pub mod account;
pub mod registry;
pub mod service;
pub mod traits;
pub mod transfer;
pub mod user;

pub use account::Account;
pub use registry::UserRegistry;
pub use service::BankService;
pub use traits::RegistryStore;
pub use transfer::{transfer, TransferReceipt};
pub use user::User;
