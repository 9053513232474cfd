//! Bank Ledger Library
//! # Overview
//!
//! This library provides a small in-memory banking ledger: users own
//! accounts, accounts accept deposits, withdrawals and transfers in a single
//! tagged currency, and the whole user registry can be persisted as JSON.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Currency, Transaction, errors)
//! - [`cli`] - CLI arguments parsing and command dispatch
//! - [`core`] - Business logic components:
//!   - [`core::account`] - Balance, validation and transaction history
//!   - [`core::transfer`] - All-or-nothing transfers between accounts
//!   - [`core::user`] - Account ownership, totals and summary report
//!   - [`core::registry`] - The set of registered users
//!   - [`core::service`] - Load, apply, save orchestration
//! - [`io`] - JSON persistence with sync and async file stores
//! - [`logging`] - tracing subscriber setup
//!
//! # Transaction Types
//!
//! - **Deposit**: Credit funds to an account
//! - **Withdrawal**: Debit funds from an account (requires sufficient balance)
//! - **TransferOut** / **TransferIn**: The two sides of a transfer
//!
//! # Invariants
//!
//! - Balances never go negative
//! - Every operation uses the account's currency; there is no conversion
//! - Rejected operations leave balances and histories unchanged

pub mod cli;
pub mod core;
pub mod io;
pub mod logging;
pub mod types;

pub use self::core::{Account, BankService, RegistryStore, TransferReceipt, User, UserRegistry};
pub use self::types::{BankError, Currency, ErrorKind, Transaction, TransactionKind};
