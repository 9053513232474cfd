use crate::types::{AccountId, Currency, UserId};
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Manage users, accounts and transfers in a JSON-backed ledger
#[derive(Parser, Debug)]
#[command(name = "bank-ledger")]
#[command(about = "Manage users, accounts and transfers in a JSON-backed ledger", long_about = None)]
pub struct CliArgs {
    /// Path of the JSON data file
    #[arg(
        long = "data-file",
        value_name = "PATH",
        env = "BANK_LEDGER_DATA_FILE",
        default_value = "data/users.json",
        global = true
    )]
    pub data_file: PathBuf,

    /// File I/O implementation to use
    #[arg(
        long = "storage",
        value_name = "STORAGE",
        default_value = "sync",
        global = true,
        help = "Storage I/O: 'sync' for blocking std::fs or 'async' for tokio"
    )]
    pub storage: StorageType,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available registry store implementations
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StorageType {
    Sync,
    Async,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Register a new user
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        surname: String,
    },

    /// Log in as an existing user
    Login {
        #[arg(long = "user-id")]
        user_id: UserId,
    },

    /// Create a bank account for a user
    CreateAccount {
        #[arg(long = "user-id")]
        user_id: UserId,
        #[arg(long = "account-id")]
        account_id: AccountId,
        #[arg(long)]
        currency: Currency,
        #[arg(long = "opening-balance", default_value = "0")]
        opening_balance: Decimal,
    },

    /// Deposit funds into an account
    Deposit {
        #[arg(long = "user-id")]
        user_id: UserId,
        #[arg(long = "account-id")]
        account_id: AccountId,
        #[arg(long, allow_negative_numbers = true)]
        amount: Decimal,
        /// Defaults to the account currency
        #[arg(long)]
        currency: Option<Currency>,
    },

    /// Withdraw funds from an account
    Withdraw {
        #[arg(long = "user-id")]
        user_id: UserId,
        #[arg(long = "account-id")]
        account_id: AccountId,
        #[arg(long, allow_negative_numbers = true)]
        amount: Decimal,
        /// Defaults to the account currency
        #[arg(long)]
        currency: Option<Currency>,
    },

    /// Transfer funds between two accounts of the same user
    Transfer {
        #[arg(long = "user-id")]
        user_id: UserId,
        #[arg(long = "from-id")]
        from_id: AccountId,
        #[arg(long = "to-id")]
        to_id: AccountId,
        #[arg(long, allow_negative_numbers = true)]
        amount: Decimal,
        /// Defaults to the source account currency
        #[arg(long)]
        currency: Option<Currency>,
    },

    /// Print a report of a user's accounts and transactions
    Summary {
        #[arg(long = "user-id")]
        user_id: UserId,
    },
}
