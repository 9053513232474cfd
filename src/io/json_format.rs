//! JSON format handling for the user registry
//!
//! This module centralizes all data-file format concerns, providing:
//! - Record structures mirroring the on-disk JSON layout
//! - Conversion from records to validated domain types
//! - Conversion from domain types back to records
//!
//! All functions are pure (no I/O) for easy testing.
//!
//! Loading is lenient about the shape of older files: amounts may be JSON
//! numbers or strings, timestamps may lack a UTC offset, transaction types
//! may use the `withdraw` / `transfer_to_{id}` / `transfer_from_{id}`
//! spellings, and a missing `balance_after` is rebuilt from the account
//! balance.
//!
//! Files written by the older tool may also hold zero-amount deposits and
//! withdrawals, and may repeat an account ID within one user. Zero-amount
//! entries without `balance_after` are dropped, and for a repeated account ID
//! the first entry wins. Both cases are logged as warnings.

use crate::core::{Account, User, UserRegistry};
use crate::types::{
    AccountId, BankError, Currency, Transaction, TransactionId, TransactionKind, UserId,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// User entry in the data file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: UserId,
    pub username: String,
    pub surname: String,
    #[serde(default)]
    pub accounts: Vec<AccountRecord>,
}

/// Account entry in the data file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub account_id: AccountId,
    pub balance: Decimal,
    pub currency: String,
    #[serde(default)]
    pub transactions: Vec<TransactionRecord>,
}

/// Transaction entry in the data file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub transaction_id: TransactionId,
    pub transaction_type: String,
    pub amount: Decimal,
    pub currency: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub time_stamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance_after: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<AccountId>,
}

/// Accept RFC 3339 or a naive ISO-8601 timestamp taken as UTC
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| format!("invalid timestamp '{}'", raw))
}

/// Parse a stored transaction type and its optional embedded counterparty
pub fn parse_transaction_type(
    value: &str,
) -> Result<(TransactionKind, Option<AccountId>), BankError> {
    let normalized = value.trim().to_lowercase();
    let kind = match normalized.as_str() {
        "deposit" => TransactionKind::Deposit,
        "withdrawal" | "withdraw" => TransactionKind::Withdrawal,
        "transfer_in" => TransactionKind::TransferIn,
        "transfer_out" => TransactionKind::TransferOut,
        other => {
            let (kind, id) = if let Some(id) = other.strip_prefix("transfer_to_") {
                (TransactionKind::TransferOut, id)
            } else if let Some(id) = other.strip_prefix("transfer_from_") {
                (TransactionKind::TransferIn, id)
            } else {
                return Err(BankError::invalid_record(format!(
                    "unknown transaction type '{}'",
                    value
                )));
            };
            let counterparty = id.parse::<AccountId>().map_err(|_| {
                BankError::invalid_record(format!("unknown transaction type '{}'", value))
            })?;
            return Ok((kind, Some(counterparty)));
        }
    };
    Ok((kind, None))
}

/// Convert an AccountRecord to an Account
///
/// Validates the balance, the currency codes and every transaction, and
/// fills in missing `balance_after` values by replaying the history
/// backwards from the stored balance. Zero-amount entries in that older
/// layout are skipped.
pub fn convert_account_record(record: AccountRecord) -> Result<Account, BankError> {
    let currency: Currency = record.currency.parse()?;
    let account_id = record.account_id;

    let mut transactions = Vec::with_capacity(record.transactions.len());
    // Walk newest to oldest so a missing balance_after can be derived from
    // the balance that followed it.
    let mut running = record.balance;
    for tx in record.transactions.into_iter().rev() {
        let (kind, embedded_counterparty) = parse_transaction_type(&tx.transaction_type)?;
        let tx_currency: Currency = tx.currency.parse()?;
        if tx_currency != currency {
            return Err(BankError::invalid_record(format!(
                "transaction {} on account {} is in {} but the account holds {}",
                tx.transaction_id, account_id, tx_currency, currency
            )));
        }
        if tx.amount.is_zero() && tx.balance_after.is_none() {
            tracing::warn!(
                account = account_id,
                transaction = tx.transaction_id,
                "skipping zero-amount {} entry",
                tx.transaction_type
            );
            continue;
        }
        if tx.amount <= Decimal::ZERO {
            return Err(BankError::invalid_record(format!(
                "transaction {} on account {} has non-positive amount {}",
                tx.transaction_id, account_id, tx.amount
            )));
        }

        let balance_after = tx.balance_after.unwrap_or(running);
        let before = if kind.is_credit() {
            balance_after.checked_sub(tx.amount)
        } else {
            balance_after.checked_add(tx.amount)
        };
        running = before.ok_or_else(|| BankError::arithmetic_overflow("load", account_id))?;

        transactions.push(Transaction {
            id: tx.transaction_id,
            kind,
            amount: tx.amount,
            currency: tx_currency,
            timestamp: tx.time_stamp,
            balance_after,
            counterparty: tx.counterparty.or(embedded_counterparty),
        });
    }
    transactions.reverse();

    Account::restore(account_id, currency, record.balance, transactions)
}

/// Convert a UserRecord to a User
///
/// When an account ID appears more than once, the first entry is kept.
pub fn convert_user_record(record: UserRecord) -> Result<User, BankError> {
    let mut user = User::new(record.user_id, record.username, record.surname);
    for account in record.accounts {
        let account = convert_account_record(account)?;
        if user.account(account.id()).is_ok() {
            tracing::warn!(
                user = user.id(),
                account = account.id(),
                "ignoring repeated account entry"
            );
            continue;
        }
        user.add_account(account)?;
    }
    Ok(user)
}

fn account_to_record(account: &Account) -> AccountRecord {
    AccountRecord {
        account_id: account.id(),
        balance: account.balance(),
        currency: account.currency().code().to_string(),
        transactions: account
            .transactions()
            .iter()
            .map(|tx| TransactionRecord {
                transaction_id: tx.id,
                transaction_type: tx.kind.as_str().to_string(),
                amount: tx.amount,
                currency: tx.currency.code().to_string(),
                time_stamp: tx.timestamp,
                balance_after: Some(tx.balance_after),
                counterparty: tx.counterparty,
            })
            .collect(),
    }
}

/// Convert a User to its record form
pub fn user_to_record(user: &User) -> UserRecord {
    UserRecord {
        user_id: user.id(),
        username: user.username.clone(),
        surname: user.surname.clone(),
        accounts: user.accounts().map(account_to_record).collect(),
    }
}

/// Parse a whole data file
///
/// # Errors
///
/// Returns `Serialization` for malformed JSON, `DuplicateUser` for repeated
/// user IDs and a validation or `InvalidRecord`
/// error for data that breaks an account invariant.
pub fn parse_registry(json: &str) -> Result<UserRegistry, BankError> {
    let records: Vec<UserRecord> = serde_json::from_str(json)?;
    let mut registry = UserRegistry::new();
    for record in records {
        registry.insert(convert_user_record(record)?)?;
    }
    Ok(registry)
}

/// Render a registry as pretty-printed JSON
pub fn registry_to_json(registry: &UserRegistry) -> Result<String, BankError> {
    let records: Vec<UserRecord> = registry.users().map(user_to_record).collect();
    Ok(serde_json::to_string_pretty(&records)?)
}
