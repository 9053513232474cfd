//! Transaction-related types for the bank ledger
//!
//! This module defines identifiers, transaction kinds and the immutable
//! transaction record that accounts append to their history.

use super::currency::Currency;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// User identifier
pub type UserId = u32;

/// Account identifier, unique within one user
pub type AccountId = u32;

/// Transaction identifier
///
/// 1-based position of the record within its account's history.
pub type TransactionId = u32;

/// Kinds of balance-changing events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Funds credited to the account
    Deposit,

    /// Funds debited from the account
    Withdrawal,

    /// Credit side of a transfer from another account
    TransferIn,

    /// Debit side of a transfer to another account
    TransferOut,
}

impl TransactionKind {
    /// Stable lowercase name, as written to the data file
    pub const fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdrawal => "withdrawal",
            TransactionKind::TransferIn => "transfer_in",
            TransactionKind::TransferOut => "transfer_out",
        }
    }

    /// Whether this kind increases the balance
    pub const fn is_credit(self) -> bool {
        matches!(self, TransactionKind::Deposit | TransactionKind::TransferIn)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single recorded monetary event
///
/// Records are created by the owning account when an operation succeeds and
/// are never modified afterwards; accounts only hand out shared references.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Sequence number within the account history, starting at 1
    pub id: TransactionId,

    /// What kind of event this was
    pub kind: TransactionKind,

    /// Amount moved, always positive
    pub amount: Decimal,

    /// Currency of the amount (equal to the account currency)
    pub currency: Currency,

    /// When the event was recorded
    pub timestamp: DateTime<Utc>,

    /// Account balance right after this event
    pub balance_after: Decimal,

    /// Other side of a transfer, `None` for deposits and withdrawals
    pub counterparty: Option<AccountId>,
}

impl Transaction {
    /// Human-readable one-line description used in summaries
    pub fn detail(&self) -> String {
        let mut line = format!(
            "#{} {} {} {}",
            self.id, self.kind, self.amount, self.currency
        );
        match (self.kind, self.counterparty) {
            (TransactionKind::TransferOut, Some(to)) => {
                line.push_str(&format!(" to account {}", to))
            }
            (TransactionKind::TransferIn, Some(from)) => {
                line.push_str(&format!(" from account {}", from))
            }
            _ => {}
        }
        line.push_str(&format!(
            ", balance {} at {}",
            self.balance_after,
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        line
    }
}
