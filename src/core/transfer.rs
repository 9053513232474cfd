//! Transfers between two accounts
//!
//! A transfer is a withdrawal on the source and a deposit on the destination
//! performed as one logical action. Every check for both sides runs before
//! either account is touched, so a rejected transfer changes nothing.

use crate::core::account::{validate_amount, Account};
use crate::types::{AccountId, BankError, Currency, TransactionKind};
use rust_decimal::Decimal;
use std::fmt;

/// Outcome of a completed transfer
#[derive(Debug, Clone, PartialEq)]
pub struct TransferReceipt {
    pub source: AccountId,
    pub destination: AccountId,
    pub amount: Decimal,
    pub currency: Currency,
    /// Source balance after the transfer
    pub source_balance: Decimal,
    /// Destination balance after the transfer
    pub destination_balance: Decimal,
}

impl fmt::Display for TransferReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transfer completed. {} {} from account {} to account {}",
            self.amount, self.currency, self.source, self.destination
        )
    }
}

/// Move `amount` from `source` to `destination`
///
/// Both accounts must hold `currency`; no conversion takes place.
///
/// # Errors
///
/// Returns an error, leaving both accounts unchanged, if:
/// - `amount` is zero or negative
/// - either account is in a different currency
/// - `source` holds less than `amount`
/// - the destination balance would overflow
/// - either history has run out of transaction IDs
pub fn transfer(
    source: &mut Account,
    destination: &mut Account,
    amount: Decimal,
    currency: Currency,
) -> Result<TransferReceipt, BankError> {
    validate_amount(amount, "transfer")?;
    source.ensure_currency(currency)?;
    destination.ensure_currency(currency)?;

    let source_balance = source.debited_balance(amount, "transfer")?;
    let destination_balance = destination.credited_balance(amount, "transfer")?;
    let source_tx = source.next_transaction_id("transfer")?;
    let destination_tx = destination.next_transaction_id("transfer")?;

    // Validation is complete; from here on both sides are applied.
    source.record(
        source_tx,
        TransactionKind::TransferOut,
        amount,
        Some(destination.id()),
        source_balance,
    );
    destination.record(
        destination_tx,
        TransactionKind::TransferIn,
        amount,
        Some(source.id()),
        destination_balance,
    );

    tracing::debug!(
        source = source.id(),
        destination = destination.id(),
        %amount,
        %currency,
        "transfer"
    );

    Ok(TransferReceipt {
        source: source.id(),
        destination: destination.id(),
        amount,
        currency,
        source_balance,
        destination_balance,
    })
}
