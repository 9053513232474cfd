//! Account module
//!
//! This module provides the `Account` struct: a single-currency balance with
//! an append-only transaction history.
//!
//! The Account is responsible for:
//! - Validating amounts and currencies of incoming operations
//! - Keeping the balance non-negative
//! - Recording one transaction per successful balance change
//!
//! All balance arithmetic is checked. A rejected operation leaves both the
//! balance and the history untouched.

use crate::types::{AccountId, BankError, Currency, Transaction, TransactionId, TransactionKind};
use chrono::Utc;
use rust_decimal::Decimal;

/// A balance held in one currency
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    id: AccountId,
    balance: Decimal,
    currency: Currency,
    transactions: Vec<Transaction>,
}

/// Reject zero and negative amounts
pub(crate) fn validate_amount(amount: Decimal, operation: &str) -> Result<(), BankError> {
    if amount <= Decimal::ZERO {
        return Err(BankError::invalid_amount(amount, operation));
    }
    Ok(())
}

impl Account {
    /// Create an empty account
    pub fn new(id: AccountId, currency: Currency) -> Self {
        Account {
            id,
            balance: Decimal::ZERO,
            currency,
            transactions: Vec::new(),
        }
    }

    /// Create an account that starts with `balance`
    ///
    /// The opening balance is not recorded as a transaction.
    ///
    /// # Errors
    ///
    /// Returns `NegativeBalance` if `balance` is below zero.
    pub fn with_opening_balance(
        id: AccountId,
        currency: Currency,
        balance: Decimal,
    ) -> Result<Self, BankError> {
        Self::restore(id, currency, balance, Vec::new())
    }

    /// Rebuild an account from persisted state
    ///
    /// The history is taken as-is; only the balance invariant is checked.
    pub fn restore(
        id: AccountId,
        currency: Currency,
        balance: Decimal,
        transactions: Vec<Transaction>,
    ) -> Result<Self, BankError> {
        if balance < Decimal::ZERO {
            return Err(BankError::NegativeBalance {
                account: id,
                balance,
            });
        }
        Ok(Account {
            id,
            balance,
            currency,
            transactions,
        })
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Current balance
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Recorded history, oldest first
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Deposit funds into the account
    ///
    /// # Returns
    ///
    /// The balance after the deposit.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `amount` is zero or negative
    /// - `currency` differs from the account currency
    /// - the new balance would overflow
    pub fn deposit(&mut self, amount: Decimal, currency: Currency) -> Result<Decimal, BankError> {
        validate_amount(amount, "deposit")?;
        self.ensure_currency(currency)?;
        let new_balance = self.credited_balance(amount, "deposit")?;
        let id = self.next_transaction_id("deposit")?;

        tracing::debug!(account = self.id, %amount, %currency, "deposit");
        Ok(self.record(id, TransactionKind::Deposit, amount, None, new_balance))
    }

    /// Withdraw funds from the account
    ///
    /// # Returns
    ///
    /// The balance after the withdrawal.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `amount` is zero or negative
    /// - `currency` differs from the account currency
    /// - `amount` exceeds the current balance
    pub fn withdraw(&mut self, amount: Decimal, currency: Currency) -> Result<Decimal, BankError> {
        validate_amount(amount, "withdraw")?;
        self.ensure_currency(currency)?;
        let new_balance = self.debited_balance(amount, "withdraw")?;
        let id = self.next_transaction_id("withdraw")?;

        tracing::debug!(account = self.id, %amount, %currency, "withdraw");
        Ok(self.record(id, TransactionKind::Withdrawal, amount, None, new_balance))
    }

    pub(crate) fn ensure_currency(&self, currency: Currency) -> Result<(), BankError> {
        if currency != self.currency {
            return Err(BankError::currency_mismatch(self.id, self.currency, currency));
        }
        Ok(())
    }

    /// Balance after adding `amount`, without applying it
    pub(crate) fn credited_balance(
        &self,
        amount: Decimal,
        operation: &str,
    ) -> Result<Decimal, BankError> {
        self.balance
            .checked_add(amount)
            .ok_or_else(|| BankError::arithmetic_overflow(operation, self.id))
    }

    /// Balance after removing `amount`, without applying it
    pub(crate) fn debited_balance(
        &self,
        amount: Decimal,
        operation: &str,
    ) -> Result<Decimal, BankError> {
        if amount > self.balance {
            return Err(BankError::insufficient_funds(self.id, self.balance, amount));
        }
        self.balance
            .checked_sub(amount)
            .ok_or_else(|| BankError::arithmetic_overflow(operation, self.id))
    }

    /// ID for the next history entry, one past the latest
    pub(crate) fn next_transaction_id(&self, operation: &str) -> Result<TransactionId, BankError> {
        match self.transactions.last() {
            Some(last) => last
                .id
                .checked_add(1)
                .ok_or_else(|| BankError::arithmetic_overflow(operation, self.id)),
            None => Ok(1),
        }
    }

    /// Set the new balance and append the matching history entry
    pub(crate) fn record(
        &mut self,
        id: TransactionId,
        kind: TransactionKind,
        amount: Decimal,
        counterparty: Option<AccountId>,
        new_balance: Decimal,
    ) -> Decimal {
        self.balance = new_balance;
        self.transactions.push(Transaction {
            id,
            kind,
            amount,
            currency: self.currency,
            timestamp: Utc::now(),
            balance_after: new_balance,
            counterparty,
        });
        new_balance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ErrorKind;
    use rstest::rstest;

    fn usd_account(balance: i64) -> Account {
        Account::with_opening_balance(1, Currency::Usd, Decimal::new(balance, 1)).unwrap()
    }

    #[test]
    fn test_new_account_is_empty() {
        let account = Account::new(7, Currency::Eur);
        assert_eq!(account.id(), 7);
        assert_eq!(account.currency(), Currency::Eur);
        assert_eq!(account.balance(), Decimal::ZERO);
        assert!(account.transactions().is_empty());
    }

    #[test]
    fn test_opening_balance_is_not_a_transaction() {
        let account = usd_account(5000);
        assert_eq!(account.balance(), Decimal::new(5000, 1));
        assert!(account.transactions().is_empty());
    }

    #[test]
    fn test_negative_opening_balance_rejected() {
        let err = Account::with_opening_balance(1, Currency::Usd, Decimal::new(-1, 0)).unwrap_err();
        assert!(matches!(err, BankError::NegativeBalance { account: 1, .. }));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_deposit_increases_balance_and_records_transaction() {
        let mut account = usd_account(5000);

        let balance = account.deposit(Decimal::new(2000, 1), Currency::Usd).unwrap();

        assert_eq!(balance, Decimal::new(7000, 1));
        assert_eq!(account.balance(), Decimal::new(7000, 1));
        let tx = &account.transactions()[0];
        assert_eq!(tx.id, 1);
        assert_eq!(tx.kind, TransactionKind::Deposit);
        assert_eq!(tx.amount, Decimal::new(2000, 1));
        assert_eq!(tx.currency, Currency::Usd);
        assert_eq!(tx.balance_after, Decimal::new(7000, 1));
        assert_eq!(tx.counterparty, None);
    }

    #[test]
    fn test_withdraw_decreases_balance_and_records_transaction() {
        let mut account = usd_account(7000);

        let balance = account.withdraw(Decimal::new(1000, 1), Currency::Usd).unwrap();

        assert_eq!(balance, Decimal::new(6000, 1));
        let tx = &account.transactions()[0];
        assert_eq!(tx.kind, TransactionKind::Withdrawal);
        assert_eq!(tx.balance_after, Decimal::new(6000, 1));
    }

    #[test]
    fn test_withdraw_entire_balance() {
        let mut account = usd_account(1000);
        let balance = account.withdraw(Decimal::new(1000, 1), Currency::Usd).unwrap();
        assert_eq!(balance, Decimal::ZERO);
    }

    #[test]
    fn test_transaction_ids_follow_history_order() {
        let mut account = usd_account(0);
        account.deposit(Decimal::ONE, Currency::Usd).unwrap();
        account.deposit(Decimal::TWO, Currency::Usd).unwrap();
        account.withdraw(Decimal::ONE, Currency::Usd).unwrap();

        let ids: Vec<u32> = account.transactions().iter().map(|tx| tx.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(account.transactions()[2].balance_after, Decimal::TWO);
    }

    #[rstest]
    #[case::zero(Decimal::ZERO)]
    #[case::negative(Decimal::new(-100, 2))]
    fn test_non_positive_amounts_rejected(#[case] amount: Decimal) {
        let mut account = usd_account(5000);

        let deposit = account.deposit(amount, Currency::Usd).unwrap_err();
        let withdraw = account.withdraw(amount, Currency::Usd).unwrap_err();

        assert!(matches!(deposit, BankError::InvalidAmount { .. }));
        assert!(matches!(withdraw, BankError::InvalidAmount { .. }));
        assert_eq!(account.balance(), Decimal::new(5000, 1));
        assert!(account.transactions().is_empty());
    }

    #[rstest]
    #[case::eur(Currency::Eur)]
    #[case::uah(Currency::Uah)]
    fn test_currency_mismatch_rejected_without_mutation(#[case] currency: Currency) {
        let mut account = usd_account(5000);

        let deposit = account.deposit(Decimal::ONE, currency).unwrap_err();
        let withdraw = account.withdraw(Decimal::ONE, currency).unwrap_err();

        assert_eq!(
            deposit,
            BankError::currency_mismatch(1, Currency::Usd, currency)
        );
        assert_eq!(deposit.kind(), ErrorKind::Validation);
        assert!(matches!(withdraw, BankError::CurrencyMismatch { .. }));
        assert_eq!(account.balance(), Decimal::new(5000, 1));
        assert!(account.transactions().is_empty());
    }

    #[test]
    fn test_withdraw_more_than_balance_rejected() {
        let mut account = usd_account(500);

        let err = account.withdraw(Decimal::new(501, 1), Currency::Usd).unwrap_err();

        assert_eq!(
            err,
            BankError::insufficient_funds(1, Decimal::new(500, 1), Decimal::new(501, 1))
        );
        assert_eq!(account.balance(), Decimal::new(500, 1));
        assert!(account.transactions().is_empty());
    }

    #[test]
    fn test_deposit_overflow_rejected() {
        let mut account = Account::with_opening_balance(1, Currency::Usd, Decimal::MAX).unwrap();

        let err = account.deposit(Decimal::ONE, Currency::Usd).unwrap_err();

        assert!(matches!(err, BankError::ArithmeticOverflow { .. }));
        assert_eq!(account.balance(), Decimal::MAX);
        assert!(account.transactions().is_empty());
    }

    #[test]
    fn test_invalid_amount_checked_before_currency() {
        let mut account = usd_account(5000);
        let err = account.deposit(Decimal::ZERO, Currency::Eur).unwrap_err();
        assert!(matches!(err, BankError::InvalidAmount { .. }));
    }

    #[test]
    fn test_deposit_adds_exact_amount_for_many_values() {
        for cents in [1_i64, 99, 12_345, 1_000_000] {
            let mut account = usd_account(1234);
            let before = account.balance();
            let amount = Decimal::new(cents, 2);
            account.deposit(amount, Currency::Usd).unwrap();
            assert_eq!(account.balance(), before + amount);
        }
    }

    fn history_ending_at(id: TransactionId) -> Vec<Transaction> {
        vec![Transaction {
            id,
            kind: TransactionKind::Deposit,
            amount: Decimal::TEN,
            currency: Currency::Usd,
            timestamp: Utc::now(),
            balance_after: Decimal::TEN,
            counterparty: None,
        }]
    }

    #[test]
    fn test_transaction_ids_continue_after_restored_history() {
        let mut account =
            Account::restore(1, Currency::Usd, Decimal::TEN, history_ending_at(4)).unwrap();

        account.deposit(Decimal::ONE, Currency::Usd).unwrap();

        assert_eq!(account.transactions()[1].id, 5);
    }

    #[test]
    fn test_exhausted_transaction_ids_rejected_without_mutation() {
        let mut account =
            Account::restore(1, Currency::Usd, Decimal::TEN, history_ending_at(u32::MAX)).unwrap();

        let deposit = account.deposit(Decimal::ONE, Currency::Usd).unwrap_err();
        let withdraw = account.withdraw(Decimal::ONE, Currency::Usd).unwrap_err();

        assert!(matches!(deposit, BankError::ArithmeticOverflow { .. }));
        assert!(matches!(withdraw, BankError::ArithmeticOverflow { .. }));
        assert_eq!(account.balance(), Decimal::TEN);
        assert_eq!(account.transactions().len(), 1);
    }
}
