//! User module
//!
//! A `User` owns a set of accounts keyed by account ID and offers
//! account-level operations by ID, balance aggregation and a printable
//! summary report.

use crate::core::account::Account;
use crate::core::transfer::{transfer, TransferReceipt};
use crate::types::{AccountId, BankError, Currency, UserId};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::io::Write;

/// Account owner
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    pub username: String,
    pub surname: String,
    /// Accounts ordered by ID
    accounts: BTreeMap<AccountId, Account>,
}

impl User {
    /// Create a user with no accounts
    pub fn new(id: UserId, username: impl Into<String>, surname: impl Into<String>) -> Self {
        User {
            id,
            username: username.into(),
            surname: surname.into(),
            accounts: BTreeMap::new(),
        }
    }

    /// ID the user is registered under
    ///
    /// Fixed at construction so it always matches the registry key:
    ///
    /// ```compile_fail
    /// let mut user = rust_bank_ledger::User::new(1, "Ada", "Lovelace");
    /// user.id = 7;
    /// ```
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Attach an account
    ///
    /// # Errors
    ///
    /// Returns `DuplicateAccount` if an account with the same ID exists.
    pub fn add_account(&mut self, account: Account) -> Result<(), BankError> {
        let account_id = account.id();
        if self.accounts.contains_key(&account_id) {
            return Err(BankError::DuplicateAccount {
                user: self.id,
                account: account_id,
            });
        }
        self.accounts.insert(account_id, account);
        Ok(())
    }

    /// Open a new account for this user
    pub fn create_account(
        &mut self,
        account_id: AccountId,
        currency: Currency,
        opening_balance: Decimal,
    ) -> Result<&Account, BankError> {
        let account = Account::with_opening_balance(account_id, currency, opening_balance)?;
        self.add_account(account)?;
        self.account(account_id)
    }

    pub fn account(&self, account_id: AccountId) -> Result<&Account, BankError> {
        self.accounts
            .get(&account_id)
            .ok_or_else(|| BankError::account_not_found(self.id, account_id))
    }

    pub fn account_mut(&mut self, account_id: AccountId) -> Result<&mut Account, BankError> {
        let user = self.id;
        self.accounts
            .get_mut(&account_id)
            .ok_or_else(|| BankError::account_not_found(user, account_id))
    }

    /// Accounts in ascending ID order
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn deposit(
        &mut self,
        account_id: AccountId,
        amount: Decimal,
        currency: Currency,
    ) -> Result<Decimal, BankError> {
        self.account_mut(account_id)?.deposit(amount, currency)
    }

    pub fn withdraw(
        &mut self,
        account_id: AccountId,
        amount: Decimal,
        currency: Currency,
    ) -> Result<Decimal, BankError> {
        self.account_mut(account_id)?.withdraw(amount, currency)
    }

    /// Transfer between two accounts of this user
    ///
    /// # Errors
    ///
    /// - `SameAccountTransfer` if `from` and `to` are equal
    /// - `AccountNotFound` if either account is missing
    /// - any error from [`transfer`]; neither account is changed in that case
    pub fn transfer(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Decimal,
        currency: Currency,
    ) -> Result<TransferReceipt, BankError> {
        if from == to {
            return Err(BankError::SameAccountTransfer { account: from });
        }
        self.account(to)?;

        // Take the source out so both sides can be borrowed mutably.
        let mut source = self
            .accounts
            .remove(&from)
            .ok_or_else(|| BankError::account_not_found(self.id, from))?;
        let result = match self.accounts.get_mut(&to) {
            Some(destination) => transfer(&mut source, destination, amount, currency),
            None => Err(BankError::account_not_found(self.id, to)),
        };
        self.accounts.insert(from, source);
        result
    }

    /// Sum of all account balances
    ///
    /// Balances are added as plain numbers regardless of currency.
    pub fn total_balance(&self) -> Result<Decimal, BankError> {
        self.accounts
            .values()
            .try_fold(Decimal::ZERO, |total, account| {
                total
                    .checked_add(account.balance())
                    .ok_or_else(|| BankError::arithmetic_overflow("total_balance", account.id()))
            })
    }

    /// Sum of balances grouped by currency
    pub fn balances_by_currency(&self) -> Result<BTreeMap<Currency, Decimal>, BankError> {
        let mut balances = BTreeMap::new();
        for account in self.accounts.values() {
            let entry = balances.entry(account.currency()).or_insert(Decimal::ZERO);
            *entry = entry
                .checked_add(account.balance())
                .ok_or_else(|| BankError::arithmetic_overflow("balances_by_currency", account.id()))?;
        }
        Ok(balances)
    }

    /// Write the human-readable report for this user
    pub fn write_summary(&self, output: &mut dyn Write) -> Result<(), BankError> {
        writeln!(output, "=== User report ===")?;
        writeln!(output, "Name: {} {}", self.username, self.surname)?;
        writeln!(output, "User ID: {}", self.id)?;
        writeln!(output, "Total balance: {}", self.total_balance()?)?;
        writeln!(output, "Balance by currency:")?;
        for (currency, balance) in self.balances_by_currency()? {
            writeln!(output, "  {}: {}", currency, balance)?;
        }

        writeln!(output)?;
        writeln!(output, "--- Accounts ---")?;
        for account in self.accounts.values() {
            writeln!(
                output,
                "Account ID: {}, balance: {} {}",
                account.id(),
                account.balance(),
                account.currency()
            )?;
            writeln!(output, "Transactions:")?;
            if account.transactions().is_empty() {
                writeln!(output, "  (No transactions)")?;
            } else {
                for tx in account.transactions() {
                    writeln!(output, "  {}", tx.detail())?;
                }
            }
            writeln!(output, "{}", "-".repeat(30))?;
        }
        Ok(())
    }

    /// Print the summary report to stdout
    pub fn print_summary(&self) -> Result<(), BankError> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        self.write_summary(&mut handle)
    }
}
