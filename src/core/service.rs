//! Bank service
//!
//! This module provides the `BankService` that drives the ledger on top of a
//! persisted registry. Every operation follows the same cycle:
//!
//! 1. Load the registry from the injected [`RegistryStore`]
//! 2. Apply exactly one operation
//! 3. Save the registry, but only if the operation succeeded
//!
//! A rejected operation therefore never reaches the store.

use crate::core::registry::UserRegistry;
use crate::core::traits::RegistryStore;
use crate::core::transfer::TransferReceipt;
use crate::core::user::User;
use crate::types::{AccountId, BankError, Currency, UserId};
use rust_decimal::Decimal;

/// Ledger operations over a registry store
pub struct BankService {
    store: Box<dyn RegistryStore>,
}

impl BankService {
    pub fn new(store: Box<dyn RegistryStore>) -> Self {
        BankService { store }
    }

    /// Run `operation` against the stored registry and persist the result
    fn mutate<T, F>(&self, operation: F) -> Result<T, BankError>
    where
        F: FnOnce(&mut UserRegistry) -> Result<T, BankError>,
    {
        let mut registry = self.store.load()?;
        let value = operation(&mut registry)?;
        self.store.save(&registry)?;
        Ok(value)
    }

    /// Register a new user
    ///
    /// # Returns
    ///
    /// The ID assigned to the user.
    pub fn register(&self, username: &str, surname: &str) -> Result<UserId, BankError> {
        let id = self.mutate(|registry| registry.register(username, surname))?;
        tracing::info!(user = id, "registered user");
        Ok(id)
    }

    /// Look up a user to greet them
    ///
    /// There are no credentials; a user exists or it does not.
    pub fn login(&self, user_id: UserId) -> Result<User, BankError> {
        let user = self.user(user_id)?;
        tracing::info!(user = user_id, "login");
        Ok(user)
    }

    /// Snapshot of a user and their accounts
    pub fn user(&self, user_id: UserId) -> Result<User, BankError> {
        let registry = self.store.load()?;
        registry.user(user_id).cloned()
    }

    /// Open an account for an existing user
    pub fn create_account(
        &self,
        user_id: UserId,
        account_id: AccountId,
        currency: Currency,
        opening_balance: Decimal,
    ) -> Result<(), BankError> {
        self.mutate(|registry| {
            registry
                .user_mut(user_id)?
                .create_account(account_id, currency, opening_balance)
                .map(|_| ())
        })?;
        tracing::info!(user = user_id, account = account_id, %currency, "created account");
        Ok(())
    }

    /// Deposit into one of a user's accounts
    ///
    /// When `currency` is `None` the account's own currency is used.
    ///
    /// # Returns
    ///
    /// The new account balance.
    pub fn deposit(
        &self,
        user_id: UserId,
        account_id: AccountId,
        amount: Decimal,
        currency: Option<Currency>,
    ) -> Result<Decimal, BankError> {
        self.mutate(|registry| {
            let user = registry.user_mut(user_id)?;
            let currency = resolve_currency(user, account_id, currency)?;
            user.deposit(account_id, amount, currency)
        })
        .inspect_err(|e| tracing::debug!(user = user_id, account = account_id, "deposit rejected: {}", e))
    }

    /// Withdraw from one of a user's accounts
    ///
    /// When `currency` is `None` the account's own currency is used.
    ///
    /// # Returns
    ///
    /// The new account balance.
    pub fn withdraw(
        &self,
        user_id: UserId,
        account_id: AccountId,
        amount: Decimal,
        currency: Option<Currency>,
    ) -> Result<Decimal, BankError> {
        self.mutate(|registry| {
            let user = registry.user_mut(user_id)?;
            let currency = resolve_currency(user, account_id, currency)?;
            user.withdraw(account_id, amount, currency)
        })
        .inspect_err(|e| tracing::debug!(user = user_id, account = account_id, "withdrawal rejected: {}", e))
    }

    /// Transfer between two accounts of the same user
    ///
    /// When `currency` is `None` the source account's currency is used.
    pub fn transfer(
        &self,
        user_id: UserId,
        from: AccountId,
        to: AccountId,
        amount: Decimal,
        currency: Option<Currency>,
    ) -> Result<TransferReceipt, BankError> {
        self.mutate(|registry| {
            let user = registry.user_mut(user_id)?;
            let currency = resolve_currency(user, from, currency)?;
            user.transfer(from, to, amount, currency)
        })
        .inspect_err(|e| tracing::debug!(user = user_id, from, to, "transfer rejected: {}", e))
    }
}

fn resolve_currency(
    user: &User,
    account_id: AccountId,
    currency: Option<Currency>,
) -> Result<Currency, BankError> {
    match currency {
        Some(currency) => Ok(currency),
        None => Ok(user.account(account_id)?.currency()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ErrorKind;
    use std::cell::{Cell, RefCell};
    use std::io::Write;
    use std::rc::Rc;
    use std::sync::{Arc, Mutex};
    use tracing::Level;

    /// In-memory store that counts saves
    #[derive(Default)]
    struct MemoryStore {
        registry: RefCell<UserRegistry>,
        saves: Cell<usize>,
    }

    impl RegistryStore for Rc<MemoryStore> {
        fn load(&self) -> Result<UserRegistry, BankError> {
            Ok(self.registry.borrow().clone())
        }

        fn save(&self, registry: &UserRegistry) -> Result<(), BankError> {
            *self.registry.borrow_mut() = registry.clone();
            self.saves.set(self.saves.get() + 1);
            Ok(())
        }
    }

    fn service() -> (BankService, Rc<MemoryStore>) {
        let store = Rc::new(MemoryStore::default());
        (BankService::new(Box::new(Rc::clone(&store))), store)
    }

    /// Log sink shared with the test body
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` with a subscriber at `level` and return what it logged
    fn logs_at(level: Level, f: impl FnOnce()) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = logs.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    fn rejected_operations(service: &BankService, user: UserId) {
        assert!(service.deposit(user, 1, Decimal::ZERO, None).is_err());
        assert!(service.withdraw(user, 1, Decimal::ONE_HUNDRED, None).is_err());
        assert!(service.transfer(user, 1, 1, Decimal::ONE, None).is_err());
    }

    #[test]
    fn test_full_flow_is_persisted() {
        let (service, store) = service();

        let user = service.register("Ada", "Lovelace").unwrap();
        service
            .create_account(user, 1, Currency::Usd, Decimal::new(5000, 1))
            .unwrap();
        service
            .create_account(user, 2, Currency::Usd, Decimal::ZERO)
            .unwrap();
        service
            .deposit(user, 1, Decimal::new(2000, 1), Some(Currency::Usd))
            .unwrap();
        service.withdraw(user, 1, Decimal::new(1000, 1), None).unwrap();
        let receipt = service
            .transfer(user, 1, 2, Decimal::new(1500, 1), None)
            .unwrap();

        assert_eq!(receipt.source_balance, Decimal::new(4500, 1));
        let stored = store.registry.borrow();
        let stored_user = stored.user(user).unwrap();
        assert_eq!(stored_user.account(1).unwrap().balance(), Decimal::new(4500, 1));
        assert_eq!(stored_user.account(2).unwrap().balance(), Decimal::new(1500, 1));
        assert_eq!(store.saves.get(), 6);
    }

    #[test]
    fn test_rejected_operation_is_not_saved() {
        let (service, store) = service();
        let user = service.register("Ada", "Lovelace").unwrap();
        service
            .create_account(user, 1, Currency::Usd, Decimal::TEN)
            .unwrap();
        let saves_before = store.saves.get();

        let err = service
            .withdraw(user, 1, Decimal::ONE_HUNDRED, None)
            .unwrap_err();

        assert!(matches!(err, BankError::InsufficientFunds { .. }));
        assert_eq!(store.saves.get(), saves_before);
        assert_eq!(service.user(user).unwrap().account(1).unwrap().balance(), Decimal::TEN);
    }

    #[test]
    fn test_rejections_are_quiet_at_warn_level() {
        let (service, _) = service();
        let user = service.register("Ada", "Lovelace").unwrap();
        service
            .create_account(user, 1, Currency::Usd, Decimal::TEN)
            .unwrap();

        let quiet = logs_at(Level::WARN, || rejected_operations(&service, user));
        let verbose = logs_at(Level::DEBUG, || rejected_operations(&service, user));

        assert_eq!(quiet, "");
        assert!(verbose.contains("deposit rejected"));
        assert!(verbose.contains("withdrawal rejected"));
        assert!(verbose.contains("transfer rejected"));
    }

    #[test]
    fn test_explicit_currency_must_match() {
        let (service, _) = service();
        let user = service.register("Ada", "Lovelace").unwrap();
        service
            .create_account(user, 1, Currency::Usd, Decimal::ZERO)
            .unwrap();

        let err = service
            .deposit(user, 1, Decimal::ONE, Some(Currency::Eur))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_unknown_user_and_account() {
        let (service, _) = service();
        let user = service.register("Ada", "Lovelace").unwrap();

        assert_eq!(service.login(99).unwrap_err(), BankError::user_not_found(99));
        assert_eq!(
            service.deposit(user, 5, Decimal::ONE, None).unwrap_err(),
            BankError::account_not_found(user, 5)
        );
        assert_eq!(
            service
                .create_account(99, 1, Currency::Usd, Decimal::ZERO)
                .unwrap_err()
                .kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_duplicate_account_rejected() {
        let (service, _) = service();
        let user = service.register("Ada", "Lovelace").unwrap();
        service
            .create_account(user, 1, Currency::Usd, Decimal::ZERO)
            .unwrap();

        let err = service
            .create_account(user, 1, Currency::Eur, Decimal::ZERO)
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Duplicate);
    }

    #[test]
    fn test_login_returns_user() {
        let (service, _) = service();
        let id = service.register("Grace", "Hopper").unwrap();

        let user = service.login(id).unwrap();

        assert_eq!(user.username, "Grace");
        assert_eq!(user.surname, "Hopper");
    }
}
