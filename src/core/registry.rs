//! User registry
//!
//! The registry is the complete set of users known to the bank. It is the
//! unit that gets loaded from and saved to a [`RegistryStore`].
//!
//! [`RegistryStore`]: crate::core::traits::RegistryStore

use crate::core::user::User;
use crate::types::{BankError, UserId};
use std::collections::BTreeMap;

/// All users keyed by ID
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserRegistry {
    users: BTreeMap<UserId, User>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new user and return the assigned ID
    ///
    /// IDs are handed out as one more than the highest existing ID.
    pub fn register(
        &mut self,
        username: impl Into<String>,
        surname: impl Into<String>,
    ) -> Result<UserId, BankError> {
        let id = match self.users.keys().next_back() {
            Some(&max) => max
                .checked_add(1)
                .ok_or_else(|| BankError::invalid_record("user ID space exhausted"))?,
            None => 1,
        };
        self.insert(User::new(id, username, surname))?;
        Ok(id)
    }

    /// Add an existing user
    ///
    /// # Errors
    ///
    /// Returns `DuplicateUser` if the ID is already taken.
    pub fn insert(&mut self, user: User) -> Result<(), BankError> {
        let id = user.id();
        if self.users.contains_key(&id) {
            return Err(BankError::DuplicateUser { user: id });
        }
        self.users.insert(id, user);
        Ok(())
    }

    pub fn user(&self, id: UserId) -> Result<&User, BankError> {
        self.users.get(&id).ok_or_else(|| BankError::user_not_found(id))
    }

    pub fn user_mut(&mut self, id: UserId) -> Result<&mut User, BankError> {
        self.users
            .get_mut(&id)
            .ok_or_else(|| BankError::user_not_found(id))
    }

    /// Users in ascending ID order
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
