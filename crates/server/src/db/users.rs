//! User repository.

use driftline_core::{Email, UserId};

use crate::models::{User, UserDraft, UserPatch};
use crate::store::Store;

/// Repository for user accounts.
pub struct UserRepository<'a> {
    store: &'a Store,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// All users, in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<User> {
        self.store.users().all()
    }

    /// User by id.
    #[must_use]
    pub fn get(&self, id: &UserId) -> Option<User> {
        self.store.users().find_by_id(id)
    }

    /// User by exact (case-sensitive) email match.
    #[must_use]
    pub fn get_by_email(&self, email: &Email) -> Option<User> {
        self.store.users().find_one(|u| &u.email == email)
    }

    /// Create a user. Email uniqueness is the caller's responsibility
    /// (the register flow checks [`Self::get_by_email`] first).
    pub fn create(&self, draft: UserDraft) -> User {
        self.store.users().create(draft)
    }

    /// Apply a partial update; `None` when the user is unknown.
    pub fn update(&self, id: &UserId, patch: UserPatch) -> Option<User> {
        self.store.users().update(id, patch)
    }
}
