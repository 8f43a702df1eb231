//! Port abstraction for user storage.
use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{Login, User};

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// A user with the same login is already stored.
        Duplicate { login: String } => "user already exists: {login}",
        /// The backing store could not serve the request.
        Unavailable { message: String } => "user repository unavailable: {message}",
    }
}

/// Storage for registered users keyed by login.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch the user registered under `login`.
    async fn get(&self, login: &Login) -> Result<Option<User>, UserPersistenceError>;

    /// Store a new user.
    ///
    /// Insertion is atomic with the uniqueness check: when `login` is taken
    /// the call fails with [`UserPersistenceError::Duplicate`] and the stored
    /// user is left untouched.
    async fn put(&self, user: User) -> Result<(), UserPersistenceError>;

    /// Report whether `login` is registered.
    async fn exists(&self, login: &Login) -> Result<bool, UserPersistenceError>;
}
