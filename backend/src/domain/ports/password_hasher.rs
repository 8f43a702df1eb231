//! Driven port for salted adaptive password hashing.
use async_trait::async_trait;

use super::define_port_error;
use crate::domain::PasswordHash;

define_port_error! {
    /// Hashing failures. A mismatched password is not an error.
    pub enum PasswordHashError {
        /// The password could not be hashed.
        Hash { message: String } => "password hashing failed: {message}",
        /// The stored hash could not be parsed or checked.
        Verify { message: String } => "password verification failed: {message}",
    }
}

/// Hashes new passwords and checks candidates against stored hashes.
///
/// Implementations are expected to be CPU heavy and should keep that work
/// off the async executor.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError>;

    /// Return `Ok(true)` when `password` matches `hash`.
    async fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError>;
}
