//! Driving port for registration and login use-cases.
//!
//! Inbound adapters call this port without knowing which repository, hasher
//! or token signer sits behind it, so handler tests can substitute a double.

use async_trait::async_trait;

use crate::domain::{BearerToken, Error, LoginCredentials};

/// Domain use-case port for account management.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Register a new user.
    ///
    /// Fails with [`crate::domain::ErrorCode::InvalidRequest`] when the login
    /// is already taken.
    async fn register(&self, credentials: &LoginCredentials) -> Result<(), Error>;

    /// Check credentials and issue a bearer token.
    ///
    /// Fails with [`crate::domain::ErrorCode::Unauthorized`] for an unknown
    /// login or a wrong password.
    async fn login(&self, credentials: &LoginCredentials) -> Result<BearerToken, Error>;
}
