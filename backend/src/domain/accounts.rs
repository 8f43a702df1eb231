//! Registration and login use-cases.
//!
//! [`AccountManager`] implements the [`AccountService`] driving port on top of
//! the user repository, password hasher and token service ports.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::ports::{
    AccountService, PasswordHasher, TokenService, UserPersistenceError, UserRepository,
};
use super::{BearerToken, Error, LoginCredentials, User};

const DUPLICATE_USER: &str = "User already exists";
const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Account use-case service backed by injected ports.
#[derive(Clone)]
pub struct AccountManager {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
}

impl AccountManager {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Duplicate { .. } => Error::invalid_request(DUPLICATE_USER),
        UserPersistenceError::Unavailable { message } => {
            Error::internal(format!("user repository unavailable: {message}"))
        }
    }
}

#[async_trait]
impl AccountService for AccountManager {
    async fn register(&self, credentials: &LoginCredentials) -> Result<(), Error> {
        let login = credentials.login();
        if self.users.exists(login).await.map_err(map_persistence_error)? {
            return Err(Error::invalid_request(DUPLICATE_USER));
        }

        let hash = self.hasher.hash(credentials.password()).await.map_err(|error| {
            warn!(%error, "password hashing failed");
            Error::internal("Failed to hash password")
        })?;

        // `put` re-checks uniqueness atomically, so a concurrent registration
        // of the same login still surfaces as a duplicate here.
        self.users
            .put(User::new(login.clone(), hash))
            .await
            .map_err(map_persistence_error)?;
        info!(login = %login, "user registered");
        Ok(())
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<BearerToken, Error> {
        let Some(user) = self
            .users
            .get(credentials.login())
            .await
            .map_err(map_persistence_error)?
        else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        // An unusable stored hash cannot prove the password, so it is treated
        // like a mismatch.
        let matches = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .await
            .map_err(|error| {
                warn!(%error, login = %user.login(), "stored password hash unusable");
                Error::unauthorized(INVALID_CREDENTIALS)
            })?;
        if !matches {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        self.tokens.issue(user.login()).map_err(|error| {
            warn!(%error, "token signing failed");
            Error::internal("Failed to generate token")
        })
    }
}
