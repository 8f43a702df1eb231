//! Authentication primitives: credentials, bearer tokens and token claims.
//!
//! Inbound payload parsing stays outside the domain; handlers convert raw
//! strings through the constructors here before calling a port.

use std::fmt;

use serde::Serialize;
use zeroize::Zeroizing;

use super::user::{Login, UserValidationError};

/// Domain error returned when credential payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    #[error("login must not be empty")]
    EmptyLogin,
}

impl From<UserValidationError> for LoginValidationError {
    fn from(value: UserValidationError) -> Self {
        match value {
            UserValidationError::EmptyLogin => Self::EmptyLogin,
        }
    }
}

/// Validated credentials used by registration and login.
///
/// ## Invariants
/// - `login` is not blank.
/// - `password` is held in a zeroising buffer and may be empty; there are no
///   complexity rules.
///
/// # Examples
/// ```
/// use geogate::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("alice", "s3cret").unwrap();
/// assert_eq!(creds.login().as_ref(), "alice");
/// assert_eq!(creds.password(), "s3cret");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    login: Login,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw login/password inputs.
    pub fn try_from_parts(login: &str, password: &str) -> Result<Self, LoginValidationError> {
        Ok(Self {
            login: Login::new(login)?,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn login(&self) -> &Login {
        &self.login
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Signed token issued on successful login.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token without the scheme prefix.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Token rendered as `Bearer <token>`, the form returned to clients.
    pub fn to_bearer_string(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// Claims recovered from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenClaims {
    pub username: Login,
}
