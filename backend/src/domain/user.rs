//! Registered user records.

use std::fmt;

use serde::Serialize;

/// Validation errors for [`Login`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("login must not be empty")]
    EmptyLogin,
}

/// Unique user key chosen at registration.
///
/// The value is stored exactly as supplied; only blank logins are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Login(String);

impl Login {
    pub fn new(login: impl Into<String>) -> Result<Self, UserValidationError> {
        let login = login.into();
        if login.trim().is_empty() {
            return Err(UserValidationError::EmptyLogin);
        }
        Ok(Self(login))
    }
}

impl AsRef<str> for Login {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Login> for String {
    fn from(value: Login) -> Self {
        value.0
    }
}

/// Salted adaptive hash of a user's password.
///
/// `Debug` is redacted so hashes never reach logs.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a `PasswordHasher` adapter.
    pub fn from_encoded(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Registered user: a login and the hash of its password.
///
/// Users are created once and never updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    login: Login,
    password_hash: PasswordHash,
}

impl User {
    pub fn new(login: Login, password_hash: PasswordHash) -> Self {
        Self {
            login,
            password_hash,
        }
    }

    pub fn login(&self) -> &Login {
        &self.login
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_logins_are_rejected(#[case] raw: &str) {
        assert_eq!(Login::new(raw), Err(UserValidationError::EmptyLogin));
    }

    #[rstest]
    fn logins_are_kept_verbatim() {
        let login = Login::new(" alice ").expect("non-blank login");
        assert_eq!(login.as_ref(), " alice ");
    }

    #[rstest]
    fn password_hash_debug_is_redacted() {
        let hash = PasswordHash::from_encoded("$2b$12$abcdefghijklmnopqrstuv");
        let user = User::new(Login::new("alice").expect("login"), hash);
        let rendered = format!("{user:?}");
        assert!(!rendered.contains("$2b$"), "hash leaked: {rendered}");
    }
}
