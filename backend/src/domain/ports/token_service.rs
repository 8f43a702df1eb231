//! Driven port for issuing and verifying bearer tokens.
use super::define_port_error;
use crate::domain::{BearerToken, Login, TokenClaims};

define_port_error! {
    /// Token issuance and verification failures.
    pub enum TokenServiceError {
        /// The token could not be signed.
        Signing { message: String } => "token signing failed: {message}",
        /// The token is malformed, has a bad signature, or carries bad claims.
        Invalid { message: String } => "token rejected: {message}",
        /// The token's expiry has passed.
        Expired => "token expired",
    }
}

/// Signs tokens embedding the username claim and verifies presented ones.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    fn issue(&self, login: &Login) -> Result<BearerToken, TokenServiceError>;

    /// Verify a raw token (without the `Bearer ` prefix).
    fn verify(&self, token: &str) -> Result<TokenClaims, TokenServiceError>;
}
