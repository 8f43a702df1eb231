//! HS256 JWT implementation of the `TokenService` port.

use std::fmt;
use std::time::Duration;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    get_current_timestamp,
};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::ports::{TokenService, TokenServiceError};
use crate::domain::{BearerToken, Login, TokenClaims};

/// Default lifetime of issued tokens.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(86_400);

/// Signing secret and token lifetime.
pub struct JwtTokenServiceConfig {
    pub secret: Zeroizing<String>,
    pub ttl: Duration,
}

impl JwtTokenServiceConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Zeroizing::new(secret.into()),
            ttl: DEFAULT_TOKEN_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    username: String,
    iat: u64,
    exp: u64,
}

/// Signs and verifies HS256 tokens carrying a `username` claim.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtTokenService {
    pub fn new(config: JwtTokenServiceConfig) -> Self {
        let secret = config.secret.as_bytes();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl: config.ttl,
        }
    }
}

impl fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, login: &Login) -> Result<BearerToken, TokenServiceError> {
        let iat = get_current_timestamp();
        let claims = Claims {
            username: login.as_ref().to_owned(),
            iat,
            exp: iat.saturating_add(self.ttl.as_secs()),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map(BearerToken::new)
            .map_err(|error| TokenServiceError::signing(error.to_string()))
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, TokenServiceError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(
            |error| match error.kind() {
                ErrorKind::ExpiredSignature => TokenServiceError::expired(),
                _ => TokenServiceError::invalid(error.to_string()),
            },
        )?;
        let username = Login::new(data.claims.username)
            .map_err(|error| TokenServiceError::invalid(error.to_string()))?;
        Ok(TokenClaims { username })
    }
}
