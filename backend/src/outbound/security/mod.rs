//! Credential adapters: password hashing and bearer token signing.

mod bcrypt_hasher;
mod jwt_token_service;

pub use bcrypt_hasher::BcryptPasswordHasher;
pub use jwt_token_service::{DEFAULT_TOKEN_TTL, JwtTokenService, JwtTokenServiceConfig};
