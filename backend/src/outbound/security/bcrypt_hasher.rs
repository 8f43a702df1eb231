//! `PasswordHasher` backed by bcrypt.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Longest password bcrypt hashes without truncation.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Bcrypt hashing run on Tokio's blocking pool.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Hasher with an explicit work factor. Bcrypt accepts 4 to 31.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::with_cost(bcrypt::DEFAULT_COST)
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(PasswordHashError::hash(format!(
                "password exceeds {MAX_PASSWORD_BYTES} bytes"
            )));
        }
        let password = Zeroizing::new(password.to_owned());
        let cost = self.cost;
        let encoded = tokio::task::spawn_blocking(move || bcrypt::hash(password.as_str(), cost))
            .await
            .map_err(|error| PasswordHashError::hash(error.to_string()))?
            .map_err(|error| PasswordHashError::hash(error.to_string()))?;
        Ok(PasswordHash::from_encoded(encoded))
    }

    async fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        let password = Zeroizing::new(password.to_owned());
        let encoded = hash.as_str().to_owned();
        tokio::task::spawn_blocking(move || bcrypt::verify(password.as_str(), &encoded))
            .await
            .map_err(|error| PasswordHashError::verify(error.to_string()))?
            .map_err(|error| PasswordHashError::verify(error.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> BcryptPasswordHasher {
        BcryptPasswordHasher::with_cost(4)
    }

    #[rstest]
    #[tokio::test]
    async fn hash_is_salted_and_verifiable(hasher: BcryptPasswordHasher) {
        let first = hasher.hash("hunter2").await.expect("hash");
        let second = hasher.hash("hunter2").await.expect("hash");

        assert_ne!(first.as_str(), "hunter2");
        assert_ne!(first.as_str(), second.as_str(), "salts differ");
        assert!(hasher.verify("hunter2", &first).await.expect("verify"));
        assert!(!hasher.verify("hunter3", &first).await.expect("verify"));
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_hash_is_a_verify_error(hasher: BcryptPasswordHasher) {
        let error = hasher
            .verify("pw", &PasswordHash::from_encoded("not-a-bcrypt-hash"))
            .await
            .expect_err("malformed hash");
        assert!(matches!(error, PasswordHashError::Verify { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn passwords_longer_than_bcrypt_input_are_rejected(hasher: BcryptPasswordHasher) {
        let at_limit = "a".repeat(MAX_PASSWORD_BYTES);
        let hash = hasher.hash(&at_limit).await.expect("72 bytes hash");
        assert!(hasher.verify(&at_limit, &hash).await.expect("verify"));

        let too_long = format!("{at_limit}b");
        let error = hasher.hash(&too_long).await.expect_err("73 bytes rejected");
        assert!(matches!(error, PasswordHashError::Hash { .. }));
    }

    #[tokio::test]
    async fn invalid_cost_is_a_hash_error() {
        let error = BcryptPasswordHasher::with_cost(2)
            .hash("pw")
            .await
            .expect_err("cost below minimum");
        assert!(matches!(error, PasswordHashError::Hash { .. }));
    }
}
