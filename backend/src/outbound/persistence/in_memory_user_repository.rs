//! `UserRepository` backed by a lock-guarded map.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Login, User};

/// Registered users keyed by login.
///
/// Reads take a shared lock; `put` holds the write lock across the
/// uniqueness check and the insert, so concurrent registrations of the same
/// login store exactly one user.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    ///
    /// # Errors
    ///
    /// Returns [`UserPersistenceError::Unavailable`] when the lock is
    /// poisoned.
    pub fn len(&self) -> Result<usize, UserPersistenceError> {
        Ok(self.users.read().map_err(map_poison)?.len())
    }

    /// Whether no user is stored.
    ///
    /// # Errors
    ///
    /// Returns [`UserPersistenceError::Unavailable`] when the lock is
    /// poisoned.
    pub fn is_empty(&self) -> Result<bool, UserPersistenceError> {
        self.len().map(|len| len == 0)
    }
}

fn map_poison<T>(_: PoisonError<T>) -> UserPersistenceError {
    UserPersistenceError::unavailable("user store lock poisoned")
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, login: &Login) -> Result<Option<User>, UserPersistenceError> {
        let users = self.users.read().map_err(map_poison)?;
        Ok(users.get(login.as_ref()).cloned())
    }

    async fn put(&self, user: User) -> Result<(), UserPersistenceError> {
        let mut users = self.users.write().map_err(map_poison)?;
        match users.entry(user.login().as_ref().to_owned()) {
            Entry::Occupied(occupied) => Err(UserPersistenceError::duplicate(occupied.key().clone())),
            Entry::Vacant(vacant) => {
                vacant.insert(user);
                Ok(())
            }
        }
    }

    async fn exists(&self, login: &Login) -> Result<bool, UserPersistenceError> {
        let users = self.users.read().map_err(map_poison)?;
        Ok(users.contains_key(login.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::PasswordHash;
    use rstest::{fixture, rstest};

    fn user(login: &str, hash: &str) -> User {
        User::new(
            Login::new(login).expect("valid login"),
            PasswordHash::from_encoded(hash),
        )
    }

    #[fixture]
    fn repo() -> InMemoryUserRepository {
        InMemoryUserRepository::new()
    }

    #[rstest]
    #[tokio::test]
    async fn put_then_get_returns_stored_user(repo: InMemoryUserRepository) {
        repo.put(user("alice", "$2b$hash")).await.expect("insert");

        let login = Login::new("alice").expect("valid login");
        let stored = repo.get(&login).await.expect("get").expect("present");
        assert_eq!(stored.password_hash().as_str(), "$2b$hash");
        assert!(repo.exists(&login).await.expect("exists"));
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_put_keeps_first_user(repo: InMemoryUserRepository) {
        repo.put(user("alice", "first")).await.expect("insert");

        let error = repo
            .put(user("alice", "second"))
            .await
            .expect_err("duplicate rejected");
        assert_eq!(error, UserPersistenceError::duplicate("alice"));

        let login = Login::new("alice").expect("valid login");
        let stored = repo.get(&login).await.expect("get").expect("present");
        assert_eq!(stored.password_hash().as_str(), "first");
        assert_eq!(repo.len().expect("len"), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn logins_are_case_sensitive(repo: InMemoryUserRepository) {
        repo.put(user("Alice", "h1")).await.expect("insert");
        repo.put(user("alice", "h2")).await.expect("distinct login");
        assert_eq!(repo.len().expect("len"), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_login_is_absent(repo: InMemoryUserRepository) {
        let login = Login::new("nobody").expect("valid login");
        assert!(repo.get(&login).await.expect("get").is_none());
        assert!(!repo.exists(&login).await.expect("exists"));
        assert!(repo.is_empty().expect("is_empty"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_registrations_store_one_user() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let attempts = (0..16).map(|i| {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move { repo.put(user("racer", &format!("hash-{i}"))).await })
        });

        let mut successes = 0;
        for attempt in attempts {
            if attempt.await.expect("task joins").is_ok() {
                successes += 1;
            }
        }
        assert_eq!(successes, 1);
        assert_eq!(repo.len().expect("len"), 1);
    }
}
