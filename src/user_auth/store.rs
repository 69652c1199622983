//! In-memory credential store.
//!
//! Records are keyed by username in a hash map behind a single mutex. The
//! lock is held only to check, insert, replace or remove a record; Argon2
//! work runs on the blocking pool with the lock released, and Register /
//! UpdatePassword re-check the map after hashing so concurrent callers
//! settle on one consistent outcome.

use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::sync::Arc;

use super::error::StoreError;
use super::password::{hash_password, verify_password};

/// A registered user.
///
/// Built only by the store, from an already-computed hash, so a record never
/// holds a plaintext password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct UserRecord {
    pub username: String,
    pub password_hash: String,
}

struct Slot {
    /// Insertion sequence, used to list records in registration order.
    seq: u64,
    record: UserRecord,
}

#[derive(Default)]
struct Inner {
    users: FxHashMap<String, Slot>,
    next_seq: u64,
}

/// Thread-safe credential store. Cheap to clone; clones share the records.
#[derive(Clone, Default)]
pub struct CredentialStore {
    inner: Arc<Mutex<Inner>>,
    /// Hash verified against when the username is unknown, so a miss costs
    /// the same as a wrong password.
    dummy_hash: Arc<OnceCell<String>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new user.
    pub async fn register(&self, username: &str, password: &str) -> Result<(), StoreError> {
        if username.is_empty() {
            return Err(StoreError::EmptyUsername);
        }
        // Fail fast before paying for a hash.
        if self.contains(username) {
            return Err(StoreError::DuplicateUsername);
        }

        let hash = hash_blocking(password.to_string()).await?;

        let mut inner = self.inner.lock();
        if inner.users.contains_key(username) {
            return Err(StoreError::DuplicateUsername);
        }
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.users.insert(
            username.to_string(),
            Slot {
                seq,
                record: UserRecord {
                    username: username.to_string(),
                    password_hash: hash,
                },
            },
        );
        drop(inner);

        tracing::info!(username, "user registered");
        Ok(())
    }

    /// Check a username/password pair. Returns the matched username.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<String, StoreError> {
        let stored = self
            .inner
            .lock()
            .users
            .get(username)
            .map(|slot| slot.record.password_hash.clone());

        let Some(hash) = stored else {
            let dummy = self.dummy_hash().await?;
            let _ = verify_blocking(password.to_string(), dummy).await;
            tracing::debug!(username, "login for unknown user");
            return Err(StoreError::InvalidCredentials);
        };

        if verify_blocking(password.to_string(), hash).await? {
            Ok(username.to_string())
        } else {
            tracing::debug!(username, "login with wrong password");
            Err(StoreError::InvalidCredentials)
        }
    }

    /// All records, in registration order.
    pub fn list(&self) -> Vec<UserRecord> {
        let inner = self.inner.lock();
        let mut slots: Vec<&Slot> = inner.users.values().collect();
        slots.sort_by_key(|slot| slot.seq);
        slots.into_iter().map(|slot| slot.record.clone()).collect()
    }

    pub fn get(&self, username: &str) -> Result<UserRecord, StoreError> {
        self.inner
            .lock()
            .users
            .get(username)
            .map(|slot| slot.record.clone())
            .ok_or(StoreError::NotFound)
    }

    /// Replace a user's password hash. The current password is not checked.
    pub async fn update_password(&self, username: &str, new_password: &str) -> Result<(), StoreError> {
        if !self.contains(username) {
            return Err(StoreError::NotFound);
        }

        let hash = hash_blocking(new_password.to_string()).await?;

        // A concurrent delete may have removed the record while hashing.
        let mut inner = self.inner.lock();
        let slot = inner.users.get_mut(username).ok_or(StoreError::NotFound)?;
        slot.record.password_hash = hash;
        drop(inner);

        tracing::info!(username, "password updated");
        Ok(())
    }

    pub fn delete(&self, username: &str) -> Result<(), StoreError> {
        self.inner
            .lock()
            .users
            .remove(username)
            .ok_or(StoreError::NotFound)?;

        tracing::info!(username, "user deleted");
        Ok(())
    }

    pub fn contains(&self, username: &str) -> bool {
        self.inner.lock().users.contains_key(username)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    async fn dummy_hash(&self) -> Result<String, StoreError> {
        if let Some(hash) = self.dummy_hash.get() {
            return Ok(hash.clone());
        }
        let hash = hash_blocking("melos-accounts-placeholder".to_string()).await?;
        Ok(self.dummy_hash.get_or_init(|| hash).clone())
    }
}

async fn hash_blocking(password: String) -> Result<String, StoreError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| StoreError::Hashing(format!("hash task failed: {}", e)))?
}

async fn verify_blocking(password: String, hash: String) -> Result<bool, StoreError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| StoreError::Hashing(format!("verify task failed: {}", e)))?
}
