//! # Key-value slots and the bearer token slot
//!
//! [`KeyValueStore`] is the storage seam: string keys, string values, async so a
//! browser-backed implementation can slot in later. Reads of a missing or
//! unreadable key return `None`; writes never fail from the caller's point of
//! view (implementations log and move on), matching how a local-storage slot
//! behaves.
//!
//! [`TokenSlot`] wraps a store and pins the key to [`TOKEN_KEY`].

use std::future::Future;

/// Key under which the bearer credential is persisted.
pub const TOKEN_KEY: &str = "@token";

/// Async string key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> impl Future<Output = Option<String>>;
    fn set(&self, key: &str, value: &str) -> impl Future<Output = ()>;
    fn remove(&self, key: &str) -> impl Future<Output = ()>;
}

/// The persisted bearer credential.
#[derive(Clone, Debug)]
pub struct TokenSlot<S> {
    store: S,
}

impl<S: KeyValueStore> TokenSlot<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn load(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).await
    }

    pub async fn save(&self, token: &str) {
        self.store.set(TOKEN_KEY, token).await;
    }

    pub async fn clear(&self) {
        self.store.remove(TOKEN_KEY).await;
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
