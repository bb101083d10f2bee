//! Document stores the adapter writes through to
//!
//! This module provides:
//! - `DocumentStore`: the get / upsert / counter primitives the adapter needs
//! - `MemoryStore`: thread-safe in-process store with per-document expiry

use crate::errors::StoreError;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};

/// Abstract key-value document store
///
/// Expiry is given in seconds; `0` means the document never expires.
pub trait DocumentStore: Send + Sync + std::fmt::Debug {
    /// Fetch the value stored under `key`
    ///
    /// Returns `StoreError::NotFound` when no live document exists.
    fn get(&self, key: &str) -> Result<i64, StoreError>;

    /// Insert or replace the document under `key`
    fn upsert(&self, key: &str, value: i64, expiry_secs: u64) -> Result<(), StoreError>;

    /// Atomically apply `delta` to the counter under `key`
    ///
    /// When the key is absent the document is created holding `initial` and
    /// the delta is not applied. Negative deltas never take the value below 0.
    /// Returns the stored value after the operation.
    fn counter(
        &self,
        key: &str,
        delta: i64,
        initial: i64,
        expiry_secs: u64,
    ) -> Result<i64, StoreError>;
}

/// A stored value with its expiry
#[derive(Debug, Clone, Copy)]
struct Document {
    value: i64,
    expiry_secs: u64,
    stored_at: Instant,
}

impl Document {
    fn new(value: i64, expiry_secs: u64) -> Self {
        Self {
            value,
            expiry_secs,
            stored_at: Instant::now(),
        }
    }

    fn is_expired_at(&self, now: Instant) -> bool {
        self.expiry_secs > 0
            && now.saturating_duration_since(self.stored_at)
                >= Duration::from_secs(self.expiry_secs)
    }
}

/// Thread-safe in-memory document store
///
/// # Example
///
/// ```rust
/// use breaker_kv::{DocumentStore, MemoryStore};
///
/// let store = MemoryStore::new();
/// store.upsert("payments", 3, 20).unwrap();
/// assert_eq!(store.get("payments").unwrap(), 3);
/// assert!(store.get("search").unwrap_err().is_not_found());
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<String, Document>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every document
    pub fn flush(&self) {
        self.write().clear();
    }

    /// Number of live documents
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.read()
            .values()
            .filter(|doc| !doc.is_expired_at(now))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Expiry in seconds last applied to a live document
    pub fn expiry_of(&self, key: &str) -> Option<u64> {
        let now = Instant::now();
        self.read()
            .get(key)
            .filter(|doc| !doc.is_expired_at(now))
            .map(|doc| doc.expiry_secs)
    }

    // A panic in another thread cannot leave a document half written,
    // so a poisoned map is still consistent.

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Document>> {
        self.documents.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Document>> {
        self.documents.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DocumentStore for MemoryStore {
    fn get(&self, key: &str) -> Result<i64, StoreError> {
        let now = Instant::now();
        self.read()
            .get(key)
            .filter(|doc| !doc.is_expired_at(now))
            .map(|doc| doc.value)
            .ok_or_else(|| StoreError::not_found(key))
    }

    fn upsert(&self, key: &str, value: i64, expiry_secs: u64) -> Result<(), StoreError> {
        self.write()
            .insert(key.to_string(), Document::new(value, expiry_secs));
        Ok(())
    }

    fn counter(
        &self,
        key: &str,
        delta: i64,
        initial: i64,
        expiry_secs: u64,
    ) -> Result<i64, StoreError> {
        let now = Instant::now();
        let mut documents = self.write();

        let value = match documents.get(key) {
            Some(doc) if !doc.is_expired_at(now) => doc.value.saturating_add(delta).max(0),
            _ => initial,
        };

        documents.insert(key.to_string(), Document::new(value, expiry_secs));
        Ok(value)
    }
}
