//! Key-value adapter implementation
//!
//! Translates each storage operation into a single document store call.
//! Every write carries an expiry of two time windows (current + previous)
//! so values survive one full window rotation.

use crate::{
    Status,
    errors::{AdapterError, AdapterResult, StorageError, StoreError},
    storage::{StorageAdapter, TumblingTimeWindow},
    store::DocumentStore,
};
use std::sync::{Arc, PoisonError, RwLock};

/// Adapter configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Tumbling time window in seconds
    /// If None, documents never expire
    #[cfg_attr(feature = "serde", serde(default, rename = "timeWindow"))]
    pub time_window_secs: Option<u64>,
}

impl Config {
    /// Configuration with the given time window
    pub fn with_time_window(seconds: u64) -> Self {
        Self {
            time_window_secs: Some(seconds),
        }
    }

    /// Expiry in seconds for stored documents, `0` for no expiry
    pub fn expiry_secs(&self) -> u64 {
        self.time_window_secs
            .map(|window| window.saturating_mul(2))
            .unwrap_or(0)
    }
}

/// Storage adapter backed by a key-value document store
///
/// # Example
///
/// ```rust
/// use breaker_kv::{KvAdapter, MemoryStore, Status, StorageAdapter};
/// use std::sync::Arc;
///
/// let adapter = KvAdapter::builder(Arc::new(MemoryStore::new()))
///     .time_window_secs(10)
///     .build();
///
/// assert_eq!(adapter.load("payments").unwrap(), 0);
/// assert_eq!(adapter.load_status("payments").unwrap(), Status::CalmedDown);
///
/// adapter.save("payments", 42).unwrap();
/// assert_eq!(adapter.load("payments").unwrap(), 42);
/// ```
pub struct KvAdapter {
    store: Arc<dyn DocumentStore>,
    config: RwLock<Config>,
}

impl KvAdapter {
    /// Create an adapter with no time window configured
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_config(store, Config::default())
    }

    /// Create an adapter with the given configuration
    pub fn with_config(store: Arc<dyn DocumentStore>, config: Config) -> Self {
        Self {
            store,
            config: RwLock::new(config),
        }
    }

    /// Create a new adapter builder
    pub fn builder(store: Arc<dyn DocumentStore>) -> crate::builder::AdapterBuilder {
        crate::builder::AdapterBuilder::new(store)
    }

    /// Snapshot of the current configuration
    pub fn config(&self) -> Config {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    // Private helper methods

    fn expiry_secs(&self) -> u64 {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .expiry_secs()
    }

    /// Fetch a value, `Ok(None)` when the key is absent
    fn fetch(&self, service: &str) -> AdapterResult<Option<i64>> {
        match self.store.get(service) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_not_found() => {
                tracing::debug!(service, "key not found, using default");
                Ok(None)
            }
            Err(err) => Err(storage_error(service, "get", err)),
        }
    }

    fn upsert(&self, service: &str, value: i64) -> AdapterResult<()> {
        let expiry = self.expiry_secs();
        tracing::debug!(service, value, expiry, "upsert");
        self.store
            .upsert(service, value, expiry)
            .map_err(|err| storage_error(service, "upsert", err))
    }

    fn counter(&self, service: &str, delta: i64) -> AdapterResult<()> {
        let expiry = self.expiry_secs();
        let value = self
            .store
            .counter(service, delta, 0, expiry)
            .map_err(|err| storage_error(service, "counter", err))?;
        tracing::debug!(service, delta, value, expiry, "counter");
        Ok(())
    }
}

fn storage_error(service: &str, operation: &'static str, err: StoreError) -> AdapterError {
    tracing::warn!(service, operation, code = err.code(), error = %err, "store call failed");
    AdapterError::Storage(StorageError::from(err))
}

impl std::fmt::Debug for KvAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KvAdapter")
            .field("store", &self.store)
            .field("config", &self.config())
            .finish()
    }
}

impl StorageAdapter for KvAdapter {
    fn set_configuration(&self, config: Config) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
    }

    fn load(&self, service: &str) -> AdapterResult<i64> {
        Ok(self.fetch(service)?.unwrap_or(0))
    }

    fn save(&self, service: &str, count: i64) -> AdapterResult<()> {
        self.upsert(service, count)
    }

    fn increment(&self, service: &str) -> AdapterResult<()> {
        self.counter(service, 1)
    }

    fn decrement(&self, service: &str) -> AdapterResult<()> {
        // The store counter saturates at 0, no read-modify-write here.
        self.counter(service, -1)
    }

    fn save_last_failure_time(&self, service: &str, last_failure_time: i64) -> AdapterResult<()> {
        self.upsert(service, last_failure_time)
    }

    fn load_last_failure_time(&self, service: &str) -> AdapterResult<Option<i64>> {
        self.fetch(service)
    }

    fn save_status(&self, service: &str, status: Status) -> AdapterResult<()> {
        self.upsert(service, status.as_i64())
    }

    fn load_status(&self, service: &str) -> AdapterResult<Status> {
        match self.fetch(service)? {
            Some(value) => Status::try_from(value).map_err(|value| AdapterError::InvalidStatus {
                service: service.to_string(),
                value,
            }),
            None => Ok(Status::CalmedDown),
        }
    }

    fn reset(&self) -> AdapterResult<()> {
        Err(AdapterError::NotImplemented { operation: "reset" })
    }
}

impl TumblingTimeWindow for KvAdapter {}
