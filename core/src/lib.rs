//! breaker-kv - Key-value storage adapter for circuit breakers
//!
//! This crate lets a circuit breaker engine keep its state in a key-value
//! document store:
//! - Success / failure / rejection counts with atomic, zero-floored counters
//! - Last failure times and tripped / calmed-down status per service
//! - Document expiry of two tumbling time windows (current + previous)
//! - Missing keys read as defaults, every other store failure as `StorageError`
//!
//! # Example
//!
//! ```rust
//! use breaker_kv::{KvAdapter, MemoryStore, Status, StorageAdapter};
//! use std::sync::Arc;
//!
//! let store = Arc::new(MemoryStore::new());
//! let adapter = KvAdapter::builder(store)
//!     .time_window_secs(10)
//!     .build();
//!
//! adapter.save("payment_api", 2).unwrap();
//! adapter.decrement("payment_api").unwrap();
//! assert_eq!(adapter.load("payment_api").unwrap(), 1);
//!
//! adapter.save_status("payment_api.status", Status::Tripped).unwrap();
//! assert_eq!(adapter.load_status("payment_api.status").unwrap(), Status::Tripped);
//! ```

pub mod adapter;
pub mod builder;
pub mod errors;
pub mod storage;
pub mod store;

pub use adapter::{Config, KvAdapter};
pub use builder::AdapterBuilder;
pub use errors::{AdapterError, AdapterResult, StorageError, StoreError};
pub use storage::{StorageAdapter, TumblingTimeWindow};
pub use store::{DocumentStore, MemoryStore};

/// Circuit status of a service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "i64", into = "i64"))]
pub enum Status {
    /// Service is healthy, calls pass through
    CalmedDown,
    /// Service is failing, calls are rejected
    Tripped,
}

impl Status {
    /// Integer stored for this status
    pub const fn as_i64(self) -> i64 {
        match self {
            Status::CalmedDown => 1,
            Status::Tripped => 2,
        }
    }
}

impl From<Status> for i64 {
    fn from(status: Status) -> Self {
        status.as_i64()
    }
}

impl TryFrom<i64> for Status {
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Status::CalmedDown),
            2 => Ok(Status::Tripped),
            other => Err(other),
        }
    }
}
