//! Storage contract consumed by the circuit breaker engine
//!
//! The engine keeps its counters, last failure times and status flags
//! behind `StorageAdapter`, so any store backend can be plugged in.

use crate::{Status, adapter::Config, errors::AdapterResult};

/// Abstract storage for circuit breaker state, keyed by service name
pub trait StorageAdapter: Send + Sync + std::fmt::Debug {
    /// Replace the configuration used to derive document expiry
    fn set_configuration(&self, config: Config);

    /// Load the count stored for a service (0 when absent)
    fn load(&self, service: &str) -> AdapterResult<i64>;

    /// Store a success / failure / rejection count
    fn save(&self, service: &str, count: i64) -> AdapterResult<()>;

    /// Increment the count for a service
    fn increment(&self, service: &str) -> AdapterResult<()>;

    /// Decrement the count for a service
    ///
    /// If the operation would take the value below 0, the new value must be 0.
    fn decrement(&self, service: &str) -> AdapterResult<()>;

    /// Store the last failure time (unix seconds)
    fn save_last_failure_time(&self, service: &str, last_failure_time: i64) -> AdapterResult<()>;

    /// Load the last failure time, `None` when never recorded
    fn load_last_failure_time(&self, service: &str) -> AdapterResult<Option<i64>>;

    /// Store the status of a service
    fn save_status(&self, service: &str, status: Status) -> AdapterResult<()>;

    /// Load the status of a service (`Status::CalmedDown` when absent)
    fn load_status(&self, service: &str) -> AdapterResult<Status>;

    /// Reset all counts
    fn reset(&self) -> AdapterResult<()>;
}

/// Marker for adapters whose values live across the current and previous
/// tumbling time windows
pub trait TumblingTimeWindow: StorageAdapter {}
