//! Error types for store calls and adapter operations

use thiserror::Error;

/// Well-known store error codes
pub mod codes {
    /// The requested key does not exist
    pub const KEY_NOT_FOUND: i32 = 13;
    /// The store could not be reached
    pub const NETWORK_ERROR: i32 = 16;
    /// The store did not answer in time
    pub const TIMEOUT: i32 = 23;
}

/// Errors raised by a [`DocumentStore`](crate::DocumentStore)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No live document exists under the key
    #[error("key '{key}' not found")]
    NotFound { key: String },
    /// Any other store failure
    #[error("{message}")]
    Failure { code: i32, message: String },
}

impl StoreError {
    pub fn not_found(key: impl Into<String>) -> Self {
        StoreError::NotFound { key: key.into() }
    }

    pub fn network(message: impl Into<String>) -> Self {
        StoreError::Failure {
            code: codes::NETWORK_ERROR,
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        StoreError::Failure {
            code: codes::TIMEOUT,
            message: message.into(),
        }
    }

    /// Numeric code of the failure
    pub fn code(&self) -> i32 {
        match self {
            StoreError::NotFound { .. } => codes::KEY_NOT_FOUND,
            StoreError::Failure { code, .. } => *code,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// A store failure surfaced through the adapter
///
/// Keeps the original message and code for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("storage error (code {code}): {message}")]
pub struct StorageError {
    pub message: String,
    pub code: i32,
    #[source]
    pub source: StoreError,
}

impl From<StoreError> for StorageError {
    fn from(source: StoreError) -> Self {
        Self {
            message: source.to_string(),
            code: source.code(),
            source,
        }
    }
}

/// Errors returned by [`StorageAdapter`](crate::StorageAdapter) operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    /// The underlying store failed
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// The adapter does not support the operation
    #[error("{operation} is not implemented")]
    NotImplemented { operation: &'static str },
    /// A status document holds an integer that is not a known status
    #[error("service '{service}' holds invalid status value {value}")]
    InvalidStatus { service: String, value: i64 },
}

impl AdapterError {
    pub fn is_storage(&self) -> bool {
        matches!(self, AdapterError::Storage(_))
    }

    pub fn is_not_implemented(&self) -> bool {
        matches!(self, AdapterError::NotImplemented { .. })
    }
}

impl From<StoreError> for AdapterError {
    fn from(err: StoreError) -> Self {
        AdapterError::Storage(err.into())
    }
}

/// Result alias for adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_storage_error_keeps_message_and_code() {
        let err = StorageError::from(StoreError::network("dummy message"));

        assert_eq!(err.message, "dummy message");
        assert_eq!(err.code, codes::NETWORK_ERROR);
        assert_eq!(err.to_string(), "storage error (code 16): dummy message");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_not_found_code() {
        let err = StoreError::not_found("svc");

        assert!(err.is_not_found());
        assert_eq!(err.code(), codes::KEY_NOT_FOUND);
        assert!(!StoreError::timeout("slow").is_not_found());
    }

    #[test]
    fn test_adapter_error_kinds_are_distinguishable() {
        let storage: AdapterError = StoreError::timeout("slow").into();
        let missing = AdapterError::NotImplemented { operation: "reset" };

        assert!(storage.is_storage());
        assert!(!storage.is_not_implemented());
        assert!(missing.is_not_implemented());
        assert!(!missing.is_storage());
        assert_eq!(missing.to_string(), "reset is not implemented");
    }
}
