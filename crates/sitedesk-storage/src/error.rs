//! Storage error types.

use thiserror::Error;

/// Errors returned by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The requested record does not exist.
    #[error("Record not found: {message}")]
    NotFound { message: String },

    /// Backend failure (I/O, connection, corruption).
    #[error("Storage failure: {message}")]
    Internal { message: String },
}

impl StorageError {
    /// Creates a not-found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Creates an internal storage error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Convenience result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
