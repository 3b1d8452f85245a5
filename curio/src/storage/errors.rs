//! Error types for search backends

use std::error::Error;
use std::fmt;

/// Error type for similarity and keyword search backends
#[derive(Debug)]
pub enum StorageError {
    /// The backend could not be reached at all
    Unavailable(String),

    /// The backend rejected or failed the query
    Query(String),

    /// Invalid input, such as a vector of the wrong dimension
    Validation(String),

    /// Timeout error
    Timeout(String),

    /// Serialization/deserialization error
    Serialization(String),

    /// Other error
    Other(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl StorageError {
    /// Whether the backend was unreachable, as opposed to failing one query.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StorageError::Unavailable(_))
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable(msg) => write!(f, "Backend unavailable: {}", msg),
            StorageError::Query(msg) => write!(f, "Query error: {}", msg),
            StorageError::Validation(msg) => write!(f, "Validation error: {}", msg),
            StorageError::Timeout(msg) => write!(f, "Timeout: {}", msg),
            StorageError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            StorageError::Other(msg) => write!(f, "Other error: {}", msg),
        }
    }
}

impl Error for StorageError {}

/// Convert a JSON error to a storage error
impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}
