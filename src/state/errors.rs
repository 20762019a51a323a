//! # State Store Errors

use thiserror::Error;

/// Result type for state store operations
pub type StateResult<T> = Result<T, StateError>;

/// State store errors
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Failed to read state file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write state file '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed state for key '{key}': {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("State store lock poisoned")]
    LockPoisoned,
}
