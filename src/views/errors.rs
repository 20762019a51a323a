//! # View Errors

use thiserror::Error;

/// Result type for view operations
pub type ViewResult<T> = Result<T, ViewError>;

/// View errors
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("View '{view_id}' display '{display_id}' uses unknown display plugin '{plugin}'")]
    UnknownPlugin {
        view_id: String,
        display_id: String,
        plugin: String,
    },

    #[error("Invalid view definition: {0}")]
    InvalidDefinition(String),

    #[error("Failed to read view definitions from '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse view definitions from '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
