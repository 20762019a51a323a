//! # Routing Errors

use thiserror::Error;

use crate::state::StateError;

/// Result type for routing operations
pub type RoutingResult<T> = Result<T, RoutingError>;

/// Routing errors
///
/// A rebuild never fails because of a single misconfigured view; those are
/// skipped. Only infrastructure failures surface here.
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("Invalid view/display key: '{0}'")]
    InvalidPairKey(String),

    #[error("Failed to persist route names: {0}")]
    State(#[from] StateError),

    #[error("Route source '{provider}' failed: {message}")]
    Source { provider: String, message: String },
}
