//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit code.

use std::fmt;
use std::io;

use crate::config::ConfigError;
use crate::routing::RoutingError;
use crate::state::StateError;
use crate::views::ViewError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// View definitions could not be loaded
    ViewsError,
    /// Route rebuild failed
    RebuildFailed,
    /// State store could not be read or written
    StateError,
    /// I/O error (stdout)
    IoError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "VIEWROUTES_CLI_CONFIG_ERROR",
            Self::ViewsError => "VIEWROUTES_CLI_VIEWS_ERROR",
            Self::RebuildFailed => "VIEWROUTES_CLI_REBUILD_FAILED",
            Self::StateError => "VIEWROUTES_CLI_STATE_ERROR",
            Self::IoError => "VIEWROUTES_CLI_IO_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

impl From<ViewError> for CliError {
    fn from(e: ViewError) -> Self {
        Self::new(CliErrorCode::ViewsError, e.to_string())
    }
}

impl From<RoutingError> for CliError {
    fn from(e: RoutingError) -> Self {
        match e {
            RoutingError::State(state) => state.into(),
            other => Self::new(CliErrorCode::RebuildFailed, other.to_string()),
        }
    }
}

impl From<StateError> for CliError {
    fn from(e: StateError) -> Self {
        Self::new(CliErrorCode::StateError, e.to_string())
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::config_error("missing views_file");
        assert_eq!(
            err.to_string(),
            "VIEWROUTES_CLI_CONFIG_ERROR: missing views_file"
        );
    }

    #[test]
    fn test_routing_state_error_maps_to_state_code() {
        let state = StateError::LockPoisoned;
        let err: CliError = RoutingError::State(state).into();
        assert_eq!(err.code(), &CliErrorCode::StateError);
    }

    #[test]
    fn test_config_error_conversion() {
        let err: CliError = ConfigError::Invalid("bad".into()).into();
        assert_eq!(err.code_str(), "VIEWROUTES_CLI_CONFIG_ERROR");
        assert!(err.message().contains("bad"));
    }
}
