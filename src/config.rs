//! Configuration
//!
//! `RoutingConfig` tunes the route registry and the response status
//! adapter. `AppConfig` is what the `viewroutes` binary loads from JSON.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::Severity;
use crate::routing::StaticRouteSource;

/// State key of the persisted route name index
pub const VIEW_ROUTE_NAMES_KEY: &str = "views.view_route_names";

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Route registry configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// State key the route name index is written to
    #[serde(default = "default_state_key")]
    pub state_key: String,

    /// Request attribute marking a view-backed page
    #[serde(default = "default_view_id_attribute")]
    pub view_id_attribute: String,

    /// Request attribute carrying the status code to apply
    #[serde(default = "default_status_code_attribute")]
    pub status_code_attribute: String,

    /// Status code applied when the attribute is missing
    #[serde(default = "default_status_code")]
    pub default_status_code: u16,

    /// Priority of the status listener; higher runs earlier
    #[serde(default = "default_status_listener_priority")]
    pub status_listener_priority: i32,
}

fn default_state_key() -> String {
    VIEW_ROUTE_NAMES_KEY.to_string()
}

fn default_view_id_attribute() -> String {
    "view_id".to_string()
}

fn default_status_code_attribute() -> String {
    "_http_statuscode".to_string()
}

fn default_status_code() -> u16 {
    200
}

fn default_status_listener_priority() -> i32 {
    75
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            state_key: default_state_key(),
            view_id_attribute: default_view_id_attribute(),
            status_code_attribute: default_status_code_attribute(),
            default_status_code: default_status_code(),
            status_listener_priority: default_status_listener_priority(),
        }
    }
}

impl RoutingConfig {
    /// Reject values no rebuild could work with
    pub fn validate(&self) -> ConfigResult<()> {
        if self.state_key.trim().is_empty() {
            return Err(ConfigError::Invalid("state_key must not be empty".into()));
        }
        if !(100..=599).contains(&self.default_status_code) {
            return Err(ConfigError::Invalid(format!(
                "default_status_code {} is not an HTTP status",
                self.default_status_code
            )));
        }
        Ok(())
    }
}

/// Configuration of the `viewroutes` binary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// JSON array of view definitions
    #[serde(default = "default_views_file")]
    pub views_file: PathBuf,

    /// JSON file backing the state store
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,

    /// Minimum log severity
    #[serde(default = "default_log_level")]
    pub log_level: Severity,

    #[serde(default)]
    pub routing: RoutingConfig,

    /// Route sources other than views, in alteration order
    #[serde(default)]
    pub sources: Vec<StaticRouteSource>,
}

fn default_views_file() -> PathBuf {
    PathBuf::from("./views.json")
}

fn default_state_file() -> PathBuf {
    PathBuf::from("./state.json")
}

fn default_log_level() -> Severity {
    Severity::Info
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            views_file: default_views_file(),
            state_file: default_state_file(),
            log_level: default_log_level(),
            routing: RoutingConfig::default(),
            sources: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load and validate a JSON config file
    ///
    /// Relative `views_file` and `state_file` paths resolve against the
    /// directory holding the config file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let mut config: AppConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;

        if let Some(base) = path.parent() {
            config.views_file = resolve(base, &config.views_file);
            config.state_file = resolve(base, &config.state_file);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.routing.validate()?;

        let mut seen = std::collections::BTreeSet::new();
        for source in &self.sources {
            if !seen.insert(source.provider.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "route source '{}' is listed twice",
                    source.provider
                )));
            }
        }
        Ok(())
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
