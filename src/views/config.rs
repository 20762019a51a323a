//! # View Definitions
//!
//! Stored configuration of a view and its displays.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A stored view definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Machine name, never contains a dot
    pub id: String,

    #[serde(default)]
    pub label: String,

    /// Disabled views never produce routes
    #[serde(default = "default_true")]
    pub status: bool,

    /// Displays keyed by display id
    #[serde(default)]
    pub displays: BTreeMap<String, DisplayConfig>,
}

/// A display of a view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Display plugin id (`page`, `feed`, `block`, ...)
    pub display_plugin: String,

    #[serde(default)]
    pub display_title: String,

    #[serde(default = "default_true")]
    pub enabled: bool,

    /// URL path without leading slash; `%` marks an argument
    #[serde(default)]
    pub path: Option<String>,

    /// Explicit route name instead of `view.{view_id}.{display_id}`
    #[serde(default)]
    pub route_name: Option<String>,
}

fn default_true() -> bool {
    true
}

impl ViewConfig {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            status: true,
            displays: BTreeMap::new(),
        }
    }

    /// Add a display, replacing one with the same id
    pub fn with_display(mut self, display_id: impl Into<String>, display: DisplayConfig) -> Self {
        self.displays.insert(display_id.into(), display);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.status = false;
        self
    }
}

impl DisplayConfig {
    pub fn new(display_plugin: impl Into<String>) -> Self {
        Self {
            display_plugin: display_plugin.into(),
            display_title: String::new(),
            enabled: true,
            path: None,
            route_name: None,
        }
    }

    /// A page display served at `path`
    pub fn page(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::new("page")
        }
    }

    /// A block display, which never owns a route
    pub fn block() -> Self {
        Self::new("block")
    }

    pub fn with_route_name(mut self, route_name: impl Into<String>) -> Self {
        self.route_name = Some(route_name.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}
