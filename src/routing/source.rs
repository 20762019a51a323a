//! # Route Sources
//!
//! Providers of routes other than views. Each source's routes pass through
//! the alteration hooks before they join the final route table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::errors::RoutingResult;
use super::route::{Route, RouteCollection};

/// A provider of routes
pub trait RouteSource {
    /// Provider id passed to alteration hooks
    fn provider(&self) -> &str;

    /// Build this provider's routes
    fn routes(&self) -> RoutingResult<RouteCollection>;
}

/// Route source with a fixed table, typically read from configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticRouteSource {
    pub provider: String,

    /// Routes keyed by name
    #[serde(default)]
    pub routes: BTreeMap<String, Route>,
}

impl StaticRouteSource {
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            routes: BTreeMap::new(),
        }
    }

    pub fn with_route(mut self, name: impl Into<String>, route: Route) -> Self {
        self.routes.insert(name.into(), route);
        self
    }
}

impl RouteSource for StaticRouteSource {
    fn provider(&self) -> &str {
        &self.provider
    }

    fn routes(&self) -> RoutingResult<RouteCollection> {
        Ok(self
            .routes
            .iter()
            .map(|(name, route)| (name.clone(), route.clone()))
            .collect())
    }
}
