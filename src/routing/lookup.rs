//! # Route Name Lookup
//!
//! Read side of the persisted route name index. URL generation uses it to
//! find which route serves a view display without rebuilding routes.

use std::sync::Arc;

use super::errors::RoutingResult;
use super::pair::{ViewDisplayPair, ViewRouteNames};
use super::route::RouteCollection;
use crate::state::{get_typed, StateStore};

/// Looks up persisted route names
pub struct ViewRouteLookup {
    state: Arc<dyn StateStore>,
    key: String,
}

impl ViewRouteLookup {
    pub fn new(state: Arc<dyn StateStore>, key: impl Into<String>) -> Self {
        Self {
            state,
            key: key.into(),
        }
    }

    /// Every persisted name; empty if no rebuild has been persisted
    pub fn all(&self) -> RoutingResult<ViewRouteNames> {
        Ok(get_typed(self.state.as_ref(), &self.key)?.unwrap_or_default())
    }

    /// Route name of one view display
    pub fn route_name(&self, view_id: &str, display_id: &str) -> RoutingResult<Option<String>> {
        let pair = ViewDisplayPair::new(view_id, display_id);
        Ok(self.all()?.remove(&pair))
    }

    /// URL of a view display, filling route placeholders from `args`
    pub fn url(
        &self,
        routes: &RouteCollection,
        view_id: &str,
        display_id: &str,
        args: &[&str],
    ) -> RoutingResult<Option<String>> {
        let Some(route_name) = self.route_name(view_id, display_id)? else {
            return Ok(None);
        };
        Ok(routes.get(&route_name).and_then(|route| route.generate(args)))
    }
}
