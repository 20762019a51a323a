//! # Display Plugins
//!
//! A display is a named rendering mode of a view. Only some displays own a
//! URL; those expose the [`RouterDisplay`] capability through
//! [`DisplayPlugin::as_router`].

use serde_json::Value;

use super::config::DisplayConfig;
use crate::routing::{Route, RouteCollection, ViewDisplayPair, ViewRouteNames};

/// Controller that renders view pages
pub const PAGE_CONTROLLER: &str = "views.page_controller";

/// Common interface of every display handler
pub trait DisplayPlugin {
    /// Display id within its view
    fn display_id(&self) -> &str;

    /// Plugin id (`page`, `block`, ...)
    fn plugin_id(&self) -> &str;

    /// Whether the display is bound to a URL path
    fn uses_route(&self) -> bool {
        false
    }

    /// Whether the display is enabled in its view
    fn is_enabled(&self) -> bool {
        true
    }

    /// Route capability query
    fn as_router(&mut self) -> Option<&mut dyn RouterDisplay> {
        None
    }
}

/// Capability of displays that contribute or take over routes
pub trait RouterDisplay {
    /// Add this display's routes to `collection`
    ///
    /// Returns the route names added, keyed by the owning pair.
    fn collect_routes(&mut self, collection: &mut RouteCollection) -> ViewRouteNames;

    /// Take over routes already present in `collection`
    ///
    /// Returns the names of existing routes this display now serves. A claim
    /// means ownership moved to the view, not that a route was added. When
    /// several routes are taken over, the first in collection order is
    /// reported.
    fn alter_routes(&mut self, collection: &mut RouteCollection) -> ViewRouteNames;
}

/// Display without a route (blocks, attachments, the default display)
#[derive(Debug, Clone)]
pub struct PlainDisplay {
    display_id: String,
    plugin_id: String,
    enabled: bool,
}

impl PlainDisplay {
    pub fn new(display_id: impl Into<String>, config: &DisplayConfig) -> Self {
        Self {
            display_id: display_id.into(),
            plugin_id: config.display_plugin.clone(),
            enabled: config.enabled,
        }
    }
}

impl DisplayPlugin for PlainDisplay {
    fn display_id(&self) -> &str {
        &self.display_id
    }

    fn plugin_id(&self) -> &str {
        &self.plugin_id
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Display served at a configured path (pages, feeds)
#[derive(Debug, Clone)]
pub struct PathDisplay {
    pair: ViewDisplayPair,
    plugin_id: String,
    title: String,
    enabled: bool,
    path: Option<String>,
    route_name: Option<String>,
}

impl PathDisplay {
    pub fn new(view_id: impl Into<String>, display_id: impl Into<String>, config: &DisplayConfig) -> Self {
        Self {
            pair: ViewDisplayPair::new(view_id, display_id),
            plugin_id: config.display_plugin.clone(),
            title: config.display_title.clone(),
            enabled: config.enabled,
            path: config
                .path
                .as_ref()
                .map(|p| p.trim_matches('/').to_string()),
            route_name: config.route_name.clone(),
        }
    }

    /// Configured path with a leading slash, `%` kept for arguments
    pub fn path(&self) -> Option<String> {
        self.path.as_ref().map(|p| format!("/{}", p))
    }

    /// Name of the route this display adds
    pub fn route_name(&self) -> String {
        self.route_name
            .clone()
            .unwrap_or_else(|| format!("view.{}.{}", self.pair.view_id(), self.pair.display_id()))
    }

    /// Build the route served by this display
    ///
    /// Every `%` segment becomes an `{arg_N}` placeholder.
    pub fn build_route(&self) -> Option<Route> {
        let path = self.path.as_ref()?;

        let mut arg: usize = 0;
        let segments: Vec<String> = path
            .split('/')
            .map(|segment| {
                if segment == "%" {
                    let placeholder = format!("{{arg_{}}}", arg);
                    arg += 1;
                    placeholder
                } else {
                    segment.to_string()
                }
            })
            .collect();

        let mut route = Route::new(format!("/{}", segments.join("/")))
            .with_default("_controller", PAGE_CONTROLLER)
            .with_default("view_id", self.pair.view_id())
            .with_default("display_id", self.pair.display_id())
            .with_requirement("_access", "TRUE")
            .with_option("_view_display_plugin", self.plugin_id.as_str());

        if !self.title.is_empty() {
            route = route.with_default("_title", self.title.as_str());
        }
        if arg > 0 {
            route = route.with_option("_view_argument_count", Value::from(arg));
        }

        Some(route)
    }

    fn is_own_route(&self, route: &Route) -> bool {
        route.default_str("view_id") == Some(self.pair.view_id())
            && route.default_str("display_id") == Some(self.pair.display_id())
    }
}

impl DisplayPlugin for PathDisplay {
    fn display_id(&self) -> &str {
        self.pair.display_id()
    }

    fn plugin_id(&self) -> &str {
        &self.plugin_id
    }

    fn uses_route(&self) -> bool {
        true
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn as_router(&mut self) -> Option<&mut dyn RouterDisplay> {
        Some(self)
    }
}

impl RouterDisplay for PathDisplay {
    fn collect_routes(&mut self, collection: &mut RouteCollection) -> ViewRouteNames {
        let mut names = ViewRouteNames::new();
        if let Some(route) = self.build_route() {
            let route_name = self.route_name();
            collection.add(route_name.clone(), route);
            names.insert(self.pair.clone(), route_name);
        }
        names
    }

    fn alter_routes(&mut self, collection: &mut RouteCollection) -> ViewRouteNames {
        let mut names = ViewRouteNames::new();
        let (Some(view_path), Some(view_route)) = (self.path(), self.build_route()) else {
            return names;
        };

        let matching: Vec<String> = collection
            .iter()
            .filter(|(_, route)| route.pattern_outline() == view_path && !self.is_own_route(route))
            .map(|(name, _)| name.to_string())
            .collect();

        for name in matching {
            let mut replacement = view_route.clone();
            if let Some(original) = collection.get(&name) {
                replacement.requirements = original.requirements.clone();
            }
            collection.replace(&name, replacement);
            names.entry(self.pair.clone()).or_insert(name);
        }

        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(view_id: &str, display_id: &str, path: &str) -> PathDisplay {
        PathDisplay::new(view_id, display_id, &DisplayConfig::page(path))
    }

    #[test]
    fn test_plain_display_is_not_router() {
        let mut block = PlainDisplay::new("block_1", &DisplayConfig::block());
        assert!(!block.uses_route());
        assert!(block.as_router().is_none());
    }

    #[test]
    fn test_path_display_is_router() {
        let mut display = page("frontpage", "page_1", "node");
        assert!(display.uses_route());
        assert!(display.as_router().is_some());
    }

    #[test]
    fn test_build_route_arguments() {
        let display = page("archive", "page_1", "/archive/%/%");
        let route = display.build_route().unwrap();

        assert_eq!(route.path, "/archive/{arg_0}/{arg_1}");
        assert_eq!(route.pattern_outline(), "/archive/%/%");
        assert_eq!(route.default_str("_controller"), Some(PAGE_CONTROLLER));
        assert_eq!(route.default_str("view_id"), Some("archive"));
        assert_eq!(route.options["_view_argument_count"], 2);
    }

    #[test]
    fn test_collect_routes_default_name() {
        let mut display = page("frontpage", "page_1", "node");
        let mut collection = RouteCollection::new();

        let names = display.collect_routes(&mut collection);

        let pair = ViewDisplayPair::new("frontpage", "page_1");
        assert_eq!(names[&pair], "view.frontpage.page_1");
        assert_eq!(collection.get("view.frontpage.page_1").unwrap().path, "/node");
    }

    #[test]
    fn test_collect_routes_custom_name() {
        let config = DisplayConfig::page("node").with_route_name("frontpage");
        let mut display = PathDisplay::new("frontpage", "page_1", &config);
        let mut collection = RouteCollection::new();

        display.collect_routes(&mut collection);
        assert!(collection.contains("frontpage"));
    }

    #[test]
    fn test_collect_routes_without_path() {
        let mut display = PathDisplay::new("frontpage", "page_1", &DisplayConfig::new("page"));
        let mut collection = RouteCollection::new();

        assert!(display.collect_routes(&mut collection).is_empty());
        assert!(collection.is_empty());
    }

    #[test]
    fn test_alter_routes_claims_matching_path() {
        let mut collection = RouteCollection::new();
        collection.add(
            "user.admin_people",
            Route::new("/admin/people").with_requirement("_permission", "administer users"),
        );
        collection.add("node.add", Route::new("/node/add"));

        let mut display = page("user_admin_people", "page_1", "admin/people");
        let names = display.alter_routes(&mut collection);

        let pair = ViewDisplayPair::new("user_admin_people", "page_1");
        assert_eq!(names[&pair], "user.admin_people");

        let altered = collection.get("user.admin_people").unwrap();
        assert_eq!(altered.default_str("view_id"), Some("user_admin_people"));
        assert_eq!(altered.requirements["_permission"], "administer users");
        assert_eq!(collection.names(), vec!["user.admin_people", "node.add"]);
    }

    #[test]
    fn test_alter_routes_matches_placeholders() {
        let mut collection = RouteCollection::new();
        collection.add("taxonomy.term", Route::new("/taxonomy/term/{taxonomy_term}"));

        let mut display = page("taxonomy_term", "page_1", "taxonomy/term/%");
        let names = display.alter_routes(&mut collection);

        assert_eq!(names.len(), 1);
        assert_eq!(
            collection.get("taxonomy.term").unwrap().path,
            "/taxonomy/term/{arg_0}"
        );
    }

    #[test]
    fn test_alter_routes_reports_first_match() {
        let mut collection = RouteCollection::new();
        collection.add("system.admin", Route::new("/admin"));
        collection.add("system.admin_legacy", Route::new("/admin"));

        let mut display = page("admin_dashboard", "page_1", "admin");
        let names = display.alter_routes(&mut collection);

        let pair = ViewDisplayPair::new("admin_dashboard", "page_1");
        assert_eq!(names[&pair], "system.admin");
        // Both routes are still served by the view
        for name in ["system.admin", "system.admin_legacy"] {
            let route = collection.get(name).unwrap();
            assert_eq!(route.default_str("view_id"), Some("admin_dashboard"));
        }
    }

    #[test]
    fn test_alter_routes_ignores_own_route() {
        let mut display = page("frontpage", "page_1", "node");
        let mut collection = RouteCollection::new();
        display.collect_routes(&mut collection);

        assert!(display.alter_routes(&mut collection).is_empty());
    }
}
