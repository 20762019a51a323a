//! # Routes and Route Collections

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A URL pattern bound to a handler
///
/// Placeholders in `path` are written `{name}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub path: String,

    #[serde(default)]
    pub defaults: BTreeMap<String, Value>,

    #[serde(default)]
    pub requirements: BTreeMap<String, String>,

    #[serde(default)]
    pub options: BTreeMap<String, Value>,
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{[^{}/]+\}").expect("placeholder pattern is valid"))
}

impl Route {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            defaults: BTreeMap::new(),
            requirements: BTreeMap::new(),
            options: BTreeMap::new(),
        }
    }

    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.defaults.insert(key.into(), value.into());
        self
    }

    pub fn with_requirement(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.requirements.insert(key.into(), value.into());
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// String default, if present
    pub fn default_str(&self, key: &str) -> Option<&str> {
        self.defaults.get(key).and_then(Value::as_str)
    }

    /// Path with placeholders filled from `args`, in order
    ///
    /// `None` if the number of arguments does not match the placeholders.
    pub fn generate(&self, args: &[&str]) -> Option<String> {
        let pattern = placeholder_pattern();
        if pattern.find_iter(&self.path).count() != args.len() {
            return None;
        }
        let mut args = args.iter();
        let path = pattern.replace_all(&self.path, |_: &regex::Captures| {
            args.next().copied().unwrap_or_default().to_string()
        });
        Some(path.into_owned())
    }

    /// Path with every `{placeholder}` replaced by `%`
    ///
    /// `/node/{node}/edit` becomes `/node/%/edit`, the form view paths use.
    pub fn pattern_outline(&self) -> String {
        placeholder_pattern().replace_all(&self.path, "%").into_owned()
    }
}

/// Ordered table of named routes
///
/// Adding a name that is already present replaces the route and moves it to
/// the end, so iteration order always reflects the latest registration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteCollection {
    routes: Vec<(String, Route)>,
}

impl RouteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route, replacing any route of the same name
    pub fn add(&mut self, name: impl Into<String>, route: Route) {
        let name = name.into();
        self.remove(&name);
        self.routes.push((name, route));
    }

    /// Replace the route stored under `name` without changing its position
    ///
    /// Returns the previous route, or `None` (and adds nothing) if absent.
    pub fn replace(&mut self, name: &str, route: Route) -> Option<Route> {
        self.routes
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, existing)| std::mem::replace(existing, route))
    }

    pub fn get(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|(n, _)| n == name).map(|(_, r)| r)
    }

    pub fn remove(&mut self, name: &str) -> Option<Route> {
        let idx = self.routes.iter().position(|(n, _)| n == name)?;
        Some(self.routes.remove(idx).1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate routes in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Route)> {
        self.routes.iter().map(|(n, r)| (n.as_str(), r))
    }

    /// Route names in order
    pub fn names(&self) -> Vec<String> {
        self.routes.iter().map(|(n, _)| n.clone()).collect()
    }

    /// Move every route of `other` into this collection
    pub fn add_collection(&mut self, other: RouteCollection) {
        for (name, route) in other.routes {
            self.add(name, route);
        }
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl FromIterator<(String, Route)> for RouteCollection {
    fn from_iter<I: IntoIterator<Item = (String, Route)>>(iter: I) -> Self {
        let mut collection = RouteCollection::new();
        for (name, route) in iter {
            collection.add(name, route);
        }
        collection
    }
}
