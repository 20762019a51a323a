//! # Route Name Registry
//!
//! Route names keyed by view/display pair, persisted to the state store so
//! URL generation can find the route of a view display without rebuilding.

use std::sync::Arc;

use super::candidates::ViewCandidateIndex;
use super::errors::RoutingResult;
use super::pair::ViewRouteNames;
use crate::observability::{log_event_with_fields, warn_event, Event};
use crate::state::{get_typed, set_typed, StateStore};

/// Accumulated and persisted route names
pub struct RouteNameRegistry {
    state: Arc<dyn StateStore>,
    key: String,
    names: ViewRouteNames,
    /// Names of the last finished rebuild, restored when a rebuild fails
    committed: Option<ViewRouteNames>,
}

impl RouteNameRegistry {
    pub fn new(state: Arc<dyn StateStore>, key: impl Into<String>) -> Self {
        Self {
            state,
            key: key.into(),
            names: ViewRouteNames::new(),
            committed: None,
        }
    }

    /// Names accumulated so far
    pub fn names(&self) -> &ViewRouteNames {
        &self.names
    }

    /// State key the names are written to
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Start a cycle: forget accumulated names
    ///
    /// The first cycle also remembers what is already persisted, so a
    /// failed rebuild can put it back.
    pub fn begin_cycle(&mut self) -> RoutingResult<()> {
        if self.committed.is_none() {
            let persisted: Option<ViewRouteNames> = get_typed(self.state.as_ref(), &self.key)?;
            self.committed = Some(persisted.unwrap_or_default());
        }
        self.names.clear();
        Ok(())
    }

    /// Merge collection results; incoming names win
    pub fn merge_collected(&mut self, names: ViewRouteNames) {
        self.names.extend(names);
    }

    /// Merge alteration claims; names already present win
    pub fn merge_claimed(&mut self, claims: ViewRouteNames) {
        for (pair, route_name) in claims {
            self.names.entry(pair).or_insert(route_name);
        }
    }

    /// Overwrite the persisted index with the accumulated names
    pub fn persist(&self) -> RoutingResult<()> {
        set_typed(self.state.as_ref(), &self.key, &self.names)?;
        let count = self.names.len().to_string();
        log_event_with_fields(
            Event::RouteNamesPersisted,
            &[("count", count.as_str()), ("key", self.key.as_str())],
        );
        Ok(())
    }

    /// End of a rebuild: reset the candidate cache and persist
    pub fn finalize(&mut self, candidates: &mut ViewCandidateIndex) -> RoutingResult<()> {
        candidates.reset();
        self.persist()?;
        self.committed = Some(self.names.clone());
        Ok(())
    }

    /// Failed rebuild: reset the candidate cache and restore the names of
    /// the last finished rebuild
    pub fn rollback(&mut self, candidates: &mut ViewCandidateIndex) {
        candidates.reset();
        let Some(committed) = self.committed.clone() else {
            return;
        };
        self.names = committed;
        if let Err(err) = self.persist() {
            let reason = err.to_string();
            warn_event(
                Event::RebuildAborted,
                &[("key", self.key.as_str()), ("restore_error", reason.as_str())],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::ViewDisplayPair;
    use crate::state::MemoryStateStore;
    use crate::views::{ApplicableViews, ConfiguredViewFactory, MemoryViewStorage};
    use serde_json::json;

    fn candidates() -> ViewCandidateIndex {
        ViewCandidateIndex::new(Arc::new(ApplicableViews::new(
            Arc::new(MemoryViewStorage::new()),
            Arc::new(ConfiguredViewFactory::new()),
        )))
    }

    fn names(entries: &[(&str, &str, &str)]) -> ViewRouteNames {
        entries
            .iter()
            .map(|(v, d, r)| (ViewDisplayPair::new(*v, *d), r.to_string()))
            .collect()
    }

    #[test]
    fn test_collected_overwrites() {
        let mut registry = RouteNameRegistry::new(Arc::new(MemoryStateStore::new()), "k");
        registry.merge_collected(names(&[("a", "1", "first")]));
        registry.merge_collected(names(&[("a", "1", "second")]));

        assert_eq!(registry.names()[&ViewDisplayPair::new("a", "1")], "second");
    }

    #[test]
    fn test_claims_keep_existing() {
        let mut registry = RouteNameRegistry::new(Arc::new(MemoryStateStore::new()), "k");
        registry.merge_collected(names(&[("a", "1", "route_x")]));
        registry.merge_claimed(names(&[("a", "1", "route_y"), ("b", "1", "route_z")]));

        assert_eq!(registry.names()[&ViewDisplayPair::new("a", "1")], "route_x");
        assert_eq!(registry.names()[&ViewDisplayPair::new("b", "1")], "route_z");
    }

    #[test]
    fn test_persist_overwrites_key() {
        let state = Arc::new(MemoryStateStore::new());
        state.set("views.view_route_names", json!({"stale.page": "old"})).unwrap();

        let mut registry = RouteNameRegistry::new(state.clone(), "views.view_route_names");
        registry.merge_collected(names(&[("a", "1", "r1")]));
        registry.persist().unwrap();

        assert_eq!(
            state.get("views.view_route_names").unwrap(),
            Some(json!({"a.1": "r1"}))
        );
    }

    #[test]
    fn test_rollback_restores_names_persisted_before_first_cycle() {
        let state = Arc::new(MemoryStateStore::new());
        state.set("k", json!({"a.1": "r1"})).unwrap();
        let mut registry = RouteNameRegistry::new(state.clone(), "k");
        let mut candidates = candidates();

        registry.begin_cycle().unwrap();
        registry.merge_collected(names(&[("b", "1", "r2")]));
        registry.persist().unwrap();
        candidates.candidates();

        registry.rollback(&mut candidates);

        assert_eq!(state.get("k").unwrap(), Some(json!({"a.1": "r1"})));
        assert_eq!(registry.names(), &names(&[("a", "1", "r1")]));
        assert!(!candidates.is_cached());
    }

    #[test]
    fn test_rollback_restores_last_finalized() {
        let state = Arc::new(MemoryStateStore::new());
        let mut registry = RouteNameRegistry::new(state.clone(), "k");
        let mut candidates = candidates();

        registry.begin_cycle().unwrap();
        registry.merge_collected(names(&[("a", "1", "r1")]));
        registry.finalize(&mut candidates).unwrap();

        registry.begin_cycle().unwrap();
        registry.persist().unwrap();
        assert_eq!(state.get("k").unwrap(), Some(json!({})));

        registry.rollback(&mut candidates);
        assert_eq!(state.get("k").unwrap(), Some(json!({"a.1": "r1"})));
    }
}
