//! # Route Alteration Pass
//!
//! Runs once per external route source. Router displays may take over
//! routes the source defined instead of adding their own; every pair that
//! claims a route leaves the candidate set for the rest of the cycle.

use super::candidates::ViewCandidateIndex;
use super::collector::reject;
use super::loader::DisplayLoader;
use super::pair::ViewRouteNames;
use super::route::RouteCollection;

/// Runs one alteration pass
pub struct RouteAlterationPass<'a> {
    loader: &'a DisplayLoader,
}

impl<'a> RouteAlterationPass<'a> {
    pub fn new(loader: &'a DisplayLoader) -> Self {
        Self { loader }
    }

    /// Let the current candidates claim routes in `collection`
    ///
    /// Iterates a snapshot taken at the start of the pass, removes every
    /// claimed pair from `candidates` and returns the claims.
    pub fn alter(
        &self,
        candidates: &mut ViewCandidateIndex,
        collection: &mut RouteCollection,
    ) -> ViewRouteNames {
        let snapshot = candidates.snapshot();
        let mut claims = ViewRouteNames::new();

        for pair in &snapshot {
            let Ok(claimed) = self
                .loader
                .with_router(pair, |display| display.alter_routes(collection))
            else {
                continue;
            };

            for (claimed_pair, route_name) in claimed {
                if snapshot.contains(&claimed_pair) {
                    claims.entry(claimed_pair).or_insert(route_name);
                } else {
                    reject(&claimed_pair, &route_name);
                }
            }
        }

        for pair in claims.keys() {
            candidates.remove(pair);
        }

        claims
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{Route, ViewDisplayPair};
    use crate::views::{ApplicableViews, ConfiguredViewFactory, DisplayConfig, MemoryViewStorage, ViewConfig};
    use std::sync::Arc;

    fn setup(views: Vec<ViewConfig>) -> (DisplayLoader, ViewCandidateIndex) {
        let storage = Arc::new(MemoryViewStorage::with_views(views));
        let factory = Arc::new(ConfiguredViewFactory::new());
        let lister = Arc::new(ApplicableViews::new(storage.clone(), factory.clone()));
        (DisplayLoader::new(storage, factory), ViewCandidateIndex::new(lister))
    }

    #[test]
    fn test_claim_removes_candidate() {
        let (loader, mut candidates) = setup(vec![
            ViewConfig::new("a").with_display("page_1", DisplayConfig::page("admin/content")),
            ViewConfig::new("b").with_display("page_1", DisplayConfig::page("b")),
        ]);
        let mut collection = RouteCollection::new();
        collection.add("system.admin_content", Route::new("/admin/content"));

        let claims = RouteAlterationPass::new(&loader).alter(&mut candidates, &mut collection);

        let a = ViewDisplayPair::new("a", "page_1");
        assert_eq!(claims[&a], "system.admin_content");
        assert_eq!(candidates.snapshot(), vec![ViewDisplayPair::new("b", "page_1")]);
        assert_eq!(
            collection.get("system.admin_content").unwrap().default_str("view_id"),
            Some("a")
        );
    }

    #[test]
    fn test_no_match_keeps_candidates() {
        let (loader, mut candidates) = setup(vec![
            ViewConfig::new("a").with_display("page_1", DisplayConfig::page("a")),
        ]);
        let mut collection = RouteCollection::new();
        collection.add("node.add", Route::new("/node/add"));

        let claims = RouteAlterationPass::new(&loader).alter(&mut candidates, &mut collection);

        assert!(claims.is_empty());
        assert_eq!(candidates.snapshot().len(), 1);
        assert_eq!(collection.get("node.add").unwrap(), &Route::new("/node/add"));
    }
}
