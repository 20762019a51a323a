//! # Route Collector
//!
//! Collection phase: every candidate router display adds its routes to the
//! shared collection and reports the names it used.

use std::collections::BTreeSet;

use super::loader::DisplayLoader;
use super::pair::{ViewDisplayPair, ViewRouteNames};
use super::route::RouteCollection;
use crate::observability::{warn_event, Event};

/// Runs the collection phase over a set of candidates
pub struct RouteCollector<'a> {
    loader: &'a DisplayLoader,
}

impl<'a> RouteCollector<'a> {
    pub fn new(loader: &'a DisplayLoader) -> Self {
        Self { loader }
    }

    /// Collect routes of every candidate into `collection`
    ///
    /// Candidates are visited in sorted order. A later report for the same
    /// pair overwrites an earlier one. Names reported for pairs outside
    /// `candidates` are dropped.
    pub fn collect(
        &self,
        candidates: &BTreeSet<ViewDisplayPair>,
        collection: &mut RouteCollection,
    ) -> ViewRouteNames {
        let mut names = ViewRouteNames::new();

        for pair in candidates {
            let Ok(reported) = self
                .loader
                .with_router(pair, |display| display.collect_routes(collection))
            else {
                continue;
            };

            for (reported_pair, route_name) in reported {
                if candidates.contains(&reported_pair) {
                    names.insert(reported_pair, route_name);
                } else {
                    reject(&reported_pair, &route_name);
                }
            }
        }

        names
    }
}

pub(crate) fn reject(pair: &ViewDisplayPair, route_name: &str) {
    let key = pair.key();
    warn_event(
        Event::PairRejected,
        &[("pair", key.as_str()), ("route", route_name)],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::{ConfiguredViewFactory, DisplayConfig, MemoryViewStorage, ViewConfig};
    use std::sync::Arc;

    fn loader(views: Vec<ViewConfig>) -> DisplayLoader {
        DisplayLoader::new(
            Arc::new(MemoryViewStorage::with_views(views)),
            Arc::new(ConfiguredViewFactory::new()),
        )
    }

    fn set(pairs: &[(&str, &str)]) -> BTreeSet<ViewDisplayPair> {
        pairs.iter().map(|(v, d)| ViewDisplayPair::new(*v, *d)).collect()
    }

    #[test]
    fn test_collects_every_router_display() {
        let loader = loader(vec![
            ViewConfig::new("a").with_display("page_1", DisplayConfig::page("a")),
            ViewConfig::new("b").with_display("page_1", DisplayConfig::page("b").with_route_name("b_page")),
        ]);
        let mut collection = RouteCollection::new();

        let names = RouteCollector::new(&loader)
            .collect(&set(&[("a", "page_1"), ("b", "page_1")]), &mut collection);

        assert_eq!(names[&ViewDisplayPair::new("a", "page_1")], "view.a.page_1");
        assert_eq!(names[&ViewDisplayPair::new("b", "page_1")], "b_page");
        assert_eq!(collection.names(), vec!["view.a.page_1", "b_page"]);
    }

    #[test]
    fn test_missing_view_is_skipped() {
        let loader = loader(vec![ViewConfig::new("a").with_display("page_1", DisplayConfig::page("a"))]);
        let mut collection = RouteCollection::new();

        let names = RouteCollector::new(&loader)
            .collect(&set(&[("a", "page_1"), ("z", "9")]), &mut collection);

        assert_eq!(names.len(), 1);
        assert!(!names.contains_key(&ViewDisplayPair::new("z", "9")));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_non_candidate_display_contributes_nothing() {
        let loader = loader(vec![ViewConfig::new("a").with_display("page_1", DisplayConfig::page("a"))]);
        let mut collection = RouteCollection::new();

        let names = RouteCollector::new(&loader).collect(&BTreeSet::new(), &mut collection);
        assert!(names.is_empty());
        assert!(collection.is_empty());
    }
}
