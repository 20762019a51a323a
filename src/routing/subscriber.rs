//! # Route Subscriber
//!
//! Builds the routes of all views. The host first asks for dynamic routes,
//! where every route-producing display adds its own route. Each other route
//! source then passes through [`RouteSubscriber::alter_routes`], where
//! displays may take over existing routes with the same path. When the host
//! signals the end of the rebuild, the candidate cache is reset and the
//! route name index is persisted. A failed rebuild also resets the cache and
//! puts back the index of the last finished rebuild.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::alter::RouteAlterationPass;
use super::candidates::ViewCandidateIndex;
use super::collector::RouteCollector;
use super::errors::RoutingResult;
use super::loader::DisplayLoader;
use super::pair::{ViewDisplayPair, ViewRouteNames};
use super::registry::RouteNameRegistry;
use super::route::RouteCollection;
use crate::config::RoutingConfig;
use crate::events::{EventName, EventSubscriber, Subscription};
use crate::observability::{log_event_with_fields, Event};
use crate::state::StateStore;
use crate::views::{ApplicableViews, ExecutableFactory, ViewLister, ViewStorage};

/// Route subscriber of the views system
pub struct RouteSubscriber {
    candidates: ViewCandidateIndex,
    loader: DisplayLoader,
    registry: RouteNameRegistry,
}

impl RouteSubscriber {
    pub fn new(
        lister: Arc<dyn ViewLister>,
        storage: Arc<dyn ViewStorage>,
        factory: Arc<dyn ExecutableFactory>,
        state: Arc<dyn StateStore>,
        config: &RoutingConfig,
    ) -> Self {
        Self {
            candidates: ViewCandidateIndex::new(lister),
            loader: DisplayLoader::new(storage, factory),
            registry: RouteNameRegistry::new(state, config.state_key.clone()),
        }
    }

    /// Subscriber listing candidates from `storage` itself
    pub fn with_storage(
        storage: Arc<dyn ViewStorage>,
        factory: Arc<dyn ExecutableFactory>,
        state: Arc<dyn StateStore>,
        config: &RoutingConfig,
    ) -> Self {
        let lister = Arc::new(ApplicableViews::new(storage.clone(), factory.clone()));
        Self::new(lister, storage, factory, state, config)
    }

    /// Forget the cached candidates
    pub fn reset(&mut self) {
        self.candidates.reset();
    }

    /// Current candidates, computing them if needed
    pub fn candidates(&mut self) -> &BTreeSet<ViewDisplayPair> {
        self.candidates.candidates()
    }

    /// Whether candidates are cached
    pub fn has_cached_candidates(&self) -> bool {
        self.candidates.is_cached()
    }

    /// Route names accumulated in the current cycle
    pub fn route_names(&self) -> &ViewRouteNames {
        self.registry.names()
    }

    /// Collection phase: add the routes of every candidate display
    ///
    /// Starts a new cycle of route names and persists them before returning.
    pub fn routes(&mut self, collection: &mut RouteCollection) -> RoutingResult<()> {
        self.registry.begin_cycle()?;

        let before = collection.len();
        let names = RouteCollector::new(&self.loader).collect(self.candidates.candidates(), collection);
        self.registry.merge_collected(names);

        let added = collection.len().saturating_sub(before).to_string();
        let named = self.registry.names().len().to_string();
        log_event_with_fields(
            Event::RoutesCollected,
            &[("names", named.as_str()), ("routes", added.as_str())],
        );

        self.registry.persist()
    }

    /// Alteration phase for the routes of `provider`
    pub fn alter_routes(&mut self, collection: &mut RouteCollection, provider: &str) -> RoutingResult<()> {
        let claims = RouteAlterationPass::new(&self.loader).alter(&mut self.candidates, collection);

        let claimed = claims.len().to_string();
        log_event_with_fields(
            Event::RoutesAltered,
            &[("claimed", claimed.as_str()), ("provider", provider)],
        );

        self.registry.merge_claimed(claims);
        Ok(())
    }

    /// End of the rebuild: reset the candidates and persist the names
    pub fn route_rebuild_finished(&mut self) -> RoutingResult<()> {
        self.registry.finalize(&mut self.candidates)
    }

    /// Failed rebuild: drop the candidates claims have shrunk and restore
    /// the names of the last finished rebuild
    pub fn route_rebuild_aborted(&mut self) {
        self.registry.rollback(&mut self.candidates);
    }
}

impl EventSubscriber for RouteSubscriber {
    fn name(&self) -> &str {
        "views_route_subscriber"
    }

    fn subscribed_events(&self) -> Vec<Subscription> {
        vec![
            Subscription::default_priority(EventName::RouteDynamic),
            Subscription::default_priority(EventName::RouteAlter),
            Subscription::default_priority(EventName::RouteFinished),
            Subscription::default_priority(EventName::RouteAborted),
        ]
    }

    fn on_dynamic_routes(&mut self, collection: &mut RouteCollection) -> RoutingResult<()> {
        self.routes(collection)
    }

    fn on_alter_routes(&mut self, collection: &mut RouteCollection, provider: &str) -> RoutingResult<()> {
        self.alter_routes(collection, provider)
    }

    fn on_routes_finished(&mut self) -> RoutingResult<()> {
        self.route_rebuild_finished()
    }

    fn on_routes_aborted(&mut self) {
        self.route_rebuild_aborted();
    }
}
