//! # Route Builder
//!
//! Drives a full route rebuild through the event dispatcher:
//!
//! 1. dynamic routes are collected into a fresh collection
//! 2. every route source, in registration order, builds its routes and
//!    passes them through the alteration hooks
//! 3. altered source routes, then dynamic routes, join the route table
//! 4. the rebuild-finished event fires
//!
//! If any step fails, the rebuild-aborted event fires instead and the
//! previous table stays in place.
//!
//! Registration order matters: displays claim routes from the first source
//! whose paths match, and claimed displays skip every later source.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::errors::RoutingResult;
use super::route::RouteCollection;
use super::source::RouteSource;
use crate::events::EventDispatcher;
use crate::observability::{log_event_with_fields, warn_event, Event};

/// Route count of one provider after alteration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderReport {
    pub provider: String,
    pub routes: usize,
}

/// Summary of one rebuild
#[derive(Debug, Clone, Serialize)]
pub struct RebuildReport {
    pub rebuild_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub providers: Vec<ProviderReport>,
    pub dynamic_routes: usize,
    pub total_routes: usize,
}

/// Owner of the route table
pub struct RouteBuilder {
    dispatcher: EventDispatcher,
    sources: Vec<Box<dyn RouteSource>>,
    routes: RouteCollection,
}

impl RouteBuilder {
    pub fn new(dispatcher: EventDispatcher) -> Self {
        Self {
            dispatcher,
            sources: Vec::new(),
            routes: RouteCollection::new(),
        }
    }

    /// Register a route source; sources are altered in registration order
    pub fn add_source(&mut self, source: Box<dyn RouteSource>) {
        self.sources.push(source);
    }

    /// Route table of the last successful rebuild
    pub fn routes(&self) -> &RouteCollection {
        &self.routes
    }

    /// Rebuild the route table
    ///
    /// On error the previous table is kept and subscribers are told to
    /// undo the partial rebuild.
    pub fn rebuild(&mut self) -> RoutingResult<RebuildReport> {
        let rebuild_id = Uuid::new_v4();
        let started_at = Utc::now();
        let id = rebuild_id.to_string();
        log_event_with_fields(Event::RebuildBegin, &[("rebuild_id", id.as_str())]);

        let (table, providers, dynamic_routes) = match self.build_table() {
            Ok(built) => built,
            Err(err) => {
                self.dispatcher.dispatch_routes_aborted();
                let reason = err.to_string();
                warn_event(
                    Event::RebuildAborted,
                    &[("error", reason.as_str()), ("rebuild_id", id.as_str())],
                );
                return Err(err);
            }
        };
        self.routes = table;

        let total = self.routes.len().to_string();
        log_event_with_fields(
            Event::RebuildComplete,
            &[("rebuild_id", id.as_str()), ("routes", total.as_str())],
        );

        Ok(RebuildReport {
            rebuild_id,
            started_at,
            finished_at: Utc::now(),
            providers,
            dynamic_routes,
            total_routes: self.routes.len(),
        })
    }

    fn build_table(&mut self) -> RoutingResult<(RouteCollection, Vec<ProviderReport>, usize)> {
        let mut dynamic = RouteCollection::new();
        self.dispatcher.dispatch_dynamic_routes(&mut dynamic)?;
        let dynamic_routes = dynamic.len();

        let mut table = RouteCollection::new();
        let mut providers = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            let mut collection = source.routes()?;
            self.dispatcher
                .dispatch_alter_routes(&mut collection, source.provider())?;

            providers.push(ProviderReport {
                provider: source.provider().to_string(),
                routes: collection.len(),
            });
            table.add_collection(collection);
        }
        table.add_collection(dynamic);

        self.dispatcher.dispatch_routes_finished()?;
        Ok((table, providers, dynamic_routes))
    }
}
