//! # Event Subscribers

use std::fmt;

use crate::http::ControllerResultEvent;
use crate::routing::{RouteCollection, RoutingResult};

/// Events a subscriber can listen to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventName {
    /// A controller returned a result that still needs a response
    ControllerResult,
    /// Dynamic routes are being collected
    RouteDynamic,
    /// One route source's routes are open for alteration
    RouteAlter,
    /// All route sources have been built and altered
    RouteFinished,
    /// A rebuild failed before finishing
    RouteAborted,
}

impl EventName {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventName::ControllerResult => "kernel.view",
            EventName::RouteDynamic => "routing.route_dynamic",
            EventName::RouteAlter => "routing.route_alter",
            EventName::RouteFinished => "routing.route_finished",
            EventName::RouteAborted => "routing.route_aborted",
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One event a subscriber listens to, with its priority
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription {
    pub event: EventName,
    /// Higher priorities run first
    pub priority: i32,
}

impl Subscription {
    pub fn new(event: EventName, priority: i32) -> Self {
        Self { event, priority }
    }

    /// Subscription at the default priority 0
    pub fn default_priority(event: EventName) -> Self {
        Self::new(event, 0)
    }
}

/// Listener on the host's events
///
/// Every hook defaults to a no-op; implementors override the hooks for the
/// events returned by [`EventSubscriber::subscribed_events`].
pub trait EventSubscriber {
    /// Name used in logs
    fn name(&self) -> &str;

    fn subscribed_events(&self) -> Vec<Subscription>;

    fn on_controller_result(&mut self, _event: &mut ControllerResultEvent) {}

    fn on_dynamic_routes(&mut self, _collection: &mut RouteCollection) -> RoutingResult<()> {
        Ok(())
    }

    fn on_alter_routes(
        &mut self,
        _collection: &mut RouteCollection,
        _provider: &str,
    ) -> RoutingResult<()> {
        Ok(())
    }

    fn on_routes_finished(&mut self) -> RoutingResult<()> {
        Ok(())
    }

    /// Undo whatever a failed rebuild left behind
    fn on_routes_aborted(&mut self) {}
}
