//! # Event Dispatcher
//!
//! Synchronous, priority-ordered dispatch. Listeners with a higher priority
//! run first; equal priorities run in registration order.

use super::subscriber::{EventName, EventSubscriber};
use crate::http::ControllerResultEvent;
use crate::routing::{RouteCollection, RoutingResult};

/// Dispatches host events to registered subscribers
#[derive(Default)]
pub struct EventDispatcher {
    subscribers: Vec<Box<dyn EventSubscriber>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber
    pub fn add_subscriber(&mut self, subscriber: Box<dyn EventSubscriber>) {
        self.subscribers.push(subscriber);
    }

    /// Subscriber indexes listening to `event`, in call order
    fn listeners(&self, event: EventName) -> Vec<usize> {
        let mut listeners: Vec<(i32, usize)> = self
            .subscribers
            .iter()
            .enumerate()
            .flat_map(|(idx, subscriber)| {
                subscriber
                    .subscribed_events()
                    .into_iter()
                    .filter(move |s| s.event == event)
                    .map(move |s| (s.priority, idx))
            })
            .collect();

        // Stable sort keeps registration order within a priority
        listeners.sort_by(|a, b| b.0.cmp(&a.0));
        listeners.into_iter().map(|(_, idx)| idx).collect()
    }

    /// Names of the subscribers listening to `event`, in call order
    pub fn listener_names(&self, event: EventName) -> Vec<String> {
        self.listeners(event)
            .into_iter()
            .map(|idx| self.subscribers[idx].name().to_string())
            .collect()
    }

    pub fn dispatch_controller_result(&mut self, event: &mut ControllerResultEvent) {
        for idx in self.listeners(EventName::ControllerResult) {
            self.subscribers[idx].on_controller_result(event);
        }
    }

    pub fn dispatch_dynamic_routes(&mut self, collection: &mut RouteCollection) -> RoutingResult<()> {
        for idx in self.listeners(EventName::RouteDynamic) {
            self.subscribers[idx].on_dynamic_routes(collection)?;
        }
        Ok(())
    }

    pub fn dispatch_alter_routes(
        &mut self,
        collection: &mut RouteCollection,
        provider: &str,
    ) -> RoutingResult<()> {
        for idx in self.listeners(EventName::RouteAlter) {
            self.subscribers[idx].on_alter_routes(collection, provider)?;
        }
        Ok(())
    }

    pub fn dispatch_routes_finished(&mut self) -> RoutingResult<()> {
        for idx in self.listeners(EventName::RouteFinished) {
            self.subscribers[idx].on_routes_finished()?;
        }
        Ok(())
    }

    /// Tell listeners the rebuild failed before finishing
    pub fn dispatch_routes_aborted(&mut self) {
        for idx in self.listeners(EventName::RouteAborted) {
            self.subscribers[idx].on_routes_aborted();
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}
