//! Observability for the route registry
//!
//! Structured JSON logging of rebuild lifecycle events. Logging is
//! read-only and never alters the outcome of a rebuild.
//!
//! ```ignore
//! use viewroutes::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::RoutesAltered, &[("provider", "node")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event at INFO
pub fn log_event(event: Event) {
    Logger::info(event.as_str(), &[]);
}

/// Log a lifecycle event with fields at INFO
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::info(event.as_str(), fields);
}

/// Log a lifecycle event with fields at TRACE
pub fn trace_event(event: Event, fields: &[(&str, &str)]) {
    Logger::trace(event.as_str(), fields);
}

/// Log a lifecycle event with fields at WARN
pub fn warn_event(event: Event, fields: &[(&str, &str)]) {
    Logger::warn(event.as_str(), fields);
}
