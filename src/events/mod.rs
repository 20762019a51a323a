//! # Host Events
//!
//! The event bus through which the host drives route rebuilds and response
//! building.

mod dispatcher;
mod subscriber;

pub use dispatcher::EventDispatcher;
pub use subscriber::{EventName, EventSubscriber, Subscription};
