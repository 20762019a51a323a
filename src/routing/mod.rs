//! # Dynamic Route Registry
//!
//! Views that own a URL contribute routes to the host's route table and
//! may take over routes defined elsewhere. The resulting route names are
//! persisted for URL generation.

pub mod alter;
pub mod builder;
pub mod candidates;
pub mod collector;
pub mod errors;
pub mod loader;
pub mod lookup;
pub mod pair;
pub mod registry;
pub mod route;
pub mod source;
pub mod subscriber;

pub use alter::RouteAlterationPass;
pub use builder::{ProviderReport, RebuildReport, RouteBuilder};
pub use candidates::ViewCandidateIndex;
pub use collector::RouteCollector;
pub use errors::{RoutingError, RoutingResult};
pub use loader::{DisplayLoader, SkipReason};
pub use lookup::ViewRouteLookup;
pub use pair::{ViewDisplayPair, ViewRouteNames};
pub use registry::RouteNameRegistry;
pub use route::{Route, RouteCollection};
pub use source::{RouteSource, StaticRouteSource};
pub use subscriber::RouteSubscriber;
