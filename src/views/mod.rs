//! # Views
//!
//! Boundary to stored view definitions and their executables: storage,
//! listing of route-producing displays, executable construction and the
//! display plugins that may own routes.

pub mod config;
pub mod display;
pub mod errors;
pub mod executable;
pub mod storage;

pub use config::{DisplayConfig, ViewConfig};
pub use display::{DisplayPlugin, PathDisplay, PlainDisplay, RouterDisplay, PAGE_CONTROLLER};
pub use errors::{ViewError, ViewResult};
pub use executable::{
    ConfiguredView, ConfiguredViewFactory, ExecutableFactory, ExecutableGuard, ViewExecutable,
};
pub use storage::{ApplicableViews, MemoryViewStorage, ViewLister, ViewStorage};
