//! # viewroutes
//!
//! Route registry for view-backed pages. During a route rebuild every view
//! display able to serve a URL contributes its route, may take over routes
//! of other providers, and the resulting route name of each view display is
//! persisted for later URL generation.
//!
//! ## Modules
//!
//! - `routing`: candidate index, collection and alteration passes, route
//!   name registry and the rebuild orchestrator
//! - `views`: view definitions, executables and display plugins
//! - `events`: the event bus driving rebuilds and response building
//! - `http`: controller results and the response status adapter
//! - `state`: durable key-value state
//! - `migrate`: error values reported by content migrations
//! - `observability`: structured JSON logging
//! - `config`, `cli`: the `viewroutes` binary

pub mod cli;
pub mod config;
pub mod events;
pub mod http;
pub mod migrate;
pub mod observability;
pub mod routing;
pub mod state;
pub mod views;
