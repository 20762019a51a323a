//! CLI module for viewroutes
//!
//! Provides command-line interface for:
//! - rebuild: Rebuild routes and persist the route name index
//! - lookup: Read a persisted route name

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{
    lookup, lookup_with, rebuild, rebuild_with, route_builder, run, run_command, write_json,
};
pub use errors::{CliError, CliErrorCode, CliResult};
