//! CLI command implementations
//!
//! Both commands load the JSON config, wire the views store and the file
//! state store, and write their result to stdout.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use serde_json::json;

use crate::config::AppConfig;
use crate::events::EventDispatcher;
use crate::http::{HtmlPageRenderer, ResponseStatusAdapter};
use crate::observability::Logger;
use crate::routing::{RebuildReport, RouteBuilder, RouteSubscriber, ViewRouteLookup};
use crate::state::{FileStateStore, StateStore};
use crate::views::{ConfiguredViewFactory, MemoryViewStorage};

use super::args::Command;
use super::errors::CliResult;

/// Parse arguments and run the selected command
///
/// Stdout carries only the command's JSON output; log lines go to stderr.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    Logger::set_stderr_only(true);
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Rebuild { config } => rebuild(&config),
        Command::Lookup {
            config,
            view_id,
            display_id,
        } => lookup(&config, &view_id, &display_id),
    }
}

/// Rebuild routes and print the report
pub fn rebuild(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let report = rebuild_with(&config)?;
    write_json(&mut io::stdout(), &report)
}

/// Print the persisted route name of a view display
pub fn lookup(config_path: &Path, view_id: &str, display_id: &str) -> CliResult<()> {
    let config = load_config(config_path)?;
    let route_name = lookup_with(&config, view_id, display_id)?;

    let output = json!({
        "view_id": view_id,
        "display_id": display_id,
        "route_name": route_name,
    });
    write_json(&mut io::stdout(), &output)
}

/// Write `value` as one pretty JSON document
pub fn write_json<W: Write, T: Serialize>(writer: &mut W, value: &T) -> CliResult<()> {
    writeln!(writer, "{}", serde_json::to_string_pretty(value)?)?;
    writer.flush()?;
    Ok(())
}

/// Run one rebuild against the stores named in `config`
pub fn rebuild_with(config: &AppConfig) -> CliResult<RebuildReport> {
    let mut builder = route_builder(config)?;
    Ok(builder.rebuild()?)
}

/// Read the route name persisted by the last rebuild
pub fn lookup_with(config: &AppConfig, view_id: &str, display_id: &str) -> CliResult<Option<String>> {
    let state: Arc<dyn StateStore> = Arc::new(FileStateStore::new(&config.state_file));
    let lookup = ViewRouteLookup::new(state, config.routing.state_key.clone());
    Ok(lookup.route_name(view_id, display_id)?)
}

/// Wire the route builder the way the host kernel would
pub fn route_builder(config: &AppConfig) -> CliResult<RouteBuilder> {
    let storage = Arc::new(MemoryViewStorage::from_file(&config.views_file)?);
    let factory = Arc::new(ConfiguredViewFactory::new());
    let state: Arc<dyn StateStore> = Arc::new(FileStateStore::new(&config.state_file));

    let mut dispatcher = EventDispatcher::new();
    dispatcher.add_subscriber(Box::new(RouteSubscriber::with_storage(
        storage,
        factory,
        state,
        &config.routing,
    )));
    dispatcher.add_subscriber(Box::new(ResponseStatusAdapter::new(&config.routing)));
    dispatcher.add_subscriber(Box::new(HtmlPageRenderer::new()));

    let mut builder = RouteBuilder::new(dispatcher);
    for source in &config.sources {
        builder.add_source(Box::new(source.clone()));
    }
    Ok(builder)
}

fn load_config(path: &Path) -> CliResult<AppConfig> {
    let config = AppConfig::load(path)?;
    Logger::set_min_severity(config.log_level);
    Ok(config)
}
