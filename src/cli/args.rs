//! CLI argument definitions using clap
//!
//! Commands:
//! - viewroutes rebuild --config <path>
//! - viewroutes lookup --config <path> <view_id> <display_id>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// viewroutes - route registry for view-backed pages
#[derive(Parser, Debug)]
#[command(name = "viewroutes")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rebuild the route table and persist the route name index
    Rebuild {
        /// Path to configuration file
        #[arg(long, default_value = "./viewroutes.json")]
        config: PathBuf,
    },

    /// Print the route name persisted for a view display
    Lookup {
        /// Path to configuration file
        #[arg(long, default_value = "./viewroutes.json")]
        config: PathBuf,

        /// View id
        view_id: String,

        /// Display id within the view
        display_id: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rebuild_default_config() {
        let cli = Cli::try_parse_from(["viewroutes", "rebuild"]).unwrap();
        match cli.command {
            Command::Rebuild { config } => assert_eq!(config, PathBuf::from("./viewroutes.json")),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_lookup() {
        let cli = Cli::try_parse_from([
            "viewroutes",
            "lookup",
            "--config",
            "/etc/viewroutes.json",
            "frontpage",
            "page_1",
        ])
        .unwrap();

        match cli.command {
            Command::Lookup {
                config,
                view_id,
                display_id,
            } => {
                assert_eq!(config, PathBuf::from("/etc/viewroutes.json"));
                assert_eq!(view_id, "frontpage");
                assert_eq!(display_id, "page_1");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_lookup_requires_pair() {
        assert!(Cli::try_parse_from(["viewroutes", "lookup", "frontpage"]).is_err());
    }
}
