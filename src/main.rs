//! viewroutes CLI entry point
//!
//! Parses arguments and dispatches through `cli::run`, printing errors to
//! stderr and exiting non-zero on failure.

use viewroutes::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
