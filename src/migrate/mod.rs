//! # Migrate
//!
//! Error reporting shared with the content migration engine.

mod errors;

pub use errors::{Cause, MessageLevel, MigrationError, MigrationResult, RowStatus};
