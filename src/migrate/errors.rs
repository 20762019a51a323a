//! # Migration Errors
//!
//! Error value raised while a migration processes a source row. Besides the
//! message it tells the migration engine how loudly to report the problem
//! and which status to record for the row in the id map.

use std::error::Error as StdError;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for migration operations
pub type MigrationResult<T> = Result<T, MigrationError>;

/// Boxed underlying cause
pub type Cause = Box<dyn StdError + Send + Sync + 'static>;

/// How loudly a migration message is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageLevel {
    Error = 1,
    Warning = 2,
    Notice = 3,
    Informational = 4,
}

impl MessageLevel {
    /// Numeric value stored alongside messages
    pub fn value(&self) -> u8 {
        *self as u8
    }

    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(MessageLevel::Error),
            2 => Some(MessageLevel::Warning),
            3 => Some(MessageLevel::Notice),
            4 => Some(MessageLevel::Informational),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageLevel::Error => "error",
            MessageLevel::Warning => "warning",
            MessageLevel::Notice => "notice",
            MessageLevel::Informational => "informational",
        }
    }
}

impl fmt::Display for MessageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome recorded for the row being processed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    Imported = 0,
    NeedsUpdate = 1,
    Ignored = 2,
    Failed = 3,
}

impl RowStatus {
    /// Numeric value stored in the id map
    pub fn value(&self) -> u8 {
        *self as u8
    }

    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(RowStatus::Imported),
            1 => Some(RowStatus::NeedsUpdate),
            2 => Some(RowStatus::Ignored),
            3 => Some(RowStatus::Failed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RowStatus::Imported => "imported",
            RowStatus::NeedsUpdate => "needs_update",
            RowStatus::Ignored => "ignored",
            RowStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for RowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error raised while migrating a row
///
/// Defaults to level [`MessageLevel::Error`] and status
/// [`RowStatus::Failed`]. Built once and never mutated afterwards.
#[derive(Debug, Error)]
#[error("[{level}] {message}")]
pub struct MigrationError {
    message: String,
    code: i64,
    #[source]
    cause: Option<Cause>,
    level: MessageLevel,
    status: RowStatus,
}

impl MigrationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: 0,
            cause: None,
            level: MessageLevel::Error,
            status: RowStatus::Failed,
        }
    }

    pub fn with_code(mut self, code: i64) -> Self {
        self.code = code;
        self
    }

    pub fn with_cause(mut self, cause: impl Into<Cause>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub fn with_level(mut self, level: MessageLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_status(mut self, status: RowStatus) -> Self {
        self.status = status;
        self
    }

    /// Row should be skipped without counting as a failure
    pub fn ignored(message: impl Into<String>) -> Self {
        Self::new(message)
            .with_level(MessageLevel::Informational)
            .with_status(RowStatus::Ignored)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> i64 {
        self.code
    }

    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    pub fn level(&self) -> MessageLevel {
        self.level
    }

    pub fn status(&self) -> RowStatus {
        self.status
    }
}
