//! # Display Loader
//!
//! Shared first steps of both rebuild phases: load the stored view, build
//! its executable, activate the display and hand its router capability to
//! the caller. Any failure along the way skips the pair. The executable is
//! destroyed on every exit path.

use std::sync::Arc;

use super::pair::ViewDisplayPair;
use crate::observability::{trace_event, Event};
use crate::views::{ExecutableFactory, ExecutableGuard, RouterDisplay, ViewStorage};

/// Why a pair produced no router display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    ViewMissing,
    ExecutableFailed,
    DisplayUnavailable,
    NotRouter,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::ViewMissing => "view_missing",
            SkipReason::ExecutableFailed => "executable_failed",
            SkipReason::DisplayUnavailable => "display_unavailable",
            SkipReason::NotRouter => "not_router",
        }
    }
}

/// Loads router displays of candidate pairs
#[derive(Clone)]
pub struct DisplayLoader {
    storage: Arc<dyn ViewStorage>,
    factory: Arc<dyn ExecutableFactory>,
}

impl DisplayLoader {
    pub fn new(storage: Arc<dyn ViewStorage>, factory: Arc<dyn ExecutableFactory>) -> Self {
        Self { storage, factory }
    }

    /// Run `f` against the router display of `pair`
    pub fn with_router<R>(
        &self,
        pair: &ViewDisplayPair,
        f: impl FnOnce(&mut dyn RouterDisplay) -> R,
    ) -> Result<R, SkipReason> {
        let result = self.try_with_router(pair, f);
        if let Err(reason) = result.as_ref() {
            let key = pair.key();
            trace_event(
                Event::PairSkipped,
                &[("pair", key.as_str()), ("reason", reason.as_str())],
            );
        }
        result
    }

    fn try_with_router<R>(
        &self,
        pair: &ViewDisplayPair,
        f: impl FnOnce(&mut dyn RouterDisplay) -> R,
    ) -> Result<R, SkipReason> {
        let view = self
            .storage
            .load(pair.view_id())
            .ok_or(SkipReason::ViewMissing)?;
        let executable = self
            .factory
            .executable(&view)
            .map_err(|_| SkipReason::ExecutableFailed)?;
        let mut executable = ExecutableGuard::new(executable);

        if !executable.set_display(pair.display_id()) {
            return Err(SkipReason::DisplayUnavailable);
        }
        let display = executable
            .display_handler(pair.display_id())
            .ok_or(SkipReason::DisplayUnavailable)?;
        let router = display.as_router().ok_or(SkipReason::NotRouter)?;

        Ok(f(router))
    }
}
