//! Observable events of the route registry
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Rebuild lifecycle
    /// Route rebuild started
    RebuildBegin,
    /// Route rebuild finished
    RebuildComplete,
    /// Route rebuild failed; the previous state was restored
    RebuildAborted,

    // Candidate index
    /// Candidate set computed from the view listing
    CandidatesComputed,
    /// Candidate cache cleared
    CandidatesReset,

    // Collection and alteration
    /// A candidate pair was skipped (missing view, bad display)
    PairSkipped,
    /// A display reported a name for a pair that is not a candidate
    PairRejected,
    /// Collection phase finished
    RoutesCollected,
    /// Alteration pass for one provider finished
    RoutesAltered,
    /// Route name index written to the state store
    RouteNamesPersisted,

    // Response
    /// Status code copied onto a view page
    StatusApplied,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::RebuildBegin => "ROUTE_REBUILD_BEGIN",
            Event::RebuildComplete => "ROUTE_REBUILD_COMPLETE",
            Event::RebuildAborted => "ROUTE_REBUILD_ABORTED",
            Event::CandidatesComputed => "ROUTE_CANDIDATES_COMPUTED",
            Event::CandidatesReset => "ROUTE_CANDIDATES_RESET",
            Event::PairSkipped => "VIEW_ROUTE_SKIPPED",
            Event::PairRejected => "VIEW_ROUTE_REJECTED",
            Event::RoutesCollected => "VIEW_ROUTES_COLLECTED",
            Event::RoutesAltered => "VIEW_ROUTES_ALTERED",
            Event::RouteNamesPersisted => "VIEW_ROUTE_NAMES_PERSISTED",
            Event::StatusApplied => "RESPONSE_STATUS_APPLIED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
