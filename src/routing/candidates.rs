//! # Candidate Index
//!
//! The set of view/display pairs that may own a route. It is computed from
//! the view listing on first use and kept until [`ViewCandidateIndex::reset`],
//! which the host triggers once a rebuild has finished.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::pair::ViewDisplayPair;
use crate::observability::{log_event, log_event_with_fields, Event};
use crate::views::{ExecutableGuard, ViewLister};

/// Lazily computed set of route-producing pairs
pub struct ViewCandidateIndex {
    lister: Arc<dyn ViewLister>,
    cached: Option<BTreeSet<ViewDisplayPair>>,
}

impl ViewCandidateIndex {
    pub fn new(lister: Arc<dyn ViewLister>) -> Self {
        Self {
            lister,
            cached: None,
        }
    }

    /// Current candidates, querying the lister if nothing is cached
    pub fn candidates(&mut self) -> &BTreeSet<ViewDisplayPair> {
        if self.cached.is_none() {
            let computed = self.compute();
            let count = computed.len().to_string();
            log_event_with_fields(Event::CandidatesComputed, &[("count", count.as_str())]);
            self.cached = Some(computed);
        }
        self.cached.get_or_insert_with(BTreeSet::new)
    }

    /// Copy of the current candidates, for iteration while the set shrinks
    pub fn snapshot(&mut self) -> Vec<ViewDisplayPair> {
        self.candidates().iter().cloned().collect()
    }

    /// Whether `pair` is currently a candidate
    pub fn contains(&mut self, pair: &ViewDisplayPair) -> bool {
        self.candidates().contains(pair)
    }

    /// Drop `pair` from the live set; no-op if nothing is cached
    pub fn remove(&mut self, pair: &ViewDisplayPair) -> bool {
        self.cached
            .as_mut()
            .map(|set| set.remove(pair))
            .unwrap_or(false)
    }

    /// Forget the cached set; the next access queries the lister again
    pub fn reset(&mut self) {
        self.cached = None;
        log_event(Event::CandidatesReset);
    }

    /// Whether a set is cached
    pub fn is_cached(&self) -> bool {
        self.cached.is_some()
    }

    fn compute(&self) -> BTreeSet<ViewDisplayPair> {
        self.lister
            .route_producing_views()
            .into_iter()
            .map(|(executable, display_id)| {
                let executable = ExecutableGuard::new(executable);
                ViewDisplayPair::new(executable.view_id(), display_id)
            })
            .collect()
    }
}
