//! Hooks for inspecting a search while it runs.
//!
//! Nothing here renders. Debug tooling implements [`SearchObserver`] and
//! attaches it with
//! [`CoarseToFineMatcher::with_observer`](super::CoarseToFineMatcher::with_observer).

use crate::grid::Region;

use super::correlation::Candidate;
use super::projector::FieldPoints;
use super::search_space::SearchField;
use super::types::{MatchResult, MatchStage};

/// Callbacks invoked by the matcher. Every method defaults to a no-op.
pub trait SearchObserver: Send + Sync {
    /// The stage's best candidate improved.
    ///
    /// `points` are the winning rotation's field indices before the offset
    /// is applied. Shift them by `candidate.offset_x`/`offset_y` to overlay
    /// the aligned scan on `field`.
    fn on_new_best(
        &self,
        _stage: MatchStage,
        _candidate: &Candidate,
        _field: &SearchField,
        _points: &FieldPoints,
        _region: &Region,
    ) {
    }

    /// A search stage finished.
    fn on_stage_complete(
        &self,
        _stage: MatchStage,
        _occupied: &SearchField,
        _empty: &SearchField,
        _result: &MatchResult,
        _region: &Region,
    ) {
    }
}

/// Observer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}
