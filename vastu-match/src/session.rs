//! Caller-owned sequencing state for matching a stream of readings.
//!
//! The matcher itself is stateless across readings. A [`MatchSession`]
//! carries what links consecutive readings together:
//!
//! ```text
//! estimate_n = matched_{n-1} + (raw_n - raw_{n-1})     (per x, y, theta)
//! ```
//!
//! and the history of matched poses.

use crate::core::{Pose2D, Reading};
use crate::error::Result;
use crate::grid::OccupancyGrid;
use crate::matching::CoarseToFineMatcher;

/// Sequencing state across consecutive readings.
#[derive(Clone, Debug, Default)]
pub struct MatchSession {
    previous_raw: Option<Reading>,
    previous_matched: Option<Reading>,
    trajectory: Vec<Pose2D>,
}

impl MatchSession {
    /// Empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// 0-based index of the next reading.
    pub fn sequence_index(&self) -> usize {
        self.trajectory.len()
    }

    /// Matched poses so far, in order.
    pub fn trajectory(&self) -> &[Pose2D] {
        &self.trajectory
    }

    /// Most recent matched reading.
    pub fn last_matched(&self) -> Option<&Reading> {
        self.previous_matched.as_ref()
    }

    /// Initial pose estimate for `raw` by constant-velocity extrapolation.
    ///
    /// The first reading passes through unchanged.
    pub fn estimate(&self, raw: &Reading) -> Reading {
        match (&self.previous_raw, &self.previous_matched) {
            (Some(prev_raw), Some(prev_matched)) => raw.with_pose(Pose2D::new(
                prev_matched.x() + raw.x() - prev_raw.x(),
                prev_matched.y() + raw.y() - prev_raw.y(),
                prev_matched.theta() + raw.theta() - prev_raw.theta(),
            )),
            _ => raw.clone(),
        }
    }

    /// Store a raw reading together with its matched result.
    pub fn record(&mut self, raw: Reading, matched: Reading) {
        self.trajectory.push(matched.pose());
        self.previous_raw = Some(raw);
        self.previous_matched = Some(matched);
    }

    /// Estimate, match, commit, and record one raw reading.
    ///
    /// The map is updated only after matching has finished.
    pub fn step(
        &mut self,
        matcher: &CoarseToFineMatcher,
        map: &mut OccupancyGrid,
        raw: &Reading,
    ) -> Result<Reading> {
        let index = self.sequence_index();
        let estimate = self.estimate(raw);
        let matched = matcher.match_scan(map, &estimate, index)?;
        let stats = map.commit(&matched)?;

        if index == 0 {
            log::info!(
                "Session started at ({:.3}, {:.3}, {:.3}), {} rays committed",
                matched.x(),
                matched.y(),
                matched.theta(),
                stats.rays_committed
            );
        }

        self.record(raw.clone(), matched.clone());
        Ok(matched)
    }

    /// Forget all history.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
