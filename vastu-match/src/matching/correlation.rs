//! Exhaustive correlation over rotation and translation candidates.
//!
//! For every rotation (ascending) the projected indices are shifted by every
//! offset of the window in row-major order (`dy` outer, `dx` inner), and the
//! two field sums are added into one score. The first candidate reaching the
//! maximum wins: later candidates must score strictly higher to replace it.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{MatchError, Result};

use super::projector::FieldPoints;
use super::search_space::{LOG_UNLIKELY, SearchField};

/// Tolerance when checking that the radius is a whole number of steps.
const WINDOW_EPSILON: f64 = 1e-6;

/// Square window of integer translation offsets `-k..=k` on both axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchWindow {
    half_cells: i64,
    step: f64,
}

impl SearchWindow {
    /// Window covering `±radius` in steps of `step` meters.
    ///
    /// The radius must be a whole multiple of the step.
    pub fn new(radius: f64, step: f64) -> Result<Self> {
        if !(step > 0.0 && step.is_finite()) {
            return Err(MatchError::Config(format!(
                "search step must be positive, got {step}"
            )));
        }
        if !(radius >= 0.0 && radius.is_finite()) {
            return Err(MatchError::Config(format!(
                "search radius must be non-negative, got {radius}"
            )));
        }

        let ratio = radius / step;
        let half_cells = ratio.round();
        if (ratio - half_cells).abs() > WINDOW_EPSILON * ratio.max(1.0) {
            return Err(MatchError::Config(format!(
                "search radius {radius} is not a multiple of step {step}"
            )));
        }

        Ok(Self {
            half_cells: half_cells as i64,
            step,
        })
    }

    /// Offsets on each side of zero.
    #[inline]
    pub fn half_cells(&self) -> i64 {
        self.half_cells
    }

    /// Step between offsets (meters).
    #[inline]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Offsets per axis (`2k + 1`).
    #[inline]
    pub fn side(&self) -> usize {
        (2 * self.half_cells + 1) as usize
    }

    /// Offsets in the window.
    #[inline]
    pub fn len(&self) -> usize {
        self.side() * self.side()
    }

    /// Never true: the zero offset is always present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Offsets `(ox, oy)` in row-major order.
    pub fn offsets(&self) -> impl Iterator<Item = (i64, i64)> {
        let k = self.half_cells;
        (-k..=k).flat_map(move |oy| (-k..=k).map(move |ox| (ox, oy)))
    }
}

/// Best offset of one rotation candidate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    /// Rotation offset (radians)
    pub rotation: f64,
    /// Offset along X (window cells)
    pub offset_x: i64,
    /// Offset along Y (window cells)
    pub offset_y: i64,
    /// Combined occupied + empty score
    pub score: f64,
}

/// Result of a full rotation × translation sweep.
#[derive(Clone, Debug, Default)]
pub struct SearchSummary {
    /// Overall best candidate, `None` if nothing scored
    pub best: Option<Candidate>,
    /// Score of the zero rotation at zero offset
    pub baseline: Option<f64>,
    /// Offset evaluations performed
    pub evaluations: usize,
}

struct RotationBest {
    rotation: f64,
    points: FieldPoints,
    best: Option<(i64, i64, f64)>,
    baseline: Option<f64>,
    evaluations: usize,
}

/// Scores projected points against a pair of search fields.
pub struct CorrelationSearch<'a> {
    occupied: &'a SearchField,
    empty: &'a SearchField,
    window: SearchWindow,
}

impl<'a> CorrelationSearch<'a> {
    /// Search over `window` on the given fields.
    pub fn new(occupied: &'a SearchField, empty: &'a SearchField, window: SearchWindow) -> Self {
        Self {
            occupied,
            empty,
            window,
        }
    }

    /// Translation window.
    pub fn window(&self) -> SearchWindow {
        self.window
    }

    /// Score of `points` shifted by `(ox, oy)`.
    ///
    /// Indices outside a field contribute [`LOG_UNLIKELY`]. Returns `None`
    /// when no index lands inside the fields.
    pub fn score_offset(&self, points: &FieldPoints, ox: i64, oy: i64) -> Option<f64> {
        let (occupied_sum, occupied_hits) = sum_field(self.occupied, &points.occupied, ox, oy);
        let (empty_sum, empty_hits) = sum_field(self.empty, &points.empty, ox, oy);
        if occupied_hits + empty_hits == 0 {
            return None;
        }
        Some(occupied_sum + empty_sum)
    }

    /// Best offset for a single rotation: `(ox, oy, score)`.
    pub fn best_offset(&self, points: &FieldPoints) -> Option<(i64, i64, f64)> {
        let mut best: Option<(i64, i64, f64)> = None;
        for (ox, oy) in self.window.offsets() {
            if let Some(score) = self.score_offset(points, ox, oy)
                && best.is_none_or(|(_, _, s)| score > s)
            {
                best = Some((ox, oy, score));
            }
        }
        best
    }

    fn evaluate_rotation<F>(&self, rotation: f64, project: &F) -> RotationBest
    where
        F: Fn(f64) -> FieldPoints,
    {
        let points = project(rotation);
        if points.is_empty() {
            return RotationBest {
                rotation,
                points,
                best: None,
                baseline: None,
                evaluations: 0,
            };
        }

        let best = self.best_offset(&points);
        let baseline = if rotation == 0.0 {
            self.score_offset(&points, 0, 0)
        } else {
            None
        };

        log::trace!(
            "rotation {:+.4}: {} points, best {:?}",
            rotation,
            points.len(),
            best
        );

        RotationBest {
            rotation,
            points,
            best,
            baseline,
            evaluations: self.window.len(),
        }
    }

    /// Sweep every rotation in `rotations` (ascending).
    ///
    /// `project` turns a rotation into field indices. `on_new_best` is called
    /// with the winning points each time the overall best improves.
    pub fn search<F, C>(&self, rotations: &[f64], project: F, mut on_new_best: C) -> SearchSummary
    where
        F: Fn(f64) -> FieldPoints + Sync,
        C: FnMut(&Candidate, &FieldPoints),
    {
        #[cfg(feature = "parallel")]
        let per_rotation: Vec<RotationBest> = rotations
            .par_iter()
            .map(|&rotation| self.evaluate_rotation(rotation, &project))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let per_rotation: Vec<RotationBest> = rotations
            .iter()
            .map(|&rotation| self.evaluate_rotation(rotation, &project))
            .collect();

        // Reduce in ascending rotation order so ties resolve identically
        // with and without the parallel feature.
        let mut summary = SearchSummary::default();
        for rotation_best in per_rotation {
            summary.evaluations += rotation_best.evaluations;
            if rotation_best.baseline.is_some() {
                summary.baseline = rotation_best.baseline;
            }

            let Some((offset_x, offset_y, score)) = rotation_best.best else {
                continue;
            };
            if summary.best.is_none_or(|b| score > b.score) {
                let candidate = Candidate {
                    rotation: rotation_best.rotation,
                    offset_x,
                    offset_y,
                    score,
                };
                on_new_best(&candidate, &rotation_best.points);
                summary.best = Some(candidate);
            }
        }

        summary
    }
}

#[inline]
fn sum_field(field: &SearchField, indices: &[(i64, i64)], ox: i64, oy: i64) -> (f64, usize) {
    let mut sum = 0.0;
    let mut inside = 0usize;
    for &(ix, iy) in indices {
        match field.get(ix + ox, iy + oy) {
            Some(value) => {
                sum += value;
                inside += 1;
            }
            None => sum += LOG_UNLIKELY,
        }
    }
    (sum, inside)
}

/// Shrink `rotations` symmetrically so that
/// `rotations.len() * window_len <= max_evaluations`.
///
/// At least the middle (zero) rotation is always kept.
pub fn limit_rotations(rotations: Vec<f64>, window_len: usize, max_evaluations: Option<usize>) -> Vec<f64> {
    let Some(max) = max_evaluations else {
        return rotations;
    };

    let allowed = (max / window_len.max(1)).max(1);
    if rotations.len() <= allowed {
        return rotations;
    }

    let center = rotations.len() / 2;
    let keep_side = (allowed - 1) / 2;
    let kept = rotations[center - keep_side..=center + keep_side].to_vec();

    log::warn!(
        "Evaluation budget {} allows {} of {} rotations ({} offsets each)",
        max,
        kept.len(),
        rotations.len(),
        window_len
    );

    kept
}
