//! Matching result types.

use std::fmt;

use crate::core::Reading;

/// Stage of the coarse-to-fine state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatchStage {
    /// First reading of a sequence, returned unchanged.
    Bootstrap,
    /// Wide search on the coarse grid.
    CoarseSearch,
    /// Narrow search on the base grid around the coarse result.
    FineSearch,
    /// Final reading produced.
    Done,
}

impl fmt::Display for MatchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchStage::Bootstrap => "bootstrap",
            MatchStage::CoarseSearch => "coarse",
            MatchStage::FineSearch => "fine",
            MatchStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Outcome of one search stage.
#[derive(Clone, Debug)]
pub struct MatchResult {
    /// Translation correction along X (meters)
    pub dx: f64,
    /// Translation correction along Y (meters)
    pub dy: f64,
    /// Rotation correction (radians)
    pub dtheta: f64,
    /// Best combined score, `-inf` when degenerate
    pub score: f64,
    /// Score at zero rotation and zero offset, `-inf` if it was not a candidate
    pub baseline_score: f64,
    /// No candidate scored; the correction is zero
    pub degenerate: bool,
    /// Offset evaluations performed
    pub evaluations: usize,
    /// Input reading with the correction applied
    pub reading: Reading,
}

impl MatchResult {
    /// Zero correction for a search that found no candidate.
    pub fn degenerate(reading: &Reading, evaluations: usize) -> Self {
        Self {
            dx: 0.0,
            dy: 0.0,
            dtheta: 0.0,
            score: f64::NEG_INFINITY,
            baseline_score: f64::NEG_INFINITY,
            degenerate: true,
            evaluations,
            reading: reading.clone(),
        }
    }

    /// Whether the stage moved the pose at all.
    pub fn is_identity(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0 && self.dtheta == 0.0
    }
}

/// Full trace of a coarse-to-fine match.
#[derive(Clone, Debug)]
pub struct ScanMatchOutcome {
    /// Corrected reading
    pub reading: Reading,
    /// States traversed, ending with [`MatchStage::Done`]
    pub stages: Vec<MatchStage>,
    /// Coarse stage result (`None` for bootstrap)
    pub coarse: Option<MatchResult>,
    /// Fine stage result (`None` for bootstrap)
    pub fine: Option<MatchResult>,
}

impl ScanMatchOutcome {
    /// Total correction from input to output: (dx, dy, dtheta).
    pub fn total_correction(&self) -> (f64, f64, f64) {
        let sum = |f: fn(&MatchResult) -> f64| {
            self.coarse.as_ref().map_or(0.0, f) + self.fine.as_ref().map_or(0.0, f)
        };
        (sum(|r| r.dx), sum(|r| r.dy), sum(|r| r.dtheta))
    }

    /// Whether any stage fell back to a zero correction.
    pub fn is_degenerate(&self) -> bool {
        self.coarse.iter().chain(self.fine.iter()).any(|r| r.degenerate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_display() {
        assert_eq!(MatchStage::CoarseSearch.to_string(), "coarse");
        assert_eq!(MatchStage::Done.to_string(), "done");
    }

    #[test]
    fn test_degenerate_result() {
        let reading = Reading::new(1.0, 2.0, 0.5, vec![1.0; 3]);
        let result = MatchResult::degenerate(&reading, 0);
        assert!(result.degenerate);
        assert!(result.is_identity());
        assert_eq!(result.reading, reading);
        assert_eq!(result.score, f64::NEG_INFINITY);
    }

    #[test]
    fn test_total_correction() {
        let reading = Reading::new(0.0, 0.0, 0.0, vec![1.0]);
        let stage = |dx, dtheta| MatchResult {
            dx,
            dy: 0.0,
            dtheta,
            score: 0.0,
            baseline_score: 0.0,
            degenerate: false,
            evaluations: 1,
            reading: reading.clone(),
        };
        let outcome = ScanMatchOutcome {
            reading: reading.clone(),
            stages: vec![MatchStage::CoarseSearch, MatchStage::FineSearch, MatchStage::Done],
            coarse: Some(stage(0.2, 0.05)),
            fine: Some(stage(-0.05, 0.0)),
        };
        let (dx, dy, dtheta) = outcome.total_correction();
        assert!((dx - 0.15).abs() < 1e-12);
        assert_eq!(dy, 0.0);
        assert_eq!(dtheta, 0.05);
        assert!(!outcome.is_degenerate());
    }
}
