//! Coarse-to-fine correlative matcher.

use crate::core::Reading;
use crate::error::Result;

use super::config::MatcherConfig;
use super::correlation::{CorrelationSearch, SearchWindow, limit_rotations};
use super::observer::{NoopObserver, SearchObserver};
use super::projector::ScanProjector;
use super::search_space::SearchSpaceBuilder;
use super::traits::OccupancyMap;
use super::types::{MatchResult, MatchStage, ScanMatchOutcome};

/// Two-pass correlative scan matcher.
///
/// ```text
/// Bootstrap ─────────────────────────────────▶ Done
/// CoarseSearch (coarse cells, ±radius) ─▶ FineSearch (base cells, ±coarse cell) ─▶ Done
/// ```
///
/// Both passes try the same rotation candidates. The fine pass is centered
/// on the coarse result, so the two corrections add up.
pub struct CoarseToFineMatcher {
    config: MatcherConfig,
    observer: Box<dyn SearchObserver>,
}

impl CoarseToFineMatcher {
    /// Create a matcher, validating the configuration.
    pub fn new(config: MatcherConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            observer: Box::new(NoopObserver),
        })
    }

    /// Create with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: MatcherConfig::default(),
            observer: Box::new(NoopObserver),
        }
    }

    /// Attach an observer that sees every stage.
    pub fn with_observer(mut self, observer: impl SearchObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Get configuration.
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Correct `reading` against `map`.
    ///
    /// `sequence_index` 0 is the first reading of a sequence and is returned
    /// unchanged. The map may grow to cover the search region but its
    /// evidence is never modified.
    pub fn match_scan<M: OccupancyMap + ?Sized>(
        &self,
        map: &mut M,
        reading: &Reading,
        sequence_index: usize,
    ) -> Result<Reading> {
        self.match_scan_detailed(map, reading, sequence_index)
            .map(|outcome| outcome.reading)
    }

    /// Like [`match_scan`](Self::match_scan), also returning both stage
    /// results and the states traversed.
    pub fn match_scan_detailed<M: OccupancyMap + ?Sized>(
        &self,
        map: &mut M,
        reading: &Reading,
        sequence_index: usize,
    ) -> Result<ScanMatchOutcome> {
        reading.validate(map.sensor().samples_per_revolution)?;

        if sequence_index == 0 {
            log::debug!("Bootstrap reading, pose left unchanged");
            return Ok(ScanMatchOutcome {
                reading: reading.clone(),
                stages: vec![MatchStage::Bootstrap, MatchStage::Done],
                coarse: None,
                fine: None,
            });
        }

        let base_cell = map.cell_size();
        let factor = f64::from(self.config.coarse_factor);
        let coarse_cell = base_cell * factor;

        let coarse = self.run_stage(
            map,
            reading,
            MatchStage::CoarseSearch,
            self.config.search_radius,
            coarse_cell,
            self.config.smoothing_sigma / factor,
        )?;

        // Fine window only has to cover one coarse step
        let fine = self.run_stage(
            map,
            &coarse.reading,
            MatchStage::FineSearch,
            coarse_cell,
            base_cell,
            self.config.smoothing_sigma,
        )?;

        log::debug!(
            "Reading {} matched: ({:.3}, {:.3}, {:.4}) -> ({:.3}, {:.3}, {:.4})",
            sequence_index,
            reading.x(),
            reading.y(),
            reading.theta(),
            fine.reading.x(),
            fine.reading.y(),
            fine.reading.theta()
        );

        Ok(ScanMatchOutcome {
            reading: fine.reading.clone(),
            stages: vec![
                MatchStage::CoarseSearch,
                MatchStage::FineSearch,
                MatchStage::Done,
            ],
            coarse: Some(coarse),
            fine: Some(fine),
        })
    }

    fn run_stage<M: OccupancyMap + ?Sized>(
        &self,
        map: &mut M,
        reading: &Reading,
        stage: MatchStage,
        radius: f64,
        cell_size: f64,
        sigma: f64,
    ) -> Result<MatchResult> {
        let window = SearchWindow::new(radius, cell_size)?;
        let space = SearchSpaceBuilder::new(map.sensor().max_range).build(
            map,
            reading.position(),
            radius,
            cell_size,
            sigma,
        )?;

        let rotations = limit_rotations(
            self.config.rotation_candidates(),
            window.len(),
            self.config.max_evaluations,
        );

        let map: &M = map;
        let projector = ScanProjector::new(map);
        let search = CorrelationSearch::new(&space.occupied, &space.empty, window);

        let summary = search.search(
            &rotations,
            |rotation| projector.project_indices(reading, rotation, &space.occupied),
            |candidate, points| {
                self.observer
                    .on_new_best(stage, candidate, &space.occupied, points, &space.region)
            },
        );

        let result = match summary.best {
            Some(best) => {
                let dx = best.offset_x as f64 * cell_size;
                let dy = best.offset_y as f64 * cell_size;
                MatchResult {
                    dx,
                    dy,
                    dtheta: best.rotation,
                    score: best.score,
                    baseline_score: summary.baseline.unwrap_or(f64::NEG_INFINITY),
                    degenerate: false,
                    evaluations: summary.evaluations,
                    reading: reading.with_correction(dx, dy, best.rotation),
                }
            }
            None => {
                log::warn!(
                    "{} search found no scoring candidate at ({:.3}, {:.3}), keeping pose",
                    stage,
                    reading.x(),
                    reading.y()
                );
                MatchResult::degenerate(reading, summary.evaluations)
            }
        };

        log::debug!(
            "{} search: d=({:+.3}, {:+.3}, {:+.4}) score {:.3} over {} evaluations",
            stage,
            result.dx,
            result.dy,
            result.dtheta,
            result.score,
            result.evaluations
        );

        self.observer
            .on_stage_complete(stage, &space.occupied, &space.empty, &result, &space.region);

        Ok(result)
    }
}

impl Default for CoarseToFineMatcher {
    fn default() -> Self {
        Self::with_defaults()
    }
}
