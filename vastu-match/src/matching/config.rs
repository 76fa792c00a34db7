//! Matcher configuration.

use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};

/// Configuration for the coarse-to-fine correlative matcher.
///
/// The coarse stage searches `±search_radius` on a grid `coarse_factor`
/// times coarser than the map. The fine stage then searches one coarse cell
/// around the coarse result at the map's own resolution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Translation search radius of the coarse stage (meters).
    /// Must be an integer multiple of the coarse cell size.
    #[serde(default = "default_search_radius")]
    pub search_radius: f64,

    /// Rotation search half-range (radians), used by both stages.
    #[serde(default = "default_search_half_angle")]
    pub search_half_angle: f64,

    /// Step between rotation candidates (radians).
    #[serde(default = "default_angular_step")]
    pub angular_step: f64,

    /// Gaussian smoothing width in base grid cells.
    /// The coarse stage divides it by `coarse_factor`.
    #[serde(default = "default_smoothing_sigma")]
    pub smoothing_sigma: f64,

    /// Ratio of coarse to base cell size (>= 1).
    #[serde(default = "default_coarse_factor")]
    pub coarse_factor: u32,

    /// Cap on offset evaluations per stage. `None` = unlimited.
    #[serde(default)]
    pub max_evaluations: Option<usize>,
}

fn default_search_radius() -> f64 {
    2.2
}

fn default_search_half_angle() -> f64 {
    0.35 // ~20 degrees
}

fn default_angular_step() -> f64 {
    0.05 // ~2.9 degrees
}

fn default_smoothing_sigma() -> f64 {
    2.0
}

fn default_coarse_factor() -> u32 {
    5
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            search_radius: default_search_radius(),
            search_half_angle: default_search_half_angle(),
            angular_step: default_angular_step(),
            smoothing_sigma: default_smoothing_sigma(),
            coarse_factor: default_coarse_factor(),
            max_evaluations: None,
        }
    }
}

impl MatcherConfig {
    /// Check value ranges.
    ///
    /// Divisibility of the radius by the stage step depends on the map's
    /// cell size and is checked when a search window is built.
    pub fn validate(&self) -> Result<()> {
        if !(self.search_radius > 0.0 && self.search_radius.is_finite()) {
            return Err(MatchError::Config(format!(
                "search_radius must be positive, got {}",
                self.search_radius
            )));
        }
        if !(self.search_half_angle >= 0.0 && self.search_half_angle.is_finite()) {
            return Err(MatchError::Config(format!(
                "search_half_angle must be non-negative, got {}",
                self.search_half_angle
            )));
        }
        if !(self.angular_step > 0.0 && self.angular_step.is_finite()) {
            return Err(MatchError::Config(format!(
                "angular_step must be positive, got {}",
                self.angular_step
            )));
        }
        if !(self.smoothing_sigma >= 0.0 && self.smoothing_sigma.is_finite()) {
            return Err(MatchError::Config(format!(
                "smoothing_sigma must be non-negative, got {}",
                self.smoothing_sigma
            )));
        }
        if self.coarse_factor == 0 {
            return Err(MatchError::Config("coarse_factor must be at least 1".into()));
        }
        if self.max_evaluations == Some(0) {
            return Err(MatchError::Config(
                "max_evaluations must be positive when set".into(),
            ));
        }
        Ok(())
    }

    /// Rotation offsets tried by each stage, ascending, always including 0.
    pub fn rotation_candidates(&self) -> Vec<f64> {
        rotation_candidates(self.search_half_angle, self.angular_step)
    }
}

/// `i * step` for `i` in `-n..=n`, `n = floor(half_angle / step)`.
pub(crate) fn rotation_candidates(half_angle: f64, step: f64) -> Vec<f64> {
    let n = (half_angle / step + 1e-9).floor() as i64;
    (-n..=n).map(|i| i as f64 * step).collect()
}
