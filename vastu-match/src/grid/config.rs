//! Configuration types for the occupancy grid.

use serde::{Deserialize, Serialize};

use crate::core::WorldPoint;
use crate::error::{MatchError, Result};

/// Grid configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GridConfig {
    /// Meters per cell (e.g., 0.02 = 2cm cells)
    #[serde(default = "default_resolution")]
    pub resolution: f64,

    /// Initial grid width in cells
    #[serde(default = "default_initial_size")]
    pub initial_width: usize,

    /// Initial grid height in cells
    #[serde(default = "default_initial_size")]
    pub initial_height: usize,

    /// World coordinates of cell (0,0) corner
    /// If None, grid will be centered at origin
    #[serde(default)]
    pub origin: Option<WorldPoint>,

    /// Grow storage when a ray endpoint or search region leaves the current bounds
    #[serde(default = "default_auto_expand")]
    pub auto_expand: bool,

    /// Maximum grid width in cells (to limit memory)
    #[serde(default = "default_max_size")]
    pub max_width: usize,

    /// Maximum grid height in cells (to limit memory)
    #[serde(default = "default_max_size")]
    pub max_height: usize,
}

fn default_resolution() -> f64 {
    0.02
}

fn default_initial_size() -> usize {
    500 // 10m at 2cm
}

fn default_auto_expand() -> bool {
    true
}

fn default_max_size() -> usize {
    4000 // 80m at 2cm
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            resolution: default_resolution(),
            initial_width: default_initial_size(),
            initial_height: default_initial_size(),
            origin: None,
            auto_expand: default_auto_expand(),
            max_width: default_max_size(),
            max_height: default_max_size(),
        }
    }
}

impl GridConfig {
    /// Create a configuration for a specific area size (in meters)
    pub fn for_area(width_m: f64, height_m: f64, resolution: f64) -> Self {
        let width = (width_m / resolution).ceil() as usize;
        let height = (height_m / resolution).ceil() as usize;

        Self {
            resolution,
            initial_width: width,
            initial_height: height,
            origin: None,
            auto_expand: true,
            max_width: width * 4,
            max_height: height * 4,
        }
    }

    /// Calculate the origin for a centered grid
    pub fn centered_origin(&self) -> WorldPoint {
        let half_width = (self.initial_width as f64 * self.resolution) / 2.0;
        let half_height = (self.initial_height as f64 * self.resolution) / 2.0;
        WorldPoint::new(-half_width, -half_height)
    }

    /// Get the effective origin (uses centered_origin if origin is None)
    pub fn effective_origin(&self) -> WorldPoint {
        self.origin.unwrap_or_else(|| self.centered_origin())
    }

    /// Check dimensions and resolution.
    pub fn validate(&self) -> Result<()> {
        if !(self.resolution > 0.0 && self.resolution.is_finite()) {
            return Err(MatchError::Config(format!(
                "grid resolution must be positive, got {}",
                self.resolution
            )));
        }
        if self.initial_width == 0 || self.initial_height == 0 {
            return Err(MatchError::Config("grid must have at least one cell".into()));
        }
        if self.max_width < self.initial_width || self.max_height < self.initial_height {
            return Err(MatchError::Config(
                "grid maximum size is smaller than its initial size".into(),
            ));
        }
        Ok(())
    }
}

/// Range sensor model shared by map updates and the matcher.
///
/// Ray `i` of `N` points at `heading - fov/2 + i * fov/(N-1)`, so the first
/// and last rays sit exactly on the field-of-view edges.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Maximum range (meters). Samples at or beyond it are "no return".
    #[serde(default = "default_max_range")]
    pub max_range: f64,

    /// Minimum range to trust (meters)
    #[serde(default)]
    pub min_range: f64,

    /// Angular span covered by one sweep (radians)
    #[serde(default = "default_field_of_view")]
    pub field_of_view: f64,

    /// Number of range samples in one sweep
    #[serde(default = "default_samples_per_revolution")]
    pub samples_per_revolution: usize,
}

fn default_max_range() -> f64 {
    10.0
}

fn default_field_of_view() -> f64 {
    std::f64::consts::PI
}

fn default_samples_per_revolution() -> usize {
    180
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            max_range: default_max_range(),
            min_range: 0.0,
            field_of_view: default_field_of_view(),
            samples_per_revolution: default_samples_per_revolution(),
        }
    }
}

impl SensorConfig {
    /// World angle of ray `index` for a sensor facing `heading`.
    #[inline]
    pub fn ray_angle(&self, heading: f64, index: usize) -> f64 {
        let start = heading - self.field_of_view / 2.0;
        if self.samples_per_revolution <= 1 {
            return start;
        }
        let step = self.field_of_view / (self.samples_per_revolution - 1) as f64;
        start + index as f64 * step
    }

    /// Whether a sample is a usable return (excludes "no return" samples).
    #[inline]
    pub fn is_valid_range(&self, range: f64) -> bool {
        range.is_finite() && range >= self.min_range && range < self.max_range
    }

    /// Check sensor parameters.
    pub fn validate(&self) -> Result<()> {
        if !(self.max_range > 0.0 && self.max_range.is_finite()) {
            return Err(MatchError::Config(format!(
                "sensor max_range must be positive, got {}",
                self.max_range
            )));
        }
        if self.min_range < 0.0 || self.min_range >= self.max_range {
            return Err(MatchError::Config(format!(
                "sensor min_range {} must lie in [0, max_range)",
                self.min_range
            )));
        }
        if self.samples_per_revolution == 0 {
            return Err(MatchError::Config(
                "sensor samples_per_revolution must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Combined configuration for an [`OccupancyGrid`](super::OccupancyGrid).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MapConfig {
    /// Grid dimensions and resolution
    #[serde(default)]
    pub grid: GridConfig,
    /// Range sensor model
    #[serde(default)]
    pub sensor: SensorConfig,
}

impl MapConfig {
    /// Check both sections.
    pub fn validate(&self) -> Result<()> {
        self.grid.validate()?;
        self.sensor.validate()
    }
}
