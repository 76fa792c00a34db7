//! Map interface consumed by the matcher.
//!
//! The matcher never updates map evidence. It only asks the map to cover a
//! region, reads the region's counters, and classifies a reading's rays at a
//! hypothesized rotation.

use crate::core::Reading;
use crate::error::Result;
use crate::grid::{ClassifiedRays, OccupancyGrid, Region, RegionCells, SensorConfig};

/// Occupancy map collaborator of the matcher.
///
/// `Sync` lets rotation candidates be projected from several threads.
///
/// # Example
///
/// ```ignore
/// use vastu_match::matching::{CoarseToFineMatcher, OccupancyMap};
///
/// fn correct<M: OccupancyMap>(
///     matcher: &CoarseToFineMatcher,
///     map: &mut M,
///     reading: &Reading,
/// ) -> Result<Reading> {
///     matcher.match_scan(map, reading, 1)
/// }
/// ```
pub trait OccupancyMap: Sync {
    /// Base cell size (meters).
    fn cell_size(&self) -> f64;

    /// Sensor model used to interpret readings.
    fn sensor(&self) -> &SensorConfig;

    /// Grow storage so that `region` is covered.
    ///
    /// Fails with [`MatchError::MapBounds`](crate::MatchError::MapBounds)
    /// when the map cannot grow that far.
    fn ensure_coverage(&mut self, region: &Region) -> Result<()>;

    /// Dense counters of every cell in `region`.
    fn query_region(&self, region: &Region) -> Result<RegionCells>;

    /// Occupied and empty points of `reading` at heading `theta + rotation`.
    fn classify_reading(&self, reading: &Reading, rotation: f64) -> ClassifiedRays;
}

impl OccupancyMap for OccupancyGrid {
    fn cell_size(&self) -> f64 {
        self.resolution()
    }

    fn sensor(&self) -> &SensorConfig {
        self.sensor_config()
    }

    fn ensure_coverage(&mut self, region: &Region) -> Result<()> {
        self.ensure_region(region)
    }

    fn query_region(&self, region: &Region) -> Result<RegionCells> {
        OccupancyGrid::query_region(self, region)
    }

    fn classify_reading(&self, reading: &Reading, rotation: f64) -> ClassifiedRays {
        self.classify(reading, rotation)
    }
}
