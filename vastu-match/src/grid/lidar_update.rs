//! Range-scan updates and read-only ray classification.
//!
//! Both operations trace every usable ray with Bresenham from the sensor cell
//! to the endpoint cell:
//! - Interior cells are evidence of free space
//! - The endpoint cell is evidence of an obstacle
//!
//! Samples at or beyond the sensor's maximum range are "no return" and are
//! ignored entirely.

use crate::core::{Reading, WorldPoint};
use crate::error::Result;

use super::raycaster::BresenhamLine;
use super::storage::OccupancyGrid;

/// Summary of a single [`OccupancyGrid::commit`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CommitStats {
    /// Rays traced into the grid
    pub rays_committed: usize,
    /// Rays dropped (no return, below min range, or outside storage)
    pub rays_skipped: usize,
    /// Cell visits recorded (free and hit)
    pub cells_updated: usize,
    /// Endpoint hits recorded
    pub hits: usize,
}

/// World-space points produced by classifying a reading's rays.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClassifiedRays {
    /// Centers of the endpoint cells
    pub occupied: Vec<WorldPoint>,
    /// Centers of the cells traversed before each endpoint
    pub empty: Vec<WorldPoint>,
}

impl ClassifiedRays {
    /// Whether no ray produced any point.
    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty() && self.empty.is_empty()
    }
}

#[inline]
fn ray_endpoint(origin: WorldPoint, angle: f64, range: f64) -> WorldPoint {
    WorldPoint::new(origin.x + range * angle.cos(), origin.y + range * angle.sin())
}

impl OccupancyGrid {
    /// Accumulate a reading's evidence into the grid.
    ///
    /// Endpoints outside storage expand the grid when auto-expansion is
    /// enabled; rays that still cannot be stored are skipped.
    pub fn commit(&mut self, reading: &Reading) -> Result<CommitStats> {
        reading.validate(self.sensor.samples_per_revolution)?;

        let mut stats = CommitStats::default();
        let sensor_pos = reading.position();

        if !self.contains_point(sensor_pos) && !(self.auto_expand && self.expand_to_include(sensor_pos))
        {
            log::warn!(
                "Sensor position ({:.3}, {:.3}) outside grid, reading not committed",
                sensor_pos.x,
                sensor_pos.y
            );
            stats.rays_skipped = reading.len();
            return Ok(stats);
        }

        for (i, &range) in reading.ranges().iter().enumerate() {
            if !self.sensor.is_valid_range(range) {
                stats.rays_skipped += 1;
                continue;
            }

            let angle = self.sensor.ray_angle(reading.theta(), i);
            let endpoint = ray_endpoint(sensor_pos, angle, range);

            if !self.contains_point(endpoint)
                && !(self.auto_expand && self.expand_to_include(endpoint))
            {
                stats.rays_skipped += 1;
                continue;
            }

            // Origin may have moved during expansion
            let start = self.world_to_grid(sensor_pos);
            let end = self.world_to_grid(endpoint);

            for coord in BresenhamLine::new(start, end) {
                let hit = coord == end;
                if self.record_visit(coord, hit) {
                    stats.cells_updated += 1;
                    if hit {
                        stats.hits += 1;
                    }
                }
            }
            stats.rays_committed += 1;
        }

        log::trace!(
            "Committed {} rays ({} skipped, {} hits)",
            stats.rays_committed,
            stats.rays_skipped,
            stats.hits
        );

        Ok(stats)
    }

    /// Classify a reading's rays at heading `theta + rotation` without
    /// touching the grid.
    ///
    /// Cells are computed geometrically, so points may lie outside storage.
    pub fn classify(&self, reading: &Reading, rotation: f64) -> ClassifiedRays {
        let sensor_pos = reading.position();
        let heading = reading.theta() + rotation;
        let start = self.world_to_grid(sensor_pos);

        let mut rays = ClassifiedRays::default();
        for (i, &range) in reading.ranges().iter().enumerate() {
            if !self.sensor.is_valid_range(range) {
                continue;
            }

            let angle = self.sensor.ray_angle(heading, i);
            let end = self.world_to_grid(ray_endpoint(sensor_pos, angle, range));

            for coord in BresenhamLine::new(start, end) {
                let center = self.grid_to_world(coord);
                if coord == end {
                    rays.occupied.push(center);
                } else {
                    rays.empty.push(center);
                }
            }
        }
        rays
    }
}
