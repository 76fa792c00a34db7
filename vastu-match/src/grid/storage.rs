//! Visit-count occupancy grid storage.
//!
//! Each cell keeps two counters: how many rays ended in it (`occupied`) and
//! how many rays touched it at all (`total`). A cell is considered occupied
//! when `occupied / total > 0.5` and empty when the ratio is below 0.5.
//! Counts live in two separate row-major arrays.

use crate::core::{GridCoord, WorldPoint};
use crate::error::{MatchError, Result};

use super::config::{MapConfig, SensorConfig};
use super::region::{Region, RegionCells};

/// Dense occupancy grid with per-cell visit counters.
///
/// - (0, 0) is at `origin` in world coordinates
/// - Cell (x, y) covers `[origin + x*resolution, origin + (x+1)*resolution)`
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    pub(super) occupied: Vec<u32>,
    pub(super) total: Vec<u32>,

    pub(super) width: usize,
    pub(super) height: usize,
    pub(super) resolution: f64,
    pub(super) origin: WorldPoint,
    pub(super) max_width: usize,
    pub(super) max_height: usize,
    pub(super) auto_expand: bool,
    pub(super) sensor: SensorConfig,
}

impl OccupancyGrid {
    /// Create an empty grid from configuration.
    pub fn new(config: MapConfig) -> Result<Self> {
        config.validate()?;
        let grid = &config.grid;
        let size = grid.initial_width * grid.initial_height;

        Ok(Self {
            occupied: vec![0; size],
            total: vec![0; size],
            width: grid.initial_width,
            height: grid.initial_height,
            resolution: grid.resolution,
            origin: grid.effective_origin(),
            max_width: grid.max_width,
            max_height: grid.max_height,
            auto_expand: grid.auto_expand,
            sensor: config.sensor,
        })
    }

    // === Basic Properties ===

    /// Grid width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Resolution in meters per cell.
    #[inline]
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// World coordinates of cell (0, 0).
    #[inline]
    pub fn origin(&self) -> WorldPoint {
        self.origin
    }

    /// Sensor model used for updates and classification.
    #[inline]
    pub fn sensor_config(&self) -> &SensorConfig {
        &self.sensor
    }

    /// World bounds: (min_point, max_point).
    pub fn bounds(&self) -> (WorldPoint, WorldPoint) {
        let max = WorldPoint::new(
            self.origin.x + self.width as f64 * self.resolution,
            self.origin.y + self.height as f64 * self.resolution,
        );
        (self.origin, max)
    }

    // === Coordinate Conversion ===

    /// Convert world coordinates to grid coordinates.
    #[inline]
    pub fn world_to_grid(&self, point: WorldPoint) -> GridCoord {
        GridCoord::new(
            ((point.x - self.origin.x) / self.resolution).floor() as i32,
            ((point.y - self.origin.y) / self.resolution).floor() as i32,
        )
    }

    /// Convert grid coordinates to world coordinates (cell center).
    ///
    /// Valid for coordinates outside storage as well.
    #[inline]
    pub fn grid_to_world(&self, coord: GridCoord) -> WorldPoint {
        WorldPoint::new(
            self.origin.x + (coord.x as f64 + 0.5) * self.resolution,
            self.origin.y + (coord.y as f64 + 0.5) * self.resolution,
        )
    }

    /// Check if grid coordinates are within bounds.
    #[inline]
    pub fn is_valid_coord(&self, coord: GridCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.width
            && (coord.y as usize) < self.height
    }

    /// Check if a world point is within grid bounds.
    #[inline]
    pub fn contains_point(&self, point: WorldPoint) -> bool {
        self.is_valid_coord(self.world_to_grid(point))
    }

    /// Convert grid coordinates to flat array index.
    #[inline]
    pub fn coord_to_index(&self, coord: GridCoord) -> Option<usize> {
        if self.is_valid_coord(coord) {
            Some(coord.y as usize * self.width + coord.x as usize)
        } else {
            None
        }
    }

    // === Cell Access ===

    /// (occupied, total) visit counts of a cell.
    #[inline]
    pub fn counts(&self, coord: GridCoord) -> Option<(u32, u32)> {
        self.coord_to_index(coord)
            .map(|i| (self.occupied[i], self.total[i]))
    }

    /// Fraction of visits that ended in this cell, `None` if never visited.
    pub fn occupancy_ratio(&self, coord: GridCoord) -> Option<f64> {
        match self.counts(coord) {
            Some((occupied, total)) if total > 0 => Some(occupied as f64 / total as f64),
            _ => None,
        }
    }

    /// Number of cells observed at least once.
    pub fn visited_cell_count(&self) -> usize {
        self.total.iter().filter(|&&t| t > 0).count()
    }

    /// Record one ray passing through (or ending in) a cell.
    #[inline]
    pub(super) fn record_visit(&mut self, coord: GridCoord, hit: bool) -> bool {
        if let Some(i) = self.coord_to_index(coord) {
            self.total[i] = self.total[i].saturating_add(1);
            if hit {
                self.occupied[i] = self.occupied[i].saturating_add(1);
            }
            true
        } else {
            false
        }
    }

    // === Regions ===

    /// Make sure storage covers `region`, growing it if allowed.
    pub fn ensure_region(&mut self, region: &Region) -> Result<()> {
        let corners = [region.min(), region.max()];
        for corner in corners {
            if self.contains_point(corner) {
                continue;
            }
            if !self.auto_expand || !self.expand_to_include(corner) {
                return Err(bounds_error(region));
            }
        }
        Ok(())
    }

    /// Copy the counters of every cell between the region's corner cells
    /// (inclusive).
    pub fn query_region(&self, region: &Region) -> Result<RegionCells> {
        let lo = self.world_to_grid(region.min());
        let hi = self.world_to_grid(region.max());
        if !self.is_valid_coord(lo) || !self.is_valid_coord(hi) {
            return Err(bounds_error(region));
        }

        let width = (hi.x - lo.x + 1) as usize;
        let height = (hi.y - lo.y + 1) as usize;
        let mut cells = RegionCells {
            width,
            height,
            occupied: Vec::with_capacity(width * height),
            total: Vec::with_capacity(width * height),
            world_x: Vec::with_capacity(width * height),
            world_y: Vec::with_capacity(width * height),
        };

        for y in lo.y..=hi.y {
            let row_start = y as usize * self.width;
            let range = row_start + lo.x as usize..=row_start + hi.x as usize;
            cells.occupied.extend_from_slice(&self.occupied[range.clone()]);
            cells.total.extend_from_slice(&self.total[range]);
            for x in lo.x..=hi.x {
                let center = self.grid_to_world(GridCoord::new(x, y));
                cells.world_x.push(center.x);
                cells.world_y.push(center.y);
            }
        }

        Ok(cells)
    }

    // === Grid Expansion ===

    /// Grow storage so that `point` falls inside it.
    ///
    /// Returns `true` when the point is covered afterwards; `false` when the
    /// required size would exceed the configured maximum.
    pub fn expand_to_include(&mut self, point: WorldPoint) -> bool {
        let coord = self.world_to_grid(point);

        let expand_left = if coord.x < 0 { coord.x.unsigned_abs() as usize } else { 0 };
        let expand_right = if coord.x >= self.width as i32 {
            coord.x as usize - self.width + 1
        } else {
            0
        };
        let expand_down = if coord.y < 0 { coord.y.unsigned_abs() as usize } else { 0 };
        let expand_up = if coord.y >= self.height as i32 {
            coord.y as usize - self.height + 1
        } else {
            0
        };

        if expand_left == 0 && expand_right == 0 && expand_down == 0 && expand_up == 0 {
            return true;
        }

        let new_width = self.width + expand_left + expand_right;
        let new_height = self.height + expand_down + expand_up;

        if new_width > self.max_width || new_height > self.max_height {
            return false;
        }

        let new_size = new_width * new_height;
        let mut new_occupied = vec![0u32; new_size];
        let mut new_total = vec![0u32; new_size];

        for y in 0..self.height {
            let old_row = y * self.width..(y + 1) * self.width;
            let new_row_start = (y + expand_down) * new_width + expand_left;
            let new_row = new_row_start..new_row_start + self.width;

            new_occupied[new_row.clone()].copy_from_slice(&self.occupied[old_row.clone()]);
            new_total[new_row].copy_from_slice(&self.total[old_row]);
        }

        self.occupied = new_occupied;
        self.total = new_total;
        self.width = new_width;
        self.height = new_height;
        self.origin = WorldPoint::new(
            self.origin.x - expand_left as f64 * self.resolution,
            self.origin.y - expand_down as f64 * self.resolution,
        );

        log::debug!(
            "Grid expanded to {}x{} (origin {:.3}, {:.3})",
            self.width,
            self.height,
            self.origin.x,
            self.origin.y
        );

        true
    }
}

fn bounds_error(region: &Region) -> MatchError {
    MatchError::MapBounds {
        x_min: region.x_min,
        x_max: region.x_max,
        y_min: region.y_min,
        y_max: region.y_max,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridConfig;
    use approx::assert_relative_eq;

    fn small_grid(auto_expand: bool) -> OccupancyGrid {
        OccupancyGrid::new(MapConfig {
            grid: GridConfig {
                resolution: 0.1,
                initial_width: 10,
                initial_height: 10,
                origin: None,
                auto_expand,
                max_width: 40,
                max_height: 40,
            },
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_grid_creation() {
        let grid = small_grid(true);
        let (min, max) = grid.bounds();

        assert_eq!(grid.width(), 10);
        assert_eq!(grid.height(), 10);
        assert_relative_eq!(min.x, -0.5);
        assert_relative_eq!(max.y, 0.5);
        assert_eq!(grid.visited_cell_count(), 0);
    }

    #[test]
    fn test_coordinate_conversion() {
        let grid = small_grid(true);

        let coord = grid.world_to_grid(WorldPoint::new(0.0, 0.0));
        assert_eq!(coord, GridCoord::new(5, 5));

        let center = grid.grid_to_world(coord);
        assert_relative_eq!(center.x, 0.05, epsilon = 1e-12);
        assert_relative_eq!(center.y, 0.05, epsilon = 1e-12);

        assert!(!grid.is_valid_coord(GridCoord::new(-1, 0)));
        assert!(!grid.is_valid_coord(GridCoord::new(10, 0)));
    }

    #[test]
    fn test_record_visit_and_ratio() {
        let mut grid = small_grid(true);
        let coord = GridCoord::new(2, 3);

        assert_eq!(grid.occupancy_ratio(coord), None);
        assert!(grid.record_visit(coord, true));
        assert!(grid.record_visit(coord, false));
        assert!(grid.record_visit(coord, false));
        assert_eq!(grid.counts(coord), Some((1, 3)));
        assert_relative_eq!(grid.occupancy_ratio(coord).unwrap(), 1.0 / 3.0);

        assert!(!grid.record_visit(GridCoord::new(50, 50), true));
    }

    #[test]
    fn test_expansion_preserves_counts() {
        let mut grid = small_grid(true);
        let point = WorldPoint::new(0.05, 0.05);
        let coord = grid.world_to_grid(point);
        grid.record_visit(coord, true);

        assert!(grid.expand_to_include(WorldPoint::new(-1.0, 1.2)));
        assert!(grid.width() > 10);
        assert!(grid.height() > 10);
        assert!(grid.contains_point(WorldPoint::new(-1.0, 1.2)));

        // Same world point still maps to the visited cell
        let moved = grid.world_to_grid(point);
        assert_eq!(grid.counts(moved), Some((1, 1)));
    }

    #[test]
    fn test_expansion_respects_max_size() {
        let mut grid = small_grid(true);
        assert!(!grid.expand_to_include(WorldPoint::new(100.0, 0.0)));
        assert_eq!(grid.width(), 10);
    }

    #[test]
    fn test_expansion_far_below_origin_is_refused() {
        let mut grid = small_grid(true);
        assert!(!grid.expand_to_include(WorldPoint::new(-1e12, -1e12)));
        assert_eq!(grid.width(), 10);
        assert_eq!(grid.height(), 10);

        let region = Region::centered(WorldPoint::new(-1e12, 0.0), 1.0);
        assert!(matches!(
            grid.ensure_region(&region),
            Err(MatchError::MapBounds { .. })
        ));
    }

    #[test]
    fn test_ensure_region_without_auto_expand_fails() {
        let mut grid = small_grid(false);
        let region = Region::centered(WorldPoint::ZERO, 1.0);
        assert!(matches!(
            grid.ensure_region(&region),
            Err(MatchError::MapBounds { .. })
        ));

        let inside = Region::centered(WorldPoint::ZERO, 0.3);
        assert!(grid.ensure_region(&inside).is_ok());
    }

    #[test]
    fn test_query_region() {
        let mut grid = small_grid(true);
        grid.record_visit(GridCoord::new(5, 5), true);

        let region = Region::centered(WorldPoint::ZERO, 0.15);
        let cells = grid.query_region(&region).unwrap();

        // -0.15 -> cell 3, +0.15 -> cell 6
        assert_eq!(cells.width, 4);
        assert_eq!(cells.height, 4);
        assert_eq!(cells.len(), 16);

        let visited: Vec<_> = cells.visited().collect();
        assert_eq!(visited.len(), 1);
        assert_relative_eq!(visited[0].0.x, 0.05, epsilon = 1e-12);
        assert_eq!(visited[0].1, 1.0);
    }

    #[test]
    fn test_query_region_outside_storage() {
        let grid = small_grid(true);
        let region = Region::centered(WorldPoint::new(3.0, 0.0), 0.5);
        assert!(grid.query_region(&region).is_err());
    }
}
