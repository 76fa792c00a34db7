//! Rectangular world regions and dense snapshots of the cells inside them.

use crate::core::WorldPoint;

/// Axis-aligned world rectangle (meters).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    /// Minimum X
    pub x_min: f64,
    /// Maximum X
    pub x_max: f64,
    /// Minimum Y
    pub y_min: f64,
    /// Maximum Y
    pub y_max: f64,
}

impl Region {
    /// Square region of half-side `half_side` centered on `center`.
    pub fn centered(center: WorldPoint, half_side: f64) -> Self {
        Self {
            x_min: center.x - half_side,
            x_max: center.x + half_side,
            y_min: center.y - half_side,
            y_max: center.y + half_side,
        }
    }

    /// Lower-left corner.
    #[inline]
    pub fn min(&self) -> WorldPoint {
        WorldPoint::new(self.x_min, self.y_min)
    }

    /// Upper-right corner.
    #[inline]
    pub fn max(&self) -> WorldPoint {
        WorldPoint::new(self.x_max, self.y_max)
    }

    /// Extent along X.
    #[inline]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Extent along Y.
    #[inline]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

/// Dense per-cell copy of a map region, row-major (row = Y).
///
/// `world_x` / `world_y` hold the center of each cell so that callers can
/// re-bin cells into grids of a different resolution.
#[derive(Clone, Debug, Default)]
pub struct RegionCells {
    /// Cells per row
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// Times each cell was observed as an obstacle
    pub occupied: Vec<u32>,
    /// Times each cell was observed at all
    pub total: Vec<u32>,
    /// World X of each cell center
    pub world_x: Vec<f64>,
    /// World Y of each cell center
    pub world_y: Vec<f64>,
}

impl RegionCells {
    /// Number of cells in the snapshot.
    #[inline]
    pub fn len(&self) -> usize {
        self.total.len()
    }

    /// Whether the snapshot has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total.is_empty()
    }

    /// Visited cells as (center, occupied ratio). Unvisited cells are skipped.
    pub fn visited(&self) -> impl Iterator<Item = (WorldPoint, f64)> + '_ {
        (0..self.len()).filter(|&i| self.total[i] > 0).map(move |i| {
            (
                WorldPoint::new(self.world_x[i], self.world_y[i]),
                self.occupied[i] as f64 / self.total[i] as f64,
            )
        })
    }
}
