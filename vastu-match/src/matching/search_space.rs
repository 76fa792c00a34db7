//! Log-likelihood search fields built from a map region.
//!
//! Two fields are built per stage over the same window:
//!
//! ```text
//! occupied field:  occupied cells → ln(1),  everything else → ln(0.01)
//! empty field:     empty cells    → ln(1),  everything else → ln(0.01)
//! ```
//!
//! Both are then Gaussian-smoothed so that small pose errors still collect
//! most of the evidence.

use crate::core::WorldPoint;
use crate::error::Result;
use crate::grid::Region;

use super::smoothing::gaussian_smooth;
use super::traits::OccupancyMap;

/// ln(0.01): value of cells without supporting evidence.
pub const LOG_UNLIKELY: f64 = -4.605_170_185_988_091;

/// ln(1): value of cells whose class matches the field.
pub const LOG_CERTAIN: f64 = 0.0;

/// Margin applied to the sensor range when sizing the search region.
const RANGE_MARGIN: f64 = 1.1;

/// Row-major grid of log-likelihood values over a world window.
///
/// Field cell `(ix, iy)` covers
/// `[origin + ix*cell_size, origin + (ix+1)*cell_size)` on each axis.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchField {
    values: Vec<f64>,
    width: usize,
    height: usize,
    origin: WorldPoint,
    cell_size: f64,
}

impl SearchField {
    /// Field of `width × height` cells all set to `value`.
    pub fn filled(width: usize, height: usize, origin: WorldPoint, cell_size: f64, value: f64) -> Self {
        Self {
            values: vec![value; width * height],
            width,
            height,
            origin,
            cell_size,
        }
    }

    /// Columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// World position of the field's lower-left corner.
    #[inline]
    pub fn origin(&self) -> WorldPoint {
        self.origin
    }

    /// Cell size (meters).
    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Raw row-major values.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Field index of a world point, truncated toward zero.
    ///
    /// The result may lie outside the field.
    #[inline]
    pub fn index_of(&self, point: WorldPoint) -> (i64, i64) {
        (
            ((point.x - self.origin.x) / self.cell_size) as i64,
            ((point.y - self.origin.y) / self.cell_size) as i64,
        )
    }

    /// Value at `(ix, iy)`, `None` outside the field.
    #[inline]
    pub fn get(&self, ix: i64, iy: i64) -> Option<f64> {
        if ix < 0 || iy < 0 || ix as usize >= self.width || iy as usize >= self.height {
            return None;
        }
        Some(self.values[iy as usize * self.width + ix as usize])
    }

    #[inline]
    pub(crate) fn set(&mut self, ix: i64, iy: i64, value: f64) {
        if ix >= 0 && iy >= 0 && (ix as usize) < self.width && (iy as usize) < self.height {
            self.values[iy as usize * self.width + ix as usize] = value;
        }
    }

    /// Gaussian-smooth in place. σ is in field cells.
    pub fn smooth(&mut self, sigma: f64) {
        gaussian_smooth(&mut self.values, self.width, self.height, sigma);
    }
}

/// The pair of fields for one matching stage.
#[derive(Clone, Debug)]
pub struct SearchSpace {
    /// World window both fields cover
    pub region: Region,
    /// Field favoring occupied evidence
    pub occupied: SearchField,
    /// Field favoring empty evidence
    pub empty: SearchField,
}

/// Extracts a map region and turns it into smoothed search fields.
#[derive(Clone, Copy, Debug)]
pub struct SearchSpaceBuilder {
    max_range: f64,
}

impl SearchSpaceBuilder {
    /// Builder for a sensor with the given maximum range (meters).
    pub fn new(max_range: f64) -> Self {
        Self { max_range }
    }

    /// Square search region around `center`: half-side is
    /// `1.1 * max_range + radius`, enough for every ray at every offset.
    pub fn region(&self, center: WorldPoint, radius: f64) -> Region {
        Region::centered(center, RANGE_MARGIN * self.max_range + radius)
    }

    /// Build the occupied and empty fields for one stage.
    ///
    /// Cells never visited keep [`LOG_UNLIKELY`] in both fields, so a region
    /// with no evidence scores uniformly low.
    pub fn build<M: OccupancyMap + ?Sized>(
        &self,
        map: &mut M,
        center: WorldPoint,
        radius: f64,
        cell_size: f64,
        sigma: f64,
    ) -> Result<SearchSpace> {
        let region = self.region(center, radius);
        map.ensure_coverage(&region)?;
        let cells = map.query_region(&region)?;

        let width = (region.width() / cell_size) as usize + 1;
        let height = (region.height() / cell_size) as usize + 1;
        let origin = region.min();

        let mut occupied = SearchField::filled(width, height, origin, cell_size, LOG_UNLIKELY);
        let mut empty = occupied.clone();

        // Opposing class cells keep the low default; when several map cells
        // share one field cell, the favored class wins.
        for (center, ratio) in cells.visited() {
            let (ix, iy) = occupied.index_of(center);
            if ratio > 0.5 {
                occupied.set(ix, iy, LOG_CERTAIN);
            } else if ratio < 0.5 {
                empty.set(ix, iy, LOG_CERTAIN);
            }
        }

        occupied.smooth(sigma);
        empty.smooth(sigma);

        log::trace!(
            "Search space {}x{} at {:.3}m cells (sigma {:.2})",
            width,
            height,
            cell_size,
            sigma
        );

        Ok(SearchSpace {
            region,
            occupied,
            empty,
        })
    }
}
