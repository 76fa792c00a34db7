//! Projection of a reading into search-field indices.

use crate::core::{Reading, WorldPoint};
use crate::grid::ClassifiedRays;

use super::search_space::SearchField;
use super::traits::OccupancyMap;

/// Field indices of one rotation candidate, duplicates removed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldPoints {
    /// Indices of ray endpoints
    pub occupied: Vec<(i64, i64)>,
    /// Indices of cells traversed by rays
    pub empty: Vec<(i64, i64)>,
}

impl FieldPoints {
    /// Whether both sets are empty.
    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty() && self.empty.is_empty()
    }

    /// Total number of indices.
    pub fn len(&self) -> usize {
        self.occupied.len() + self.empty.len()
    }
}

/// Projects readings through the map's read-only ray classification.
pub struct ScanProjector<'a, M: OccupancyMap + ?Sized> {
    map: &'a M,
}

impl<'a, M: OccupancyMap + ?Sized> ScanProjector<'a, M> {
    /// Projector backed by `map`.
    pub fn new(map: &'a M) -> Self {
        Self { map }
    }

    /// World points of `reading` at heading `theta + rotation`.
    pub fn project(&self, reading: &Reading, rotation: f64) -> ClassifiedRays {
        self.map.classify_reading(reading, rotation)
    }

    /// Project and convert to `field` indices.
    ///
    /// Several rays landing in the same field cell count once.
    pub fn project_indices(&self, reading: &Reading, rotation: f64, field: &SearchField) -> FieldPoints {
        let rays = self.project(reading, rotation);
        FieldPoints {
            occupied: unique_indices(field, &rays.occupied),
            empty: unique_indices(field, &rays.empty),
        }
    }
}

/// Sorted, deduplicated field indices of `points`.
pub fn unique_indices(field: &SearchField, points: &[WorldPoint]) -> Vec<(i64, i64)> {
    let mut indices: Vec<(i64, i64)> = points.iter().map(|&p| field.index_of(p)).collect();
    indices.sort_unstable();
    indices.dedup();
    indices
}
