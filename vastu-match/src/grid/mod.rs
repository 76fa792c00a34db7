//! Visit-count occupancy grid.
//!
//! The grid keeps, per cell, how often a ray ended there and how often a ray
//! touched it at all. The ratio of the two decides the cell class:
//!
//! ```text
//! occupied / total > 0.5  → occupied
//! occupied / total < 0.5  → empty
//! total == 0              → unknown
//! ```
//!
//! ## Key Components
//!
//! - [`OccupancyGrid`]: Dense row-major counters with on-demand expansion
//! - [`GridConfig`]: Grid dimensions, resolution, and expansion settings
//! - [`SensorConfig`]: Range sensor model (max range, field of view, samples)
//! - [`MapConfig`]: Combined configuration for the full map
//! - [`lidar_update`]: Commit a reading, or classify its rays read-only
//! - [`raycaster`]: Bresenham line algorithm for ray tracing
//!
//! ## Example
//!
//! ```rust,ignore
//! use vastu_match::grid::{MapConfig, OccupancyGrid};
//!
//! let mut grid = OccupancyGrid::new(MapConfig::default())?;
//! let stats = grid.commit(&reading)?;
//! let rays = grid.classify(&reading, 0.05);
//! ```

mod config;
pub mod lidar_update;
pub mod raycaster;
mod region;
mod storage;

pub use config::{GridConfig, MapConfig, SensorConfig};
pub use lidar_update::{ClassifiedRays, CommitStats};
pub use region::{Region, RegionCells};
pub use storage::OccupancyGrid;
