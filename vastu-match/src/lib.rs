//! # VastuMatch
//!
//! Coarse-to-fine correlative scan matching against a visit-count occupancy
//! grid.
//!
//! ## Overview
//!
//! A new range reading, tagged with an estimated pose, is aligned to the map
//! built from earlier readings. The matcher turns a region of the map into
//! two smoothed log-likelihood fields and exhaustively scores a discretized
//! set of rotation and translation hypotheses:
//!
//! - **Coarse stage**: wide window on a grid `coarse_factor` times coarser
//! - **Fine stage**: one coarse cell around the coarse result at full resolution
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vastu_match::{CoarseToFineMatcher, MatchSession, OccupancyGrid, Reading, VastuMatchConfig};
//!
//! let config = VastuMatchConfig::load_default()?;
//! let mut map = OccupancyGrid::new(config.to_map_config())?;
//! let matcher = CoarseToFineMatcher::new(config.matcher_config())?;
//! let mut session = MatchSession::new();
//!
//! for raw in readings {
//!     let matched = session.step(&matcher, &mut map, &raw)?;
//!     println!("pose: ({:.3}, {:.3}, {:.3})", matched.x(), matched.y(), matched.theta());
//! }
//! ```
//!
//! ## Coordinate System
//!
//! - X, Y: meters in the world frame
//! - Theta: radians, CCW positive from +X axis, never wrapped by the matcher
//!
//! ## Features
//!
//! - `parallel`: score rotation candidates on the rayon thread pool. Results
//!   are identical to the sequential path.

#![warn(missing_docs)]

// Core types
pub mod core;

// Occupancy grid storage and updates
pub mod grid;

// Unified configuration
pub mod config;

// Scan matching
pub mod matching;

// Sequencing across readings
pub mod session;

mod error;

// Re-export commonly used types
pub use core::{GridCoord, Pose2D, Reading, WorldPoint};

pub use grid::{CommitStats, GridConfig, MapConfig, OccupancyGrid, SensorConfig};

pub use matching::{
    CoarseToFineMatcher, MatchResult, MatchStage, MatcherConfig, OccupancyMap, ScanMatchOutcome,
    SearchObserver,
};

pub use config::{ConfigLoadError, VastuMatchConfig};

pub use error::{MatchError, Result};

pub use session::MatchSession;
