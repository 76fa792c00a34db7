//! Error types for scan matching.
//!
//! Only structural problems surface as errors. A search that finds no
//! scoring candidate is not an error: it yields a zero correction flagged
//! as degenerate on the [`MatchResult`](crate::matching::MatchResult).

use thiserror::Error;

/// Errors returned by the matcher and the occupancy grid.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchError {
    /// Reading length does not match the sensor's samples per revolution.
    #[error("reading has {actual} range samples, expected {expected}")]
    Validation {
        /// Configured samples per revolution
        expected: usize,
        /// Samples carried by the reading
        actual: usize,
    },

    /// Reading pose has a non-finite component.
    #[error("reading pose ({x}, {y}, {theta}) is not finite")]
    InvalidPose {
        /// X position (meters)
        x: f64,
        /// Y position (meters)
        y: f64,
        /// Heading (radians)
        theta: f64,
    },

    /// A search region could not be covered by map storage.
    #[error(
        "region x=[{x_min:.3}, {x_max:.3}] y=[{y_min:.3}, {y_max:.3}] is outside map storage"
    )]
    MapBounds {
        /// Region minimum X (meters)
        x_min: f64,
        /// Region maximum X (meters)
        x_max: f64,
        /// Region minimum Y (meters)
        y_min: f64,
        /// Region maximum Y (meters)
        y_max: f64,
    },

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, MatchError>;
