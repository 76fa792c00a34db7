//! Core types shared by the grid and the matcher.
//!
//! - [`WorldPoint`]: floating-point world coordinates in meters
//! - [`GridCoord`]: integer cell indices
//! - [`Pose2D`]: position plus heading
//! - [`Reading`]: one range sweep plus the pose it was taken at
//!
//! Angles are radians, counter-clockwise from +X.

mod point;
mod pose;
mod reading;

pub use point::{GridCoord, WorldPoint};
pub use pose::Pose2D;
pub use reading::Reading;
