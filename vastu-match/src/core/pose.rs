//! 2D pose.

use serde::{Deserialize, Serialize};

use super::point::WorldPoint;

/// Position and heading in the world frame.
///
/// Heading is kept as given: corrections accumulate without wrapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose2D {
    /// X position in meters.
    pub x: f64,
    /// Y position in meters.
    pub y: f64,
    /// Heading in radians, CCW positive from X-axis.
    pub theta: f64,
}

impl Pose2D {
    /// Create a new pose.
    #[inline]
    pub const fn new(x: f64, y: f64, theta: f64) -> Self {
        Self { x, y, theta }
    }

    /// Create an identity pose (origin, facing forward).
    #[inline]
    pub const fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Position component.
    #[inline]
    pub fn position(&self) -> WorldPoint {
        WorldPoint::new(self.x, self.y)
    }
}
