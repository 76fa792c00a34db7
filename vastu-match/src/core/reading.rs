//! Range reading record: a pose hypothesis plus one sweep of range samples.

use std::sync::Arc;

use crate::error::MatchError;

use super::point::WorldPoint;
use super::pose::Pose2D;

/// A single sensor sweep tagged with the pose it is believed to be taken at.
///
/// Readings are immutable. Every matching stage produces a new reading via
/// [`with_correction`](Self::with_correction); the range samples are shared
/// between the original and all corrected copies.
///
/// A sample equal to or beyond the sensor's maximum range means "no return".
#[derive(Clone, Debug, PartialEq)]
pub struct Reading {
    x: f64,
    y: f64,
    theta: f64,
    ranges: Arc<[f64]>,
}

impl Reading {
    /// Create a reading from a pose and its range samples.
    pub fn new(x: f64, y: f64, theta: f64, ranges: impl Into<Arc<[f64]>>) -> Self {
        Self {
            x,
            y,
            theta,
            ranges: ranges.into(),
        }
    }

    /// Create a reading, checking its pose is finite and that it carries
    /// exactly `expected_samples` ranges.
    pub fn checked(
        x: f64,
        y: f64,
        theta: f64,
        ranges: impl Into<Arc<[f64]>>,
        expected_samples: usize,
    ) -> Result<Self, MatchError> {
        let reading = Self::new(x, y, theta, ranges);
        reading.validate(expected_samples)?;
        Ok(reading)
    }

    /// Verify the pose is finite and the number of range samples.
    pub fn validate(&self, expected_samples: usize) -> Result<(), MatchError> {
        if !(self.x.is_finite() && self.y.is_finite() && self.theta.is_finite()) {
            return Err(MatchError::InvalidPose {
                x: self.x,
                y: self.y,
                theta: self.theta,
            });
        }
        if self.ranges.len() != expected_samples {
            return Err(MatchError::Validation {
                expected: expected_samples,
                actual: self.ranges.len(),
            });
        }
        Ok(())
    }

    /// X position in meters.
    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y position in meters.
    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Heading in radians.
    #[inline]
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Sensor position.
    #[inline]
    pub fn position(&self) -> WorldPoint {
        WorldPoint::new(self.x, self.y)
    }

    /// Full pose.
    #[inline]
    pub fn pose(&self) -> Pose2D {
        Pose2D::new(self.x, self.y, self.theta)
    }

    /// Range samples in sweep order.
    #[inline]
    pub fn ranges(&self) -> &[f64] {
        &self.ranges
    }

    /// Number of range samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Whether the reading carries no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// A new reading at the corrected pose, sharing these range samples.
    pub fn with_correction(&self, dx: f64, dy: f64, dtheta: f64) -> Reading {
        Reading {
            x: self.x + dx,
            y: self.y + dy,
            theta: self.theta + dtheta,
            ranges: Arc::clone(&self.ranges),
        }
    }

    /// A new reading at an explicit pose, sharing these range samples.
    pub fn with_pose(&self, pose: Pose2D) -> Reading {
        Reading {
            x: pose.x,
            y: pose.y,
            theta: pose.theta,
            ranges: Arc::clone(&self.ranges),
        }
    }
}
