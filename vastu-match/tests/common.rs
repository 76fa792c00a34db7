//! Test utilities: synthetic square rooms and small matcher setups.

#![allow(dead_code)]

use std::f64::consts::PI;

use vastu_match::{
    CoarseToFineMatcher, GridConfig, MapConfig, MatcherConfig, OccupancyGrid, Pose2D, Reading,
    SensorConfig,
};

/// Half side of the test room (walls at ±2m).
pub const ROOM_HALF_SIDE: f64 = 2.0;

/// Full-circle sensor reaching every wall of the test room.
pub fn room_sensor() -> SensorConfig {
    SensorConfig {
        max_range: 4.0,
        min_range: 0.0,
        field_of_view: 2.0 * PI,
        samples_per_revolution: 360,
    }
}

/// 10m × 10m grid at 5cm centered on the room.
pub fn room_map() -> OccupancyGrid {
    OccupancyGrid::new(MapConfig {
        grid: GridConfig {
            resolution: 0.05,
            initial_width: 200,
            initial_height: 200,
            origin: None,
            auto_expand: true,
            max_width: 400,
            max_height: 400,
        },
        sensor: room_sensor(),
    })
    .expect("valid map config")
}

/// Matcher sized for the test room: 10cm coarse cells, ±0.3m window.
pub fn room_matcher_config() -> MatcherConfig {
    MatcherConfig {
        search_radius: 0.3,
        search_half_angle: 0.1,
        angular_step: 0.05,
        smoothing_sigma: 2.0,
        coarse_factor: 2,
        max_evaluations: None,
    }
}

pub fn room_matcher() -> CoarseToFineMatcher {
    CoarseToFineMatcher::new(room_matcher_config()).expect("valid matcher config")
}

/// Ranges seen from `pose` inside a square room of half side `half_side`
/// centered at the origin. Rays longer than the sensor reach report
/// `max_range` (no return).
pub fn room_ranges(sensor: &SensorConfig, pose: Pose2D, half_side: f64) -> Vec<f64> {
    (0..sensor.samples_per_revolution)
        .map(|i| {
            let angle = sensor.ray_angle(pose.theta, i);
            let (sin_a, cos_a) = angle.sin_cos();

            let tx = if cos_a > 1e-12 {
                (half_side - pose.x) / cos_a
            } else if cos_a < -1e-12 {
                (-half_side - pose.x) / cos_a
            } else {
                f64::INFINITY
            };
            let ty = if sin_a > 1e-12 {
                (half_side - pose.y) / sin_a
            } else if sin_a < -1e-12 {
                (-half_side - pose.y) / sin_a
            } else {
                f64::INFINITY
            };

            tx.min(ty).min(sensor.max_range)
        })
        .collect()
}

/// Reading taken at `truth` in the test room, tagged with pose `tagged`.
pub fn room_reading(truth: Pose2D, tagged: Pose2D) -> Reading {
    let ranges = room_ranges(&room_sensor(), truth, ROOM_HALF_SIDE);
    Reading::new(tagged.x, tagged.y, tagged.theta, ranges)
}

/// Room map with one reading from the origin committed.
pub fn map_seeded_at_origin() -> OccupancyGrid {
    let mut map = room_map();
    let origin = Pose2D::identity();
    map.commit(&room_reading(origin, origin))
        .expect("reading matches sensor");
    map
}

/// Install a test logger once (honors RUST_LOG).
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
