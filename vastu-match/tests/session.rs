//! Session driving: extrapolate, match, commit, record.

mod common;

use approx::assert_abs_diff_eq;
use vastu_match::{MatchSession, Pose2D};

use common::*;

#[test]
fn test_session_corrects_odometry_overshoot() {
    init_logging();
    let mut map = room_map();
    let matcher = room_matcher();
    let mut session = MatchSession::new();

    // Robot moves 10cm per reading, odometry reports 15cm
    for i in 0..5 {
        let truth = Pose2D::new(0.1 * i as f64, 0.0, 0.0);
        let odometry = Pose2D::new(0.15 * i as f64, 0.0, 0.0);
        let raw = room_reading(truth, odometry);

        let matched = session.step(&matcher, &mut map, &raw).unwrap();

        assert_abs_diff_eq!(matched.x(), truth.x, epsilon = 0.05 + 1e-9);
        assert_abs_diff_eq!(matched.y(), truth.y, epsilon = 0.05 + 1e-9);
        assert_abs_diff_eq!(matched.theta(), truth.theta, epsilon = 0.05 + 1e-9);
    }

    assert_eq!(session.sequence_index(), 5);
    assert_eq!(session.trajectory().len(), 5);
    assert_eq!(session.trajectory()[0], Pose2D::identity());
}

#[test]
fn test_first_step_seeds_map() {
    let mut map = room_map();
    let matcher = room_matcher();
    let mut session = MatchSession::new();

    assert_eq!(map.visited_cell_count(), 0);
    let raw = room_reading(Pose2D::identity(), Pose2D::new(0.3, 0.2, 0.1));
    let matched = session.step(&matcher, &mut map, &raw).unwrap();

    // Bootstrap keeps the raw pose and commits it
    assert_eq!(matched, raw);
    assert!(map.visited_cell_count() > 0);
    assert_eq!(session.last_matched(), Some(&raw));
}
