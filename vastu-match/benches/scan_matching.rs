//! Benchmark coarse-to-fine scan matching performance.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::f64::consts::PI;
use std::hint::black_box;
use vastu_match::{
    CoarseToFineMatcher, GridConfig, MapConfig, MatcherConfig, OccupancyGrid, Reading,
    SensorConfig,
};

/// Ranges from (robot_x, robot_y) facing +X inside a room spanning
/// [0, room_width] × [0, room_height].
fn room_ranges(
    sensor: &SensorConfig,
    room_width: f64,
    room_height: f64,
    robot_x: f64,
    robot_y: f64,
) -> Vec<f64> {
    (0..sensor.samples_per_revolution)
        .map(|i| {
            let (sin_a, cos_a) = sensor.ray_angle(0.0, i).sin_cos();
            let mut range = sensor.max_range;

            if cos_a > 0.0 {
                range = range.min((room_width - robot_x) / cos_a);
            }
            if cos_a < 0.0 {
                range = range.min(-robot_x / cos_a);
            }
            if sin_a > 0.0 {
                range = range.min((room_height - robot_y) / sin_a);
            }
            if sin_a < 0.0 {
                range = range.min(-robot_y / sin_a);
            }
            range
        })
        .collect()
}

fn setup_map(samples: usize) -> (OccupancyGrid, Reading) {
    let sensor = SensorConfig {
        max_range: 8.0,
        min_range: 0.0,
        field_of_view: 2.0 * PI,
        samples_per_revolution: samples,
    };
    let config = MapConfig {
        grid: GridConfig {
            origin: Some(vastu_match::WorldPoint::new(-8.0, -8.0)),
            ..GridConfig::for_area(22.0, 22.0, 0.02)
        },
        sensor: sensor.clone(),
    };
    let mut map = OccupancyGrid::new(config).expect("valid map config");

    let ranges = room_ranges(&sensor, 6.0, 6.0, 3.0, 3.0);
    map.commit(&Reading::new(3.0, 3.0, 0.0, ranges))
        .expect("reading matches sensor");

    // Taken at (3.0, 3.0), believed to be at (3.1, 3.0)
    let ranges = room_ranges(&sensor, 6.0, 6.0, 3.0, 3.0);
    (map, Reading::new(3.1, 3.0, 0.0, ranges))
}

fn bench_scan_matching(c: &mut Criterion) {
    let (map, reading) = setup_map(360);

    let config = MatcherConfig {
        search_radius: 0.5,
        search_half_angle: 0.1,
        ..MatcherConfig::default()
    };
    let matcher = CoarseToFineMatcher::new(config).expect("valid matcher config");

    c.bench_function("coarse_to_fine_360pts", |b| {
        let mut map = map.clone();
        b.iter(|| {
            let result = matcher.match_scan(&mut map, black_box(&reading), 1);
            black_box(result)
        })
    });
}

fn bench_scan_matching_samples(c: &mut Criterion) {
    let mut group = c.benchmark_group("coarse_to_fine_samples");
    let config = MatcherConfig {
        search_radius: 0.5,
        search_half_angle: 0.1,
        ..MatcherConfig::default()
    };
    let matcher = CoarseToFineMatcher::new(config).expect("valid matcher config");

    for samples in [180, 360, 720].iter() {
        let (mut map, reading) = setup_map(*samples);

        group.bench_with_input(BenchmarkId::from_parameter(samples), samples, |b, _| {
            b.iter(|| {
                let result = matcher.match_scan(&mut map, black_box(&reading), 1);
                black_box(result)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_scan_matching, bench_scan_matching_samples);
criterion_main!(benches);
