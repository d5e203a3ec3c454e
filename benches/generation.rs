//! Trajectory generation benchmarks.
//!
//! Run with: `cargo bench`
//! View HTML reports in: `target/criterion/`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::f64::consts::FRAC_PI_2;

use gati_plan::{
    BasicTrajectory, PathType, RobotSpecs, TankDriveTrajectory, TrajectoryParams, Waypoint,
};

/// S-shaped three-waypoint route used by all benchmarks.
fn route() -> Vec<Waypoint> {
    vec![
        Waypoint::new(0.0, 0.0, 0.0),
        Waypoint::new(5.0, 5.0, FRAC_PI_2),
        Waypoint::new(10.0, 0.0, 0.0),
    ]
}

fn params(seg_count: usize, is_tank: bool, path_type: PathType) -> TrajectoryParams {
    TrajectoryParams {
        waypoints: route(),
        alpha: 10.0,
        seg_count,
        is_tank,
        path_type,
    }
}

fn bench_basic_generation(c: &mut Criterion) {
    let specs = RobotSpecs::new(3.0, 1.0, 1.0);
    let mut group = c.benchmark_group("basic_generation");

    for seg_count in [100, 500, 2000] {
        group.bench_function(format!("cubic_{seg_count}"), |b| {
            b.iter(|| {
                BasicTrajectory::new(
                    black_box(specs),
                    black_box(params(seg_count, false, PathType::CubicHermite)),
                )
                .unwrap()
            })
        });
    }
    for path_type in [PathType::Bezier, PathType::QuinticHermite] {
        group.bench_function(format!("{path_type:?}_500"), |b| {
            b.iter(|| {
                BasicTrajectory::new(black_box(specs), black_box(params(500, false, path_type)))
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_tank_derivation(c: &mut Criterion) {
    let specs = RobotSpecs::new(3.0, 1.0, 1.0);
    let basic =
        BasicTrajectory::new(specs, params(500, true, PathType::CubicHermite)).unwrap();

    c.bench_function("tank_derivation_500", |b| {
        b.iter(|| TankDriveTrajectory::new(black_box(&basic)).unwrap())
    });
}

fn bench_query(c: &mut Criterion) {
    let specs = RobotSpecs::new(3.0, 1.0, 1.0);
    let basic = BasicTrajectory::new(specs, params(500, true, PathType::CubicHermite)).unwrap();
    let tank = TankDriveTrajectory::new(&basic).unwrap();
    let total = tank.total_time();

    c.bench_function("tank_get_midpoint", |b| {
        b.iter(|| tank.get(black_box(total / 2.0)))
    });
}

criterion_group!(
    benches,
    bench_basic_generation,
    bench_tank_derivation,
    bench_query
);
criterion_main!(benches);
