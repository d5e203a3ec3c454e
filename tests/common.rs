//! Shared fixtures for the trajectory integration tests.

#![allow(dead_code)]

use std::f64::consts::FRAC_PI_2;

use gati_plan::{BasicTrajectory, PathType, RobotSpecs, TrajectoryParams, Waypoint};

/// Straight run 10 units forward along +Y.
pub fn straight_waypoints() -> Vec<Waypoint> {
    vec![Waypoint::new(0.0, 0.0, 0.0), Waypoint::new(0.0, 10.0, 0.0)]
}

/// Symmetric S-shaped route through a sideways middle waypoint.
pub fn s_curve_waypoints() -> Vec<Waypoint> {
    vec![
        Waypoint::new(0.0, 0.0, 0.0),
        Waypoint::new(5.0, 5.0, FRAC_PI_2),
        Waypoint::new(10.0, 0.0, 0.0),
    ]
}

pub fn params(
    waypoints: Vec<Waypoint>,
    seg_count: usize,
    is_tank: bool,
    path_type: PathType,
) -> TrajectoryParams {
    TrajectoryParams {
        waypoints,
        alpha: 10.0,
        seg_count,
        is_tank,
        path_type,
    }
}

/// The S1 scenario: straight 10 units, max_v 5, max_a 2, 100 samples.
pub fn s1_trajectory() -> BasicTrajectory {
    BasicTrajectory::new(
        RobotSpecs::new(5.0, 2.0, 1.0),
        params(straight_waypoints(), 100, false, PathType::CubicHermite),
    )
    .expect("S1 generates")
}

/// The S2 scenario: S-curve, max_v 3, max_a 1, 200 samples, tank drive with
/// base width 1.
pub fn s2_params() -> (RobotSpecs, TrajectoryParams) {
    (
        RobotSpecs::new(3.0, 1.0, 1.0),
        params(s_curve_waypoints(), 200, true, PathType::CubicHermite),
    )
}
