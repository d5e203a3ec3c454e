//! # Gati-Plan: Motion Planning for Differential Drive Robots
//!
//! A path and trajectory generation library for tank drive ("differential
//! drive") mobile robots. Given a handful of waypoints and the robot's
//! kinematic limits, it produces a time-parameterized trajectory: position,
//! heading, per-wheel distances, velocities and accelerations for every
//! instant between zero and the trajectory's total time.
//!
//! ## Quick Start
//!
//! ```
//! use gati_plan::{BasicTrajectory, PathType, RobotSpecs, TrajectoryParams, Waypoint};
//!
//! let specs = RobotSpecs::new(5.0, 3.5, 2.0);
//! let params = TrajectoryParams {
//!     waypoints: vec![
//!         Waypoint::new(0.0, 0.0, 0.0),
//!         Waypoint::new(-10.0, 14.0, std::f64::consts::FRAC_PI_2),
//!     ],
//!     alpha: 20.0,
//!     seg_count: 500,
//!     is_tank: false,
//!     path_type: PathType::QuinticHermite,
//! };
//!
//! let traj = BasicTrajectory::new(specs, params).expect("well-formed parameters");
//! let mid = traj.get(traj.total_time() / 2.0);
//! assert!(mid.vel > 0.0 && mid.vel <= specs.max_v);
//! ```
//!
//! ## Coordinate Frame
//!
//! Positions are planar (x, y) in whatever unit the waypoints use. Headings
//! are radians measured from the +Y axis, clockwise positive, so a robot at
//! heading 0 drives in the +Y direction (the field-oriented convention used
//! by the FRC ecosystem this library grew out of).
//!
//! ## Architecture
//!
//! - [`core`]: fundamental value types ([`Vec2d`], [`Waypoint`]) and math
//!   helpers
//! - [`path`]: spline segments stitched into a [`Path`], arc-length
//!   reparameterization, wheel geometry via [`WheelView`]
//! - [`trajectory`]: two-pass velocity profiling into a [`BasicTrajectory`],
//!   per-wheel derivation into a [`TankDriveTrajectory`], and the
//!   mirror/retrace transforms
//! - [`follower`]: closed-loop following of generated trajectories
//!
//! Generation is deterministic, single-threaded and free of I/O; a [`Path`]
//! is immutable once built and can be shared between trajectories.

pub mod config;
pub mod core;
pub mod error;
pub mod follower;
pub mod path;
pub mod trajectory;

pub use crate::config::{RobotSpecs, TrajectoryParams};
pub use crate::core::{Vec2d, Waypoint};
pub use crate::error::{PlanError, Result};
pub use crate::follower::{FollowerGains, FollowerInput, FollowerOutput, TankFollower};
pub use crate::path::{Path, PathType, SplineSegment, WheelView};
pub use crate::trajectory::{BasicMoment, BasicTrajectory, TankDriveMoment, TankDriveTrajectory};
