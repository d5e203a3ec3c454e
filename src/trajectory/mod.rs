//! Trajectory generation: velocity profiling over paths.

mod basic;
mod moment;
mod tank;

pub use basic::BasicTrajectory;
pub use moment::{BasicMoment, TankDriveMoment};
pub use tank::TankDriveTrajectory;
