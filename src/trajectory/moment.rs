//! Kinematic state samples along a trajectory.
//!
//! Heading is the direction the robot is moving in; facing is the direction
//! its front points. They differ when driving backwards, which is why the
//! moments carry a `backwards` flag and the trajectory's initial facing.

use serde::{Deserialize, Serialize};

use crate::core::math::rangle;

/// One sample of centerline kinematic state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicMoment {
    /// Arc length traveled from the start.
    pub dist: f64,
    /// Velocity along the path.
    pub vel: f64,
    /// Acceleration along the path.
    pub accel: f64,
    /// Direction of motion, radians clockwise from +Y.
    pub heading: f64,
    /// Time from the start of the trajectory.
    pub time: f64,
    /// Absolute facing of the robot at the start of the trajectory.
    pub init_facing: f64,
    /// Whether the robot is driving in reverse.
    pub backwards: bool,
}

impl BasicMoment {
    pub(crate) fn new(dist: f64, vel: f64, accel: f64, heading: f64) -> Self {
        Self {
            dist,
            vel,
            accel,
            heading,
            time: 0.0,
            init_facing: 0.0,
            backwards: false,
        }
    }

    /// Absolute facing: the heading, flipped by the backwards convention.
    #[inline]
    pub fn afacing(&self) -> f64 {
        if self.backwards {
            -self.heading
        } else {
            self.heading
        }
    }

    /// Facing relative to the start of the trajectory.
    #[inline]
    pub fn rfacing(&self) -> f64 {
        rangle(self.afacing() - self.init_facing)
    }
}

/// One sample of per-wheel kinematic state for a tank drive robot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TankDriveMoment {
    /// Cumulative distance traveled by the left wheel.
    pub l_dist: f64,
    /// Cumulative distance traveled by the right wheel.
    pub r_dist: f64,
    /// Left wheel velocity.
    pub l_vel: f64,
    /// Right wheel velocity.
    pub r_vel: f64,
    /// Left wheel acceleration.
    pub l_accel: f64,
    /// Right wheel acceleration.
    pub r_accel: f64,
    /// Direction of motion, radians clockwise from +Y.
    pub heading: f64,
    /// Time from the start of the trajectory.
    pub time: f64,
    /// Absolute facing of the robot at the start of the trajectory.
    pub init_facing: f64,
    /// Whether the robot is driving in reverse.
    pub backwards: bool,
}

impl TankDriveMoment {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        l_dist: f64,
        r_dist: f64,
        l_vel: f64,
        r_vel: f64,
        l_accel: f64,
        r_accel: f64,
        heading: f64,
        time: f64,
    ) -> Self {
        Self {
            l_dist,
            r_dist,
            l_vel,
            r_vel,
            l_accel,
            r_accel,
            heading,
            time,
            init_facing: 0.0,
            backwards: false,
        }
    }

    /// Absolute facing: the heading, flipped by the backwards convention.
    #[inline]
    pub fn afacing(&self) -> f64 {
        if self.backwards {
            -self.heading
        } else {
            self.heading
        }
    }

    /// Facing relative to the start of the trajectory.
    #[inline]
    pub fn rfacing(&self) -> f64 {
        rangle(self.afacing() - self.init_facing)
    }
}
