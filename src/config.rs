//! Robot limits and trajectory generation parameters.

use serde::{Deserialize, Serialize};

use crate::core::Waypoint;
use crate::error::{PlanError, Result};
use crate::path::PathType;

/// Physical limits of the robot.
///
/// All fields are in consistent units of the caller's choosing (e.g. meters
/// and seconds); the generated trajectories inherit those units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RobotSpecs {
    /// Maximum velocity.
    pub max_v: f64,
    /// Maximum acceleration.
    pub max_a: f64,
    /// Distance between the left and right wheels.
    pub base_width: f64,
}

impl RobotSpecs {
    /// Create a new set of robot specs.
    #[inline]
    pub fn new(max_v: f64, max_a: f64, base_width: f64) -> Self {
        Self {
            max_v,
            max_a,
            base_width,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !(self.max_v > 0.0) {
            return Err(PlanError::InvalidParams(format!(
                "max velocity must be positive, got {}",
                self.max_v
            )));
        }
        if !(self.max_a > 0.0) {
            return Err(PlanError::InvalidParams(format!(
                "max acceleration must be positive, got {}",
                self.max_a
            )));
        }
        if !(self.base_width > 0.0) {
            return Err(PlanError::InvalidParams(format!(
                "base width must be positive, got {}",
                self.base_width
            )));
        }
        Ok(())
    }
}

/// Parameters controlling trajectory generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryParams {
    /// Waypoints the path must pass through, in traversal order.
    pub waypoints: Vec<Waypoint>,
    /// Turn smoothness constant: the magnitude of the tangent vectors derived
    /// from waypoint headings. Larger values smooth the turns at the
    /// waypoints at the cost of longer paths.
    pub alpha: f64,
    /// Number of sample moments along the trajectory.
    pub seg_count: usize,
    /// Whether the trajectory is meant to drive a tank drive robot. Tank
    /// trajectories slow down through turns and carry the per-sample
    /// curvature needed to derive wheel tracks.
    pub is_tank: bool,
    /// Spline family used to join the waypoints.
    pub path_type: PathType,
}

impl TrajectoryParams {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.waypoints.len() < 2 {
            return Err(PlanError::InvalidParams(format!(
                "at least two waypoints are required, got {}",
                self.waypoints.len()
            )));
        }
        if self.seg_count == 0 {
            return Err(PlanError::InvalidParams(
                "segment count must be positive".to_string(),
            ));
        }
        if !(self.alpha > 0.0) || !self.alpha.is_finite() {
            return Err(PlanError::InvalidParams(format!(
                "alpha must be positive and finite, got {}",
                self.alpha
            )));
        }
        Ok(())
    }
}
