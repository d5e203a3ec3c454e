//! Waypoints: the poses a path must interpolate.

use serde::{Deserialize, Serialize};

use super::Vec2d;

/// A planar pose the path must pass through, with an optional speed
/// constraint.
///
/// `heading` is measured in radians from the +Y axis, clockwise positive, so
/// a robot at heading 0 drives in the +Y direction. A `velocity` of `None` on
/// an endpoint means the robot starts or stops at rest there; `Some(v)` on an
/// interior waypoint is a hard equality constraint on the speed at that point
/// of the trajectory.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// X position.
    pub x: f64,
    /// Y position.
    pub y: f64,
    /// Heading in radians, clockwise from +Y.
    pub heading: f64,
    /// Optional speed constraint at this waypoint.
    pub velocity: Option<f64>,
}

impl Waypoint {
    /// Create a waypoint with no velocity constraint.
    #[inline]
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Self {
            x,
            y,
            heading,
            velocity: None,
        }
    }

    /// Create a waypoint with a velocity constraint.
    #[inline]
    pub fn with_velocity(x: f64, y: f64, heading: f64, velocity: f64) -> Self {
        Self {
            x,
            y,
            heading,
            velocity: Some(velocity),
        }
    }

    /// Position as a vector.
    #[inline]
    pub fn position(&self) -> Vec2d {
        Vec2d::new(self.x, self.y)
    }

    /// Tangent vector of magnitude `alpha` in the heading direction.
    #[inline]
    pub fn tangent(&self, alpha: f64) -> Vec2d {
        Vec2d::new(alpha * self.heading.sin(), alpha * self.heading.cos())
    }
}
