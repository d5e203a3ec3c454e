//! Parametric spline segments joining pairs of waypoints.
//!
//! Each segment is one curve over a local parameter t in [0, 1] with its
//! endpoint tangents derived from the waypoint headings and the path's alpha.
//! The three families trade smoothness for stiffness: Bezier and cubic
//! Hermite concatenations are C1 across waypoints, quintic Hermite is C2
//! because every segment pins its endpoint second derivatives to zero.

use crate::core::{Vec2d, Waypoint};

use super::PathType;

/// One parametric spline piece, dispatched by family.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SplineSegment {
    /// Cubic Bezier with four control points.
    Bezier {
        p0: Vec2d,
        p1: Vec2d,
        p2: Vec2d,
        p3: Vec2d,
    },
    /// Cubic Hermite from endpoints and endpoint tangents.
    CubicHermite {
        p0: Vec2d,
        p1: Vec2d,
        m0: Vec2d,
        m1: Vec2d,
    },
    /// Quintic Hermite from endpoints and endpoint tangents, with zero
    /// second derivative at both ends.
    QuinticHermite {
        p0: Vec2d,
        p1: Vec2d,
        m0: Vec2d,
        m1: Vec2d,
    },
}

impl SplineSegment {
    /// Build the segment joining `start` to `end` for the given family.
    ///
    /// The tangent at each waypoint is `alpha * (sin h, cos h)`, so the curve
    /// leaves and enters the waypoints in their heading directions.
    pub fn from_waypoints(start: &Waypoint, end: &Waypoint, alpha: f64, family: PathType) -> Self {
        let p0 = start.position();
        let p1 = end.position();
        let m0 = start.tangent(alpha);
        let m1 = end.tangent(alpha);

        match family {
            PathType::Bezier => {
                // Control points at a third of the tangent give the cubic
                // Bezier the same endpoint derivatives as the Hermite forms.
                SplineSegment::Bezier {
                    p0,
                    p1: p0 + m0 * (1.0 / 3.0),
                    p2: p1 - m1 * (1.0 / 3.0),
                    p3: p1,
                }
            }
            PathType::CubicHermite => SplineSegment::CubicHermite { p0, p1, m0, m1 },
            PathType::QuinticHermite => SplineSegment::QuinticHermite { p0, p1, m0, m1 },
        }
    }

    /// Position at local parameter t in [0, 1].
    pub fn at(&self, t: f64) -> Vec2d {
        match *self {
            SplineSegment::Bezier { p0, p1, p2, p3 } => {
                let u = 1.0 - t;
                p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
            }
            SplineSegment::CubicHermite { p0, p1, m0, m1 } => {
                let t2 = t * t;
                let t3 = t2 * t;
                p0 * (2.0 * t3 - 3.0 * t2 + 1.0)
                    + m0 * (t3 - 2.0 * t2 + t)
                    + p1 * (-2.0 * t3 + 3.0 * t2)
                    + m1 * (t3 - t2)
            }
            SplineSegment::QuinticHermite { p0, p1, m0, m1 } => {
                let t3 = t * t * t;
                let t4 = t3 * t;
                let t5 = t4 * t;
                p0 * (1.0 - 10.0 * t3 + 15.0 * t4 - 6.0 * t5)
                    + m0 * (t - 6.0 * t3 + 8.0 * t4 - 3.0 * t5)
                    + p1 * (10.0 * t3 - 15.0 * t4 + 6.0 * t5)
                    + m1 * (-4.0 * t3 + 7.0 * t4 - 3.0 * t5)
            }
        }
    }

    /// First derivative with respect to t.
    pub fn deriv_at(&self, t: f64) -> Vec2d {
        match *self {
            SplineSegment::Bezier { p0, p1, p2, p3 } => {
                let u = 1.0 - t;
                (p1 - p0) * (3.0 * u * u) + (p2 - p1) * (6.0 * u * t) + (p3 - p2) * (3.0 * t * t)
            }
            SplineSegment::CubicHermite { p0, p1, m0, m1 } => {
                let t2 = t * t;
                p0 * (6.0 * t2 - 6.0 * t)
                    + m0 * (3.0 * t2 - 4.0 * t + 1.0)
                    + p1 * (-6.0 * t2 + 6.0 * t)
                    + m1 * (3.0 * t2 - 2.0 * t)
            }
            SplineSegment::QuinticHermite { p0, p1, m0, m1 } => {
                let t2 = t * t;
                let t3 = t2 * t;
                let t4 = t3 * t;
                p0 * (-30.0 * t2 + 60.0 * t3 - 30.0 * t4)
                    + m0 * (1.0 - 18.0 * t2 + 32.0 * t3 - 15.0 * t4)
                    + p1 * (30.0 * t2 - 60.0 * t3 + 30.0 * t4)
                    + m1 * (-12.0 * t2 + 28.0 * t3 - 15.0 * t4)
            }
        }
    }

    /// Second derivative with respect to t.
    pub fn second_deriv_at(&self, t: f64) -> Vec2d {
        match *self {
            SplineSegment::Bezier { p0, p1, p2, p3 } => {
                let u = 1.0 - t;
                (p2 - p1 * 2.0 + p0) * (6.0 * u) + (p3 - p2 * 2.0 + p1) * (6.0 * t)
            }
            SplineSegment::CubicHermite { p0, p1, m0, m1 } => {
                p0 * (12.0 * t - 6.0)
                    + m0 * (6.0 * t - 4.0)
                    + p1 * (-12.0 * t + 6.0)
                    + m1 * (6.0 * t - 2.0)
            }
            SplineSegment::QuinticHermite { p0, p1, m0, m1 } => {
                let t2 = t * t;
                let t3 = t2 * t;
                p0 * (-60.0 * t + 180.0 * t2 - 120.0 * t3)
                    + m0 * (-36.0 * t + 96.0 * t2 - 60.0 * t3)
                    + p1 * (60.0 * t - 180.0 * t2 + 120.0 * t3)
                    + m1 * (-24.0 * t + 84.0 * t2 - 60.0 * t3)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const FAMILIES: [PathType; 3] = [
        PathType::Bezier,
        PathType::CubicHermite,
        PathType::QuinticHermite,
    ];

    fn endpoints() -> (Waypoint, Waypoint) {
        (
            Waypoint::new(0.0, 0.0, 0.0),
            Waypoint::new(4.0, 6.0, FRAC_PI_2),
        )
    }

    #[test]
    fn test_interpolates_endpoints() {
        let (start, end) = endpoints();
        for family in FAMILIES {
            let seg = SplineSegment::from_waypoints(&start, &end, 5.0, family);
            assert!(seg.at(0.0).dist(start.position()) < 1e-9, "{family:?}");
            assert!(seg.at(1.0).dist(end.position()) < 1e-9, "{family:?}");
        }
    }

    #[test]
    fn test_endpoint_tangents_match_headings() {
        let (start, end) = endpoints();
        let alpha = 5.0;
        for family in FAMILIES {
            let seg = SplineSegment::from_waypoints(&start, &end, alpha, family);
            let d0 = seg.deriv_at(0.0);
            let d1 = seg.deriv_at(1.0);
            assert!(d0.dist(start.tangent(alpha)) < 1e-9, "{family:?}");
            assert!(d1.dist(end.tangent(alpha)) < 1e-9, "{family:?}");
        }
    }

    #[test]
    fn test_quintic_natural_endpoints() {
        let (start, end) = endpoints();
        let seg = SplineSegment::from_waypoints(&start, &end, 5.0, PathType::QuinticHermite);
        assert!(seg.second_deriv_at(0.0).length() < 1e-9);
        assert!(seg.second_deriv_at(1.0).length() < 1e-9);
    }

    #[test]
    fn test_derivative_consistent_with_finite_difference() {
        let (start, end) = endpoints();
        let h = 1e-6;
        for family in FAMILIES {
            let seg = SplineSegment::from_waypoints(&start, &end, 5.0, family);
            for &t in &[0.2, 0.5, 0.8] {
                let numeric = (seg.at(t + h) - seg.at(t - h)) * (1.0 / (2.0 * h));
                assert!(numeric.dist(seg.deriv_at(t)) < 1e-5, "{family:?} at {t}");
            }
        }
    }
}
