//! Planar paths built by stitching spline segments through waypoints.
//!
//! A [`Path`] concatenates N-1 segments for N waypoints, evaluated over a
//! global parameter t in [0, 1] that is split evenly across segments. Because
//! parametric polynomials do not move at constant speed in t, the path also
//! carries an arc-length lookup table built by [`Path::compute_len`], and
//! [`Path::s2t`] / [`Path::t2s`] convert between normalized arc length and
//! the parameter. Wheel positions are derived through a [`WheelView`], which
//! keeps the path itself immutable and shareable.

mod segment;

use serde::{Deserialize, Serialize};

use crate::core::math::{lerp, rangle};
use crate::core::{Vec2d, Waypoint};
use crate::error::{PlanError, Result};

pub use segment::SplineSegment;

use std::f64::consts::PI;

/// Spline family used to join waypoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathType {
    /// Cubic Bezier segments.
    Bezier,
    /// Cubic Hermite segments (C1 across waypoints).
    CubicHermite,
    /// Quintic Hermite segments with natural endpoints (C2 across waypoints).
    QuinticHermite,
}

/// A C1 (or C2, for quintic) curve interpolating a sequence of waypoints.
///
/// Immutable once constructed; share it between trajectories with
/// `Arc<Path>`.
#[derive(Clone, Debug)]
pub struct Path {
    waypoints: Vec<Waypoint>,
    alpha: f64,
    path_type: PathType,
    segments: Vec<SplineSegment>,
    /// Monotone (cumulative arc length, t) samples; empty until
    /// `compute_len` runs.
    s2t_table: Vec<(f64, f64)>,
    total_len: f64,
}

impl Path {
    /// Build a path through `waypoints` with tangent magnitude `alpha`.
    pub fn new(waypoints: Vec<Waypoint>, alpha: f64, path_type: PathType) -> Result<Self> {
        if waypoints.len() < 2 {
            return Err(PlanError::InvalidParams(format!(
                "at least two waypoints are required, got {}",
                waypoints.len()
            )));
        }
        Ok(Self::from_parts(waypoints, alpha, path_type))
    }

    /// Infallible constructor for rebuilds whose waypoint count is already
    /// known to be valid.
    fn from_parts(waypoints: Vec<Waypoint>, alpha: f64, path_type: PathType) -> Self {
        let segments = waypoints
            .windows(2)
            .map(|pair| SplineSegment::from_waypoints(&pair[0], &pair[1], alpha, path_type))
            .collect();
        Self {
            waypoints,
            alpha,
            path_type,
            segments,
            s2t_table: Vec::new(),
            total_len: f64::NAN,
        }
    }

    /// The waypoints this path interpolates.
    #[inline]
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// The tangent magnitude the segments were built with.
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// The spline family of this path.
    #[inline]
    pub fn path_type(&self) -> PathType {
        self.path_type
    }

    /// Map a global parameter to (segment index, local parameter). Inputs
    /// outside [0, 1] clamp to the nearest endpoint.
    fn locate(&self, t: f64) -> (usize, f64) {
        if t >= 1.0 {
            return (self.segments.len() - 1, 1.0);
        }
        let scaled = t.max(0.0) * self.segments.len() as f64;
        let index = (scaled.floor() as usize).min(self.segments.len() - 1);
        (index, scaled - index as f64)
    }

    /// Position at global parameter t in [0, 1].
    pub fn at(&self, t: f64) -> Vec2d {
        let (i, local) = self.locate(t);
        self.segments[i].at(local)
    }

    /// First derivative at global parameter t.
    pub fn deriv_at(&self, t: f64) -> Vec2d {
        let (i, local) = self.locate(t);
        self.segments[i].deriv_at(local)
    }

    /// Second derivative at global parameter t.
    pub fn second_deriv_at(&self, t: f64) -> Vec2d {
        let (i, local) = self.locate(t);
        self.segments[i].second_deriv_at(local)
    }

    /// Walk the path at `points` equally spaced parameter values, summing
    /// chord lengths into the arc-length lookup table. Returns the total
    /// length. Must be called before [`Path::s2t`] or [`Path::t2s`].
    pub fn compute_len(&mut self, points: usize) -> f64 {
        debug_assert!(points >= 2, "need at least two samples");
        let dt = 1.0 / (points - 1) as f64;

        let mut table = Vec::with_capacity(points);
        table.push((0.0, 0.0));
        let mut last = self.at(0.0);
        let mut total = 0.0;
        for i in 1..points {
            let t = i as f64 * dt;
            let current = self.at(t);
            total += last.dist(current);
            table.push((total, t));
            last = current;
        }
        self.s2t_table = table;
        self.total_len = total;
        log::debug!("measured path: {} samples, length {:.4}", points, total);
        total
    }

    /// Total arc length, available after [`Path::compute_len`].
    pub fn total_len(&self) -> Result<f64> {
        if self.s2t_table.is_empty() {
            return Err(PlanError::PrecomputationMissing);
        }
        Ok(self.total_len)
    }

    fn table(&self) -> Result<&[(f64, f64)]> {
        if self.s2t_table.is_empty() {
            return Err(PlanError::PrecomputationMissing);
        }
        Ok(&self.s2t_table)
    }

    /// Convert a normalized arc length s in [0, 1] to the path parameter t.
    pub fn s2t(&self, s: f64) -> Result<f64> {
        let table = self.table()?;
        let dist = s * self.total_len;
        if dist <= 0.0 {
            return Ok(0.0);
        }
        if dist >= self.total_len {
            return Ok(1.0);
        }

        // First entry with cumulative length >= dist; index 0 holds length
        // zero, so the bracket below never underflows.
        let idx = table.partition_point(|&(len, _)| len < dist);
        let (d1, t1) = table[idx];
        if d1 == dist {
            return Ok(t1);
        }
        let (d0, t0) = table[idx - 1];
        if d1 == d0 {
            return Ok(t1);
        }
        Ok(lerp(t0, t1, (dist - d0) / (d1 - d0)))
    }

    /// Convert a path parameter t in [0, 1] to a normalized arc length.
    pub fn t2s(&self, t: f64) -> Result<f64> {
        let table = self.table()?;
        if t <= 0.0 {
            return Ok(0.0);
        }
        if t >= 1.0 {
            return Ok(1.0);
        }

        let idx = table.partition_point(|&(_, tt)| tt < t);
        let (d1, t1) = table[idx];
        if t1 == t {
            return Ok(d1 / self.total_len);
        }
        let (d0, t0) = table[idx - 1];
        if t1 == t0 {
            return Ok(d1 / self.total_len);
        }
        Ok(lerp(d0, d1, (t - t0) / (t1 - t0)) / self.total_len)
    }

    /// Reflect the path across the Y axis: every waypoint keeps its y, flips
    /// its x, and negates its heading.
    pub fn mirror_lr(&self) -> Path {
        let waypoints = self
            .waypoints
            .iter()
            .map(|w| Waypoint {
                x: -w.x,
                heading: rangle(-w.heading),
                ..*w
            })
            .collect();
        Self::from_parts(waypoints, self.alpha, self.path_type)
    }

    /// Reflect along the direction of travel: waypoint order reverses so the
    /// new start is the old end, and each heading becomes pi minus itself.
    pub fn mirror_fb(&self) -> Path {
        let waypoints = self
            .waypoints
            .iter()
            .rev()
            .map(|w| Waypoint {
                heading: rangle(PI - w.heading),
                ..*w
            })
            .collect();
        Self::from_parts(waypoints, self.alpha, self.path_type)
    }

    /// The same geometry traversed in reverse: waypoint order reverses and
    /// every heading turns by pi.
    pub fn retrace(&self) -> Path {
        let waypoints = self
            .waypoints
            .iter()
            .rev()
            .map(|w| Waypoint {
                heading: rangle(w.heading + PI),
                ..*w
            })
            .collect();
        Self::from_parts(waypoints, self.alpha, self.path_type)
    }
}

/// Wheel-placement convention for deriving wheel positions from a centerline
/// path.
///
/// A path stays immutable and shareable; anything that needs wheel geometry
/// carries one of these views instead. `base_radius` is half the distance
/// between the wheels, and `backwards` flips the left/right offsets for
/// trajectories driven in reverse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WheelView {
    /// Half the wheel-to-wheel width.
    pub base_radius: f64,
    /// Whether the robot traverses the path in reverse.
    pub backwards: bool,
}

impl WheelView {
    /// Forward-facing view with the given base radius.
    #[inline]
    pub fn new(base_radius: f64) -> Self {
        Self {
            base_radius,
            backwards: false,
        }
    }

    /// Left and right wheel positions at path parameter t.
    ///
    /// With the tangent angle phi = atan2(dy, dx), the left wheel sits at
    /// p + r(-sin phi, cos phi) and the right at p - r(-sin phi, cos phi);
    /// driving backwards swaps the two offsets.
    pub fn wheels_at(&self, path: &Path, t: f64) -> (Vec2d, Vec2d) {
        let pos = path.at(t);
        let deriv = path.deriv_at(t);
        let phi = deriv.y.atan2(deriv.x);
        let (sin, cos) = phi.sin_cos();
        let r = if self.backwards {
            -self.base_radius
        } else {
            self.base_radius
        };
        (
            Vec2d::new(pos.x - r * sin, pos.y + r * cos),
            Vec2d::new(pos.x + r * sin, pos.y - r * cos),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn three_waypoints() -> Vec<Waypoint> {
        vec![
            Waypoint::new(0.0, 0.0, 0.0),
            Waypoint::new(5.0, 5.0, FRAC_PI_2),
            Waypoint::new(10.0, 0.0, PI),
        ]
    }

    fn built_path(path_type: PathType) -> Path {
        let mut path = Path::new(three_waypoints(), 10.0, path_type).unwrap();
        path.compute_len(500);
        path
    }

    #[test]
    fn test_rejects_single_waypoint() {
        let result = Path::new(vec![Waypoint::new(0.0, 0.0, 0.0)], 1.0, PathType::Bezier);
        assert!(matches!(result, Err(PlanError::InvalidParams(_))));
    }

    #[test]
    fn test_interpolates_waypoints() {
        let waypoints = three_waypoints();
        let path = Path::new(waypoints.clone(), 10.0, PathType::CubicHermite).unwrap();
        assert!(path.at(0.0).dist(waypoints[0].position()) < 1e-9);
        assert!(path.at(0.5).dist(waypoints[1].position()) < 1e-9);
        assert!(path.at(1.0).dist(waypoints[2].position()) < 1e-9);
        // Out-of-range parameters clamp instead of failing.
        assert!(path.at(1.5).dist(waypoints[2].position()) < 1e-9);
        assert!(path.at(-0.5).dist(waypoints[0].position()) < 1e-9);
    }

    #[test]
    fn test_lookup_requires_compute_len() {
        let path = Path::new(three_waypoints(), 10.0, PathType::CubicHermite).unwrap();
        assert_eq!(path.s2t(0.5), Err(PlanError::PrecomputationMissing));
        assert_eq!(path.t2s(0.5), Err(PlanError::PrecomputationMissing));
        assert_eq!(path.total_len(), Err(PlanError::PrecomputationMissing));
    }

    #[test]
    fn test_s2t_round_trip() {
        let path = built_path(PathType::CubicHermite);
        for i in 0..=20 {
            let s = i as f64 / 20.0;
            let t = path.s2t(s).unwrap();
            let back = path.t2s(t).unwrap();
            assert!((back - s).abs() < 1e-2, "s={s} t={t} back={back}");
        }
    }

    #[test]
    fn test_s2t_clamps_and_hits_samples() {
        let path = built_path(PathType::CubicHermite);
        assert_eq!(path.s2t(-0.1).unwrap(), 0.0);
        assert_eq!(path.s2t(1.1).unwrap(), 1.0);
        assert_eq!(path.t2s(-0.1).unwrap(), 0.0);
        assert_eq!(path.t2s(1.1).unwrap(), 1.0);
    }

    #[test]
    fn test_straight_path_length() {
        let waypoints = vec![Waypoint::new(0.0, 0.0, 0.0), Waypoint::new(0.0, 10.0, 0.0)];
        let mut path = Path::new(waypoints, 10.0, PathType::CubicHermite).unwrap();
        let len = path.compute_len(200);
        assert!((len - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_wheels_straight_line() {
        // Driving along +Y, the left wheel sits at negative x.
        let waypoints = vec![Waypoint::new(0.0, 0.0, 0.0), Waypoint::new(0.0, 10.0, 0.0)];
        let path = Path::new(waypoints, 10.0, PathType::CubicHermite).unwrap();
        let view = WheelView::new(0.5);
        let (left, right) = view.wheels_at(&path, 0.5);
        assert!((left.x + 0.5).abs() < 1e-9);
        assert!((right.x - 0.5).abs() < 1e-9);
        assert!((left.y - right.y).abs() < 1e-9);

        let reversed = WheelView {
            backwards: true,
            ..view
        };
        let (rleft, rright) = reversed.wheels_at(&path, 0.5);
        assert!(rleft.dist(right) < 1e-9);
        assert!(rright.dist(left) < 1e-9);
    }

    #[test]
    fn test_mirror_lr_flips_x() {
        let path = built_path(PathType::CubicHermite);
        let mirrored = path.mirror_lr();
        for (orig, flip) in path.waypoints().iter().zip(mirrored.waypoints()) {
            assert_eq!(flip.x, -orig.x);
            assert_eq!(flip.y, orig.y);
            assert!((flip.heading - rangle(-orig.heading)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_retrace_reverses_geometry() {
        let mut retraced = built_path(PathType::QuinticHermite).retrace();
        let path = built_path(PathType::QuinticHermite);
        retraced.compute_len(500);
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            assert!(retraced.at(t).dist(path.at(1.0 - t)) < 1e-6, "t={t}");
        }
    }

    #[test]
    fn test_transforms_are_involutions() {
        let path = built_path(PathType::CubicHermite);
        for (name, twice) in [
            ("mirror_lr", path.mirror_lr().mirror_lr()),
            ("mirror_fb", path.mirror_fb().mirror_fb()),
            ("retrace", path.retrace().retrace()),
        ] {
            for (orig, back) in path.waypoints().iter().zip(twice.waypoints()) {
                assert!(back.position().dist(orig.position()) < 1e-12, "{name}");
                assert!(rangle(back.heading - orig.heading).abs() < 1e-12, "{name}");
            }
        }
    }

    #[test]
    fn test_quintic_c2_at_interior_waypoint() {
        let path = built_path(PathType::QuinticHermite);
        let eps = 1e-9;
        let before = path.second_deriv_at(0.5 - eps);
        let after = path.second_deriv_at(0.5 + eps);
        assert!(before.dist(after) < 1e-4);
    }
}
