//! Scalar math helpers for angles, interpolation and curvature.

use std::f64::consts::{PI, TAU};

/// Wrap an angle in radians into the range (-pi, pi].
#[inline]
pub fn rangle(theta: f64) -> f64 {
    let mut a = theta % TAU;
    if a <= -PI {
        a += TAU;
    } else if a > PI {
        a -= TAU;
    }
    a
}

/// Linearly interpolate between two scalars.
#[inline]
pub fn lerp(a: f64, b: f64, f: f64) -> f64 {
    a + (b - a) * f
}

/// Interpolate between two angles in radians along the shortest arc.
///
/// Plain [`lerp`] glitches when one angle is positive and the other negative;
/// this wraps the delta first so the result never takes the long way around.
#[inline]
pub fn lerp_angle(a: f64, b: f64, f: f64) -> f64 {
    rangle(a + f * rangle(b - a))
}

/// Smallest signed difference from `src` to `target`, in (-pi, pi].
#[inline]
pub fn angle_diff(src: f64, target: f64) -> f64 {
    rangle(target - src)
}

/// Signed curvature of a parametric curve from its first and second
/// derivatives: `(x'y'' - y'x'') / (x'^2 + y'^2)^(3/2)`.
///
/// Positive for counter-clockwise turns.
#[inline]
pub fn curvature(dx: f64, ddx: f64, dy: f64, ddy: f64) -> f64 {
    (dx * ddy - dy * ddx) / (dx * dx + dy * dy).powf(1.5)
}

/// Clamp the magnitude of `v` to `limit`, preserving sign.
#[inline]
pub fn rabs(v: f64, limit: f64) -> f64 {
    if v.abs() <= limit {
        v
    } else {
        limit.copysign(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_rangle() {
        assert!((rangle(0.0)).abs() < 1e-12);
        assert!((rangle(TAU)).abs() < 1e-12);
        assert!((rangle(3.0 * PI) - PI).abs() < 1e-12);
        assert!((rangle(-PI) - PI).abs() < 1e-12);
        assert!((rangle(-FRAC_PI_2) + FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.25), 2.5);
        assert_eq!(lerp(5.0, -5.0, 0.5), 0.0);
    }

    #[test]
    fn test_lerp_angle_shortest_path() {
        // Interpolating across the -pi/pi seam must not sweep through zero.
        let mid = lerp_angle(PI - 0.1, -PI + 0.1, 0.5);
        assert!((mid.abs() - PI).abs() < 1e-9);

        let quarter = lerp_angle(0.0, FRAC_PI_2, 0.5);
        assert!((quarter - FRAC_PI_2 / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_angle_diff() {
        assert!((angle_diff(0.1, -0.1) + 0.2).abs() < 1e-12);
        assert!((angle_diff(PI - 0.1, -PI + 0.1) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_curvature_circle() {
        // Unit circle parameterized by angle: curvature is 1 everywhere.
        let theta: f64 = 0.7;
        let (dx, dy) = (-theta.sin(), theta.cos());
        let (ddx, ddy) = (-theta.cos(), -theta.sin());
        assert!((curvature(dx, ddx, dy, ddy) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rabs() {
        assert_eq!(rabs(3.0, 5.0), 3.0);
        assert_eq!(rabs(-3.0, 5.0), -3.0);
        assert_eq!(rabs(7.0, 5.0), 5.0);
        assert_eq!(rabs(-7.0, 5.0), -5.0);
    }
}
