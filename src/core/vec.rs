//! Planar vector type used throughout path and trajectory math.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// A 2D vector or point in the field frame (f64).
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2d {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Vec2d {
    /// Create a new vector.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Zero vector (origin).
    pub const ZERO: Vec2d = Vec2d { x: 0.0, y: 0.0 };

    /// Euclidean distance to another point.
    #[inline]
    pub fn dist(&self, other: Vec2d) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Length (magnitude) of this vector.
    #[inline]
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Dot product with another vector.
    #[inline]
    pub fn dot(&self, other: Vec2d) -> f64 {
        self.x * other.x + self.y * other.y
    }
}

impl Add for Vec2d {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Vec2d::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2d {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Vec2d::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Vec2d {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f64) -> Self {
        Vec2d::new(self.x * scalar, self.y * scalar)
    }
}

impl Neg for Vec2d {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Vec2d::new(-self.x, -self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dist() {
        let a = Vec2d::new(0.0, 0.0);
        let b = Vec2d::new(3.0, 4.0);
        assert!((a.dist(b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_ops() {
        let a = Vec2d::new(1.0, 2.0);
        let b = Vec2d::new(-3.0, 0.5);
        assert_eq!(a + b, Vec2d::new(-2.0, 2.5));
        assert_eq!(a - b, Vec2d::new(4.0, 1.5));
        assert_eq!(a * 2.0, Vec2d::new(2.0, 4.0));
        assert_eq!(-a, Vec2d::new(-1.0, -2.0));
    }

    #[test]
    fn test_dot() {
        let a = Vec2d::new(1.0, 0.0);
        let b = Vec2d::new(0.0, 1.0);
        assert_eq!(a.dot(b), 0.0);
        assert_eq!(a.dot(a), 1.0);
    }
}
