//! Points and Bezier paths

use std::ops::{Add, Mul, Sub};

// ─────────────────────────────────────────────────────────────────────────────
// Points
// ─────────────────────────────────────────────────────────────────────────────

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const ZERO: Point2D = Point2D { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Point2D) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }

    /// Lift into 3D space with `z = 0`
    pub const fn to_3d(self) -> Point3D {
        Point3D::new(self.x, self.y, 0.0)
    }
}

impl Add for Point2D {
    type Output = Point2D;

    fn add(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2D {
    type Output = Point2D;

    fn sub(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point2D {
    type Output = Point2D;

    fn mul(self, rhs: f64) -> Point2D {
        Point2D::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// 3D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub const ZERO: Point3D = Point3D {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Drop the z component
    pub const fn to_2d(self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

impl From<(f64, f64, f64)> for Point3D {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Bezier Paths
// ─────────────────────────────────────────────────────────────────────────────

/// Quadratic Bezier curve with one control point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuadCurve {
    pub start: Point2D,
    pub control: Point2D,
    pub end: Point2D,
}

impl QuadCurve {
    pub const fn new(start: Point2D, control: Point2D, end: Point2D) -> Self {
        Self {
            start,
            control,
            end,
        }
    }

    /// Evaluate the curve at parameter `t`:
    /// B(t) = (1-t)²·p0 + 2(1-t)t·p1 + t²·p2
    pub fn point_at(&self, t: f64) -> Point2D {
        let mt = 1.0 - t;
        let x = mt * mt * self.start.x + 2.0 * mt * t * self.control.x + t * t * self.end.x;
        let y = mt * mt * self.start.y + 2.0 * mt * t * self.control.y + t * t * self.end.y;
        Point2D::new(x, y)
    }
}

/// Cubic Bezier curve with two control points
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubicCurve {
    pub start: Point2D,
    pub control1: Point2D,
    pub control2: Point2D,
    pub end: Point2D,
}

impl CubicCurve {
    pub const fn new(start: Point2D, control1: Point2D, control2: Point2D, end: Point2D) -> Self {
        Self {
            start,
            control1,
            control2,
            end,
        }
    }

    /// Evaluate the curve at parameter `t`:
    /// B(t) = (1-t)³·p0 + 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³·p3
    pub fn point_at(&self, t: f64) -> Point2D {
        let mt = 1.0 - t;
        let b0 = mt * mt * mt;
        let b1 = 3.0 * t * mt * mt;
        let b2 = 3.0 * t * t * mt;
        let b3 = t * t * t;

        Point2D::new(
            b0 * self.start.x + b1 * self.control1.x + b2 * self.control2.x + b3 * self.end.x,
            b0 * self.start.y + b1 * self.control1.y + b2 * self.control2.y + b3 * self.end.y,
        )
    }
}
