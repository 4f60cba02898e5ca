//! Kinema Core Types
//!
//! Plain value types shared by the Kinema animation engine:
//!
//! - **Geometry**: 2D/3D points and quadratic/cubic Bezier paths
//! - **Color**: RGBA color with `f64` channels in `0.0..=1.0`
//!
//! The engine never depends on a scene graph. These types are what it
//! emits to caller-supplied sinks.
//!
//! # Example
//!
//! ```rust
//! use kinema_core::{Point2D, QuadCurve};
//!
//! let path = QuadCurve::new(
//!     Point2D::new(0.0, 0.0),
//!     Point2D::new(50.0, 100.0),
//!     Point2D::new(100.0, 0.0),
//! );
//!
//! assert_eq!(path.point_at(0.5), Point2D::new(50.0, 50.0));
//! ```

pub mod color;
pub mod geometry;

pub use color::Color;
pub use geometry::{CubicCurve, Point2D, Point3D, QuadCurve};
