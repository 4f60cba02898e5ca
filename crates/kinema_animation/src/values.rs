//! Animatable value types
//!
//! [`Interpolate`] is the linear-blend primitive for plain values. A
//! [`ValueBlender`] turns a progress ratio and an easing curve into the value
//! an animation emits; most blenders apply the curve and then interpolate, the
//! Bezier path blenders sample their path at the raw progress instead.

use crate::easing::Easing;
use crate::error::{AnimationError, Result};
use kinema_core::{Color, CubicCurve, Point2D, Point3D, QuadCurve};

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t
    fn lerp(&self, other: &Self, t: f64) -> Self;
}

// ============================================================================
// Scalar Implementations
// ============================================================================

impl Interpolate for f64 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        let from = *self as f64;
        (from + (*other as f64 - from) * t) as f32
    }
}

// Integers blend in f64 and round to the nearest value
impl Interpolate for i32 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        let from = *self as f64;
        (from + (*other as f64 - from) * t).round() as i32
    }
}

impl Interpolate for i64 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        let from = *self as f64;
        (from + (*other as f64 - from) * t).round() as i64
    }
}

// ============================================================================
// Point Implementations
// ============================================================================

impl Interpolate for Point2D {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        Point2D::new(self.x.lerp(&other.x, t), self.y.lerp(&other.y, t))
    }
}

impl Interpolate for Point3D {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        Point3D::new(
            self.x.lerp(&other.x, t),
            self.y.lerp(&other.y, t),
            self.z.lerp(&other.z, t),
        )
    }
}

// ============================================================================
// Color Implementation
// ============================================================================

impl Interpolate for Color {
    /// Per-channel blend, clamped so overshooting curves stay a valid color
    fn lerp(&self, other: &Self, t: f64) -> Self {
        Color::rgba(
            self.r.lerp(&other.r, t),
            self.g.lerp(&other.g, t),
            self.b.lerp(&other.b, t),
            self.a.lerp(&other.a, t),
        )
        .clamped()
    }
}

// ============================================================================
// Value Blenders
// ============================================================================

/// Produces the value an animation emits for a given progress
pub trait ValueBlender<T> {
    /// Value at `progress` in `[0, 1]`, shaped by `easing` where applicable
    fn value(&self, progress: f64, easing: &Easing) -> T;

    /// Check the blender can produce values at all.
    ///
    /// Called once when an animation is built.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

impl<T, B: ValueBlender<T> + ?Sized> ValueBlender<T> for Box<B> {
    fn value(&self, progress: f64, easing: &Easing) -> T {
        (**self).value(progress, easing)
    }

    fn validate(&self) -> Result<()> {
        (**self).validate()
    }
}

/// Eased linear blend between two values
#[derive(Clone, Debug, PartialEq)]
pub struct AnimatedValue<T: Interpolate> {
    pub from: T,
    pub to: T,
}

impl<T: Interpolate> AnimatedValue<T> {
    pub fn new(from: T, to: T) -> Self {
        Self { from, to }
    }
}

impl<T: Interpolate> ValueBlender<T> for AnimatedValue<T> {
    fn value(&self, progress: f64, easing: &Easing) -> T {
        self.from.lerp(&self.to, easing.apply(progress))
    }
}

/// Follows a quadratic Bezier path.
///
/// The path is sampled at the raw progress: the easing curve does not move
/// the point along the path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadBezierPath(pub QuadCurve);

impl ValueBlender<Point2D> for QuadBezierPath {
    fn value(&self, progress: f64, _easing: &Easing) -> Point2D {
        self.0.point_at(progress)
    }
}

/// Follows a cubic Bezier path, sampled at the raw progress
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezierPath(pub CubicCurve);

impl ValueBlender<Point2D> for CubicBezierPath {
    fn value(&self, progress: f64, _easing: &Easing) -> Point2D {
        self.0.point_at(progress)
    }
}

/// Blend through a caller-supplied function of `(from, to, eased_t)`
pub struct CustomBlend<T, F> {
    pub from: T,
    pub to: T,
    blend: F,
}

impl<T, F> CustomBlend<T, F>
where
    F: Fn(&T, &T, f64) -> T,
{
    pub fn new(from: T, to: T, blend: F) -> Self {
        Self { from, to, blend }
    }
}

impl<T, F> ValueBlender<T> for CustomBlend<T, F>
where
    F: Fn(&T, &T, f64) -> T,
{
    fn value(&self, progress: f64, easing: &Easing) -> T {
        (self.blend)(&self.from, &self.to, easing.apply(progress))
    }
}

/// Which way a [`TypewriterText`] runs
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TypewriterMode {
    /// Grow from empty to the full text
    #[default]
    Reveal,
    /// Shrink from the full text to empty
    Hide,
}

/// Reveals or hides a string one character at a time
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypewriterText {
    text: String,
    mode: TypewriterMode,
    char_count: usize,
}

impl TypewriterText {
    pub fn reveal(text: impl Into<String>) -> Self {
        Self::new(text.into(), TypewriterMode::Reveal)
    }

    pub fn hide(text: impl Into<String>) -> Self {
        Self::new(text.into(), TypewriterMode::Hide)
    }

    fn new(text: String, mode: TypewriterMode) -> Self {
        let char_count = text.chars().count();
        Self {
            text,
            mode,
            char_count,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn mode(&self) -> TypewriterMode {
        self.mode
    }
}

impl ValueBlender<String> for TypewriterText {
    fn value(&self, progress: f64, easing: &Easing) -> String {
        let progress = match self.mode {
            TypewriterMode::Reveal => progress,
            TypewriterMode::Hide => 1.0 - progress,
        };

        // Truncate toward the shorter prefix; overshooting curves are clamped
        let shown = (self.char_count as f64 * easing.apply(progress)).max(0.0) as usize;
        let shown = shown.min(self.char_count);

        self.text.chars().take(shown).collect()
    }
}

// ============================================================================
// Dynamic Values
// ============================================================================

/// A value whose kind is only known at runtime (content-driven animations)
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DynamicValue {
    Scalar(f64),
    Integer(i64),
    Point(Point2D),
    Point3(Point3D),
    Color(Color),
    Text(String),
}

impl DynamicValue {
    /// Short name of the value kind, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            DynamicValue::Scalar(_) => "scalar",
            DynamicValue::Integer(_) => "integer",
            DynamicValue::Point(_) => "point2d",
            DynamicValue::Point3(_) => "point3d",
            DynamicValue::Color(_) => "color",
            DynamicValue::Text(_) => "text",
        }
    }

    fn lerp(&self, other: &DynamicValue, t: f64) -> Option<DynamicValue> {
        let value = match (self, other) {
            (DynamicValue::Scalar(a), DynamicValue::Scalar(b)) => {
                DynamicValue::Scalar(a.lerp(b, t))
            }
            (DynamicValue::Integer(a), DynamicValue::Integer(b)) => {
                DynamicValue::Integer(a.lerp(b, t))
            }
            (DynamicValue::Point(a), DynamicValue::Point(b)) => DynamicValue::Point(a.lerp(b, t)),
            (DynamicValue::Point3(a), DynamicValue::Point3(b)) => {
                DynamicValue::Point3(a.lerp(b, t))
            }
            (DynamicValue::Color(a), DynamicValue::Color(b)) => DynamicValue::Color(a.lerp(b, t)),
            _ => return None,
        };
        Some(value)
    }
}

/// Eased blend between two [`DynamicValue`]s of the same interpolable kind
#[derive(Clone, Debug, PartialEq)]
pub struct DynamicBlend {
    pub from: DynamicValue,
    pub to: DynamicValue,
}

impl DynamicBlend {
    pub fn new(from: DynamicValue, to: DynamicValue) -> Self {
        Self { from, to }
    }
}

impl ValueBlender<DynamicValue> for DynamicBlend {
    fn value(&self, progress: f64, easing: &Easing) -> DynamicValue {
        // validate() rejects pairs that cannot blend; hold the start value if
        // one slips through anyway
        self.from
            .lerp(&self.to, easing.apply(progress))
            .unwrap_or_else(|| self.from.clone())
    }

    fn validate(&self) -> Result<()> {
        match self.from.lerp(&self.to, 0.0) {
            Some(_) => Ok(()),
            None => Err(AnimationError::UnsupportedValueType(format!(
                "cannot interpolate {} to {}",
                self.from.kind(),
                self.to.kind()
            ))),
        }
    }
}
