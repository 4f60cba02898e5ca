//! Easing functions for animations
//!
//! Every curve maps a progress ratio in `[0, 1]` to a shaped ratio. Each
//! deterministic family returns exactly `0.0` for `0.0` and exactly `1.0`
//! for `1.0`. In between, [`EasingFamily::Back`] and
//! [`EasingFamily::Elastic`] leave the unit range on purpose.

use crate::noise::NoiseGenerator;
use std::f64::consts::PI;
use std::fmt;
use std::rc::Rc;

/// Deterministic easing families
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EasingFamily {
    Linear,
    Quadratic,
    Cubic,
    Quartic,
    Quintic,
    Exponential,
    Sine,
    Circular,
    Smooth,
    Bounce,
    Elastic,
    Back,
}

/// Which end of the curve is eased
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EaseMode {
    /// Slow start
    #[default]
    In,
    /// Slow end
    Out,
    /// Slow start and end, joined at the midpoint
    InOut,
}

/// Stochastic easing families backed by a [`NoiseGenerator`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NoiseKind {
    /// Independent uniform samples
    Random,
    /// 1D Perlin noise sampled at `ratio * 2`
    Perlin,
}

// Elastic amplitude and period
const ELASTIC_A: f64 = 1.0;
const ELASTIC_P: f64 = 0.3;
const ELASTIC_S: f64 = ELASTIC_P / 4.0;

// Back overshoot
const BACK_S: f64 = 1.70158;
const BACK_S_IN_OUT: f64 = BACK_S * 1.525;

impl EasingFamily {
    /// All deterministic families
    pub const ALL: [EasingFamily; 12] = [
        EasingFamily::Linear,
        EasingFamily::Quadratic,
        EasingFamily::Cubic,
        EasingFamily::Quartic,
        EasingFamily::Quintic,
        EasingFamily::Exponential,
        EasingFamily::Sine,
        EasingFamily::Circular,
        EasingFamily::Smooth,
        EasingFamily::Bounce,
        EasingFamily::Elastic,
        EasingFamily::Back,
    ];

    /// Evaluate the curve for the given mode.
    ///
    /// The boundaries are exact for every family regardless of rounding in
    /// the closed forms.
    pub fn apply(self, mode: EaseMode, ratio: f64) -> f64 {
        if ratio == 0.0 || ratio == 1.0 {
            return ratio;
        }

        match mode {
            EaseMode::In => self.ease_in(ratio),
            EaseMode::Out => self.ease_out(ratio),
            EaseMode::InOut => self.ease_in_out(ratio),
        }
    }

    pub fn ease_in(self, ratio: f64) -> f64 {
        let r = ratio;
        match self {
            EasingFamily::Linear => r,
            EasingFamily::Quadratic => r * r,
            EasingFamily::Cubic => r * r * r,
            EasingFamily::Quartic => r * r * r * r,
            EasingFamily::Quintic => r * r * r * r * r,
            EasingFamily::Exponential => {
                if r == 0.0 {
                    0.0
                } else {
                    2f64.powf(10.0 * (r - 1.0))
                }
            }
            EasingFamily::Sine => {
                if r == 1.0 {
                    1.0
                } else {
                    1.0 - (r * (PI / 2.0)).cos()
                }
            }
            EasingFamily::Circular => -((1.0 - r * r).sqrt() - 1.0),
            EasingFamily::Smooth => smil(r, 0.2, 0.0),
            EasingFamily::Bounce => 1.0 - bounce_out(1.0 - r),
            EasingFamily::Elastic => {
                if r == 0.0 || r == 1.0 {
                    return r;
                }
                let r = r - 1.0;
                let amplitude = ELASTIC_A * 2f64.powf(10.0 * r);
                -(amplitude * ((r - ELASTIC_S) * (2.0 * PI) / ELASTIC_P).sin())
            }
            EasingFamily::Back => {
                if r == 1.0 {
                    1.0
                } else {
                    r * r * ((BACK_S + 1.0) * r - BACK_S)
                }
            }
        }
    }

    pub fn ease_out(self, ratio: f64) -> f64 {
        let r = ratio;
        match self {
            EasingFamily::Linear => r,
            EasingFamily::Quadratic => -r * (r - 2.0),
            EasingFamily::Cubic => {
                let r = r - 1.0;
                r * r * r + 1.0
            }
            EasingFamily::Quartic => {
                let r = r - 1.0;
                1.0 - r * r * r * r
            }
            EasingFamily::Quintic => {
                let r = r - 1.0;
                1.0 + r * r * r * r * r
            }
            EasingFamily::Exponential => {
                if r == 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * r)
                }
            }
            EasingFamily::Sine => (r * (PI / 2.0)).sin(),
            EasingFamily::Circular => (1.0 - (r - 1.0) * (r - 1.0)).sqrt(),
            EasingFamily::Smooth => smil(r, 0.0, 0.2),
            EasingFamily::Bounce => bounce_out(r),
            EasingFamily::Elastic => {
                if r == 0.0 || r == 1.0 {
                    return r;
                }
                ELASTIC_A * 2f64.powf(-10.0 * r) * ((r - ELASTIC_S) * (2.0 * PI) / ELASTIC_P).sin()
                    + 1.0
            }
            EasingFamily::Back => {
                if r == 0.0 {
                    return 0.0;
                }
                let r = r - 1.0;
                r * r * ((BACK_S + 1.0) * r + BACK_S) + 1.0
            }
        }
    }

    pub fn ease_in_out(self, ratio: f64) -> f64 {
        let r = ratio;
        match self {
            EasingFamily::Linear => r,
            EasingFamily::Quadratic => {
                if r < 0.5 {
                    2.0 * r * r
                } else {
                    -2.0 * r * (r - 2.0) - 1.0
                }
            }
            EasingFamily::Cubic => {
                if r < 0.5 {
                    4.0 * r * r * r
                } else {
                    let r = r - 1.0;
                    4.0 * r * r * r + 1.0
                }
            }
            EasingFamily::Quartic => {
                if r < 0.5 {
                    8.0 * r * r * r * r
                } else {
                    let r = r - 1.0;
                    -8.0 * r * r * r * r + 1.0
                }
            }
            EasingFamily::Quintic => {
                if r < 0.5 {
                    16.0 * r * r * r * r * r
                } else {
                    let r = r - 1.0;
                    16.0 * r * r * r * r * r + 1.0
                }
            }
            EasingFamily::Exponential => {
                if r == 0.0 || r == 1.0 {
                    return r;
                }
                let r = r * 2.0 - 1.0;
                if r < 0.0 {
                    0.5 * 2f64.powf(10.0 * r)
                } else {
                    1.0 - 0.5 * 2f64.powf(-10.0 * r)
                }
            }
            EasingFamily::Sine => -0.5 * ((r * PI).cos() - 1.0),
            EasingFamily::Circular => {
                let r = r * 2.0;
                if r < 1.0 {
                    -0.5 * ((1.0 - r * r).sqrt() - 1.0)
                } else {
                    let r = r - 2.0;
                    0.5 * ((1.0 - r * r).sqrt() + 1.0)
                }
            }
            EasingFamily::Smooth => smil(r, 0.2, 0.2),
            EasingFamily::Bounce => {
                let r = r * 2.0;
                if r < 1.0 {
                    0.5 * (1.0 - bounce_out(1.0 - r))
                } else {
                    0.5 * bounce_out(r - 1.0) + 0.5
                }
            }
            EasingFamily::Elastic => {
                if r == 0.0 || r == 1.0 {
                    return r;
                }
                let r = r * 2.0 - 1.0;
                let p = ELASTIC_P * 1.5;
                let s = ELASTIC_S * 1.5;
                if r < 0.0 {
                    -0.5 * (ELASTIC_A * 2f64.powf(10.0 * r) * ((r - s) * (2.0 * PI) / p).sin())
                } else {
                    0.5 * ELASTIC_A * 2f64.powf(-10.0 * r) * ((r - s) * (2.0 * PI) / p).sin() + 1.0
                }
            }
            EasingFamily::Back => {
                let r = r * 2.0;
                if r < 1.0 {
                    0.5 * (r * r * ((BACK_S_IN_OUT + 1.0) * r - BACK_S_IN_OUT))
                } else {
                    let r = r - 2.0;
                    0.5 * (r * r * ((BACK_S_IN_OUT + 1.0) * r + BACK_S_IN_OUT) + 2.0)
                }
            }
        }
    }
}

/// Four-bounce decay with break points at 1/2.75, 2/2.75 and 2.5/2.75
fn bounce_out(r: f64) -> f64 {
    if r < 1.0 / 2.75 {
        7.5625 * r * r
    } else if r < 2.0 / 2.75 {
        let r = r - 1.5 / 2.75;
        7.5625 * r * r + 0.75
    } else if r < 2.5 / 2.75 {
        let r = r - 2.25 / 2.75;
        7.5625 * r * r + 0.9375
    } else {
        let r = r - 2.625 / 2.75;
        7.5625 * r * r + 0.984375
    }
}

/// SMIL-style acceleration/deceleration timing.
///
/// `accel` and `decel` are the fractions of the duration spent speeding up
/// and slowing down; the middle runs at constant speed.
fn smil(t: f64, accel: f64, decel: f64) -> f64 {
    let rate = 1.0 / (1.0 - accel / 2.0 - decel / 2.0);
    let value = if t < accel {
        rate * t * t / (2.0 * accel)
    } else if t <= 1.0 - decel {
        rate * (t - accel / 2.0)
    } else {
        1.0 - rate * (1.0 - t) * (1.0 - t) / (2.0 * decel)
    };
    value.clamp(0.0, 1.0)
}

/// Caller-defined easing function
pub type CustomCurve = Rc<dyn Fn(f64) -> f64>;

/// An easing curve handed to animations
#[derive(Clone, Default)]
pub enum Easing {
    /// Identity curve
    #[default]
    Linear,
    /// A deterministic family in one of its three shapes
    Ease(EasingFamily, EaseMode),
    /// Random or Perlin samples drawn from an explicit generator.
    ///
    /// All three modes behave identically for noise curves; the mode is kept
    /// so a curve is still identified by (family, variant).
    Noise(NoiseKind, EaseMode, NoiseGenerator),
    /// CSS-style cubic bezier timing function (x1, y1, x2, y2)
    CubicBezier(f64, f64, f64, f64),
    /// Caller-defined curve
    Custom(CustomCurve),
}

impl Easing {
    pub fn ease_in(family: EasingFamily) -> Self {
        Easing::Ease(family, EaseMode::In)
    }

    pub fn ease_out(family: EasingFamily) -> Self {
        Easing::Ease(family, EaseMode::Out)
    }

    pub fn ease_in_out(family: EasingFamily) -> Self {
        Easing::Ease(family, EaseMode::InOut)
    }

    /// Uniform random curve drawing from `generator`
    pub fn random(generator: NoiseGenerator) -> Self {
        Easing::Noise(NoiseKind::Random, EaseMode::In, generator)
    }

    /// Perlin noise curve drawing from `generator`
    pub fn perlin(generator: NoiseGenerator) -> Self {
        Easing::Noise(NoiseKind::Perlin, EaseMode::In, generator)
    }

    /// Wrap a closure as a curve
    pub fn custom<F: Fn(f64) -> f64 + 'static>(curve: F) -> Self {
        Easing::Custom(Rc::new(curve))
    }

    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::Ease(family, mode) => family.apply(*mode, t),
            Easing::Noise(kind, _, generator) => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                match kind {
                    NoiseKind::Random => generator.uniform(),
                    NoiseKind::Perlin => generator.perlin_nonzero(t * 2.0),
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier_ease(t, *x1, *y1, *x2, *y2),
            Easing::Custom(curve) => curve(t),
        }
    }
}

impl fmt::Debug for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Linear => f.write_str("Linear"),
            Easing::Ease(family, mode) => f.debug_tuple("Ease").field(family).field(mode).finish(),
            Easing::Noise(kind, mode, _) => f.debug_tuple("Noise").field(kind).field(mode).finish(),
            Easing::CubicBezier(x1, y1, x2, y2) => f
                .debug_tuple("CubicBezier")
                .field(x1)
                .field(y1)
                .field(x2)
                .field(y2)
                .finish(),
            Easing::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<EasingFamily> for Easing {
    /// A bare family eases in
    fn from(family: EasingFamily) -> Self {
        Easing::ease_in(family)
    }
}

/// Cubic bezier easing calculation (matches CSS `cubic-bezier()` / browser implementations).
///
/// Uses Newton-Raphson with binary-search fallback for robustness.
fn cubic_bezier_ease(t: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    // Endpoints are always exact
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    // Solve for parameter `p` where bezier_x(p) == t using Newton-Raphson,
    // falling back to binary search if the slope is too flat.
    let mut p = t;
    for _ in 0..8 {
        let err = bezier_sample(p, x1, x2) - t;
        if err.abs() < 1e-7 {
            return bezier_sample(p, y1, y2);
        }
        let slope = bezier_slope(p, x1, x2);
        if slope.abs() < 1e-7 {
            break;
        }
        p -= err / slope;
    }

    // Binary search fallback (always converges)
    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    p = t;
    for _ in 0..20 {
        let val = bezier_sample(p, x1, x2);
        if (val - t).abs() < 1e-7 {
            break;
        }
        if val < t {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }

    bezier_sample(p, y1, y2)
}

/// Evaluate cubic bezier at parameter t: B(t) = 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³
#[inline]
fn bezier_sample(t: f64, p1: f64, p2: f64) -> f64 {
    // Horner form: ((1-3p2+3p1)t + 3p2-6p1)t + 3p1) * t
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

/// Derivative of cubic bezier: B'(t) = 3(1-t)²·p1 + 6(1-t)t·(p2-p1) + 3t²·(1-p2)
#[inline]
fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const MODES: [EaseMode; 3] = [EaseMode::In, EaseMode::Out, EaseMode::InOut];

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_boundaries_are_exact() {
        for family in EasingFamily::ALL {
            for mode in MODES {
                assert_eq!(family.apply(mode, 0.0), 0.0, "{family:?} {mode:?} at 0");
                assert_eq!(family.apply(mode, 1.0), 1.0, "{family:?} {mode:?} at 1");
            }
        }
    }

    #[test]
    fn test_polynomials() {
        assert!(approx(EasingFamily::Quadratic.ease_in(0.5), 0.25));
        assert!(approx(EasingFamily::Quadratic.ease_out(0.5), 0.75));
        assert!(approx(EasingFamily::Cubic.ease_in(0.5), 0.125));
        assert!(approx(EasingFamily::Cubic.ease_out(0.5), 0.875));
        assert!(approx(EasingFamily::Quartic.ease_in(0.5), 0.0625));
        assert!(approx(EasingFamily::Quintic.ease_out(0.5), 1.0 - 0.03125));
        assert!(approx(EasingFamily::Quintic.ease_in_out(0.25), 16.0 * 0.25f64.powi(5)));
    }

    #[test]
    fn test_in_out_is_continuous_at_midpoint() {
        for family in EasingFamily::ALL {
            let below = family.ease_in_out(0.5 - 1e-9);
            let at = family.ease_in_out(0.5);
            // Circular has a vertical tangent here, so the tolerance stays loose
            assert!((below - at).abs() < 1e-3, "{family:?}: {below} vs {at}");
            assert!(approx(at, 0.5), "{family:?} midpoint {at}");
        }
    }

    #[test]
    fn test_sine_closed_forms() {
        assert!(approx(EasingFamily::Sine.ease_in(0.5), 1.0 - (PI / 4.0).cos()));
        assert!(approx(EasingFamily::Sine.ease_out(0.5), (PI / 4.0).sin()));
    }

    #[test]
    fn test_exponential_guards() {
        assert_eq!(EasingFamily::Exponential.ease_in(0.0), 0.0);
        assert_eq!(EasingFamily::Exponential.ease_out(1.0), 1.0);
        assert!(approx(EasingFamily::Exponential.ease_in(0.5), 2f64.powf(-5.0)));
    }

    #[test]
    fn test_bounce_segments() {
        // First segment is a pure parabola
        assert!(approx(EasingFamily::Bounce.ease_out(0.2), 7.5625 * 0.04));
        // Each segment lands on its floor value at the segment center
        assert!(approx(EasingFamily::Bounce.ease_out(1.5 / 2.75), 0.75));
        assert!(approx(EasingFamily::Bounce.ease_out(2.25 / 2.75), 0.9375));
        assert!(approx(EasingFamily::Bounce.ease_out(2.625 / 2.75), 0.984375));
    }

    #[test]
    fn test_back_overshoots() {
        // Ease-in dips below zero before heading to one
        assert!(EasingFamily::Back.ease_in(0.2) < 0.0);
        // Ease-out passes above one before settling
        assert!(EasingFamily::Back.ease_out(0.8) > 1.0);
        assert!(EasingFamily::Back.ease_in_out(0.1) < 0.0);
        assert!(EasingFamily::Back.ease_in_out(0.9) > 1.0);
    }

    #[test]
    fn test_elastic_oscillates_past_one() {
        let peak = (1..100)
            .map(|i| EasingFamily::Elastic.ease_out(i as f64 / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn test_smooth_is_monotonic() {
        for mode in MODES {
            let mut previous = 0.0;
            for i in 1..=100 {
                let value = EasingFamily::Smooth.apply(mode, i as f64 / 100.0);
                assert!(value >= previous, "{mode:?} at {i}");
                previous = value;
            }
        }
    }

    #[test]
    fn test_noise_boundaries_and_interior() {
        let random = Easing::random(NoiseGenerator::seeded(1));
        let perlin = Easing::perlin(NoiseGenerator::seeded(2));

        for curve in [&random, &perlin] {
            assert_eq!(curve.apply(0.0), 0.0);
            assert_eq!(curve.apply(1.0), 1.0);
            for i in 1..100 {
                let value = curve.apply(i as f64 / 100.0);
                assert!(value > 0.0 && value < 1.0, "{curve:?} at {i}: {value}");
            }
        }
    }

    #[test]
    fn test_noise_curves_are_reproducible() {
        let a = Easing::random(NoiseGenerator::seeded(42));
        let b = Easing::random(NoiseGenerator::seeded(42));
        let first: Vec<f64> = (1..10).map(|i| a.apply(i as f64 / 10.0)).collect();
        let second: Vec<f64> = (1..10).map(|i| b.apply(i as f64 / 10.0)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_cubic_bezier_matches_linear_diagonal() {
        let curve = Easing::CubicBezier(0.25, 0.25, 0.75, 0.75);
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            assert!((curve.apply(t) - t).abs() < 1e-6);
        }
    }

    #[test]
    fn test_custom_curve() {
        let curve = Easing::custom(|t| t.sqrt());
        assert_eq!(curve.apply(0.25), 0.5);
        assert_eq!(format!("{curve:?}"), "Custom(..)");
    }

    proptest! {
        #[test]
        fn prop_deterministic_curves_are_finite(ratio in 0.0f64..=1.0) {
            for family in EasingFamily::ALL {
                for mode in MODES {
                    prop_assert!(family.apply(mode, ratio).is_finite());
                }
            }
        }

        #[test]
        fn prop_out_mirrors_in_for_polynomials(ratio in 0.0f64..=1.0) {
            let polynomials = [
                EasingFamily::Quadratic,
                EasingFamily::Cubic,
                EasingFamily::Quartic,
                EasingFamily::Quintic,
            ];
            for family in polynomials {
                let mirrored = 1.0 - family.ease_in(1.0 - ratio);
                prop_assert!((family.ease_out(ratio) - mirrored).abs() < 1e-9);
            }
        }

        #[test]
        fn prop_bounce_in_mirrors_out(ratio in 0.0f64..=1.0) {
            let mirrored = 1.0 - EasingFamily::Bounce.ease_out(1.0 - ratio);
            prop_assert!((EasingFamily::Bounce.ease_in(ratio) - mirrored).abs() < 1e-12);
        }
    }
}
