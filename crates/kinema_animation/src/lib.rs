//! Kinema Animation System
//!
//! Frame-driven tweening: easing curves, value blenders, and an animation
//! controller that the host advances with one `on_update(tpf)` call per frame.
//!
//! # Features
//!
//! - **Easing Curves**: twelve deterministic families in ease-in, ease-out and
//!   ease-in-out shapes, plus seeded random/Perlin noise curves
//! - **Value Blenders**: scalars, points, colors, Bezier paths, text and
//!   runtime-typed values
//! - **Animation Controller**: delay, repeat, auto-reverse and pause with exact
//!   cycle-boundary emissions
//! - **Timelines**: play animations back to back under one master clock
//!
//! ```
//! use kinema_animation::{AnimationConfig, Easing, EasingFamily};
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use std::time::Duration;
//!
//! let x = Rc::new(Cell::new(0.0));
//! let sink = x.clone();
//!
//! let mut anim = AnimationConfig::new()
//!     .duration(Duration::from_secs(4))
//!     .interpolator(Easing::Linear)
//!     .animate(1.0, 5.0, move |v| sink.set(v))
//!     .unwrap();
//!
//! anim.start();
//! assert_eq!(x.get(), 1.0);
//! anim.on_update(1.0);
//! assert_eq!(x.get(), 2.0);
//! ```

pub mod animation;
pub mod config;
pub mod easing;
pub mod error;
pub mod noise;
pub mod scheduler;
pub mod timeline;
pub mod values;

pub use animation::{Animation, AnimationState, Playback, MIN_DURATION};
pub use config::{AnimationConfig, Callback, REPEAT_INFINITE};
pub use easing::{EaseMode, Easing, EasingFamily, NoiseKind};
pub use error::{AnimationError, Result};
pub use noise::NoiseGenerator;
pub use scheduler::{AnimationId, AnimationScheduler};
pub use timeline::{Timeline, TimelineEntryId};
pub use values::{
    AnimatedValue, CubicBezierPath, CustomBlend, DynamicBlend, DynamicValue, Interpolate,
    QuadBezierPath, TypewriterMode, TypewriterText, ValueBlender,
};

pub use kinema_core::{Color, CubicCurve, Point2D, Point3D, QuadCurve};
