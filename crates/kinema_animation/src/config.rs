//! Animation configuration
//!
//! [`AnimationConfig`] is a reusable recipe: every [`AnimationConfig::build`]
//! call yields an independent [`Animation`] with its own timing state.

use crate::animation::Animation;
use crate::easing::Easing;
use crate::error::{AnimationError, Result};
use crate::values::{AnimatedValue, Interpolate, ValueBlender};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Cycle count that never runs out
pub const REPEAT_INFINITE: u32 = u32::MAX;

/// Notification callback shared between a configuration and its animations
pub type Callback = Rc<dyn Fn()>;

/// Builder-style configuration for animations
///
/// ```
/// use kinema_animation::{AnimationConfig, Easing, EasingFamily};
/// use std::time::Duration;
///
/// let config = AnimationConfig::new()
///     .duration(Duration::from_millis(300))
///     .interpolator(Easing::ease_out(EasingFamily::Cubic))
///     .auto_reverse(true)
///     .repeat(2);
///
/// let mut anim = config.animate(0.0, 1.0, |_opacity: f64| {}).unwrap();
/// anim.start();
/// assert!(anim.is_animating());
/// ```
#[derive(Clone)]
pub struct AnimationConfig {
    pub(crate) duration: Duration,
    pub(crate) delay: Duration,
    pub(crate) easing: Easing,
    pub(crate) cycle_count: u32,
    pub(crate) auto_reverse: bool,
    pub(crate) on_finished: Option<Callback>,
    pub(crate) on_cycle_finished: Option<Callback>,
}

impl AnimationConfig {
    pub fn new() -> Self {
        Self {
            duration: Duration::from_secs(1),
            delay: Duration::ZERO,
            easing: Easing::Linear,
            cycle_count: 1,
            auto_reverse: false,
            on_finished: None,
            on_cycle_finished: None,
        }
    }

    /// Length of one cycle
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Wait before the first cycle starts
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn interpolator(mut self, easing: impl Into<Easing>) -> Self {
        self.easing = easing.into();
        self
    }

    /// Number of cycles to play; `1` plays once
    pub fn repeat(mut self, times: u32) -> Self {
        self.cycle_count = times;
        self
    }

    pub fn repeat_infinitely(mut self) -> Self {
        self.cycle_count = REPEAT_INFINITE;
        self
    }

    /// Flip direction after every completed cycle
    pub fn auto_reverse(mut self, auto_reverse: bool) -> Self {
        self.auto_reverse = auto_reverse;
        self
    }

    /// Called once when the last cycle completes (never on `stop`)
    pub fn on_finished<F: Fn() + 'static>(mut self, callback: F) -> Self {
        self.on_finished = Some(Rc::new(callback));
        self
    }

    /// Called after every cycle except the last
    pub fn on_cycle_finished<F: Fn() + 'static>(mut self, callback: F) -> Self {
        self.on_cycle_finished = Some(Rc::new(callback));
        self
    }

    pub fn cycle_count(&self) -> u32 {
        self.cycle_count
    }

    pub fn is_auto_reverse(&self) -> bool {
        self.auto_reverse
    }

    /// Bind the configuration to a blender and a sink.
    ///
    /// Fails when the repeat count is zero or the blender cannot interpolate
    /// its values.
    pub fn build<T, B, F>(&self, blender: B, on_progress: F) -> Result<Animation<T>>
    where
        B: ValueBlender<T> + 'static,
        F: FnMut(T) + 'static,
    {
        if self.cycle_count == 0 {
            return Err(AnimationError::InvalidConfiguration(
                "repeat count must be at least 1".to_string(),
            ));
        }
        blender.validate()?;

        Ok(Animation::new(self, Box::new(blender), Box::new(on_progress)))
    }

    /// Shorthand for building an eased [`AnimatedValue`] between two values
    pub fn animate<T, F>(&self, from: T, to: T, on_progress: F) -> Result<Animation<T>>
    where
        T: Interpolate + 'static,
        F: FnMut(T) + 'static,
    {
        self.build(AnimatedValue::new(from, to), on_progress)
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AnimationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationConfig")
            .field("duration", &self.duration)
            .field("delay", &self.delay)
            .field("easing", &self.easing)
            .field("cycle_count", &self.cycle_count)
            .field("auto_reverse", &self.auto_reverse)
            .field("on_finished", &self.on_finished.is_some())
            .field("on_cycle_finished", &self.on_cycle_finished.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::EasingFamily;
    use crate::values::{DynamicBlend, DynamicValue};

    #[test]
    fn test_defaults() {
        let config = AnimationConfig::default();
        assert_eq!(config.duration, Duration::from_secs(1));
        assert_eq!(config.delay, Duration::ZERO);
        assert_eq!(config.cycle_count(), 1);
        assert!(!config.is_auto_reverse());
        assert!(matches!(config.easing, Easing::Linear));
        assert!(config.on_finished.is_none());
    }

    #[test]
    fn test_builder_chain() {
        let config = AnimationConfig::new()
            .duration(Duration::from_secs(4))
            .delay(Duration::from_millis(500))
            .interpolator(EasingFamily::Bounce)
            .repeat_infinitely()
            .auto_reverse(true);

        assert_eq!(config.cycle_count(), REPEAT_INFINITE);
        assert!(config.is_auto_reverse());
        assert!(matches!(
            config.easing,
            Easing::Ease(EasingFamily::Bounce, crate::easing::EaseMode::In)
        ));
    }

    #[test]
    fn test_zero_repeat_is_rejected() {
        let result = AnimationConfig::new().repeat(0).animate(0.0, 1.0, |_: f64| {});
        assert!(matches!(
            result,
            Err(AnimationError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_unsupported_blend_is_rejected() {
        let blender = DynamicBlend::new(DynamicValue::Scalar(0.0), DynamicValue::Text("x".into()));
        let result = AnimationConfig::new().build(blender, |_: DynamicValue| {});
        assert!(matches!(
            result,
            Err(AnimationError::UnsupportedValueType(_))
        ));
    }

    #[test]
    fn test_config_is_reusable() {
        let config = AnimationConfig::new().duration(Duration::from_secs(2));
        let mut first = config.animate(0.0, 1.0, |_: f64| {}).unwrap();
        let second = config.animate(0.0, 1.0, |_: f64| {}).unwrap();

        first.start();
        assert!(first.is_animating());
        assert!(!second.is_animating());
    }

    #[test]
    fn test_debug_hides_callbacks() {
        let config = AnimationConfig::new().on_finished(|| {});
        let debug = format!("{config:?}");
        assert!(debug.contains("on_finished: true"));
        assert!(debug.contains("on_cycle_finished: false"));
    }
}
