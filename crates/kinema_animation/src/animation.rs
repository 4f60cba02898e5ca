//! Time-driven animation controller
//!
//! An [`Animation`] is advanced by the host with [`Animation::on_update`],
//! one call per frame. It never reads a clock: elapsed time is whatever the
//! host passes in.
//!
//! ```text
//! Idle ──start──▶ DelayPending ──delay elapsed──▶ Active ──last cycle──▶ Idle
//!                  (delay > 0)                      │  ▲
//!                                                   └──┘ cycle boundary
//! ```
//!
//! Pausing overlays `DelayPending` and `Active`; a paused animation ignores
//! updates entirely.

use crate::config::{AnimationConfig, Callback, REPEAT_INFINITE};
use crate::easing::Easing;
use crate::values::ValueBlender;
use std::fmt;

/// Shortest duration an animation runs for; zero durations are raised to it
pub const MIN_DURATION: f64 = 1e-6;

/// Coarse lifecycle state of an animation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationState {
    /// Not started, finished, or stopped
    Idle,
    /// Started, waiting for the delay to elapse
    DelayPending,
    /// Progress is advancing
    Active,
}

/// Object-safe playback surface shared by animations and timelines
pub trait Playback {
    /// Advance by `tpf` seconds
    fn on_update(&mut self, tpf: f64);

    fn start(&mut self);

    fn start_reverse(&mut self);

    fn stop(&mut self);

    fn pause(&mut self);

    fn resume(&mut self);

    /// Jump to `time` seconds into the active window and emit the value there
    fn seek(&mut self, time: f64);

    /// Length of the active window in seconds
    fn end_time(&self) -> f64;

    fn is_animating(&self) -> bool;

    fn is_reverse(&self) -> bool;

    fn is_paused(&self) -> bool;
}

/// An animation bound to a value blender and an output sink
pub struct Animation<T> {
    blender: Box<dyn ValueBlender<T>>,
    on_progress: Box<dyn FnMut(T)>,
    easing: Easing,

    duration: f64,
    delay: f64,
    cycle_count: u32,
    auto_reverse: bool,
    on_finished: Option<Callback>,
    on_cycle_finished: Option<Callback>,

    /// Elapsed seconds within the active window, `0..=duration`
    time: f64,
    completed_cycles: u32,
    reverse: bool,
    paused: bool,
    animating: bool,
    delay_pending: bool,
    delay_elapsed: f64,
}

impl<T> Animation<T> {
    pub(crate) fn new(
        config: &AnimationConfig,
        blender: Box<dyn ValueBlender<T>>,
        on_progress: Box<dyn FnMut(T)>,
    ) -> Self {
        let mut duration = config.duration.as_secs_f64();
        if duration <= 0.0 {
            tracing::warn!(
                min_duration = MIN_DURATION,
                "animation duration is zero, completing in a single frame"
            );
            duration = MIN_DURATION;
        }
        let delay = config.delay.as_secs_f64();

        Self {
            blender,
            on_progress,
            easing: config.easing.clone(),
            duration,
            delay,
            cycle_count: config.cycle_count,
            auto_reverse: config.auto_reverse,
            on_finished: config.on_finished.clone(),
            on_cycle_finished: config.on_cycle_finished.clone(),
            time: 0.0,
            completed_cycles: 0,
            reverse: false,
            paused: false,
            animating: false,
            delay_pending: delay > 0.0,
            delay_elapsed: 0.0,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Playback control
    // ─────────────────────────────────────────────────────────────────────────

    /// Start playing forward and emit the start value.
    ///
    /// Does nothing if the animation is already playing.
    pub fn start(&mut self) {
        if self.animating {
            return;
        }

        self.animating = true;
        self.time = 0.0;
        tracing::debug!(
            duration = self.duration,
            delay = self.delay,
            cycles = self.cycle_count,
            "animation started"
        );
        self.emit(0.0);
    }

    /// Start playing backward from the end value
    pub fn start_reverse(&mut self) {
        if self.animating {
            return;
        }

        self.animating = true;
        self.reverse = true;
        self.time = self.duration;
        tracing::debug!(
            duration = self.duration,
            delay = self.delay,
            cycles = self.cycle_count,
            "animation started in reverse"
        );
        self.emit(1.0);
    }

    /// Return to the initial idle state without calling `on_finished`
    pub fn stop(&mut self) {
        if !self.animating {
            return;
        }

        tracing::debug!(completed_cycles = self.completed_cycles, "animation stopped");
        self.reset();
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Advance the animation by `tpf` seconds.
    ///
    /// # Panics
    ///
    /// Panics if `tpf` is negative or NaN.
    pub fn on_update(&mut self, tpf: f64) {
        assert!(
            tpf >= 0.0,
            "time per frame must be a non-negative number of seconds, got {tpf}"
        );

        if self.paused || !self.animating {
            return;
        }

        if self.delay_pending {
            self.delay_elapsed += tpf;
            if self.delay_elapsed < self.delay {
                return;
            }

            // Overshoot past the delay is dropped; the window opens at its start
            self.delay_pending = false;
            self.time = self.start_time();
            self.emit(self.start_progress());
            return;
        }

        // Exact comparison: time is only ever reset to these constants
        if self.time == self.start_time() {
            self.emit(self.start_progress());
        }

        if self.reverse {
            self.time -= tpf;
        } else {
            self.time += tpf;
        }

        let crossed = if self.reverse {
            self.time <= 0.0
        } else {
            self.time >= self.duration
        };

        if crossed {
            self.emit(1.0 - self.start_progress());
            self.finish_cycle();
            return;
        }

        self.emit(self.time / self.duration);
    }

    /// Jump to `time` seconds into the active window (clamped) and emit.
    ///
    /// Seeking a playing animation ends any pending delay.
    pub fn seek(&mut self, time: f64) {
        let time = time.clamp(0.0, self.duration);
        if self.animating {
            self.delay_pending = false;
        }
        self.time = time;
        self.emit(time / self.duration);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn state(&self) -> AnimationState {
        if !self.animating {
            AnimationState::Idle
        } else if self.delay_pending {
            AnimationState::DelayPending
        } else {
            AnimationState::Active
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn is_reverse(&self) -> bool {
        self.reverse
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_auto_reverse(&self) -> bool {
        self.auto_reverse
    }

    /// Raw progress through the active window, `0.0..=1.0`
    pub fn progress(&self) -> f64 {
        self.time / self.duration
    }

    /// Elapsed seconds within the active window
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Cycle length in seconds
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn delay(&self) -> f64 {
        self.delay
    }

    pub fn cycle_count(&self) -> u32 {
        self.cycle_count
    }

    /// Cycles completed in the current run
    pub fn completed_cycles(&self) -> u32 {
        self.completed_cycles
    }

    pub fn interpolator(&self) -> &Easing {
        &self.easing
    }

    /// Replace the easing curve; takes effect on the next emitted value
    pub fn set_interpolator(&mut self, easing: impl Into<Easing>) {
        self.easing = easing.into();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    fn start_time(&self) -> f64 {
        if self.reverse {
            self.duration
        } else {
            0.0
        }
    }

    fn start_progress(&self) -> f64 {
        if self.reverse {
            1.0
        } else {
            0.0
        }
    }

    fn emit(&mut self, progress: f64) {
        let value = self.blender.value(progress, &self.easing);
        (self.on_progress)(value);
    }

    fn finish_cycle(&mut self) {
        self.completed_cycles = self.completed_cycles.saturating_add(1);

        if self.cycle_count != REPEAT_INFINITE && self.completed_cycles >= self.cycle_count {
            tracing::debug!(cycles = self.completed_cycles, "animation finished");
            if let Some(on_finished) = &self.on_finished {
                on_finished();
            }
            self.reset();
            return;
        }

        tracing::trace!(
            completed_cycles = self.completed_cycles,
            reverse = self.reverse,
            "animation cycle finished"
        );
        if let Some(on_cycle_finished) = &self.on_cycle_finished {
            on_cycle_finished();
        }
        if self.auto_reverse {
            self.reverse = !self.reverse;
        }
        self.time = self.start_time();
    }

    fn reset(&mut self) {
        self.time = 0.0;
        self.completed_cycles = 0;
        self.reverse = false;
        self.animating = false;
        self.delay_pending = self.delay > 0.0;
        self.delay_elapsed = 0.0;
    }
}

impl<T> Playback for Animation<T> {
    fn on_update(&mut self, tpf: f64) {
        Animation::on_update(self, tpf);
    }

    fn start(&mut self) {
        Animation::start(self);
    }

    fn start_reverse(&mut self) {
        Animation::start_reverse(self);
    }

    fn stop(&mut self) {
        Animation::stop(self);
    }

    fn pause(&mut self) {
        Animation::pause(self);
    }

    fn resume(&mut self) {
        Animation::resume(self);
    }

    fn seek(&mut self, time: f64) {
        Animation::seek(self, time);
    }

    fn end_time(&self) -> f64 {
        self.duration
    }

    fn is_animating(&self) -> bool {
        self.animating
    }

    fn is_reverse(&self) -> bool {
        self.reverse
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}

impl<T> fmt::Debug for Animation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("easing", &self.easing)
            .field("duration", &self.duration)
            .field("delay", &self.delay)
            .field("cycle_count", &self.cycle_count)
            .field("auto_reverse", &self.auto_reverse)
            .field("time", &self.time)
            .field("completed_cycles", &self.completed_cycles)
            .field("reverse", &self.reverse)
            .field("paused", &self.paused)
            .field("animating", &self.animating)
            .field("delay_pending", &self.delay_pending)
            .finish_non_exhaustive()
    }
}
