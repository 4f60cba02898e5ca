//! Timeline orchestration for multiple animations
//!
//! A [`Timeline`] plays its entries back to back. A master animation runs
//! from `0` to the summed length of all entries and obeys the timeline's own
//! configuration (delay, repeat, auto-reverse, callbacks). Whenever the master
//! emits a time, every entry whose range contains that time is sought to the
//! matching local time.

use crate::animation::{Animation, Playback};
use crate::config::AnimationConfig;
use crate::error::{AnimationError, Result};
use crate::values::AnimatedValue;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

new_key_type! {
    pub struct TimelineEntryId;
}

/// An entry in a timeline
struct TimelineEntry {
    /// Offset in seconds from timeline start
    offset: f64,
    animation: Box<dyn Playback>,
}

/// Master times emitted during one call into the master animation
type EmittedTimes = Rc<RefCell<SmallVec<[f64; 2]>>>;

/// A timeline that orchestrates multiple animations.
///
/// Entries are only sought to times the master actually emits. An entry whose
/// whole range falls between two emitted times keeps the last value it was
/// sought to and is not snapped to its end.
pub struct Timeline {
    config: AnimationConfig,
    entries: SlotMap<TimelineEntryId, TimelineEntry>,
    total_duration: f64,
    master: Option<Animation<f64>>,
    emitted: EmittedTimes,
    /// Set when a new master cycle begins; entries are restarted on the next emission
    fresh: bool,
    paused: bool,
}

impl Timeline {
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            entries: SlotMap::with_key(),
            total_duration: 0.0,
            master: None,
            emitted: Rc::new(RefCell::new(SmallVec::new())),
            fresh: true,
            paused: false,
        }
    }

    /// Append an animation after the current last entry.
    ///
    /// Entries added while the timeline plays take effect on its next start.
    pub fn add(&mut self, animation: impl Playback + 'static) -> TimelineEntryId {
        let offset = self.total_duration;
        self.total_duration += animation.end_time();

        self.entries.insert(TimelineEntry {
            offset,
            animation: Box::new(animation),
        })
    }

    pub fn get(&self, id: TimelineEntryId) -> Option<&dyn Playback> {
        self.entries.get(id).map(|entry| entry.animation.as_ref())
    }

    pub fn get_mut(&mut self, id: TimelineEntryId) -> Option<&mut (dyn Playback + 'static)> {
        self.entries.get_mut(id).map(|entry| entry.animation.as_mut())
    }

    /// Offset of an entry from the timeline start, in seconds
    pub fn offset(&self, id: TimelineEntryId) -> Option<f64> {
        self.entries.get(id).map(|entry| entry.offset)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Summed length of all entries in seconds
    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    /// Build the master animation if it is missing.
    ///
    /// Called by `start`; fails for an empty timeline.
    pub fn prepare(&mut self) -> Result<()> {
        if self.master.is_some() {
            return Ok(());
        }
        if self.entries.is_empty() {
            return Err(AnimationError::InvalidConfiguration(
                "timeline has no entries".to_string(),
            ));
        }

        let emitted = self.emitted.clone();
        let mut master = self
            .config
            .clone()
            .duration(std::time::Duration::from_secs_f64(self.total_duration))
            .build(AnimatedValue::new(0.0, self.total_duration), move |time: f64| {
                emitted.borrow_mut().push(time)
            })?;
        if self.paused {
            master.pause();
        }

        tracing::debug!(
            entries = self.entries.len(),
            total_duration = self.total_duration,
            "timeline prepared"
        );
        self.master = Some(master);
        Ok(())
    }

    fn start_with(&mut self, reverse: bool) {
        if self.is_animating() {
            return;
        }

        // Rebuild so entries added since the last run are covered
        self.master = None;
        if let Err(err) = self.prepare() {
            tracing::warn!(%err, "timeline not started");
            return;
        }
        let Some(master) = self.master.as_mut() else {
            return;
        };

        self.fresh = true;
        if reverse {
            master.start_reverse();
        } else {
            master.start();
        }
        self.dispatch();
    }

    /// Seek entries for every time the master emitted since the last dispatch
    fn dispatch(&mut self) {
        let Some(master) = self.master.as_ref() else {
            return;
        };
        let reverse = master.is_reverse();
        let times = std::mem::take(&mut *self.emitted.borrow_mut());

        for time in times {
            if self.fresh {
                tracing::debug!(reverse, "timeline cycle started, restarting entries");
                for entry in self.entries.values_mut() {
                    entry.animation.stop();
                    if reverse {
                        entry.animation.start_reverse();
                    } else {
                        entry.animation.start();
                    }
                }
                self.fresh = false;
            }

            for entry in self.entries.values_mut() {
                let end = entry.offset + entry.animation.end_time();
                if time >= entry.offset && time <= end {
                    entry.animation.seek(time - entry.offset);
                }
            }
        }
    }

    fn stop_entries(&mut self) {
        for entry in self.entries.values_mut() {
            entry.animation.stop();
        }
    }
}

impl Playback for Timeline {
    fn on_update(&mut self, tpf: f64) {
        let Some(master) = self.master.as_mut() else {
            return;
        };
        if !master.is_animating() {
            return;
        }

        let cycles_before = master.completed_cycles();
        master.on_update(tpf);
        let finished = !master.is_animating();
        let new_cycle = !finished && master.completed_cycles() != cycles_before;

        self.dispatch();

        if finished {
            tracing::debug!("timeline finished");
            self.stop_entries();
        } else if new_cycle {
            self.fresh = true;
        }
    }

    fn start(&mut self) {
        self.start_with(false);
    }

    fn start_reverse(&mut self) {
        self.start_with(true);
    }

    fn stop(&mut self) {
        let Some(master) = self.master.as_mut() else {
            return;
        };
        if !master.is_animating() {
            return;
        }

        master.stop();
        self.emitted.borrow_mut().clear();
        self.stop_entries();
    }

    fn pause(&mut self) {
        self.paused = true;
        if let Some(master) = self.master.as_mut() {
            master.pause();
        }
    }

    fn resume(&mut self) {
        self.paused = false;
        if let Some(master) = self.master.as_mut() {
            master.resume();
        }
    }

    fn seek(&mut self, time: f64) {
        if let Some(master) = self.master.as_mut() {
            master.seek(time);
            self.dispatch();
        }
    }

    fn end_time(&self) -> f64 {
        self.total_duration
    }

    fn is_animating(&self) -> bool {
        self.master.as_ref().is_some_and(|m| m.is_animating())
    }

    fn is_reverse(&self) -> bool {
        self.master.as_ref().is_some_and(|m| m.is_reverse())
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}

impl fmt::Debug for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timeline")
            .field("config", &self.config)
            .field("entries", &self.entries.len())
            .field("total_duration", &self.total_duration)
            .field("master", &self.master)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::time::Duration;

    fn tracked(seconds: f64) -> (Rc<RefCell<Vec<f64>>>, Animation<f64>) {
        let values = Rc::new(RefCell::new(Vec::new()));
        let sink = values.clone();
        let anim = AnimationConfig::new()
            .duration(Duration::from_secs_f64(seconds))
            .animate(0.0, 1.0, move |v| sink.borrow_mut().push(v))
            .unwrap();
        (values, anim)
    }

    #[test]
    fn test_offsets_accumulate() {
        let mut timeline = Timeline::new(AnimationConfig::new());
        let (_, a) = tracked(1.0);
        let (_, b) = tracked(2.0);
        let first = timeline.add(a);
        let second = timeline.add(b);

        assert_eq!(timeline.offset(first), Some(0.0));
        assert_eq!(timeline.offset(second), Some(1.0));
        assert_eq!(timeline.total_duration(), 3.0);
        assert_eq!(timeline.len(), 2);
    }

    #[test]
    fn test_empty_timeline_does_not_start() {
        let mut timeline = Timeline::new(AnimationConfig::new());
        assert!(matches!(
            timeline.prepare(),
            Err(AnimationError::InvalidConfiguration(_))
        ));

        timeline.start();
        assert!(!timeline.is_animating());
        timeline.on_update(1.0);
    }

    #[test]
    fn test_start_primes_entries() {
        let mut timeline = Timeline::new(AnimationConfig::new());
        let (a_values, a) = tracked(1.0);
        let (b_values, b) = tracked(1.0);
        let a_id = timeline.add(a);
        let b_id = timeline.add(b);

        timeline.start();
        assert!(timeline.is_animating());
        assert!(timeline.get(a_id).is_some_and(|a| a.is_animating()));
        assert!(timeline.get(b_id).is_some_and(|b| b.is_animating()));

        // Both emit their start value; only the first is sought to 0
        assert_eq!(*a_values.borrow(), vec![0.0, 0.0]);
        assert_eq!(*b_values.borrow(), vec![0.0]);
    }

    #[test]
    fn test_stop_stops_entries() {
        let mut timeline = Timeline::new(AnimationConfig::new());
        let (_, a) = tracked(1.0);
        let id = timeline.add(a);

        timeline.start();
        timeline.on_update(0.5);
        timeline.stop();

        assert!(!timeline.is_animating());
        assert!(timeline.get(id).is_some_and(|a| !a.is_animating()));
    }
}
