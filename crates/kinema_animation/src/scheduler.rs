//! Animation scheduler
//!
//! Owns a set of animations and timelines, advances them all with the same
//! frame time and drops each one on the tick it finishes.

use crate::animation::Playback;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    pub struct AnimationId;
}

/// Ids of the animations that finished during one tick
pub type FinishedAnimations = SmallVec<[AnimationId; 4]>;

/// The animation scheduler that ticks all active animations
#[derive(Default)]
pub struct AnimationScheduler {
    animations: SlotMap<AnimationId, Box<dyn Playback>>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            animations: SlotMap::with_key(),
        }
    }

    /// Add an animation as-is; it is ticked once started
    pub fn add(&mut self, animation: impl Playback + 'static) -> AnimationId {
        self.animations.insert(Box::new(animation))
    }

    /// Start an animation and add it
    pub fn play(&mut self, mut animation: impl Playback + 'static) -> AnimationId {
        animation.start();
        self.add(animation)
    }

    pub fn get(&self, id: AnimationId) -> Option<&dyn Playback> {
        self.animations.get(id).map(|a| a.as_ref())
    }

    pub fn get_mut(&mut self, id: AnimationId) -> Option<&mut (dyn Playback + 'static)> {
        self.animations.get_mut(id).map(|a| a.as_mut())
    }

    pub fn remove(&mut self, id: AnimationId) -> Option<Box<dyn Playback>> {
        self.animations.remove(id)
    }

    /// Tick all animations by `tpf` seconds.
    ///
    /// Animations that were playing before the tick and are not after it have
    /// finished; they are removed and their ids returned.
    pub fn tick(&mut self, tpf: f64) -> FinishedAnimations {
        let mut finished = FinishedAnimations::new();

        for (id, animation) in self.animations.iter_mut() {
            if !animation.is_animating() {
                continue;
            }
            animation.on_update(tpf);
            if !animation.is_animating() {
                finished.push(id);
            }
        }

        for &id in &finished {
            self.animations.remove(id);
        }
        if !finished.is_empty() {
            tracing::debug!(count = finished.len(), "animations finished");
        }

        finished
    }

    /// Check if any animations are still active
    pub fn has_active_animations(&self) -> bool {
        self.animations.values().any(|a| a.is_animating())
    }

    /// Iterate over all animations
    pub fn iter(&self) -> impl Iterator<Item = (AnimationId, &dyn Playback)> {
        self.animations.iter().map(|(id, a)| (id, &**a))
    }

    /// Get the number of animations in the scheduler
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}
