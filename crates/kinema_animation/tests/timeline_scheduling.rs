//! Integration tests for timelines and the scheduler
//!
//! A timeline of two one-second animations should drive the first during
//! `[0, 1]` and the second during `[1, 2]`, in both directions.

use kinema_animation::{
    Animation, AnimationConfig, AnimationScheduler, Playback, Timeline, TimelineEntryId,
};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

fn step(config: &AnimationConfig) -> (Rc<Cell<f64>>, Animation<f64>) {
    let value = Rc::new(Cell::new(-1.0));
    let sink = value.clone();
    let anim = config.animate(0.0, 1.0, move |v| sink.set(v)).unwrap();
    (value, anim)
}

struct Fixture {
    timeline: Timeline,
    first: Rc<Cell<f64>>,
    second: Rc<Cell<f64>>,
    ids: [TimelineEntryId; 2],
}

fn two_step_timeline(config: AnimationConfig) -> Fixture {
    let child = AnimationConfig::new().duration(Duration::from_secs(1));
    let (first, a) = step(&child);
    let (second, b) = step(&child);

    let mut timeline = Timeline::new(config);
    let ids = [timeline.add(a), timeline.add(b)];

    Fixture {
        timeline,
        first,
        second,
        ids,
    }
}

#[test]
fn test_sequence_forward() {
    let Fixture {
        mut timeline,
        first,
        second,
        ids,
    } = two_step_timeline(AnimationConfig::new());
    assert_eq!(timeline.end_time(), 2.0);

    timeline.start();
    assert_eq!((first.get(), second.get()), (0.0, 0.0));

    timeline.on_update(0.5);
    assert_eq!((first.get(), second.get()), (0.5, 0.0));

    timeline.on_update(0.5);
    assert_eq!((first.get(), second.get()), (1.0, 0.0));

    timeline.on_update(0.5);
    assert_eq!((first.get(), second.get()), (1.0, 0.5));

    timeline.on_update(0.5);
    assert_eq!((first.get(), second.get()), (1.0, 1.0));

    assert!(!timeline.is_animating());
    for id in ids {
        assert!(timeline.get(id).is_some_and(|anim| !anim.is_animating()));
    }
}

#[test]
fn test_sequence_auto_reverse() {
    let finished = Rc::new(Cell::new(0));
    let config = AnimationConfig::new()
        .auto_reverse(true)
        .repeat(2)
        .on_finished({
            let finished = finished.clone();
            move || finished.set(finished.get() + 1)
        });
    let Fixture {
        mut timeline,
        first,
        second,
        ids,
    } = two_step_timeline(config);

    timeline.start();
    for _ in 0..4 {
        timeline.on_update(0.5);
    }
    assert!(timeline.is_animating());
    assert!(timeline.is_reverse());

    // The new cycle restarts entries in reverse before seeking
    timeline.on_update(0.5);
    assert_eq!((first.get(), second.get()), (1.0, 0.5));
    assert!(timeline.get(ids[0]).is_some_and(|anim| anim.is_reverse()));

    timeline.on_update(0.5);
    assert_eq!((first.get(), second.get()), (1.0, 0.0));

    timeline.on_update(0.5);
    assert_eq!((first.get(), second.get()), (0.5, 0.0));

    timeline.on_update(0.5);
    assert_eq!((first.get(), second.get()), (0.0, 0.0));

    assert!(!timeline.is_animating());
    assert_eq!(finished.get(), 1);
}

#[test]
fn test_start_reverse_primes_last_entry() {
    let Fixture {
        mut timeline,
        first,
        second,
        ..
    } = two_step_timeline(AnimationConfig::new());

    timeline.start_reverse();
    assert!(timeline.is_reverse());
    assert_eq!((first.get(), second.get()), (1.0, 1.0));

    timeline.on_update(1.5);
    assert_eq!((first.get(), second.get()), (0.5, 1.0));
}

#[test]
fn test_paused_timeline_holds() {
    let Fixture {
        mut timeline,
        first,
        ..
    } = two_step_timeline(AnimationConfig::new());

    timeline.start();
    timeline.on_update(0.25);
    timeline.pause();
    timeline.on_update(0.5);
    assert_eq!(first.get(), 0.25);
    assert!(timeline.is_paused());

    timeline.resume();
    timeline.on_update(0.5);
    assert_eq!(first.get(), 0.75);
}

#[test]
fn test_scheduler_runs_timeline_to_completion() {
    let Fixture {
        timeline, second, ..
    } = two_step_timeline(AnimationConfig::new());

    let mut scheduler = AnimationScheduler::new();
    let id = scheduler.play(timeline);

    let mut ticks = 0;
    while scheduler.has_active_animations() {
        let finished = scheduler.tick(0.25);
        ticks += 1;
        if ticks == 8 {
            assert_eq!(finished.as_slice(), &[id]);
        }
    }

    assert_eq!(ticks, 8);
    assert_eq!(second.get(), 1.0);
    assert!(scheduler.is_empty());
}

#[test]
fn test_skipped_entry_end_is_not_emitted() {
    let Fixture {
        mut timeline,
        first,
        second,
        ..
    } = two_step_timeline(AnimationConfig::new());

    timeline.start();
    timeline.on_update(0.75);
    assert_eq!((first.get(), second.get()), (0.75, 0.0));

    // Master jumps from 0.75 to 1.25; the first entry is never sought to 1.0
    timeline.on_update(0.5);
    assert_eq!((first.get(), second.get()), (0.75, 0.25));
}
