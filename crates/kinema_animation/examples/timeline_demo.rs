//! Timeline Demo
//!
//! Drives a small sequence headlessly at 60 fps and prints what a host would
//! apply to its scene each frame:
//! - A node sliding along a cubic Bezier path
//! - A fade between two colors with a bounce curve
//! - A caption typed out character by character
//!
//! The whole sequence plays forward then backward once.
//!
//! Run with: cargo run -p kinema_animation --example timeline_demo

use anyhow::Result;
use kinema_animation::{
    AnimationConfig, AnimationScheduler, Color, CubicBezierPath, CubicCurve, Easing, EasingFamily,
    Point2D, Timeline, TypewriterText,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

const FRAME: f64 = 1.0 / 60.0;

#[derive(Debug, Default)]
struct Node {
    position: Point2D,
    color: Color,
    caption: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let node = Rc::new(RefCell::new(Node::default()));
    let finished = Rc::new(Cell::new(false));

    let step = AnimationConfig::new().duration(Duration::from_millis(500));

    let path = CubicCurve::new(
        Point2D::new(0.0, 0.0),
        Point2D::new(0.0, 120.0),
        Point2D::new(200.0, 120.0),
        Point2D::new(200.0, 0.0),
    );
    let slide = step.build(CubicBezierPath(path), {
        let node = node.clone();
        move |p: Point2D| node.borrow_mut().position = p
    })?;

    let fade = step
        .clone()
        .interpolator(Easing::ease_out(EasingFamily::Bounce))
        .animate(Color::from_hex(0x1E1E2E), Color::from_hex_rgba(0xF5C2E7CC), {
            let node = node.clone();
            move |c: Color| node.borrow_mut().color = c
        })?;

    let caption = step.build(TypewriterText::reveal("kinema"), {
        let node = node.clone();
        move |text: String| node.borrow_mut().caption = text
    })?;

    let mut timeline = Timeline::new(
        AnimationConfig::new()
            .auto_reverse(true)
            .repeat(2)
            .on_finished({
                let finished = finished.clone();
                move || finished.set(true)
            }),
    );
    timeline.add(slide);
    timeline.add(fade);
    timeline.add(caption);

    let mut scheduler = AnimationScheduler::new();
    let id = scheduler.play(timeline);

    let mut frame = 0u32;
    while scheduler.get(id).is_some() {
        scheduler.tick(FRAME);
        frame += 1;

        if frame % 10 == 0 {
            let node = node.borrow();
            tracing::info!(
                frame,
                x = node.position.x,
                y = node.position.y,
                rgba = ?node.color.to_rgba8(),
                caption = %node.caption,
                "frame"
            );
        }
    }

    tracing::info!(frames = frame, finished = finished.get(), "sequence done");
    Ok(())
}
