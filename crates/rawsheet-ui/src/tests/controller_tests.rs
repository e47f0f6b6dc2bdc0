use super::*;

use rawsheet_core::{Runtime, RuntimeScheduler};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

const FRAME_NANOS: u64 = 16_000_000;

struct NoopScheduler;

impl RuntimeScheduler for NoopScheduler {
    fn schedule_frame(&self) {}
}

fn setup() -> (Runtime, AnimationController) {
    let runtime = Runtime::new(Arc::new(NoopScheduler));
    let controller =
        AnimationController::new(runtime.handle(), Easing::Linear, SpringSpec::default());
    (runtime, controller)
}

fn settle(runtime: &Runtime) {
    let mut time = 0;
    for _ in 0..500 {
        if !runtime.needs_frame() {
            return;
        }
        time += FRAME_NANOS;
        runtime.drain_frame_callbacks(time);
    }
    panic!("animations did not settle");
}

#[test]
fn channels_start_at_rest() {
    let (_runtime, controller) = setup();
    assert_eq!(controller.value(Height), 0.0);
    assert_eq!(controller.value(DragOffset), Point::ZERO);
    assert_eq!(
        controller.frame(),
        ChannelFrame {
            height: 0.0,
            translation_y: 0.0
        }
    );
}

#[test]
fn time_transition_reports_completion_once() {
    let (runtime, controller) = setup();
    let completions = Rc::new(Cell::new(0));
    {
        let completions = Rc::clone(&completions);
        controller.time_transition(
            Height,
            260.0,
            200,
            Some(Box::new(move || completions.set(completions.get() + 1))),
        );
    }
    assert!(controller.is_animating(Height));
    assert!(!controller.is_animating(DragOffset));

    settle(&runtime);
    assert_eq!(controller.value(Height), 260.0);
    assert_eq!(completions.get(), 1);
}

#[test]
fn channels_animate_independently() {
    let (runtime, controller) = setup();
    controller.set_immediate(DragOffset, Point::new(0.0, 40.0));
    controller.time_transition(Height, 100.0, 100, None);
    controller.spring_transition(DragOffset, Point::ZERO);

    settle(&runtime);
    assert_eq!(controller.value(Height), 100.0);
    assert_eq!(controller.value(DragOffset), Point::ZERO);
}

#[test]
fn translation_is_clamped_to_non_negative() {
    let (_runtime, controller) = setup();
    controller.set_immediate(DragOffset, Point::new(0.0, -12.0));
    assert_eq!(controller.frame().translation_y, 0.0);
    controller.set_immediate(DragOffset, Point::new(0.0, 12.0));
    assert_eq!(controller.frame().translation_y, 12.0);
}

#[test]
fn set_immediate_cancels_transition_and_completion() {
    let (runtime, controller) = setup();
    let completed = Rc::new(Cell::new(false));
    {
        let completed = Rc::clone(&completed);
        controller.time_transition(
            Height,
            260.0,
            200,
            Some(Box::new(move || completed.set(true))),
        );
    }
    controller.set_immediate(Height, 10.0);
    assert!(!runtime.needs_frame());

    settle(&runtime);
    assert_eq!(controller.value(Height), 10.0);
    assert!(!completed.get());
}

#[test]
fn reset_replaces_channel_with_fresh_instance() {
    let (runtime, mut controller) = setup();
    let completed = Rc::new(Cell::new(false));
    {
        let completed = Rc::clone(&completed);
        controller.time_transition(
            Height,
            260.0,
            200,
            Some(Box::new(move || completed.set(true))),
        );
    }
    runtime.drain_frame_callbacks(FRAME_NANOS);
    runtime.drain_frame_callbacks(2 * FRAME_NANOS);
    assert!(controller.generation(Height) > 0);

    controller.reset(Height);
    assert_eq!(controller.resets(), 1);
    assert_eq!(controller.value(Height), 0.0);
    assert_eq!(controller.generation(Height), 0);
    assert!(!controller.is_animating(Height));
    assert!(!runtime.needs_frame());

    settle(&runtime);
    assert!(!completed.get());
}
