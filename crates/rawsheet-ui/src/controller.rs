//! The two animated channels of a sheet.
//!
//! The height channel carries open/close transitions; the drag-offset channel
//! carries the interactive drag and its spring-back. They are composited when
//! read ([`ChannelFrame`]) and never merged into one value.

use rawsheet_animation::{Animatable, AnimationSpec, AnimationType, Easing, SpringSpec, SpringValue};
use rawsheet_core::RuntimeHandle;
use rawsheet_ui_graphics::Point;

/// Selects one of the controller's channels.
pub trait Channel: Copy {
    type Value: SpringValue + PartialEq + 'static;

    fn name(self) -> &'static str;

    fn rest_value(self) -> Self::Value;

    fn animatable(self, controller: &AnimationController) -> &Animatable<Self::Value>;

    fn animatable_mut(self, controller: &mut AnimationController) -> &mut Animatable<Self::Value>;
}

/// Rendered height of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Height;

/// Translation applied on top of the panel while it is dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragOffset;

impl Channel for Height {
    type Value = f32;

    fn name(self) -> &'static str {
        "height"
    }

    fn rest_value(self) -> f32 {
        0.0
    }

    fn animatable(self, controller: &AnimationController) -> &Animatable<f32> {
        &controller.height
    }

    fn animatable_mut(self, controller: &mut AnimationController) -> &mut Animatable<f32> {
        &mut controller.height
    }
}

impl Channel for DragOffset {
    type Value = Point;

    fn name(self) -> &'static str {
        "drag-offset"
    }

    fn rest_value(self) -> Point {
        Point::ZERO
    }

    fn animatable(self, controller: &AnimationController) -> &Animatable<Point> {
        &controller.drag_offset
    }

    fn animatable_mut(self, controller: &mut AnimationController) -> &mut Animatable<Point> {
        &mut controller.drag_offset
    }
}

/// Channel values as they should be rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelFrame {
    pub height: f32,
    /// Downward translation; never negative.
    pub translation_y: f32,
}

pub struct AnimationController {
    runtime: RuntimeHandle,
    height: Animatable<f32>,
    drag_offset: Animatable<Point>,
    easing: Easing,
    spring: SpringSpec,
    resets: u64,
}

impl AnimationController {
    pub fn new(runtime: RuntimeHandle, easing: Easing, spring: SpringSpec) -> Self {
        Self {
            height: Animatable::new(Height.rest_value(), runtime.clone()),
            drag_offset: Animatable::new(DragOffset.rest_value(), runtime.clone()),
            runtime,
            easing,
            spring,
            resets: 0,
        }
    }

    pub fn value<C: Channel>(&self, channel: C) -> C::Value {
        channel.animatable(self).value()
    }

    pub fn is_animating<C: Channel>(&self, channel: C) -> bool {
        channel.animatable(self).is_running()
    }

    /// Eases `channel` to `target` over `duration_millis`.
    ///
    /// `on_complete` runs once, after the value settles, unless another
    /// transition, snap or reset on the same channel comes first.
    pub fn time_transition<C: Channel>(
        &self,
        channel: C,
        target: C::Value,
        duration_millis: u64,
        on_complete: Option<Box<dyn FnOnce() + 'static>>,
    ) {
        let animation = AnimationType::Tween(AnimationSpec::tween(duration_millis, self.easing));
        let animatable = channel.animatable(self);
        log::debug!(
            "{} eases {:?} -> {:?} over {}ms",
            channel.name(),
            animatable.value(),
            target,
            duration_millis
        );
        match on_complete {
            Some(on_complete) => animatable.animate_to_then(target, animation, on_complete),
            None => animatable.animate_to(target, animation),
        }
    }

    /// Springs `channel` to `rest`. Fire-and-forget.
    pub fn spring_transition<C: Channel>(&self, channel: C, rest: C::Value) {
        let animatable = channel.animatable(self);
        log::debug!(
            "{} springs {:?} -> {:?}",
            channel.name(),
            animatable.value(),
            rest
        );
        animatable.animate_to(rest, AnimationType::Spring(self.spring));
    }

    /// Sets `channel` without animating, cancelling any transition on it.
    pub fn set_immediate<C: Channel>(&self, channel: C, value: C::Value) {
        channel.animatable(self).snap_to(value);
    }

    /// Replaces `channel` with a fresh instance at its rest value.
    ///
    /// The old instance is dropped, which cancels its pending frame callback
    /// and discards any completion it had not delivered yet.
    pub fn reset<C: Channel>(&mut self, channel: C) {
        let fresh = Animatable::new(channel.rest_value(), self.runtime.clone());
        *channel.animatable_mut(self) = fresh;
        self.resets += 1;
        log::trace!("{} reset", channel.name());
    }

    /// Number of [`reset`](Self::reset) calls so far.
    pub fn resets(&self) -> u64 {
        self.resets
    }

    /// Transitions and snaps applied to the current instance of `channel`.
    pub fn generation<C: Channel>(&self, channel: C) -> u64 {
        channel.animatable(self).generation()
    }

    pub fn frame(&self) -> ChannelFrame {
        ChannelFrame {
            height: self.height.value(),
            translation_y: self.drag_offset.value().y.max(0.0),
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
