//! Frame-driven animated values.
//!
//! An [`Animatable`] owns one value and at most one running transition. Starting
//! a transition, or snapping, supersedes whatever was running: its frame
//! callback is cancelled and its completion callback is dropped unfired.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use rawsheet_core::{FrameCallbackRegistration, RuntimeHandle, NANOS_PER_MILLI};
use rawsheet_ui_graphics::Point;

use crate::easing::Easing;

const NANOS_PER_SECOND: f32 = 1_000_000_000.0;

/// Fixed integration step for spring physics, in seconds.
const SPRING_TIMESTEP: f32 = 0.016;

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for Point {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        Point::new(
            self.x.lerp(&target.x, fraction),
            self.y.lerp(&target.y, fraction),
        )
    }
}

/// Values that can be driven by spring physics.
///
/// Springs integrate a scalar progress from 0 (start) to 1 (target); the
/// value type only has to say how far along that path it currently is.
pub trait SpringValue: Lerp + Clone + fmt::Debug {
    /// Fraction of the way from `start` to `target` that `current` sits at.
    fn spring_progress(start: &Self, target: &Self, current: &Self) -> f32;

    /// Whether `current` is within `threshold` of `target`.
    fn is_near_target(current: &Self, target: &Self, threshold: f32) -> bool;
}

impl SpringValue for f32 {
    fn spring_progress(start: &Self, target: &Self, current: &Self) -> f32 {
        let span = target - start;
        if span.abs() < f32::EPSILON {
            1.0
        } else {
            (current - start) / span
        }
    }

    fn is_near_target(current: &Self, target: &Self, threshold: f32) -> bool {
        (current - target).abs() < threshold
    }
}

impl SpringValue for Point {
    // Projection of the travelled vector onto the start->target axis.
    fn spring_progress(start: &Self, target: &Self, current: &Self) -> f32 {
        let span = *target - *start;
        let span_sq = span.dot(span);
        if span_sq < f32::EPSILON {
            1.0
        } else {
            (*current - *start).dot(span) / span_sq
        }
    }

    fn is_near_target(current: &Self, target: &Self, threshold: f32) -> bool {
        (*current - *target).length() < threshold
    }
}

/// Time-based (tween) animation specification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub duration_millis: u64,
    pub easing: Easing,
}

impl AnimationSpec {
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
        }
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(200, Easing::default())
    }
}

/// Damped spring configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// 1.0 = critically damped, < 1.0 = under-damped (bouncy), > 1.0 = over-damped.
    pub damping_ratio: f32,
    /// Higher values settle faster.
    pub stiffness: f32,
    /// Settle once progress velocity (per second) drops below this.
    pub velocity_threshold: f32,
    /// Settle once the value is this close to the target, in value units.
    pub position_threshold: f32,
}

impl SpringSpec {
    /// Slightly under-damped spring used to return a dragged sheet to rest.
    pub fn default_spring() -> Self {
        Self {
            damping_ratio: 0.8,
            stiffness: 400.0,
            velocity_threshold: 0.01,
            position_threshold: 0.1,
        }
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::default_spring()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationType {
    Tween(AnimationSpec),
    Spring(SpringSpec),
}

impl Default for AnimationType {
    fn default() -> Self {
        AnimationType::Tween(AnimationSpec::default())
    }
}

type CompletionCallback = Box<dyn FnOnce() + 'static>;

/// A value that animates over frames drained from the owning runtime.
pub struct Animatable<T: SpringValue + 'static> {
    inner: Rc<RefCell<AnimatableInner<T>>>,
}

struct AnimatableInner<T: SpringValue + 'static> {
    runtime: RuntimeHandle,
    current: T,
    /// Spring progress velocity, per second.
    velocity: f32,
    start: T,
    target: T,
    animation_type: AnimationType,
    running: bool,
    start_time_nanos: Option<u64>,
    last_frame_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
    on_complete: Option<CompletionCallback>,
    /// Bumped whenever a transition starts or the value is snapped.
    generation: u64,
}

impl<T: SpringValue + 'static> AnimatableInner<T> {
    fn supersede(&mut self) {
        if let Some(registration) = self.registration.take() {
            registration.cancel();
        }
        if self.on_complete.take().is_some() {
            log::trace!("dropping completion of superseded transition");
        }
        self.generation += 1;
        self.start_time_nanos = None;
        self.last_frame_nanos = None;
        self.velocity = 0.0;
    }

    fn settle(&mut self) {
        self.current = self.target.clone();
        self.start = self.target.clone();
        self.start_time_nanos = None;
        self.last_frame_nanos = None;
        self.velocity = 0.0;
        self.running = false;
    }

    /// Advances a tween; returns `true` once the value has settled.
    fn step_tween(&mut self, spec: AnimationSpec, frame_time_nanos: u64) -> bool {
        let start_time = *self.start_time_nanos.get_or_insert(frame_time_nanos);
        let elapsed_nanos = frame_time_nanos.saturating_sub(start_time);
        // Saturates instead of overflowing for durations near u64::MAX millis.
        let duration_nanos = spec.duration_millis.saturating_mul(NANOS_PER_MILLI);
        let linear_progress = if duration_nanos == 0 {
            1.0
        } else {
            (elapsed_nanos as f64 / duration_nanos as f64).clamp(0.0, 1.0) as f32
        };
        if linear_progress >= 1.0 {
            self.settle();
            return true;
        }
        let progress = spec.easing.transform(linear_progress);
        self.current = self.start.lerp(&self.target, progress);
        false
    }

    /// Advances a spring with semi-implicit Euler; returns `true` once settled.
    fn step_spring(&mut self, spec: SpringSpec, frame_time_nanos: u64) -> bool {
        let previous = self.last_frame_nanos.replace(frame_time_nanos);
        let Some(previous) = previous else {
            // First frame only anchors time.
            return false;
        };
        let dt = frame_time_nanos.saturating_sub(previous) as f32 / NANOS_PER_SECOND;

        let stiffness = spec.stiffness;
        let damping = 2.0 * spec.damping_ratio * stiffness.sqrt();
        let mut progress = T::spring_progress(&self.start, &self.target, &self.current);
        let mut simulated = 0.0f32;
        while simulated < dt {
            let step = SPRING_TIMESTEP.min(dt - simulated);
            let displacement = progress - 1.0;
            let force = -stiffness * displacement - damping * self.velocity;
            self.velocity += force * step;
            progress = (progress + self.velocity * step).clamp(-1.0, 2.0);
            simulated += step;
        }
        self.current = self.start.lerp(&self.target, progress);

        let at_rest = self.velocity.abs() < spec.velocity_threshold;
        let near_target = T::is_near_target(&self.current, &self.target, spec.position_threshold);
        if at_rest && near_target {
            self.settle();
            true
        } else {
            false
        }
    }
}

impl<T: SpringValue + 'static> Animatable<T> {
    pub fn new(initial: T, runtime: RuntimeHandle) -> Self {
        let inner = AnimatableInner {
            runtime,
            current: initial.clone(),
            velocity: 0.0,
            start: initial.clone(),
            target: initial,
            animation_type: AnimationType::default(),
            running: false,
            start_time_nanos: None,
            last_frame_nanos: None,
            registration: None,
            on_complete: None,
            generation: 0,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    pub fn value(&self) -> T {
        self.inner.borrow().current.clone()
    }

    pub fn target(&self) -> T {
        self.inner.borrow().target.clone()
    }

    pub fn animation_type(&self) -> AnimationType {
        self.inner.borrow().animation_type
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().running
    }

    /// Number of transitions and snaps applied since construction.
    pub fn generation(&self) -> u64 {
        self.inner.borrow().generation
    }

    /// Animate to `target`, superseding any running transition.
    pub fn animate_to(&self, target: T, animation: AnimationType) {
        self.start_transition(target, animation, None);
    }

    /// Animate to `target` and run `on_complete` once the value settles.
    ///
    /// The callback runs from the runtime's local task queue after the frame
    /// that settled the value. It never runs if the transition is superseded
    /// or the animatable is dropped first.
    pub fn animate_to_then(
        &self,
        target: T,
        animation: AnimationType,
        on_complete: impl FnOnce() + 'static,
    ) {
        self.start_transition(target, animation, Some(Box::new(on_complete)));
    }

    /// Set the value immediately, cancelling any running transition.
    pub fn snap_to(&self, target: T) {
        let mut inner = self.inner.borrow_mut();
        inner.supersede();
        inner.target = target;
        inner.settle();
    }

    fn start_transition(
        &self,
        target: T,
        animation: AnimationType,
        on_complete: Option<CompletionCallback>,
    ) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.supersede();
            inner.start = inner.current.clone();
            inner.target = target;
            inner.animation_type = animation;
            inner.on_complete = on_complete;
            inner.running = true;
            log::trace!(
                "transition {:?} -> {:?} ({:?})",
                inner.start,
                inner.target,
                animation
            );
        }
        Self::schedule_frame(&self.inner);
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatableInner<T>>>) {
        let runtime = {
            let inner = this.borrow();
            if inner.registration.is_some() {
                return;
            }
            inner.runtime.clone()
        };
        let weak = Rc::downgrade(this);
        let registration = runtime.frame_clock().with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        if !registration.is_active() {
            log::warn!("runtime is gone; snapping animation to its target");
            let mut inner = this.borrow_mut();
            inner.on_complete = None;
            inner.settle();
            return;
        }
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<AnimatableInner<T>>>, frame_time_nanos: u64) {
        let completion = {
            let mut inner = this.borrow_mut();
            inner.registration = None;
            if !inner.running {
                return;
            }

            let settled = match inner.animation_type {
                AnimationType::Tween(spec) => inner.step_tween(spec, frame_time_nanos),
                AnimationType::Spring(spec) => inner.step_spring(spec, frame_time_nanos),
            };
            if !settled {
                None
            } else {
                log::trace!("settled at {:?}", inner.current);
                inner
                    .on_complete
                    .take()
                    .map(|callback| (callback, inner.generation, inner.runtime.clone()))
            }
        };

        if this.borrow().running {
            Self::schedule_frame(this);
        } else if let Some((callback, generation, runtime)) = completion {
            Self::post_completion(Rc::downgrade(this), generation, runtime, callback);
        }
    }

    fn post_completion(
        weak: Weak<RefCell<AnimatableInner<T>>>,
        generation: u64,
        runtime: RuntimeHandle,
        callback: CompletionCallback,
    ) {
        runtime.post_local(move || {
            let Some(strong) = weak.upgrade() else {
                return;
            };
            let current_generation = strong.borrow().generation;
            drop(strong);
            if current_generation == generation {
                callback();
            }
        });
    }
}

impl<T: SpringValue + 'static> Clone for Animatable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: SpringValue + 'static> fmt::Debug for Animatable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Animatable")
            .field("current", &inner.current)
            .field("target", &inner.target)
            .field("running", &inner.running)
            .field("generation", &inner.generation)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
