//! Vertical drag-to-dismiss recogniser.
//!
//! One [`DragGesture`] follows one pointer interaction at a time. Whether it
//! claims the interaction is decided once, when the pointer goes down; an
//! unclaimed interaction is ignored until the pointer goes down again.

use rawsheet_ui_graphics::Point;

use crate::gesture_constants::CLOSE_THRESHOLD_DIVISOR;
use crate::pointer::PointerId;

/// Displacement since the gesture started. Positive is downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    pub vertical_delta: f32,
}

impl GestureSample {
    pub const fn new(vertical_delta: f32) -> Self {
        Self { vertical_delta }
    }
}

/// What to do with the sheet when the pointer is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseDecision {
    /// The drag went far enough: close the sheet.
    CommitClose,
    /// Spring the drag offset back to rest.
    Cancel,
}

/// Commit only when `final_delta` is strictly past a quarter of
/// `reference_height`.
pub fn release_decision(final_delta: f32, reference_height: f32) -> ReleaseDecision {
    let threshold = reference_height / CLOSE_THRESHOLD_DIVISOR;
    if threshold - final_delta < 0.0 {
        ReleaseDecision::CommitClose
    } else {
        ReleaseDecision::Cancel
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct DragGesture {
    armed: bool,
    active: bool,
    pointer: Option<PointerId>,
    origin: Point,
    last_delta: f32,
}

impl DragGesture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new interaction. Returns whether the gesture claims it.
    pub fn begin(&mut self, armed: bool) -> bool {
        self.armed = armed;
        self.active = true;
        self.pointer = None;
        self.origin = Point::ZERO;
        self.last_delta = 0.0;
        armed
    }

    /// Starts an interaction from a raw pointer press at `position`.
    pub fn begin_pointer(&mut self, pointer: PointerId, position: Point, armed: bool) -> bool {
        let claimed = self.begin(armed);
        self.pointer = Some(pointer);
        self.origin = position;
        claimed
    }

    /// Whether an interaction is in progress and claimed.
    pub fn is_claimed(&self) -> bool {
        self.active && self.armed
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the gesture is tracking a claimed interaction for `pointer`.
    pub fn tracks(&self, pointer: PointerId) -> bool {
        self.is_claimed() && self.pointer == Some(pointer)
    }

    /// Converts a raw pointer position into a sample relative to the press.
    pub fn sample_at(&self, position: Point) -> GestureSample {
        GestureSample::new(position.y - self.origin.y)
    }

    /// Most recent raw displacement seen, including ignored upward samples.
    pub fn last_delta(&self) -> f32 {
        self.last_delta
    }

    /// Feeds a movement sample.
    ///
    /// Returns the displacement to apply to the drag offset, or `None` when
    /// the sample must not move the sheet: the gesture is unclaimed or the
    /// displacement points upward.
    pub fn on_move(&mut self, sample: GestureSample) -> Option<f32> {
        if !self.is_claimed() {
            return None;
        }
        self.last_delta = sample.vertical_delta;
        if sample.vertical_delta < 0.0 {
            log::trace!("ignoring upward drag sample {}", sample.vertical_delta);
            return None;
        }
        Some(sample.vertical_delta)
    }

    /// Ends the interaction and decides between closing and springing back.
    ///
    /// `reference_height` is the configured open height of the sheet, never
    /// its current animated height. Returns `None` for unclaimed interactions.
    pub fn on_release(
        &mut self,
        final_delta: f32,
        reference_height: f32,
    ) -> Option<ReleaseDecision> {
        let claimed = self.is_claimed();
        self.reset();
        if !claimed {
            return None;
        }
        let decision = release_decision(final_delta, reference_height);
        log::debug!(
            "drag released at {} (threshold {}): {:?}",
            final_delta,
            reference_height / CLOSE_THRESHOLD_DIVISOR,
            decision
        );
        Some(decision)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
#[path = "../tests/drag_tests.rs"]
mod tests;
