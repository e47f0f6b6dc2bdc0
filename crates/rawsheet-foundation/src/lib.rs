//! Pointer input and gesture recognition for sheets.

pub mod gesture_constants;
pub mod gestures;
mod pointer;

pub use gesture_constants::*;
pub use gestures::{release_decision, DragGesture, GestureSample, ReleaseDecision};
pub use pointer::{PointerEvent, PointerEventKind, PointerId};
