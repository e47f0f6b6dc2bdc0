pub mod drag;

pub use drag::{release_decision, DragGesture, GestureSample, ReleaseDecision};
