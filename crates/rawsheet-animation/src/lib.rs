//! Animation system for rawsheet.
//!
//! Provides frame-driven [`Animatable`] values with easing curves, spring
//! physics and single-fire completion callbacks.

mod animation;
mod easing;

pub use animation::*;
pub use easing::{cubic_bezier, Easing};
