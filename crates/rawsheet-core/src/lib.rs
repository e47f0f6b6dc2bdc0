//! Single-threaded frame runtime for rawsheet.
//!
//! Everything that animates in a sheet is driven from one UI thread: the host
//! drains frame callbacks with a frame timestamp, and work that must run after
//! a frame (animation completion callbacks) is queued on the runtime's local
//! task queue instead of being invoked inline.

mod frame_clock;
mod platform;
mod runtime;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use platform::{Clock, RuntimeScheduler};
pub use runtime::{Runtime, RuntimeHandle};

/// Identifier handed out for every registered frame callback.
pub type FrameCallbackId = u64;

/// Nanoseconds per millisecond, used when converting animation durations.
pub const NANOS_PER_MILLI: u64 = 1_000_000;
