//! Slide-up bottom sheet.
//!
//! A [`BottomSheet`] is a panel anchored to the bottom of the viewport. It
//! opens and closes with an animated height transition, can be dismissed by
//! dragging it down, and can be hosted in a modal overlay with a dimming mask.
//!
//! The sheet is headless: it owns the state machine and the animated channels
//! and reports geometry through [`SheetFrame`] and [`SheetLayout`]. Rendering
//! and the overlay surface are supplied by the host application.
//!
//! ```
//! use rawsheet_core::{Runtime, RuntimeScheduler};
//! use rawsheet_ui::{BottomSheet, SheetConfig, VisibilityState};
//! use std::sync::Arc;
//!
//! struct Noop;
//! impl RuntimeScheduler for Noop {
//!     fn schedule_frame(&self) {}
//! }
//!
//! let runtime = Runtime::new(Arc::new(Noop));
//! let sheet = BottomSheet::new(SheetConfig::default(), runtime.handle()).unwrap();
//! sheet.open();
//! let mut time = 0;
//! while runtime.needs_frame() {
//!     time += 16_000_000;
//!     runtime.drain_frame_callbacks(time);
//! }
//! assert_eq!(sheet.visibility(), VisibilityState::Open);
//! assert_eq!(sheet.frame().height, 260.0);
//! ```

mod config;
mod controller;
mod layout;
mod overlay;
mod sheet;

pub use config::{
    ConfigError, Orientation, Orientations, OverlayAnimation, SheetConfig, SheetStyle,
    StyleOverrides,
};
pub use controller::{AnimationController, Channel, ChannelFrame, DragOffset, Height};
pub use layout::{
    SheetLayout, HANDLE_CORNER_RADIUS, HANDLE_HEIGHT, HANDLE_TOP_MARGIN, HANDLE_WIDTH,
};
pub use overlay::{OverlayHost, OverlayPresentation};
pub use sheet::{BottomSheet, SheetFrame, VisibilityState};

pub use rawsheet_animation::{Easing, SpringSpec};
pub use rawsheet_foundation::{GestureSample, PointerEvent, PointerEventKind, ReleaseDecision};

pub mod prelude {
    pub use crate::config::SheetConfig;
    pub use crate::overlay::OverlayHost;
    pub use crate::sheet::{BottomSheet, SheetFrame, VisibilityState};
    pub use rawsheet_foundation::{GestureSample, PointerEvent, ReleaseDecision};
}
