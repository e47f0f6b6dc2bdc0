//! Interfaces to the surface that hosts a modal sheet.

use crate::config::{Orientation, OverlayAnimation};

/// How the host should present the overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayPresentation<'a> {
    pub animation: OverlayAnimation,
    /// The overlay is see-through; the sheet draws its own dimming layer.
    pub transparent: bool,
    pub supported_orientations: &'a [Orientation],
}

/// A full-screen surface that shows the sheet above other content.
///
/// Hosts that can be dismissed from outside (a hardware back action, for
/// instance) report it through [`BottomSheet::request_close`].
///
/// Calls arrive on the UI thread. Implementations must not call back into the
/// sheet from inside `show`.
///
/// [`BottomSheet::request_close`]: crate::BottomSheet::request_close
pub trait OverlayHost {
    fn show(&mut self, visible: bool, presentation: &OverlayPresentation<'_>);
}

impl<F> OverlayHost for F
where
    F: FnMut(bool),
{
    fn show(&mut self, visible: bool, _presentation: &OverlayPresentation<'_>) {
        self(visible)
    }
}
