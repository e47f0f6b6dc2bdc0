//! Where the parts of a sheet land inside a viewport.

use rawsheet_ui_graphics::{Rect, Size};

use crate::controller::ChannelFrame;

pub const HANDLE_WIDTH: f32 = 20.0;
pub const HANDLE_HEIGHT: f32 = 5.0;
pub const HANDLE_CORNER_RADIUS: f32 = 4.0;
/// Gap between the top edge of the container and the drag handle.
pub const HANDLE_TOP_MARGIN: f32 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetLayout {
    /// Press target behind the sheet; only present for a visible modal sheet.
    pub mask: Option<Rect>,
    /// The panel, anchored to the bottom of the viewport and shifted down by
    /// the drag translation.
    pub container: Rect,
    pub handle: Rect,
}

impl SheetLayout {
    pub fn compute(viewport: Size, frame: ChannelFrame, with_mask: bool) -> Self {
        let height = frame.height.max(0.0);
        let resting_top = viewport.height - height;
        let container = Rect::new(0.0, resting_top + frame.translation_y, viewport.width, height);
        let handle = Rect::new(
            (viewport.width - HANDLE_WIDTH) / 2.0,
            container.y + HANDLE_TOP_MARGIN,
            HANDLE_WIDTH,
            HANDLE_HEIGHT,
        );
        // The mask fills the space above the panel's resting position.
        let mask = with_mask.then(|| Rect::new(0.0, 0.0, viewport.width, resting_top.max(0.0)));
        Self {
            mask,
            container,
            handle,
        }
    }

    /// Whether a press at `(x, y)` lands on the mask rather than the panel.
    pub fn hits_mask(&self, x: f32, y: f32) -> bool {
        !self.hits_container(x, y) && self.mask.is_some_and(|mask| mask.contains(x, y))
    }

    pub fn hits_container(&self, x: f32, y: f32) -> bool {
        !self.container.is_empty() && self.container.contains(x, y)
    }
}
