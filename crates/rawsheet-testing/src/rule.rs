//! Headless sheet test rule.
//!
//! # Example
//!
//! ```
//! use rawsheet_testing::SheetTestRule;
//! use rawsheet_ui::{SheetConfig, VisibilityState};
//!
//! let mut rule = SheetTestRule::new(SheetConfig::default().with_close_on_drag_down(true))
//!     .expect("valid config");
//! rule.sheet().open();
//! rule.wait_for_idle();
//!
//! rule.drag_sheet_by(120.0, 6);
//! rule.wait_for_idle();
//! assert_eq!(rule.sheet().visibility(), VisibilityState::Closed);
//! assert_eq!(rule.close_count(), 1);
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rawsheet_core::{Runtime, RuntimeScheduler, NANOS_PER_MILLI};
use rawsheet_foundation::{PointerEvent, PointerId};
use rawsheet_ui::{
    BottomSheet, ConfigError, OverlayAnimation, OverlayHost, OverlayPresentation, SheetConfig,
    SheetFrame, SheetLayout,
};
use rawsheet_ui_graphics::{Point, Size};

/// Virtual frame interval: 60 frames per second.
pub const FRAME_INTERVAL_NANOS: u64 = 16_666_667;

/// Upper bound on frames pumped by [`SheetTestRule::wait_for_idle`].
pub const MAX_IDLE_FRAMES: usize = 1_000;

pub const DEFAULT_VIEWPORT: Size = Size::new(360.0, 640.0);

/// Scheduler that only counts frame requests.
#[derive(Debug, Default)]
pub struct TestScheduler {
    requests: AtomicUsize,
}

impl TestScheduler {
    /// Frames the runtime has asked the scheduler for.
    pub fn frame_requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl RuntimeScheduler for TestScheduler {
    fn schedule_frame(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}

/// One `show` call received by the overlay host.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayCall {
    pub visible: bool,
    pub animation: OverlayAnimation,
    pub orientations: usize,
}

#[derive(Clone, Default)]
struct RecordingOverlay {
    calls: Rc<RefCell<Vec<OverlayCall>>>,
}

impl OverlayHost for RecordingOverlay {
    fn show(&mut self, visible: bool, presentation: &OverlayPresentation<'_>) {
        self.calls.borrow_mut().push(OverlayCall {
            visible,
            animation: presentation.animation,
            orientations: presentation.supported_orientations.len(),
        });
    }
}

/// Programmatic control over one sheet on a virtual clock.
pub struct SheetTestRule {
    runtime: Runtime,
    scheduler: Arc<TestScheduler>,
    sheet: BottomSheet,
    viewport: Size,
    frame_time: u64,
    overlay: RecordingOverlay,
    closes: Rc<Cell<usize>>,
    history: Vec<SheetFrame>,
    next_pointer: PointerId,
    active_pointer: Option<PointerId>,
}

impl SheetTestRule {
    /// Builds a sheet with a recording overlay host and an `on_close` counter.
    pub fn new(config: SheetConfig) -> Result<Self, ConfigError> {
        let scheduler = Arc::new(TestScheduler::default());
        let runtime = Runtime::new(scheduler.clone());
        let sheet = BottomSheet::new(config, runtime.handle())?;

        let overlay = RecordingOverlay::default();
        sheet.set_overlay_host(overlay.clone());

        let closes = Rc::new(Cell::new(0));
        {
            let closes = Rc::clone(&closes);
            sheet.set_on_close(move || closes.set(closes.get() + 1));
        }

        Ok(Self {
            runtime,
            scheduler,
            sheet,
            viewport: DEFAULT_VIEWPORT,
            frame_time: 0,
            overlay,
            closes,
            history: Vec::new(),
            next_pointer: 1,
            active_pointer: None,
        })
    }

    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Size::new(width, height);
        self
    }

    pub fn sheet(&self) -> &BottomSheet {
        &self.sheet
    }

    pub fn layout(&self) -> SheetLayout {
        self.sheet.layout(self.viewport)
    }

    /// Frames the runtime has asked the scheduler for.
    pub fn frame_requests(&self) -> usize {
        self.scheduler.frame_requests()
    }

    pub fn is_idle(&self) -> bool {
        !self.runtime.needs_frame()
    }

    /// Times `on_close` has fired.
    pub fn close_count(&self) -> usize {
        self.closes.get()
    }

    pub fn overlay_calls(&self) -> Vec<OverlayCall> {
        self.overlay.calls.borrow().clone()
    }

    /// Frames recorded since the last [`take_history`](Self::take_history).
    pub fn history(&self) -> &[SheetFrame] {
        &self.history
    }

    pub fn take_history(&mut self) -> Vec<SheetFrame> {
        std::mem::take(&mut self.history)
    }

    /// Drains one frame and records the resulting sheet frame.
    pub fn advance_frame(&mut self) -> SheetFrame {
        self.frame_time += FRAME_INTERVAL_NANOS;
        self.runtime.drain_frame_callbacks(self.frame_time);
        let frame = self.sheet.frame();
        self.history.push(frame);
        frame
    }

    /// Advances virtual time by at least `millis`, one frame at a time.
    pub fn advance_time_millis(&mut self, millis: u64) {
        let until = self.frame_time + millis * NANOS_PER_MILLI;
        while self.frame_time < until {
            self.advance_frame();
        }
    }

    /// Pumps frames until nothing is scheduled. Returns the frames pumped.
    pub fn wait_for_idle(&mut self) -> usize {
        let mut pumped = 0;
        while !self.is_idle() {
            assert!(
                pumped < MAX_IDLE_FRAMES,
                "sheet still animating after {} frames",
                MAX_IDLE_FRAMES
            );
            self.advance_frame();
            pumped += 1;
        }
        log::trace!("idle after {} frames", pumped);
        pumped
    }

    /// Presses at `(x, y)`. Returns whether the sheet consumed the press.
    pub fn press(&mut self, x: f32, y: f32) -> bool {
        let id = self.next_pointer;
        self.next_pointer += 1;
        self.active_pointer = Some(id);
        let event = PointerEvent::down(x, y).with_id(id);
        self.sheet.handle_pointer(&event, self.viewport)
    }

    pub fn move_to(&mut self, x: f32, y: f32) -> bool {
        let Some(id) = self.active_pointer else {
            return false;
        };
        let event = PointerEvent::moved(x, y).with_id(id);
        self.sheet.handle_pointer(&event, self.viewport)
    }

    pub fn release(&mut self, x: f32, y: f32) -> bool {
        let Some(id) = self.active_pointer.take() else {
            return false;
        };
        let event = PointerEvent::up(x, y).with_id(id);
        self.sheet.handle_pointer(&event, self.viewport)
    }

    pub fn cancel_pointer(&mut self, x: f32, y: f32) -> bool {
        let Some(id) = self.active_pointer.take() else {
            return false;
        };
        let event = PointerEvent::cancel(x, y).with_id(id);
        self.sheet.handle_pointer(&event, self.viewport)
    }

    /// Press, release at the same spot.
    pub fn tap(&mut self, x: f32, y: f32) -> bool {
        let pressed = self.press(x, y);
        let released = self.release(x, y);
        pressed || released
    }

    /// Drags from `from` to `to` in `steps` moves, advancing one frame per
    /// move, then releases at `to`.
    pub fn drag(&mut self, from: Point, to: Point, steps: usize) -> bool {
        let claimed = self.press(from.x, from.y);
        let steps = steps.max(1);
        for step in 1..=steps {
            let fraction = step as f32 / steps as f32;
            self.move_to(
                from.x + (to.x - from.x) * fraction,
                from.y + (to.y - from.y) * fraction,
            );
            self.advance_frame();
        }
        self.release(to.x, to.y);
        claimed
    }

    /// Drags the sheet vertically by `dy`, starting at its handle.
    pub fn drag_sheet_by(&mut self, dy: f32, steps: usize) -> bool {
        let handle = self.layout().handle;
        let from = Point::new(handle.x + handle.width / 2.0, handle.y + handle.height / 2.0);
        self.drag(from, Point::new(from.x, from.y + dy), steps)
    }

    /// A point on the mask, above the panel.
    pub fn mask_point(&self) -> Point {
        let container = self.layout().container;
        Point::new(self.viewport.width / 2.0, (container.y / 2.0).max(0.0))
    }
}
