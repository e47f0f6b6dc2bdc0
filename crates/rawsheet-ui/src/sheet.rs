//! The bottom sheet visibility state machine.
//!
//! ```text
//! Closed --open()--> Opening --height settles--> Open
//!    ^                  |                          |
//!    |               close()       close() / drag commit / host close request
//!    |                  v                          |
//!    +--height settles-- Closing <-----------------+
//! ```
//!
//! `open()` is ignored unless the sheet is `Closed`. `close()` is ignored while
//! `Closed` or `Closing`; from `Opening` it interrupts the open transition and
//! closes from whatever height the sheet had reached.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use rawsheet_core::RuntimeHandle;
use rawsheet_foundation::{
    DragGesture, GestureSample, PointerEvent, PointerEventKind, PointerId, ReleaseDecision,
};
use rawsheet_ui_graphics::{Point, Size};

use crate::config::{ConfigError, SheetConfig, SheetStyle};
use crate::controller::{AnimationController, DragOffset, Height};
use crate::layout::SheetLayout;
use crate::overlay::{OverlayHost, OverlayPresentation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisibilityState {
    Closed,
    Opening,
    Open,
    Closing,
}

impl VisibilityState {
    /// Whether the overlay host is displayed.
    pub fn is_overlay_visible(self) -> bool {
        !matches!(self, VisibilityState::Closed)
    }

    /// Whether the sheet is logically open.
    pub fn is_open(self) -> bool {
        matches!(self, VisibilityState::Opening | VisibilityState::Open)
    }

    /// `Opening` and `Closing` only last while the height transition runs.
    pub fn is_transient(self) -> bool {
        matches!(self, VisibilityState::Opening | VisibilityState::Closing)
    }
}

/// Snapshot of everything a renderer needs from the sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetFrame {
    pub state: VisibilityState,
    pub height: f32,
    pub translation_y: f32,
    pub overlay_visible: bool,
}

type CloseCallback = Box<dyn FnMut() + 'static>;

struct SheetInner {
    config: SheetConfig,
    state: VisibilityState,
    controller: AnimationController,
    gesture: DragGesture,
    host: Option<Box<dyn OverlayHost>>,
    on_close: Option<CloseCallback>,
    mask_press: Option<PointerId>,
    completed_closes: u64,
}

impl SheetInner {
    fn transition(&mut self, next: VisibilityState) {
        log::debug!("sheet {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn show_host(&mut self, visible: bool) {
        if !self.config.modal {
            return;
        }
        if let Some(host) = self.host.as_mut() {
            let presentation = OverlayPresentation {
                animation: self.config.overlay_animation,
                transparent: true,
                supported_orientations: &self.config.supported_orientations,
            };
            host.show(visible, &presentation);
        }
    }

    fn drag_armed(&self) -> bool {
        self.config.close_on_drag_down && self.state == VisibilityState::Open
    }

    fn layout(&self, viewport: Size) -> SheetLayout {
        let with_mask = self.config.modal && self.state.is_overlay_visible();
        SheetLayout::compute(viewport, self.controller.frame(), with_mask)
    }

    fn begin_opening(&mut self, weak: Weak<RefCell<SheetInner>>) {
        self.transition(VisibilityState::Opening);
        self.show_host(true);
        self.controller.time_transition(
            Height,
            self.config.height,
            self.config.duration_millis,
            Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().finish_opening();
                }
            })),
        );
    }

    fn finish_opening(&mut self) {
        if self.state == VisibilityState::Opening {
            self.transition(VisibilityState::Open);
        }
    }

    fn begin_closing(&mut self, weak: Weak<RefCell<SheetInner>>) {
        self.transition(VisibilityState::Closing);
        self.gesture.reset();
        self.mask_press = None;
        // Starts from the live height, so an interrupted open closes from
        // wherever it got to.
        self.controller.time_transition(
            Height,
            self.config.min_closing_height,
            self.config.duration_millis,
            Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    finish_closing(&inner);
                }
            })),
        );
    }

    fn apply_drag(&mut self, sample: GestureSample) -> bool {
        match self.gesture.on_move(sample) {
            Some(delta) => {
                log::trace!("drag offset -> {}", delta);
                self.controller
                    .set_immediate(DragOffset, Point::new(0.0, delta));
                true
            }
            None => false,
        }
    }
}

fn finish_closing(inner: &Rc<RefCell<SheetInner>>) {
    let on_close = {
        let mut sheet = inner.borrow_mut();
        if sheet.state != VisibilityState::Closing {
            return;
        }
        sheet.controller.set_immediate(DragOffset, Point::ZERO);
        sheet.controller.reset(Height);
        sheet.transition(VisibilityState::Closed);
        sheet.show_host(false);
        sheet.completed_closes += 1;
        sheet.on_close.take()
    };

    // Runs unborrowed so the callback may reopen the sheet.
    if let Some(mut callback) = on_close {
        callback();
        let mut sheet = inner.borrow_mut();
        if sheet.on_close.is_none() {
            sheet.on_close = Some(callback);
        }
    }
}

/// A slide-up panel anchored to the bottom of the viewport.
///
/// Cloning yields another handle to the same sheet. All methods must be
/// called on the thread that owns the runtime.
#[derive(Clone)]
pub struct BottomSheet {
    inner: Rc<RefCell<SheetInner>>,
}

impl BottomSheet {
    pub fn new(config: SheetConfig, runtime: RuntimeHandle) -> Result<Self, ConfigError> {
        config.validate()?;
        let controller = AnimationController::new(runtime, config.easing, config.spring);
        let inner = SheetInner {
            config,
            state: VisibilityState::Closed,
            controller,
            gesture: DragGesture::new(),
            host: None,
            on_close: None,
            mask_press: None,
            completed_closes: 0,
        };
        Ok(Self {
            inner: Rc::new(RefCell::new(inner)),
        })
    }

    /// Attaches the overlay used when the sheet is modal.
    pub fn set_overlay_host(&self, host: impl OverlayHost + 'static) {
        self.inner.borrow_mut().host = Some(Box::new(host));
    }

    /// Called once every time a close transition completes.
    pub fn set_on_close(&self, on_close: impl FnMut() + 'static) {
        self.inner.borrow_mut().on_close = Some(Box::new(on_close));
    }

    /// Starts opening. Returns `false` if the sheet was not `Closed`.
    pub fn open(&self) -> bool {
        let mut inner = self.inner.borrow_mut();
        if inner.state != VisibilityState::Closed {
            log::warn!("open() ignored while {:?}", inner.state);
            return false;
        }
        inner.begin_opening(Rc::downgrade(&self.inner));
        true
    }

    /// Starts closing. Returns `false` if already `Closed` or `Closing`.
    pub fn close(&self) -> bool {
        let mut inner = self.inner.borrow_mut();
        match inner.state {
            VisibilityState::Closed | VisibilityState::Closing => {
                log::trace!("close() ignored while {:?}", inner.state);
                false
            }
            VisibilityState::Opening | VisibilityState::Open => {
                inner.begin_closing(Rc::downgrade(&self.inner));
                true
            }
        }
    }

    /// The overlay host was dismissed from outside, e.g. by a back action.
    pub fn request_close(&self) -> bool {
        self.close()
    }

    /// The mask behind a modal sheet was pressed.
    pub fn press_mask(&self) -> bool {
        let close_on_press_mask = self.inner.borrow().config.close_on_press_mask;
        close_on_press_mask && self.close()
    }

    /// Starts a drag interaction. Returns whether the sheet claims it.
    pub fn begin_drag(&self) -> bool {
        let mut inner = self.inner.borrow_mut();
        let armed = inner.drag_armed();
        inner.gesture.begin(armed)
    }

    /// Feeds a drag sample. Returns whether the drag offset moved.
    pub fn drag_move(&self, sample: GestureSample) -> bool {
        self.inner.borrow_mut().apply_drag(sample)
    }

    /// Ends the drag: closes the sheet or springs it back to rest.
    ///
    /// Returns `None` when no claimed drag was in progress.
    pub fn drag_release(&self, final_delta: f32) -> Option<ReleaseDecision> {
        let mut inner = self.inner.borrow_mut();
        let reference_height = inner.config.height;
        let decision = inner.gesture.on_release(final_delta, reference_height)?;
        match decision {
            ReleaseDecision::CommitClose => {
                // The drag offset stays put until the close completes.
                inner.begin_closing(Rc::downgrade(&self.inner));
            }
            ReleaseDecision::Cancel => {
                inner
                    .controller
                    .spring_transition(DragOffset, Point::ZERO);
            }
        }
        Some(decision)
    }

    /// Routes a raw pointer event. Returns whether the sheet consumed it.
    ///
    /// Presses on the panel start a drag (claimed only when drag-to-dismiss is
    /// enabled and the sheet is open); a press and release on the mask of a
    /// modal sheet counts as a mask press.
    pub fn handle_pointer(&self, event: &PointerEvent, viewport: Size) -> bool {
        let consumed = match event.kind {
            PointerEventKind::Down => self.pointer_down(event, viewport),
            PointerEventKind::Move => self.pointer_move(event),
            PointerEventKind::Up => self.pointer_up(event, viewport),
            PointerEventKind::Cancel => self.pointer_cancel(event),
        };
        if consumed {
            event.consume();
        }
        consumed
    }

    fn pointer_down(&self, event: &PointerEvent, viewport: Size) -> bool {
        let mut inner = self.inner.borrow_mut();
        if inner.gesture.is_claimed() && !inner.gesture.tracks(event.id) {
            log::trace!("ignoring pointer {} during a drag", event.id);
            return false;
        }
        let layout = inner.layout(viewport);
        let Point { x, y } = event.position;
        if layout.hits_container(x, y) {
            let armed = inner.drag_armed();
            return inner.gesture.begin_pointer(event.id, event.position, armed);
        }
        if layout.hits_mask(x, y) {
            inner.mask_press = Some(event.id);
            return true;
        }
        false
    }

    fn pointer_move(&self, event: &PointerEvent) -> bool {
        let mut inner = self.inner.borrow_mut();
        if !inner.gesture.tracks(event.id) {
            return inner.mask_press == Some(event.id);
        }
        let sample = inner.gesture.sample_at(event.position);
        inner.apply_drag(sample);
        true
    }

    fn pointer_up(&self, event: &PointerEvent, viewport: Size) -> bool {
        let (dragging, pressed_mask, final_delta) = {
            let mut inner = self.inner.borrow_mut();
            let dragging = inner.gesture.tracks(event.id);
            let final_delta = inner.gesture.sample_at(event.position).vertical_delta;
            let pressed_mask = if inner.mask_press == Some(event.id) {
                inner.mask_press = None;
                Some(
                    inner
                        .layout(viewport)
                        .hits_mask(event.position.x, event.position.y),
                )
            } else {
                None
            };
            (dragging, pressed_mask, final_delta)
        };

        if dragging {
            self.drag_release(final_delta);
            return true;
        }
        match pressed_mask {
            Some(still_on_mask) => {
                if still_on_mask {
                    self.press_mask();
                }
                true
            }
            None => false,
        }
    }

    fn pointer_cancel(&self, event: &PointerEvent) -> bool {
        let last_delta = {
            let mut inner = self.inner.borrow_mut();
            let pressed_mask = inner.mask_press == Some(event.id);
            if pressed_mask {
                inner.mask_press = None;
            }
            if !inner.gesture.tracks(event.id) {
                return pressed_mask;
            }
            inner.gesture.last_delta()
        };
        // A cancelled pointer settles like a release at the last sample.
        self.drag_release(last_delta);
        true
    }

    pub fn visibility(&self) -> VisibilityState {
        self.inner.borrow().state
    }

    pub fn is_overlay_visible(&self) -> bool {
        self.visibility().is_overlay_visible()
    }

    pub fn is_open(&self) -> bool {
        self.visibility().is_open()
    }

    pub fn frame(&self) -> SheetFrame {
        let inner = self.inner.borrow();
        let channels = inner.controller.frame();
        SheetFrame {
            state: inner.state,
            height: channels.height,
            translation_y: channels.translation_y,
            overlay_visible: inner.state.is_overlay_visible(),
        }
    }

    pub fn layout(&self, viewport: Size) -> SheetLayout {
        self.inner.borrow().layout(viewport)
    }

    pub fn config(&self) -> SheetConfig {
        self.inner.borrow().config.clone()
    }

    pub fn style(&self) -> SheetStyle {
        self.inner.borrow().config.style
    }

    /// Read access to the animation channels.
    pub fn with_controller<R>(&self, f: impl FnOnce(&AnimationController) -> R) -> R {
        f(&self.inner.borrow().controller)
    }

    /// Number of close transitions that ran to completion.
    pub fn completed_closes(&self) -> u64 {
        self.inner.borrow().completed_closes
    }
}

impl fmt::Debug for BottomSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("BottomSheet")
            .field("state", &inner.state)
            .field("frame", &inner.controller.frame())
            .field("modal", &inner.config.modal)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/sheet_tests.rs"]
mod tests;
