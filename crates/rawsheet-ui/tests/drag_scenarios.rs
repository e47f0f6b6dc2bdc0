use rawsheet_testing::prelude::*;
use rawsheet_ui::{DragOffset, PointerEvent, SheetConfig, VisibilityState};
use rawsheet_ui_graphics::Rect;

fn opened(config: SheetConfig) -> SheetTestRule {
    let mut rule = SheetTestRule::new(config).expect("valid config");
    assert!(rule.sheet().open());
    rule.wait_for_idle();
    assert_eq!(rule.sheet().visibility(), VisibilityState::Open);
    rule.take_history();
    rule
}

fn drag_enabled() -> SheetConfig {
    SheetConfig::default()
        .with_height(260.0)
        .with_duration(200)
        .with_close_on_drag_down(true)
}

#[test]
fn open_grows_height_monotonically() {
    let mut rule = SheetTestRule::new(SheetConfig::default()).expect("valid config");
    rule.sheet().open();
    rule.wait_for_idle();

    let history = rule.take_history();
    assert_non_decreasing(&history, "opening");
    assert_state_sequence(
        &history,
        &[VisibilityState::Opening, VisibilityState::Open],
        "open cycle",
    );
    assert_approx_eq(rule.sheet().frame().height, 260.0, 1e-3, "open height");
}

#[test]
fn long_drag_commits_close() {
    let mut rule = opened(drag_enabled());

    assert!(rule.drag_sheet_by(80.0, 4));
    assert_eq!(rule.sheet().visibility(), VisibilityState::Closing);
    assert_approx_eq(
        rule.sheet().frame().translation_y,
        80.0,
        1e-3,
        "offset held while closing",
    );

    rule.wait_for_idle();
    let history = rule.take_history();
    assert_state_sequence(
        &history,
        &[
            VisibilityState::Open,
            VisibilityState::Closing,
            VisibilityState::Closed,
        ],
        "drag close",
    );
    assert_non_increasing(&history, "closing");
    assert_eq!(rule.close_count(), 1);

    let frame = rule.sheet().frame();
    assert_eq!(frame.height, 0.0);
    assert_eq!(frame.translation_y, 0.0);
}

#[test]
fn short_drag_springs_back() {
    let mut rule = opened(drag_enabled());

    assert!(rule.drag_sheet_by(50.0, 5));
    assert!(rule
        .sheet()
        .with_controller(|controller| controller.is_animating(DragOffset)));

    rule.wait_for_idle();
    assert_eq!(rule.sheet().visibility(), VisibilityState::Open);
    assert_approx_eq(
        rule.sheet().frame().translation_y,
        0.0,
        0.5,
        "offset after spring",
    );
    assert_approx_eq(rule.sheet().frame().height, 260.0, 1e-3, "height kept");
    assert_eq!(rule.close_count(), 0);
    assert_state_sequence(rule.history(), &[VisibilityState::Open], "stays open");
}

#[test]
fn drag_disabled_never_moves_offset() {
    let mut rule = opened(SheetConfig::default().with_close_on_drag_down(false));
    let requests = rule.frame_requests();

    assert!(!rule.drag_sheet_by(200.0, 8));
    assert!(rule.is_idle());
    assert_eq!(rule.frame_requests(), requests);

    assert!(rule
        .history()
        .iter()
        .all(|frame| frame.translation_y == 0.0));
    assert_eq!(rule.sheet().visibility(), VisibilityState::Open);
    assert_eq!(rule.close_count(), 0);
}

#[test]
fn upward_drag_is_ignored() {
    let mut rule = opened(drag_enabled());

    rule.drag_sheet_by(-120.0, 4);
    rule.wait_for_idle();

    assert!(rule
        .history()
        .iter()
        .all(|frame| frame.translation_y == 0.0));
    assert_eq!(rule.sheet().visibility(), VisibilityState::Open);
}

#[test]
fn cancelled_pointer_settles_like_release() {
    let mut rule = opened(drag_enabled());
    let handle = rule.layout().handle;
    let (x, y) = (handle.x + 1.0, handle.y + 1.0);

    assert!(rule.press(x, y));
    assert!(rule.move_to(x, y + 100.0));
    rule.advance_frame();
    assert!(rule.cancel_pointer(x, y + 100.0));

    assert_eq!(rule.sheet().visibility(), VisibilityState::Closing);
    rule.wait_for_idle();
    assert_eq!(rule.close_count(), 1);
}

#[test]
fn short_cancelled_drag_springs_back() {
    let mut rule = opened(drag_enabled());
    let handle = rule.layout().handle;
    let (x, y) = (handle.x + 1.0, handle.y + 1.0);

    rule.press(x, y);
    rule.move_to(x, y + 30.0);
    rule.cancel_pointer(x, y + 30.0);
    rule.wait_for_idle();

    assert_eq!(rule.sheet().visibility(), VisibilityState::Open);
    assert_eq!(rule.close_count(), 0);
}

#[test]
fn press_outside_panel_is_not_a_drag() {
    let mut rule = opened(drag_enabled());

    // Non-modal: nothing above the panel belongs to the sheet.
    assert!(!rule.press(10.0, 10.0));
    assert!(!rule.move_to(10.0, 300.0));
    assert!(!rule.release(10.0, 300.0));
    assert_eq!(rule.sheet().visibility(), VisibilityState::Open);
}

#[test]
fn drag_follows_pointer_in_layout() {
    let mut rule = opened(drag_enabled());
    let resting = rule.layout().container;
    let handle = rule.layout().handle;

    rule.press(handle.x, handle.y);
    rule.move_to(handle.x, handle.y + 40.0);
    rule.advance_frame();

    assert_rect_approx_eq(
        rule.layout().container,
        resting.translate(0.0, 40.0),
        1e-3,
        "dragged container",
    );
    rule.release(handle.x, handle.y + 40.0);
    rule.wait_for_idle();
    assert_rect_approx_eq(rule.layout().container, resting, 0.5, "restored");
}

#[test]
fn layout_anchors_panel_to_viewport_bottom() {
    let rule = opened(SheetConfig::default().with_height(300.0)).with_viewport(400.0, 800.0);
    let layout = rule.layout();

    assert_rect_approx_eq(
        layout.container,
        Rect::new(0.0, 500.0, 400.0, 300.0),
        1e-3,
        "container",
    );
    assert_rect_approx_eq(
        layout.handle,
        Rect::new(190.0, 512.0, 20.0, 5.0),
        1e-3,
        "handle",
    );
    assert!(layout.mask.is_none());
}

#[test]
fn close_interrupting_open_starts_from_live_height() {
    let mut rule = SheetTestRule::new(drag_enabled()).expect("valid config");
    rule.sheet().open();
    rule.advance_time_millis(100);

    let interrupted = rule.sheet().frame().height;
    assert!(interrupted > 0.0 && interrupted < 260.0);

    rule.take_history();
    assert!(rule.sheet().close());
    rule.wait_for_idle();

    let history = rule.take_history();
    assert!(history[0].height <= interrupted);
    assert_non_increasing(&history, "interrupted close");
    assert_eq!(rule.sheet().visibility(), VisibilityState::Closed);
    assert_eq!(rule.close_count(), 1);
}

#[test]
fn sheet_reopens_after_drag_close() {
    let mut rule = opened(drag_enabled());
    rule.drag_sheet_by(150.0, 3);
    rule.wait_for_idle();
    assert_eq!(rule.close_count(), 1);

    assert!(rule.sheet().open());
    rule.wait_for_idle();
    assert_eq!(rule.sheet().visibility(), VisibilityState::Open);
    assert_eq!(rule.sheet().frame().translation_y, 0.0);

    rule.drag_sheet_by(150.0, 3);
    rule.wait_for_idle();
    assert_eq!(rule.close_count(), 2);
}

#[test]
fn second_pointer_does_not_hijack_a_drag() {
    let mut rule = opened(drag_enabled());
    let handle = rule.layout().handle;
    let (x, y) = (handle.x + 1.0, handle.y + 1.0);
    let screen = DEFAULT_VIEWPORT;

    let sheet = rule.sheet().clone();
    assert!(sheet.handle_pointer(&PointerEvent::down(x, y).with_id(1), screen));
    assert!(sheet.handle_pointer(&PointerEvent::moved(x, y + 100.0).with_id(1), screen));
    rule.advance_frame();

    let second = PointerEvent::down(x + 50.0, y + 150.0).with_id(2);
    assert!(!sheet.handle_pointer(&second, screen));
    assert!(!second.is_consumed());
    let second_up = PointerEvent::up(x + 50.0, y + 150.0).with_id(2);
    assert!(!sheet.handle_pointer(&second_up, screen));
    assert_eq!(sheet.visibility(), VisibilityState::Open);

    assert!(sheet.handle_pointer(&PointerEvent::up(x, y + 100.0).with_id(1), screen));
    assert_eq!(sheet.visibility(), VisibilityState::Closing);
    rule.wait_for_idle();
    assert_eq!(rule.close_count(), 1);
}
