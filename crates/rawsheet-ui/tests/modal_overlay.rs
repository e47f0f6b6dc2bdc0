use rawsheet_testing::prelude::*;
use rawsheet_ui::{Orientation, OverlayAnimation, SheetConfig, VisibilityState};
use rawsheet_ui_graphics::Rect;

fn modal() -> SheetConfig {
    SheetConfig::default()
        .with_modal(true)
        .with_overlay_animation(OverlayAnimation::Fade)
}

fn opened(config: SheetConfig) -> SheetTestRule {
    let mut rule = SheetTestRule::new(config).expect("valid config");
    rule.sheet().open();
    rule.wait_for_idle();
    rule
}

#[test]
fn host_is_shown_on_open_and_hidden_after_close() {
    let mut rule = opened(modal());

    let calls = rule.overlay_calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].visible);
    assert_eq!(calls[0].animation, OverlayAnimation::Fade);
    assert_eq!(calls[0].orientations, Orientation::ALL.len());

    rule.sheet().close();
    rule.advance_frame();
    assert!(rule.sheet().is_overlay_visible());
    assert_eq!(rule.overlay_calls().len(), 1);

    rule.wait_for_idle();
    let calls = rule.overlay_calls();
    assert_eq!(calls.len(), 2);
    assert!(!calls[1].visible);
    assert!(!rule.sheet().is_overlay_visible());
}

#[test]
fn restricted_orientations_reach_the_host() {
    let config = modal().with_supported_orientations([Orientation::Portrait]);
    let rule = opened(config);

    assert_eq!(rule.overlay_calls()[0].orientations, 1);
}

#[test]
fn inline_sheet_never_touches_the_host() {
    let mut rule = opened(SheetConfig::default());
    rule.sheet().close();
    rule.wait_for_idle();

    assert!(rule.overlay_calls().is_empty());
    assert_eq!(rule.close_count(), 1);
}

#[test]
fn tapping_the_mask_closes() {
    let mut rule = opened(modal());
    let mask = rule.mask_point();

    assert!(rule.tap(mask.x, mask.y));
    assert_eq!(rule.sheet().visibility(), VisibilityState::Closing);

    rule.wait_for_idle();
    assert_eq!(rule.sheet().visibility(), VisibilityState::Closed);
    assert_eq!(rule.close_count(), 1);
}

#[test]
fn mask_tap_is_consumed_but_ignored_when_disabled() {
    let mut rule = opened(modal().with_close_on_press_mask(false));
    let mask = rule.mask_point();

    assert!(rule.tap(mask.x, mask.y));
    rule.wait_for_idle();
    assert_eq!(rule.sheet().visibility(), VisibilityState::Open);
    assert_eq!(rule.close_count(), 0);
}

#[test]
fn press_on_mask_released_on_panel_does_not_close() {
    let mut rule = opened(modal());
    let mask = rule.mask_point();
    let container = rule.layout().container;

    assert!(rule.press(mask.x, mask.y));
    assert!(rule.release(container.x + 10.0, container.y + 10.0));
    rule.wait_for_idle();
    assert_eq!(rule.sheet().visibility(), VisibilityState::Open);
}

#[test]
fn tap_on_panel_is_not_a_mask_press() {
    let mut rule = opened(modal());
    let container = rule.layout().container;

    rule.tap(container.x + 10.0, container.y + 40.0);
    rule.wait_for_idle();
    assert_eq!(rule.sheet().visibility(), VisibilityState::Open);
}

#[test]
fn mask_covers_space_above_resting_panel() {
    let rule = opened(modal()).with_viewport(400.0, 800.0);
    let layout = rule.layout();

    let mask = layout.mask.expect("modal sheet has a mask");
    assert_rect_approx_eq(mask, Rect::new(0.0, 0.0, 400.0, 540.0), 1e-3, "mask");
    assert!(layout.hits_mask(200.0, 100.0));
    assert!(!layout.hits_mask(200.0, 600.0));
}

#[test]
fn closed_sheet_has_no_mask() {
    let rule = SheetTestRule::new(modal()).expect("valid config");
    assert!(rule.layout().mask.is_none());
    assert!(rule.overlay_calls().is_empty());
}

#[test]
fn host_close_request_closes_once() {
    let mut rule = opened(modal());

    assert!(rule.sheet().request_close());
    assert!(!rule.sheet().request_close());
    rule.wait_for_idle();

    assert_eq!(rule.close_count(), 1);
    assert_eq!(rule.overlay_calls().len(), 2);
}

#[test]
fn reopening_shows_the_host_again() {
    let mut rule = opened(modal());
    rule.sheet().close();
    rule.wait_for_idle();
    rule.sheet().open();
    rule.wait_for_idle();

    let visible: Vec<bool> = rule
        .overlay_calls()
        .iter()
        .map(|call| call.visible)
        .collect();
    assert_eq!(visible, vec![true, false, true]);
}
