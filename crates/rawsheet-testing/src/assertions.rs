//! Assertion utilities for sheet tests.

use rawsheet_ui::{SheetFrame, VisibilityState};
use rawsheet_ui_graphics::Rect;

/// Assert that a value is within `tolerance` of `expected`.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that a rectangle is approximately equal to another.
pub fn assert_rect_approx_eq(actual: Rect, expected: Rect, tolerance: f32, msg: &str) {
    assert_approx_eq(actual.x, expected.x, tolerance, &format!("{} - x", msg));
    assert_approx_eq(actual.y, expected.y, tolerance, &format!("{} - y", msg));
    assert_approx_eq(
        actual.width,
        expected.width,
        tolerance,
        &format!("{} - width", msg),
    );
    assert_approx_eq(
        actual.height,
        expected.height,
        tolerance,
        &format!("{} - height", msg),
    );
}

/// Assert that recorded heights never increase.
pub fn assert_non_increasing(frames: &[SheetFrame], msg: &str) {
    for pair in frames.windows(2) {
        assert!(
            pair[1].height <= pair[0].height,
            "{}: height grew from {} to {}",
            msg,
            pair[0].height,
            pair[1].height
        );
    }
}

/// Assert that recorded heights never decrease.
pub fn assert_non_decreasing(frames: &[SheetFrame], msg: &str) {
    for pair in frames.windows(2) {
        assert!(
            pair[1].height >= pair[0].height,
            "{}: height shrank from {} to {}",
            msg,
            pair[0].height,
            pair[1].height
        );
    }
}

/// Assert the sequence of distinct states visited, in order.
pub fn assert_state_sequence(frames: &[SheetFrame], expected: &[VisibilityState], msg: &str) {
    let mut visited: Vec<VisibilityState> = Vec::new();
    for frame in frames {
        if visited.last() != Some(&frame.state) {
            visited.push(frame.state);
        }
    }
    assert_eq!(visited.as_slice(), expected, "{}", msg);
}
