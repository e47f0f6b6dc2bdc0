//! Shared gesture constants.

/// A downward drag commits to closing once it travels further than
/// `height / CLOSE_THRESHOLD_DIVISOR`, where `height` is the configured open
/// height of the sheet.
pub const CLOSE_THRESHOLD_DIVISOR: f32 = 4.0;
