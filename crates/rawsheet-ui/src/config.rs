//! Sheet configuration.
//!
//! [`SheetConfig`] is immutable once a sheet is built. Defaults match the
//! classic bottom sheet: 260px tall, 200ms open/close, drag-to-dismiss off,
//! mask press closes, not modal.

use std::fmt;

use rawsheet_animation::{Easing, SpringSpec};
use rawsheet_ui_graphics::Color;
use smallvec::SmallVec;

/// How the overlay host itself appears when shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayAnimation {
    #[default]
    None,
    Slide,
    Fade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Portrait,
    PortraitUpsideDown,
    Landscape,
    LandscapeLeft,
    LandscapeRight,
}

impl Orientation {
    pub const ALL: [Orientation; 5] = [
        Orientation::Portrait,
        Orientation::PortraitUpsideDown,
        Orientation::Landscape,
        Orientation::LandscapeLeft,
        Orientation::LandscapeRight,
    ];
}

pub type Orientations = SmallVec<[Orientation; 5]>;

/// Colors for the parts of a sheet. Unset fields keep their defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetStyle {
    /// Dimming layer behind the sheet in modal mode.
    pub wrapper_background: Color,
    pub mask_background: Color,
    pub container_background: Color,
    pub handle_color: Color,
}

impl Default for SheetStyle {
    fn default() -> Self {
        Self {
            wrapper_background: Color::from_rgba_u8(0x00, 0x00, 0x00, 0x77),
            mask_background: Color::TRANSPARENT,
            container_background: Color::WHITE,
            handle_color: Color::from_rgb_u8(0xcb, 0xcb, 0xcb),
        }
    }
}

/// Partial style, merged over [`SheetStyle::default`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StyleOverrides {
    pub wrapper_background: Option<Color>,
    pub mask_background: Option<Color>,
    pub container_background: Option<Color>,
    pub handle_color: Option<Color>,
}

impl SheetStyle {
    pub fn merged(self, overrides: &StyleOverrides) -> Self {
        Self {
            wrapper_background: overrides
                .wrapper_background
                .unwrap_or(self.wrapper_background),
            mask_background: overrides.mask_background.unwrap_or(self.mask_background),
            container_background: overrides
                .container_background
                .unwrap_or(self.container_background),
            handle_color: overrides.handle_color.unwrap_or(self.handle_color),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetConfig {
    /// Open height in logical pixels.
    pub height: f32,
    /// Height the close animation ends at before the sheet is hidden.
    pub min_closing_height: f32,
    /// Duration of open and close transitions.
    pub duration_millis: u64,
    pub close_on_drag_down: bool,
    pub close_on_press_mask: bool,
    /// Host the sheet in an overlay with a dimming mask.
    pub modal: bool,
    pub overlay_animation: OverlayAnimation,
    pub supported_orientations: Orientations,
    pub easing: Easing,
    /// Spring used to return the sheet after a cancelled drag.
    pub spring: SpringSpec,
    pub style: SheetStyle,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            height: 260.0,
            min_closing_height: 0.0,
            duration_millis: 200,
            close_on_drag_down: false,
            close_on_press_mask: true,
            modal: false,
            overlay_animation: OverlayAnimation::None,
            supported_orientations: Orientation::ALL.into_iter().collect(),
            easing: Easing::default(),
            spring: SpringSpec::default(),
            style: SheetStyle::default(),
        }
    }
}

impl SheetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    pub fn with_min_closing_height(mut self, min_closing_height: f32) -> Self {
        self.min_closing_height = min_closing_height;
        self
    }

    pub fn with_duration(mut self, duration_millis: u64) -> Self {
        self.duration_millis = duration_millis;
        self
    }

    pub fn with_close_on_drag_down(mut self, enabled: bool) -> Self {
        self.close_on_drag_down = enabled;
        self
    }

    pub fn with_close_on_press_mask(mut self, enabled: bool) -> Self {
        self.close_on_press_mask = enabled;
        self
    }

    pub fn with_modal(mut self, modal: bool) -> Self {
        self.modal = modal;
        self
    }

    pub fn with_overlay_animation(mut self, animation: OverlayAnimation) -> Self {
        self.overlay_animation = animation;
        self
    }

    pub fn with_supported_orientations(
        mut self,
        orientations: impl IntoIterator<Item = Orientation>,
    ) -> Self {
        self.supported_orientations = orientations.into_iter().collect();
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_spring(mut self, spring: SpringSpec) -> Self {
        self.spring = spring;
        self
    }

    pub fn with_style(mut self, overrides: StyleOverrides) -> Self {
        self.style = self.style.merged(&overrides);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.height.is_finite() || self.height < 0.0 {
            return Err(ConfigError::InvalidHeight(self.height));
        }
        if !self.min_closing_height.is_finite()
            || self.min_closing_height < 0.0
            || self.min_closing_height > self.height
        {
            return Err(ConfigError::InvalidMinClosingHeight {
                min_closing_height: self.min_closing_height,
                height: self.height,
            });
        }
        if self.modal && self.supported_orientations.is_empty() {
            return Err(ConfigError::NoSupportedOrientations);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidHeight(f32),
    InvalidMinClosingHeight { min_closing_height: f32, height: f32 },
    NoSupportedOrientations,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidHeight(height) => {
                write!(f, "sheet height must be a finite, non-negative number, got {height}")
            }
            ConfigError::InvalidMinClosingHeight {
                min_closing_height,
                height,
            } => write!(
                f,
                "min closing height {min_closing_height} must be within 0..={height}"
            ),
            ConfigError::NoSupportedOrientations => {
                write!(f, "a modal sheet needs at least one supported orientation")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
