use super::*;

#[test]
fn defaults_match_classic_sheet() {
    let config = SheetConfig::default();
    assert_eq!(config.height, 260.0);
    assert_eq!(config.min_closing_height, 0.0);
    assert_eq!(config.duration_millis, 200);
    assert!(!config.close_on_drag_down);
    assert!(config.close_on_press_mask);
    assert!(!config.modal);
    assert_eq!(config.overlay_animation, OverlayAnimation::None);
    assert_eq!(config.supported_orientations.as_slice(), &Orientation::ALL);
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn builder_sets_fields() {
    let config = SheetConfig::new()
        .with_height(400.0)
        .with_min_closing_height(40.0)
        .with_duration(300)
        .with_close_on_drag_down(true)
        .with_close_on_press_mask(false)
        .with_modal(true)
        .with_overlay_animation(OverlayAnimation::Fade)
        .with_supported_orientations([Orientation::Portrait]);

    assert_eq!(config.height, 400.0);
    assert_eq!(config.min_closing_height, 40.0);
    assert_eq!(config.duration_millis, 300);
    assert!(config.close_on_drag_down);
    assert!(!config.close_on_press_mask);
    assert!(config.modal);
    assert_eq!(config.overlay_animation, OverlayAnimation::Fade);
    assert_eq!(
        config.supported_orientations.as_slice(),
        &[Orientation::Portrait]
    );
}

#[test]
fn rejects_invalid_heights() {
    assert_eq!(
        SheetConfig::new().with_height(-1.0).validate(),
        Err(ConfigError::InvalidHeight(-1.0))
    );
    assert!(matches!(
        SheetConfig::new().with_height(f32::NAN).validate(),
        Err(ConfigError::InvalidHeight(_))
    ));
    assert_eq!(
        SheetConfig::new()
            .with_height(100.0)
            .with_min_closing_height(120.0)
            .validate(),
        Err(ConfigError::InvalidMinClosingHeight {
            min_closing_height: 120.0,
            height: 100.0,
        })
    );
}

#[test]
fn modal_sheet_needs_an_orientation() {
    let config = SheetConfig::new()
        .with_modal(true)
        .with_supported_orientations([]);
    assert_eq!(config.validate(), Err(ConfigError::NoSupportedOrientations));
    assert_eq!(config.with_modal(false).validate(), Ok(()));
}

#[test]
fn style_overrides_merge_over_defaults() {
    let config = SheetConfig::new().with_style(StyleOverrides {
        container_background: Some(Color::BLACK),
        ..StyleOverrides::default()
    });
    let defaults = SheetStyle::default();
    assert_eq!(config.style.container_background, Color::BLACK);
    assert_eq!(config.style.handle_color, defaults.handle_color);
    assert_eq!(config.style.wrapper_background, defaults.wrapper_background);
}

#[test]
fn errors_render_readable_messages() {
    assert_eq!(
        ConfigError::InvalidMinClosingHeight {
            min_closing_height: 300.0,
            height: 260.0,
        }
        .to_string(),
        "min closing height 300 must be within 0..=260"
    );
}
