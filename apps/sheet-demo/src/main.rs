use std::thread;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use rawsheet_foundation::PointerEvent;
use rawsheet_runtime_std::StdRuntime;
use rawsheet_ui::{
    BottomSheet, Easing, OverlayAnimation, OverlayHost, OverlayPresentation, SheetConfig,
    VisibilityState,
};
use rawsheet_ui_graphics::Size;

const VIEWPORT: Size = Size::new(360.0, 640.0);
const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const MAX_FRAMES: usize = 600;

/// Stands in for a platform window that hosts the modal sheet.
struct ConsoleOverlay;

impl OverlayHost for ConsoleOverlay {
    fn show(&mut self, visible: bool, presentation: &OverlayPresentation<'_>) {
        log::info!(
            "overlay {} ({:?}, {} orientations)",
            if visible { "shown" } else { "hidden" },
            presentation.animation,
            presentation.supported_orientations.len()
        );
    }
}

fn init_logging() {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

/// Answers frame requests on the wall clock until the runtime stops asking.
fn settle(runtime: &StdRuntime, sheet: &BottomSheet, label: &str) -> Result<()> {
    let mut frames = 0;
    while runtime.take_frame_request() {
        ensure!(frames < MAX_FRAMES, "{label}: still animating after {MAX_FRAMES} frames");
        thread::sleep(FRAME_INTERVAL);
        let time = runtime.pump_frame();
        let frame = sheet.frame();
        if frames % 4 == 0 {
            println!(
                "  [{label}] t={:>4}ms {:?} height={:>6.1} translation={:>5.1}",
                time / 1_000_000,
                frame.state,
                frame.height,
                frame.translation_y
            );
        }
        frames += 1;
    }
    println!("  [{label}] settled after {frames} frames: {:?}", sheet.frame());
    Ok(())
}

fn drag_by(sheet: &BottomSheet, runtime: &StdRuntime, dy: f32, steps: usize) {
    let handle = sheet.layout(VIEWPORT).handle;
    let (x, y) = (handle.x + handle.width / 2.0, handle.y);
    let down = PointerEvent::down(x, y);
    sheet.handle_pointer(&down, VIEWPORT);
    log::info!("drag by {dy} claimed: {}", down.is_consumed());
    for step in 1..=steps {
        let delta = dy * step as f32 / steps as f32;
        sheet.handle_pointer(&PointerEvent::moved(x, y + delta), VIEWPORT);
        thread::sleep(FRAME_INTERVAL);
        runtime.pump_frame();
    }
    sheet.handle_pointer(&PointerEvent::up(x, y + dy), VIEWPORT);
}

fn main() -> Result<()> {
    init_logging();

    println!("=== rawsheet demo ===");
    println!("Scripted sheet: open, short drag, long drag, reopen, mask tap.");
    println!();

    let runtime = StdRuntime::new();
    let config = SheetConfig::default()
        .with_height(300.0)
        .with_duration(250)
        .with_close_on_drag_down(true)
        .with_easing(Easing::FastOutSlowIn)
        .with_modal(true)
        .with_overlay_animation(OverlayAnimation::Slide);
    let sheet = BottomSheet::new(config, runtime.handle())
        .context("building the demo sheet")?;
    sheet.set_overlay_host(ConsoleOverlay);
    sheet.set_on_close(|| log::info!("on_close fired"));

    sheet.open();
    settle(&runtime, &sheet, "open")?;

    drag_by(&sheet, &runtime, 40.0, 5);
    settle(&runtime, &sheet, "spring back")?;
    ensure!(sheet.visibility() == VisibilityState::Open, "short drag closed the sheet");

    drag_by(&sheet, &runtime, 140.0, 5);
    settle(&runtime, &sheet, "drag close")?;
    ensure!(sheet.visibility() == VisibilityState::Closed, "long drag left the sheet open");

    sheet.open();
    settle(&runtime, &sheet, "reopen")?;

    let container = sheet.layout(VIEWPORT).container;
    let (x, y) = (VIEWPORT.width / 2.0, container.y / 2.0);
    sheet.handle_pointer(&PointerEvent::down(x, y), VIEWPORT);
    sheet.handle_pointer(&PointerEvent::up(x, y), VIEWPORT);
    settle(&runtime, &sheet, "mask tap")?;

    println!();
    println!("completed closes: {}", sheet.completed_closes());
    Ok(())
}
