//! Drive the window controller over the headless toolkit.
//!
//! Run with `RUST_LOG=horizon_shell=trace` to see every step.

use std::sync::Arc;

use horizon_shell::prelude::*;
use tracing_subscriber::EnvFilter;

const CONFIG: &str = r#"
title = "Headless Player"
orientation = "portrait-primary"

[layout]
background = [0, 0, 0, 255]
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("horizon_shell=debug")),
        )
        .init();

    let config = WindowConfig::from_toml_str(CONFIG)?;
    let toolkit = Arc::new(HeadlessToolkit::new().with_screen_size(1920, 1080));
    let window = NativeWindow::new(toolkit.clone(), config);
    window.initialize()?;

    println!(
        "natural orientation: {:?}, locked at {}",
        window.natural_orientation(),
        window.rotation()
    );

    let id = window.add_rotation_handler(|angle: RotationAngle| {
        println!("rotated to {angle}");
    });

    window.set_content(Some(ContentHandle::from_raw(1)))?;
    window.show()?;
    window.activate()?;

    for event in [
        ToolkitEvent::FocusChanged(true),
        ToolkitEvent::RotationChanged { degrees: 90 },
        ToolkitEvent::RotationChanged { degrees: 540 },
        ToolkitEvent::ProfileChanged,
    ] {
        route_toolkit_event(&window, event);
    }

    window.remove_rotation_handler(id);
    window.set_auto_rotation()?;
    route_toolkit_event(&window, ToolkitEvent::DeleteRequested);

    for directive in toolkit.directives() {
        println!("{directive:?}");
    }
    println!("exit requested: {}", toolkit.exit_requested());
    Ok(())
}
