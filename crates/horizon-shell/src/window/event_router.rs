//! Toolkit event routing.
//!
//! Backends translate their native callbacks into [`ToolkitEvent`]s and hand
//! them to [`route_toolkit_event`], which normalizes them into calls on the
//! [`NativeWindow`]:
//!
//! - `RotationChanged`: updates the rotation and notifies rotation handlers
//! - `FocusChanged`: forwards focus to the hosted content
//! - `DeleteRequested`: ends the toolkit's main loop
//! - `ProfileChanged`: logged only
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_shell::window::{route_toolkit_event, HeadlessToolkit, NativeWindow, ToolkitEvent, WindowConfig};
//!
//! let window = NativeWindow::new(Arc::new(HeadlessToolkit::new()), WindowConfig::default());
//! window.initialize()?;
//!
//! assert!(route_toolkit_event(&window, ToolkitEvent::RotationChanged { degrees: 90 }));
//! # Ok::<(), horizon_shell_core::ShellError>(())
//! ```

use horizon_shell_core::logging::targets;

use super::native_window::NativeWindow;

/// A raw event reported by the windowing toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolkitEvent {
    /// The window manager rotated the window.
    RotationChanged { degrees: i32 },
    /// The focus proxy gained (`true`) or lost (`false`) focus.
    FocusChanged(bool),
    /// The user or window manager asked to close the window.
    DeleteRequested,
    /// The window manager switched the window's profile.
    ProfileChanged,
}

/// Route a single toolkit event to the window.
///
/// Returns `true` if the event was handled. Events that arrive before the
/// window is initialized are dropped with a warning and return `false`.
pub fn route_toolkit_event(window: &NativeWindow, event: ToolkitEvent) -> bool {
    let result = match event {
        ToolkitEvent::RotationChanged { degrees } => window.on_rotation_changed(degrees),
        ToolkitEvent::FocusChanged(got_focus) => window.on_focus_changed(got_focus),
        ToolkitEvent::DeleteRequested => window.on_delete_requested(),
        ToolkitEvent::ProfileChanged => {
            window.on_profile_changed();
            Ok(())
        }
    };

    match result {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(target: targets::WINDOW, ?event, %err, "dropping toolkit event");
            false
        }
    }
}

/// Translate a winit window event into a toolkit event.
///
/// Only the events the shell reacts to have a translation. Desktop window
/// managers do not rotate windows, so no rotation events come from winit.
#[cfg(feature = "winit")]
pub fn from_winit_event(event: &winit::event::WindowEvent) -> Option<ToolkitEvent> {
    use winit::event::WindowEvent;

    match event {
        WindowEvent::Focused(focused) => Some(ToolkitEvent::FocusChanged(*focused)),
        WindowEvent::CloseRequested => Some(ToolkitEvent::DeleteRequested),
        WindowEvent::ThemeChanged(_) => Some(ToolkitEvent::ProfileChanged),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::window::headless::{Directive, HeadlessToolkit};
    use crate::window::toolkit::{ContentHandle, FocusTarget};
    use crate::window::window_config::WindowConfig;

    #[test]
    fn test_events_dropped_before_initialize() {
        let window = NativeWindow::new(Arc::new(HeadlessToolkit::new()), WindowConfig::default());
        assert!(!route_toolkit_event(&window, ToolkitEvent::FocusChanged(true)));
        assert!(!route_toolkit_event(&window, ToolkitEvent::DeleteRequested));
    }

    #[test]
    fn test_routes_to_window() {
        let toolkit = Arc::new(HeadlessToolkit::new());
        let window = NativeWindow::new(toolkit.clone(), WindowConfig::default());
        window.initialize().unwrap();
        let content = ContentHandle::from_raw(11);
        window.set_content(Some(content)).unwrap();
        toolkit.take_directives();

        assert!(route_toolkit_event(&window, ToolkitEvent::RotationChanged { degrees: 270 }));
        assert!(route_toolkit_event(&window, ToolkitEvent::FocusChanged(true)));
        assert!(route_toolkit_event(&window, ToolkitEvent::ProfileChanged));
        assert!(route_toolkit_event(&window, ToolkitEvent::DeleteRequested));

        assert_eq!(window.rotation().degrees(), 270);
        assert_eq!(
            toolkit.take_directives(),
            vec![
                Directive::SetFocus(FocusTarget::Content(content), true),
                Directive::RequestExit,
            ]
        );
    }
}
