//! A [`Toolkit`] backed by a winit window.
//!
//! Desktop hosts create the window inside their winit `ApplicationHandler`
//! (typically in `resumed()`), wrap it in a [`WinitToolkit`] and hand that to
//! [`NativeWindow`](super::NativeWindow). winit events are translated with
//! [`from_winit_event`](super::from_winit_event).
//!
//! Desktop window managers have no rotation protocol, so this backend reports
//! rotation as unsupported and always 0 degrees. Full screen (transparent
//! indicator) maps to borderless full screen on the current monitor.
//!
//! ```ignore
//! use horizon_shell::window::{NativeWindow, WindowConfig, WinitToolkit};
//!
//! fn resumed(&mut self, event_loop: &ActiveEventLoop) {
//!     let config = WindowConfig::new("My App");
//!     let window = event_loop
//!         .create_window(WinitToolkit::window_attributes(&config))
//!         .expect("window");
//!     let toolkit = Arc::new(WinitToolkit::new(Arc::new(window)));
//!     let shell = NativeWindow::new(toolkit, config);
//!     shell.initialize()?;
//!     shell.show()?;
//! }
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use winit::dpi::PhysicalSize;
use winit::window::{Fullscreen, Window, WindowAttributes};

use super::toolkit::{ContentHandle, FocusTarget, IndicatorMode, ScreenSize, Toolkit, ToolkitError};
use super::window_config::WindowConfig;
use crate::orientation::RotationAngle;
use horizon_shell_core::logging::targets;

/// A [`Toolkit`] over an existing winit window.
#[derive(Debug)]
pub struct WinitToolkit {
    window: Arc<Window>,
    exit_requested: AtomicBool,
}

impl WinitToolkit {
    /// Wrap a window created by the host's event loop.
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            exit_requested: AtomicBool::new(false),
        }
    }

    /// Window attributes matching `config`.
    ///
    /// The window starts hidden; [`NativeWindow::show`](super::NativeWindow::show)
    /// reveals it once the shell is set up. A background that is not fully
    /// opaque requests a transparent window.
    pub fn window_attributes(config: &WindowConfig) -> WindowAttributes {
        Window::default_attributes()
            .with_title(config.title())
            .with_transparent(config.layout().background[3] < u8::MAX)
            .with_visible(false)
    }

    /// Get the wrapped winit window.
    pub fn winit_window(&self) -> &Window {
        &self.window
    }

    /// Whether the shell asked to leave the main loop.
    ///
    /// winit windows cannot stop the event loop themselves; the host polls
    /// this and calls `ActiveEventLoop::exit`.
    pub fn exit_requested(&self) -> bool {
        self.exit_requested.load(Ordering::SeqCst)
    }
}

impl Toolkit for WinitToolkit {
    fn create_window(&self, config: &WindowConfig) -> Result<(), ToolkitError> {
        let layout = config.layout();
        self.window.set_title(config.title());
        self.window.set_transparent(layout.background[3] < u8::MAX);
        tracing::debug!(
            target: targets::TOOLKIT,
            theme = %layout.theme_path.display(),
            group = %layout.group,
            focus_style = %layout.focus_style,
            "theme layout is drawn by the content on desktop"
        );
        Ok(())
    }

    fn screen_size(&self) -> Result<ScreenSize, ToolkitError> {
        let monitor = self
            .window
            .current_monitor()
            .ok_or(ToolkitError::ScreenUnavailable)?;
        let size = monitor.size();
        Ok(ScreenSize::new(size.width, size.height))
    }

    fn resize(&self, size: ScreenSize) {
        let _ = self
            .window
            .request_inner_size(PhysicalSize::new(size.width, size.height));
    }

    fn show(&self) {
        self.window.set_visible(true);
    }

    fn set_rotation_preference(&self, angle: RotationAngle) {
        tracing::trace!(target: targets::TOOLKIT, %angle, "rotation preference ignored on desktop");
    }

    fn rotation_supported(&self) -> bool {
        false
    }

    fn set_available_rotations(&self, _angles: &[RotationAngle]) {}

    fn current_rotation(&self) -> RotationAngle {
        RotationAngle::Deg0
    }

    fn activate(&self) {
        self.window.set_minimized(false);
        self.window.focus_window();
    }

    fn lower(&self) {
        self.window.set_minimized(true);
    }

    fn set_indicator_mode(&self, mode: IndicatorMode) {
        let fullscreen = match mode {
            IndicatorMode::Transparent => Some(Fullscreen::Borderless(None)),
            IndicatorMode::Opaque => None,
        };
        self.window.set_fullscreen(fullscreen);
    }

    fn set_focus(&self, target: FocusTarget, focused: bool) {
        match target {
            FocusTarget::FocusProxy if focused => self.window.focus_window(),
            // Content views embedded in a winit window manage their own focus.
            _ => tracing::trace!(target: targets::TOOLKIT, ?target, focused, "focus directive left to content"),
        }
    }

    fn attach_content(&self, content: Option<ContentHandle>) {
        tracing::trace!(target: targets::TOOLKIT, content = ?content.map(ContentHandle::as_raw), "content attached");
    }

    fn request_exit(&self) {
        self.exit_requested.store(true, Ordering::SeqCst);
    }
}
