//! A display-less toolkit.
//!
//! [`HeadlessToolkit`] performs no platform calls. It answers queries from
//! configurable values and records every directive it receives, which makes
//! it the backend of choice for tests and for hosts that drive the shell
//! without a display (for example, automated content checks).
//!
//! # Example
//!
//! ```
//! use horizon_shell::window::{Directive, HeadlessToolkit, IndicatorMode};
//! use horizon_shell::window::Toolkit;
//!
//! let toolkit = HeadlessToolkit::new().with_screen_size(1920, 1080);
//! toolkit.set_indicator_mode(IndicatorMode::Transparent);
//!
//! assert_eq!(
//!     toolkit.directives(),
//!     vec![Directive::SetIndicatorMode(IndicatorMode::Transparent)]
//! );
//! ```

use parking_lot::Mutex;

use super::toolkit::{ContentHandle, FocusTarget, IndicatorMode, ScreenSize, Toolkit, ToolkitError};
use super::window_config::{LayoutConfig, WindowConfig};
use crate::orientation::RotationAngle;
use horizon_shell_core::logging::targets;

/// A directive received by a [`HeadlessToolkit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    CreateWindow { title: String, layout: LayoutConfig },
    Resize(ScreenSize),
    Show,
    SetRotationPreference(RotationAngle),
    SetAvailableRotations(Vec<RotationAngle>),
    Activate,
    Lower,
    SetIndicatorMode(IndicatorMode),
    SetFocus(FocusTarget, bool),
    AttachContent(Option<ContentHandle>),
    RequestExit,
}

#[derive(Debug)]
struct HeadlessState {
    screen: Option<ScreenSize>,
    rotation_supported: bool,
    current_rotation: RotationAngle,
    creation_failure: Option<String>,
    exit_requested: bool,
    directives: Vec<Directive>,
}

/// A [`Toolkit`] without a display that records directives.
#[derive(Debug)]
pub struct HeadlessToolkit {
    state: Mutex<HeadlessState>,
}

impl Default for HeadlessToolkit {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessToolkit {
    /// Create a toolkit with a 720x1280 portrait screen that supports
    /// rotation and currently shows 0 degrees.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(HeadlessState {
                screen: Some(ScreenSize::new(720, 1280)),
                rotation_supported: true,
                current_rotation: RotationAngle::Deg0,
                creation_failure: None,
                exit_requested: false,
                directives: Vec::new(),
            }),
        }
    }

    /// Set the reported screen size.
    pub fn with_screen_size(self, width: u32, height: u32) -> Self {
        self.state.lock().screen = Some(ScreenSize::new(width, height));
        self
    }

    /// Make screen size queries fail.
    pub fn without_screen(self) -> Self {
        self.state.lock().screen = None;
        self
    }

    /// Set whether the window manager reports rotation support.
    pub fn with_rotation_support(self, supported: bool) -> Self {
        self.state.lock().rotation_supported = supported;
        self
    }

    /// Make window creation fail with the given message.
    pub fn with_window_creation_failure(self, message: impl Into<String>) -> Self {
        self.state.lock().creation_failure = Some(message.into());
        self
    }

    /// Simulate the window manager rotating the window.
    pub fn set_current_rotation(&self, angle: RotationAngle) {
        self.state.lock().current_rotation = angle;
    }

    /// Whether [`Toolkit::request_exit`] has been called.
    pub fn exit_requested(&self) -> bool {
        self.state.lock().exit_requested
    }

    /// Get a copy of all directives received so far.
    pub fn directives(&self) -> Vec<Directive> {
        self.state.lock().directives.clone()
    }

    /// Drain the directives received so far.
    pub fn take_directives(&self) -> Vec<Directive> {
        std::mem::take(&mut self.state.lock().directives)
    }

    fn record(&self, directive: Directive) {
        tracing::trace!(target: targets::TOOLKIT, ?directive, "headless directive");
        self.state.lock().directives.push(directive);
    }
}

impl Toolkit for HeadlessToolkit {
    fn create_window(&self, config: &WindowConfig) -> Result<(), ToolkitError> {
        if let Some(message) = self.state.lock().creation_failure.clone() {
            return Err(ToolkitError::WindowCreation(message));
        }
        self.record(Directive::CreateWindow {
            title: config.title().to_string(),
            layout: config.layout().clone(),
        });
        Ok(())
    }

    fn screen_size(&self) -> Result<ScreenSize, ToolkitError> {
        self.state.lock().screen.ok_or(ToolkitError::ScreenUnavailable)
    }

    fn resize(&self, size: ScreenSize) {
        self.record(Directive::Resize(size));
    }

    fn show(&self) {
        self.record(Directive::Show);
    }

    fn set_rotation_preference(&self, angle: RotationAngle) {
        self.record(Directive::SetRotationPreference(angle));
    }

    fn rotation_supported(&self) -> bool {
        self.state.lock().rotation_supported
    }

    fn set_available_rotations(&self, angles: &[RotationAngle]) {
        self.record(Directive::SetAvailableRotations(angles.to_vec()));
    }

    fn current_rotation(&self) -> RotationAngle {
        self.state.lock().current_rotation
    }

    fn activate(&self) {
        self.record(Directive::Activate);
    }

    fn lower(&self) {
        self.record(Directive::Lower);
    }

    fn set_indicator_mode(&self, mode: IndicatorMode) {
        self.record(Directive::SetIndicatorMode(mode));
    }

    fn set_focus(&self, target: FocusTarget, focused: bool) {
        self.record(Directive::SetFocus(target, focused));
    }

    fn attach_content(&self, content: Option<ContentHandle>) {
        self.record(Directive::AttachContent(content));
    }

    fn request_exit(&self) {
        self.state.lock().exit_requested = true;
        self.record(Directive::RequestExit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let toolkit = HeadlessToolkit::new();
        assert_eq!(toolkit.screen_size(), Ok(ScreenSize::new(720, 1280)));
        assert!(toolkit.rotation_supported());
        assert_eq!(toolkit.current_rotation(), RotationAngle::Deg0);
        assert!(!toolkit.exit_requested());
        assert!(toolkit.directives().is_empty());
    }

    #[test]
    fn test_failures() {
        let toolkit = HeadlessToolkit::new()
            .without_screen()
            .with_window_creation_failure("no display");

        assert_eq!(toolkit.screen_size(), Err(ToolkitError::ScreenUnavailable));
        assert_eq!(
            toolkit.create_window(&WindowConfig::default()),
            Err(ToolkitError::WindowCreation("no display".into()))
        );
        assert!(toolkit.directives().is_empty());
    }

    #[test]
    fn test_take_directives_drains() {
        let toolkit = HeadlessToolkit::new();
        toolkit.show();
        toolkit.request_exit();

        assert_eq!(toolkit.take_directives(), vec![Directive::Show, Directive::RequestExit]);
        assert!(toolkit.directives().is_empty());
        assert!(toolkit.exit_requested());
    }
}
