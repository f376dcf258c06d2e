//! The windowing toolkit seam.
//!
//! The controller never talks to a display server itself. Everything it needs
//! from the platform is expressed by the [`Toolkit`] trait: window creation,
//! rotation preferences, activation, the status indicator and input focus.
//! Backends implement it over a real toolkit; [`super::HeadlessToolkit`]
//! implements it without a display.

use std::fmt;

use thiserror::Error;

use super::window_config::WindowConfig;
use crate::orientation::RotationAngle;

/// Errors reported by a [`Toolkit`] backend.
///
/// The controller never propagates these: it logs them and keeps running in
/// a degraded state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolkitError {
    /// The native window could not be created.
    #[error("window creation failed: {0}")]
    WindowCreation(String),
    /// The screen dimensions could not be queried.
    #[error("screen size is unavailable")]
    ScreenUnavailable,
    /// The backend does not support the requested capability.
    #[error("unsupported by this toolkit: {0}")]
    Unsupported(&'static str),
}

/// Screen or window dimensions in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for ScreenSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Opacity of the system status indicator drawn over the window.
///
/// Full-screen mode makes the indicator transparent so content can draw
/// underneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorMode {
    Opaque,
    Transparent,
}

/// A non-owning handle to the hosted web content view.
///
/// The handle is an opaque token minted by whoever owns the content. The
/// controller stores and forwards it but never disposes of it: replacing or
/// clearing the content hands the previous handle back to the caller, who
/// remains responsible for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHandle(u64);

impl ContentHandle {
    /// Wrap a raw toolkit object identifier.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw toolkit object identifier.
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

/// The element a focus directive applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    /// The shell-owned element that receives toolkit focus events and hosts
    /// the content.
    FocusProxy,
    /// The hosted content view.
    Content(ContentHandle),
}

/// The capability set the window controller consumes.
///
/// Implementations are driven from the toolkit's event-loop thread only. The
/// `Send + Sync` bound lets the controller be shared through an `Arc`; it does
/// not imply the backend is called concurrently.
///
/// Directives are fire-and-forget. Only the two calls that must produce
/// something usable (`create_window`, `screen_size`) can fail.
pub trait Toolkit: Send + Sync {
    /// Create the top-level window and its layout (background, conformant,
    /// content layout and focus proxy) as described by `config`.
    fn create_window(&self, config: &WindowConfig) -> Result<(), ToolkitError>;

    /// Query the size of the primary screen.
    fn screen_size(&self) -> Result<ScreenSize, ToolkitError>;

    /// Resize the top-level window.
    fn resize(&self, size: ScreenSize);

    /// Make the top-level window visible.
    fn show(&self);

    /// Tell the window manager which rotation the window prefers.
    /// [`RotationAngle::Unlocked`] lets it follow the sensor.
    fn set_rotation_preference(&self, angle: RotationAngle);

    /// Whether the window manager supports rotation at all.
    fn rotation_supported(&self) -> bool;

    /// Declare the rotations the window can be shown in.
    fn set_available_rotations(&self, angles: &[RotationAngle]);

    /// The rotation the window is currently shown in.
    fn current_rotation(&self) -> RotationAngle;

    /// Raise and activate the window.
    fn activate(&self);

    /// Lower the window below others.
    fn lower(&self);

    /// Set the status indicator opacity.
    fn set_indicator_mode(&self, mode: IndicatorMode);

    /// Give or take input focus.
    fn set_focus(&self, target: FocusTarget, focused: bool);

    /// Swallow `content` into the focus proxy, showing it.
    ///
    /// Any previously swallowed content is unset, not deleted. `None` only
    /// unsets.
    fn attach_content(&self, content: Option<ContentHandle>);

    /// Ask the toolkit to leave its main loop.
    fn request_exit(&self);
}
