//! Shell window module.
//!
//! This module contains the Window & Orientation Controller and the seam to
//! the windowing toolkit it drives.
//!
//! # Components
//!
//! - [`NativeWindow`]: the controller. Owns rotation state, the natural
//!   orientation, the hosted content and the rotation handlers.
//! - [`FocusCoordinator`]: forwards focus from the shell's focus proxy to the
//!   hosted content.
//! - [`Toolkit`]: everything the controller needs from the platform.
//! - [`HeadlessToolkit`]: a display-less backend that records directives.
//! - [`WinitToolkit`]: a desktop backend over a winit window (feature
//!   `winit`).
//!
//! # Data Flow
//!
//! ```text
//! toolkit callback -> ToolkitEvent -> route_toolkit_event -> NativeWindow
//!     rotation: normalize -> store -> rotation handlers (registration order)
//!     focus:    FocusCoordinator (state) -> FocusDirective -> Toolkit (no lock held)
//! ```

mod event_router;
mod focus;
mod headless;
mod native_window;
mod toolkit;
mod window_config;
#[cfg(feature = "winit")]
mod winit_toolkit;

#[cfg(feature = "winit")]
pub use event_router::from_winit_event;
pub use event_router::{route_toolkit_event, ToolkitEvent};
pub use focus::{FocusCoordinator, FocusDirective, FocusOwner};
pub use headless::{Directive, HeadlessToolkit};
pub use native_window::{NativeWindow, RotationHandler, RotationHandlerGuard};
pub use toolkit::{ContentHandle, FocusTarget, IndicatorMode, ScreenSize, Toolkit, ToolkitError};
pub use window_config::{
    ConfigError, LayoutConfig, WindowConfig, DEFAULT_FOCUS_STYLE, DEFAULT_LAYOUT_GROUP,
    DEFAULT_THEME_PATH,
};
#[cfg(feature = "winit")]
pub use winit_toolkit::WinitToolkit;
