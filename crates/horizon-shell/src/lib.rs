//! Horizon Shell: the native shell of an embedded web-application runtime.
//!
//! The shell owns a single top-level window, tracks the device's natural
//! orientation, maps orientation lock requests to rotation angles, notifies
//! rotation listeners and brokers input focus between the shell chrome and
//! the hosted web content view.
//!
//! The platform itself sits behind the [`window::Toolkit`] trait, so the
//! controller runs the same over a real toolkit, over winit on the desktop,
//! or over [`window::HeadlessToolkit`] in tests.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_shell::prelude::*;
//!
//! let toolkit = Arc::new(HeadlessToolkit::new().with_screen_size(1280, 720));
//! let window = NativeWindow::new(toolkit, WindowConfig::new("Player"));
//! window.initialize()?;
//!
//! let id = window.add_rotation_handler(|angle: RotationAngle| {
//!     println!("now at {}", angle.degrees());
//! });
//!
//! window.set_rotation_lock(ScreenOrientation::PortraitPrimary)?;
//! assert_eq!(window.rotation().degrees(), 270);
//!
//! window.remove_rotation_handler(id);
//! # Ok::<(), horizon_shell_core::ShellError>(())
//! ```

pub mod orientation;
pub mod window;

pub use horizon_shell_core::{HandlerId, Result, ShellError};

/// Commonly used types.
pub mod prelude {
    pub use crate::orientation::{resolve_angle, NaturalOrientation, RotationAngle, ScreenOrientation};
    pub use crate::window::{
        route_toolkit_event, ContentHandle, FocusOwner, HeadlessToolkit, NativeWindow,
        RotationHandler, Toolkit, ToolkitEvent, WindowConfig,
    };
    pub use horizon_shell_core::{HandlerId, ShellError};
}
