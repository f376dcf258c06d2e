//! The shell's top-level window controller.
//!
//! This module provides `NativeWindow`, which owns the shell's single
//! top-level window on top of a [`Toolkit`] backend and keeps the state the
//! toolkit does not: the device's natural orientation, the current rotation,
//! the hosted content and the rotation listeners.
//!
//! # Lifecycle
//!
//! A `NativeWindow` starts uninitialized. [`NativeWindow::initialize`] is the
//! only way out of that state and can succeed only once; every other window
//! operation returns [`ShellError::NotInitialized`] before it. Rotation
//! handlers can be registered at any time.
//!
//! # Threading
//!
//! Toolkit callbacks arrive on the toolkit's event-loop thread. Create the
//! window on that thread; event entry points assert it in debug builds. No
//! internal lock is held while rotation handlers run, so a handler may call
//! back into the window (for example [`NativeWindow::rotation`]).

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use horizon_shell_core::logging::targets;
use horizon_shell_core::{HandlerGuard, HandlerId, HandlerRegistry, Result, ShellError, ThreadAffinity};

use super::focus::{FocusCoordinator, FocusOwner};
use super::toolkit::{ContentHandle, IndicatorMode, ScreenSize, Toolkit};
use super::window_config::WindowConfig;
use crate::orientation::{resolve_angle, NaturalOrientation, RotationAngle, ScreenOrientation};

/// A subscriber to rotation changes.
///
/// Implemented for every `Fn(RotationAngle) + Send + Sync` closure, so most
/// callers simply pass a closure to [`NativeWindow::add_rotation_handler`].
pub trait RotationHandler: Send + Sync {
    /// Called after the window has rotated to `angle`.
    fn on_rotation_changed(&self, angle: RotationAngle);
}

impl<F> RotationHandler for F
where
    F: Fn(RotationAngle) + Send + Sync,
{
    fn on_rotation_changed(&self, angle: RotationAngle) {
        self(angle)
    }
}

/// Guard returned by [`NativeWindow::add_rotation_handler_scoped`].
pub type RotationHandlerGuard = HandlerGuard<dyn RotationHandler>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Uninitialized,
    Initializing,
    Initialized,
}

#[derive(Debug)]
struct WindowState {
    lifecycle: Lifecycle,
    /// False when the toolkit failed to create the window.
    window_available: bool,
    natural: NaturalOrientation,
    screen: ScreenSize,
    rotation: RotationAngle,
    visible: bool,
    active: bool,
    fullscreen: bool,
}

/// The shell's top-level window.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use horizon_shell::orientation::{RotationAngle, ScreenOrientation};
/// use horizon_shell::window::{HeadlessToolkit, NativeWindow, WindowConfig};
///
/// let toolkit = Arc::new(HeadlessToolkit::new().with_screen_size(720, 1280));
/// let window = NativeWindow::new(toolkit, WindowConfig::new("Clock"));
///
/// window.initialize()?;
/// window.add_rotation_handler(|angle: RotationAngle| {
///     println!("rotated to {angle}");
/// });
///
/// window.set_rotation_lock(ScreenOrientation::LandscapePrimary)?;
/// assert_eq!(window.rotation(), RotationAngle::Deg270);
///
/// window.show()?;
/// # Ok::<(), horizon_shell_core::ShellError>(())
/// ```
pub struct NativeWindow {
    toolkit: Arc<dyn Toolkit>,
    config: WindowConfig,
    state: Mutex<WindowState>,
    focus: Mutex<FocusCoordinator>,
    rotation_handlers: Arc<HandlerRegistry<dyn RotationHandler>>,
    affinity: ThreadAffinity,
}

static_assertions::assert_impl_all!(NativeWindow: Send, Sync);

impl NativeWindow {
    /// Create an uninitialized window bound to the current thread.
    pub fn new(toolkit: Arc<dyn Toolkit>, config: WindowConfig) -> Self {
        Self {
            toolkit,
            config,
            state: Mutex::new(WindowState {
                lifecycle: Lifecycle::Uninitialized,
                window_available: false,
                natural: NaturalOrientation::Portrait,
                screen: ScreenSize::default(),
                rotation: RotationAngle::Deg0,
                visible: false,
                active: false,
                fullscreen: false,
            }),
            focus: Mutex::new(FocusCoordinator::new()),
            rotation_handlers: Arc::new(HandlerRegistry::new()),
            affinity: ThreadAffinity::current(),
        }
    }

    /// Create the native window and derive the natural orientation.
    ///
    /// The window is sized to fill the screen. The natural orientation is
    /// landscape when the screen is wider than tall, portrait otherwise. If the
    /// configuration names an orientation it is locked afterwards.
    ///
    /// Toolkit failures do not fail initialization: a window that could not
    /// be created leaves the controller running without a native window, and
    /// an unknown screen size counts as 0x0 (portrait).
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::AlreadyInitialized`] on every call after the
    /// first.
    pub fn initialize(&self) -> Result<()> {
        self.affinity.check("initialize");
        {
            let mut state = self.state.lock();
            if state.lifecycle != Lifecycle::Uninitialized {
                return Err(ShellError::AlreadyInitialized);
            }
            state.lifecycle = Lifecycle::Initializing;
        }

        let window_available = match self.toolkit.create_window(&self.config) {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(target: targets::WINDOW, %err, "window creation failed, continuing without a native window");
                false
            }
        };

        let screen = self.toolkit.screen_size().unwrap_or_else(|err| {
            tracing::error!(target: targets::WINDOW, %err, "screen size unavailable, assuming 0x0");
            ScreenSize::default()
        });
        if window_available {
            self.toolkit.resize(screen);
        }

        let natural = NaturalOrientation::from_screen_size(screen.width, screen.height);
        {
            let mut state = self.state.lock();
            state.window_available = window_available;
            state.screen = screen;
            state.natural = natural;
            state.lifecycle = Lifecycle::Initialized;
        }
        tracing::debug!(target: targets::WINDOW, %screen, ?natural, window_available, "window initialized");

        if let Some(orientation) = self.config.orientation() {
            self.set_rotation_lock(orientation)?;
        }
        Ok(())
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Check if [`initialize`](Self::initialize) has completed.
    pub fn is_initialized(&self) -> bool {
        self.state.lock().lifecycle == Lifecycle::Initialized
    }

    /// Check if the toolkit produced a usable native window.
    pub fn has_native_window(&self) -> bool {
        self.state.lock().window_available
    }

    /// Get the configuration the window was created with.
    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Get the natural orientation, or `None` before initialization.
    pub fn natural_orientation(&self) -> Option<NaturalOrientation> {
        let state = self.state.lock();
        (state.lifecycle == Lifecycle::Initialized).then_some(state.natural)
    }

    /// Get the screen size measured during initialization.
    pub fn screen_size(&self) -> ScreenSize {
        self.state.lock().screen
    }

    /// Get the current rotation.
    pub fn rotation(&self) -> RotationAngle {
        self.state.lock().rotation
    }

    /// Check if the window has been shown.
    pub fn is_visible(&self) -> bool {
        self.state.lock().visible
    }

    /// Check if the window is raised and active.
    pub fn is_active(&self) -> bool {
        self.state.lock().active
    }

    /// Check if full-screen mode is on.
    pub fn is_fullscreen(&self) -> bool {
        self.state.lock().fullscreen
    }

    /// Get the element that currently owns input focus.
    pub fn focus_owner(&self) -> FocusOwner {
        self.focus.lock().owner()
    }

    /// Get the content currently hosted by the window.
    pub fn content(&self) -> Option<ContentHandle> {
        self.focus.lock().content()
    }

    fn ensure_initialized(&self) -> Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(ShellError::NotInitialized)
        }
    }

    /// Get the toolkit for a directive to the native window, or `None` when
    /// the window could not be created.
    fn native(&self, operation: &'static str) -> Result<Option<&dyn Toolkit>> {
        self.ensure_initialized()?;
        if self.state.lock().window_available {
            Ok(Some(self.toolkit.as_ref()))
        } else {
            tracing::trace!(target: targets::WINDOW, operation, "no native window, directive skipped");
            Ok(None)
        }
    }

    // =========================================================================
    // Window operations
    // =========================================================================

    /// Show the window.
    pub fn show(&self) -> Result<()> {
        if let Some(toolkit) = self.native("show")? {
            toolkit.show();
        }
        self.state.lock().visible = true;
        tracing::debug!(target: targets::WINDOW, "window shown");
        Ok(())
    }

    /// Raise and activate the window.
    pub fn activate(&self) -> Result<()> {
        if let Some(toolkit) = self.native("activate")? {
            toolkit.activate();
        }
        self.state.lock().active = true;
        tracing::debug!(target: targets::WINDOW, "window activated");
        Ok(())
    }

    /// Lower the window below others.
    pub fn deactivate(&self) -> Result<()> {
        if let Some(toolkit) = self.native("deactivate")? {
            toolkit.lower();
        }
        self.state.lock().active = false;
        tracing::debug!(target: targets::WINDOW, "window lowered");
        Ok(())
    }

    /// Enter or leave full-screen mode.
    ///
    /// Full screen makes the status indicator transparent so content can draw
    /// underneath it. The same directive is issued on every call, whatever the
    /// previous mode was.
    pub fn set_fullscreen(&self, enable: bool) -> Result<()> {
        let mode = if enable {
            IndicatorMode::Transparent
        } else {
            IndicatorMode::Opaque
        };
        if let Some(toolkit) = self.native("set_fullscreen")? {
            toolkit.set_indicator_mode(mode);
        }
        self.state.lock().fullscreen = enable;
        tracing::debug!(target: targets::WINDOW, enable, "full screen changed");
        Ok(())
    }

    // =========================================================================
    // Rotation
    // =========================================================================

    /// Lock the window to a logical orientation.
    ///
    /// The orientation is mapped through the natural-orientation tables of
    /// [`resolve_angle`]; [`ScreenOrientation::Any`] unlocks.
    pub fn set_rotation_lock(&self, orientation: ScreenOrientation) -> Result<()> {
        self.ensure_initialized()?;
        let natural = self.state.lock().natural;
        let angle = resolve_angle(orientation, natural);
        tracing::debug!(target: targets::ORIENTATION, %orientation, ?natural, %angle, "orientation lock requested");
        self.apply_rotation_lock(angle)
    }

    /// Lock the window to a raw angle in degrees.
    ///
    /// `-1` unlocks. Other values are reduced into `[0, 360)` first, so `450`
    /// locks to 90 degrees. Values that do not reduce to a right angle are
    /// ignored.
    pub fn set_rotation_lock_degrees(&self, degrees: i32) -> Result<()> {
        self.ensure_initialized()?;
        match RotationAngle::normalize(degrees) {
            Some(angle) => self.apply_rotation_lock(angle),
            None => {
                tracing::warn!(target: targets::ORIENTATION, degrees, "ignoring rotation lock that is not a right angle");
                Ok(())
            }
        }
    }

    fn apply_rotation_lock(&self, angle: RotationAngle) -> Result<()> {
        if let Some(toolkit) = self.native("set_rotation_preference")? {
            toolkit.set_rotation_preference(angle);
        }
        self.state.lock().rotation = angle;
        Ok(())
    }

    /// Let the window follow the rotation sensor.
    ///
    /// Unlocks the rotation preference and, if the window manager supports
    /// rotation, declares all four right angles available. The current
    /// rotation is then read back from the toolkit.
    pub fn set_auto_rotation(&self) -> Result<()> {
        let Some(toolkit) = self.native("set_auto_rotation")? else {
            self.state.lock().rotation = RotationAngle::Unlocked;
            return Ok(());
        };

        toolkit.set_rotation_preference(RotationAngle::Unlocked);
        if toolkit.rotation_supported() {
            toolkit.set_available_rotations(&RotationAngle::CANONICAL);
        }
        let current = toolkit.current_rotation();
        self.state.lock().rotation = current;
        tracing::debug!(target: targets::ORIENTATION, %current, "auto rotation enabled");
        Ok(())
    }

    /// Register a rotation handler.
    ///
    /// Identifiers start at 0 and are never reused. The same handler may be
    /// registered more than once.
    pub fn add_rotation_handler<H>(&self, handler: H) -> HandlerId
    where
        H: RotationHandler + 'static,
    {
        self.rotation_handlers.add(Arc::new(handler))
    }

    /// Register a rotation handler that is removed when the guard drops.
    pub fn add_rotation_handler_scoped<H>(&self, handler: H) -> RotationHandlerGuard
    where
        H: RotationHandler + 'static,
    {
        self.rotation_handlers.add_scoped(Arc::new(handler))
    }

    /// Remove a rotation handler. Unknown identifiers are ignored.
    ///
    /// Returns `true` if a handler was removed.
    pub fn remove_rotation_handler(&self, id: HandlerId) -> bool {
        self.rotation_handlers.remove(id)
    }

    /// Get the number of registered rotation handlers.
    pub fn rotation_handler_count(&self) -> usize {
        self.rotation_handlers.len()
    }

    // =========================================================================
    // Toolkit callbacks
    // =========================================================================

    /// Handle the toolkit reporting that the window rotated.
    ///
    /// The stored rotation is updated before any handler runs, then every
    /// handler is called in registration order. Angles that do not reduce to
    /// a right angle are ignored.
    #[tracing::instrument(skip(self), target = "horizon_shell::orientation", level = "trace")]
    pub fn on_rotation_changed(&self, degrees: i32) -> Result<()> {
        self.affinity.check("on_rotation_changed");
        self.ensure_initialized()?;

        let Some(angle) = RotationAngle::normalize(degrees) else {
            tracing::warn!(target: targets::ORIENTATION, degrees, "ignoring rotation event that is not a right angle");
            return Ok(());
        };

        self.state.lock().rotation = angle;
        let notified = self
            .rotation_handlers
            .dispatch(|handler| handler.on_rotation_changed(angle));
        tracing::trace!(target: targets::ORIENTATION, %angle, notified, "rotation dispatched");
        Ok(())
    }

    /// Replace the hosted content.
    ///
    /// The new content is shown inside the focus proxy and the proxy takes
    /// focus. The previous content is detached, not destroyed, and returned
    /// so its owner can dispose of it. `None` clears the content.
    ///
    /// The focus lock is released before the toolkit is called, so a toolkit
    /// that reports the proxy's focus gain synchronously re-enters
    /// [`on_focus_changed`](Self::on_focus_changed) safely.
    pub fn set_content(&self, content: Option<ContentHandle>) -> Result<Option<ContentHandle>> {
        self.ensure_initialized()?;
        let (previous, directive) = self.focus.lock().set_content(content);
        if let Some(toolkit) = self.native("set_content")? {
            directive.apply(toolkit);
        }
        Ok(previous)
    }

    /// Handle the toolkit reporting a focus change on the focus proxy.
    ///
    /// The change is forwarded to the content, if any.
    pub fn on_focus_changed(&self, got_focus: bool) -> Result<()> {
        self.affinity.check("on_focus_changed");
        self.ensure_initialized()?;
        let directive = self.focus.lock().on_focus_changed(got_focus);
        if let Some(directive) = directive {
            if let Some(toolkit) = self.native("on_focus_changed")? {
                directive.apply(toolkit);
            }
        }
        Ok(())
    }

    /// Handle the user or window manager asking to close the window.
    ///
    /// The shell has a single window, so closing it ends the toolkit's main
    /// loop. With [`WindowConfig::auto_delete`] off the request is only
    /// logged and the host decides what to do.
    pub fn on_delete_requested(&self) -> Result<()> {
        self.affinity.check("on_delete_requested");
        self.ensure_initialized()?;
        if !self.config.auto_delete() {
            tracing::debug!(target: targets::WINDOW, "delete requested, auto delete off, window kept");
            return Ok(());
        }
        tracing::debug!(target: targets::WINDOW, "delete requested, exiting main loop");
        self.toolkit.request_exit();
        Ok(())
    }

    /// Handle the window manager switching the window's profile.
    pub fn on_profile_changed(&self) {
        tracing::debug!(target: targets::WINDOW, "profile changed");
    }
}

impl fmt::Debug for NativeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeWindow")
            .field("title", &self.config.title())
            .field("state", &*self.state.lock())
            .field("focus", &*self.focus.lock())
            .field("rotation_handlers", &self.rotation_handlers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::headless::{Directive, HeadlessToolkit};
    use crate::window::window_config::LayoutConfig;

    fn initialized(toolkit: HeadlessToolkit) -> (Arc<HeadlessToolkit>, NativeWindow) {
        let toolkit = Arc::new(toolkit);
        let window = NativeWindow::new(toolkit.clone(), WindowConfig::new("test"));
        window.initialize().unwrap();
        toolkit.take_directives();
        (toolkit, window)
    }

    #[test]
    fn test_initialize_derives_natural_orientation() {
        let (_, window) = initialized(HeadlessToolkit::new().with_screen_size(1920, 1080));
        assert_eq!(window.natural_orientation(), Some(NaturalOrientation::Landscape));

        let (_, window) = initialized(HeadlessToolkit::new().with_screen_size(720, 1280));
        assert_eq!(window.natural_orientation(), Some(NaturalOrientation::Portrait));
    }

    #[test]
    fn test_initialize_creates_and_resizes() {
        let toolkit = Arc::new(HeadlessToolkit::new().with_screen_size(480, 800));
        let window = NativeWindow::new(toolkit.clone(), WindowConfig::new("Notes"));
        window.initialize().unwrap();

        assert_eq!(
            toolkit.directives(),
            vec![
                Directive::CreateWindow {
                    title: "Notes".into(),
                    layout: LayoutConfig::default(),
                },
                Directive::Resize(ScreenSize::new(480, 800)),
            ]
        );
        assert!(window.has_native_window());
        assert_eq!(window.screen_size(), ScreenSize::new(480, 800));
    }

    #[test]
    fn test_initialize_twice_is_rejected() {
        let (_, window) = initialized(HeadlessToolkit::new());
        assert_eq!(window.initialize(), Err(ShellError::AlreadyInitialized));
    }

    #[test]
    fn test_operations_before_initialize_fail_fast() {
        let window = NativeWindow::new(Arc::new(HeadlessToolkit::new()), WindowConfig::default());

        assert_eq!(window.show(), Err(ShellError::NotInitialized));
        assert_eq!(window.activate(), Err(ShellError::NotInitialized));
        assert_eq!(window.set_fullscreen(true), Err(ShellError::NotInitialized));
        assert_eq!(window.set_auto_rotation(), Err(ShellError::NotInitialized));
        assert_eq!(window.set_rotation_lock_degrees(90), Err(ShellError::NotInitialized));
        assert_eq!(window.on_rotation_changed(90), Err(ShellError::NotInitialized));
        assert_eq!(window.set_content(None), Err(ShellError::NotInitialized));
        assert_eq!(window.natural_orientation(), None);
    }

    #[test]
    fn test_rotation_lock_degrees_normalizes() {
        let (toolkit, window) = initialized(HeadlessToolkit::new());

        window.set_rotation_lock_degrees(450).unwrap();
        assert_eq!(window.rotation(), RotationAngle::Deg90);
        assert_eq!(
            toolkit.take_directives(),
            vec![Directive::SetRotationPreference(RotationAngle::Deg90)]
        );
    }

    #[test]
    fn test_rotation_lock_off_grid_is_ignored() {
        let (toolkit, window) = initialized(HeadlessToolkit::new());
        window.set_rotation_lock_degrees(180).unwrap();
        toolkit.take_directives();

        window.set_rotation_lock_degrees(45).unwrap();
        assert_eq!(window.rotation(), RotationAngle::Deg180);
        assert!(toolkit.take_directives().is_empty());
    }

    #[test]
    fn test_rotation_lock_uses_natural_table() {
        let (_, portrait) = initialized(HeadlessToolkit::new().with_screen_size(720, 1280));
        portrait.set_rotation_lock(ScreenOrientation::PortraitPrimary).unwrap();
        assert_eq!(portrait.rotation().degrees(), 0);

        let (_, landscape) = initialized(HeadlessToolkit::new().with_screen_size(1280, 720));
        landscape.set_rotation_lock(ScreenOrientation::PortraitPrimary).unwrap();
        assert_eq!(landscape.rotation().degrees(), 270);

        landscape.set_rotation_lock(ScreenOrientation::Any).unwrap();
        assert_eq!(landscape.rotation(), RotationAngle::Unlocked);
    }

    #[test]
    fn test_auto_rotation_reads_back_current() {
        let (toolkit, window) = initialized(HeadlessToolkit::new());
        toolkit.set_current_rotation(RotationAngle::Deg180);

        window.set_auto_rotation().unwrap();
        assert_eq!(window.rotation(), RotationAngle::Deg180);
        assert_eq!(
            toolkit.take_directives(),
            vec![
                Directive::SetRotationPreference(RotationAngle::Unlocked),
                Directive::SetAvailableRotations(RotationAngle::CANONICAL.to_vec()),
            ]
        );
    }

    #[test]
    fn test_auto_rotation_without_support() {
        let (toolkit, window) = initialized(HeadlessToolkit::new().with_rotation_support(false));
        window.set_auto_rotation().unwrap();
        assert_eq!(
            toolkit.take_directives(),
            vec![Directive::SetRotationPreference(RotationAngle::Unlocked)]
        );
    }

    #[test]
    fn test_fullscreen_is_idempotent() {
        let (toolkit, window) = initialized(HeadlessToolkit::new());
        window.set_fullscreen(true).unwrap();
        window.set_fullscreen(true).unwrap();
        assert!(window.is_fullscreen());

        let directives = toolkit.take_directives();
        assert_eq!(directives.len(), 2);
        assert_eq!(directives[0], directives[1]);
        assert_eq!(directives[0], Directive::SetIndicatorMode(IndicatorMode::Transparent));

        window.set_fullscreen(false).unwrap();
        assert_eq!(
            toolkit.take_directives(),
            vec![Directive::SetIndicatorMode(IndicatorMode::Opaque)]
        );
    }

    #[test]
    fn test_lifecycle_toggles() {
        let (toolkit, window) = initialized(HeadlessToolkit::new());
        window.show().unwrap();
        window.activate().unwrap();
        assert!(window.is_visible());
        assert!(window.is_active());
        window.deactivate().unwrap();
        assert!(!window.is_active());

        assert_eq!(
            toolkit.take_directives(),
            vec![Directive::Show, Directive::Activate, Directive::Lower]
        );
    }

    #[test]
    fn test_creation_failure_degrades() {
        let (toolkit, window) =
            initialized(HeadlessToolkit::new().with_window_creation_failure("no display"));
        assert!(window.is_initialized());
        assert!(!window.has_native_window());

        // Directives to the missing window are skipped, shadow state still moves.
        window.show().unwrap();
        window.set_rotation_lock_degrees(90).unwrap();
        let content = ContentHandle::from_raw(4);
        assert_eq!(window.set_content(Some(content)), Ok(None));
        window.on_focus_changed(true).unwrap();

        assert!(window.is_visible());
        assert_eq!(window.rotation(), RotationAngle::Deg90);
        assert_eq!(window.content(), Some(content));
        assert_eq!(window.focus_owner(), FocusOwner::Content);
        assert!(toolkit.take_directives().is_empty());
    }

    #[test]
    fn test_screen_failure_assumes_portrait() {
        let (toolkit, window) = initialized(HeadlessToolkit::new().without_screen());
        assert_eq!(window.natural_orientation(), Some(NaturalOrientation::Portrait));
        assert_eq!(window.screen_size(), ScreenSize::default());
        assert!(toolkit.take_directives().is_empty());
    }

    #[test]
    fn test_configured_orientation_applied_on_initialize() {
        let toolkit = Arc::new(HeadlessToolkit::new().with_screen_size(1280, 720));
        let config = WindowConfig::new("Video").with_orientation(ScreenOrientation::LandscapeSecondary);
        let window = NativeWindow::new(toolkit.clone(), config);
        window.initialize().unwrap();

        assert_eq!(window.rotation(), RotationAngle::Deg180);
        assert_eq!(
            toolkit.directives().last(),
            Some(&Directive::SetRotationPreference(RotationAngle::Deg180))
        );
    }

    #[test]
    fn test_delete_request_exits() {
        let (toolkit, window) = initialized(HeadlessToolkit::new());
        window.on_delete_requested().unwrap();
        assert!(toolkit.exit_requested());
    }

    #[test]
    fn test_delete_request_without_auto_delete_keeps_running() {
        let toolkit = Arc::new(HeadlessToolkit::new());
        let config = WindowConfig::new("Kiosk").with_auto_delete(false);
        let window = NativeWindow::new(toolkit.clone(), config);
        window.initialize().unwrap();

        window.on_delete_requested().unwrap();
        assert!(!toolkit.exit_requested());
    }

    #[test]
    fn test_loaded_layout_reaches_toolkit() {
        let config = WindowConfig::from_toml_str(
            r#"
            title = "Viewer"

            [layout]
            group = "ime-application"
            focus_style = "plain"
            background = [255, 255, 255, 0]
            conformant = false
            "#,
        )
        .unwrap();
        let toolkit = Arc::new(HeadlessToolkit::new());
        let window = NativeWindow::new(toolkit.clone(), config.clone());
        window.initialize().unwrap();

        let Some(Directive::CreateWindow { title, layout }) = toolkit.directives().first().cloned()
        else {
            panic!("window was not created first");
        };
        assert_eq!(title, "Viewer");
        assert_eq!(&layout, config.layout());
        assert_eq!(layout.group, "ime-application");
        assert!(!layout.conformant);
    }

    #[test]
    fn test_rotation_event_updates_before_dispatch() {
        let (_, window) = initialized(HeadlessToolkit::new());
        let window = Arc::new(window);
        let observed = Arc::new(Mutex::new(Vec::new()));

        let weak = Arc::downgrade(&window);
        let observed_clone = observed.clone();
        window.add_rotation_handler(move |angle: RotationAngle| {
            let current = weak.upgrade().map(|w| w.rotation());
            observed_clone.lock().push((angle, current));
        });

        window.on_rotation_changed(-270).unwrap();
        assert_eq!(
            *observed.lock(),
            vec![(RotationAngle::Deg90, Some(RotationAngle::Deg90))]
        );
    }

    #[test]
    fn test_rotation_event_off_grid_is_ignored() {
        let (_, window) = initialized(HeadlessToolkit::new());
        let calls = Arc::new(Mutex::new(0));
        let calls_clone = calls.clone();
        window.add_rotation_handler(move |_: RotationAngle| *calls_clone.lock() += 1);

        window.on_rotation_changed(33).unwrap();
        assert_eq!(*calls.lock(), 0);
        assert_eq!(window.rotation(), RotationAngle::Deg0);
    }
}
