//! Logging facilities for Horizon Shell.
//!
//! Horizon Shell uses the `tracing` crate for instrumentation and never
//! installs a subscriber itself. To see logs, install one in the host
//! application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("horizon_shell=debug")
//!         .init();
//!
//!     // Your shell code...
//! }
//! ```
//!
//! Every subsystem logs under one of the fixed [`targets`], so directives such
//! as `horizon_shell::focus=trace` isolate a single component.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Handler registry target.
    pub const REGISTRY: &str = "horizon_shell_core::registry";
    /// Window controller target.
    pub const WINDOW: &str = "horizon_shell::window";
    /// Orientation mapping and rotation target.
    pub const ORIENTATION: &str = "horizon_shell::orientation";
    /// Focus coordination target.
    pub const FOCUS: &str = "horizon_shell::focus";
    /// Toolkit backends target.
    pub const TOOLKIT: &str = "horizon_shell::toolkit";
}

