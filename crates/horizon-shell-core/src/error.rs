//! Error types for Horizon Shell.

use thiserror::Error;

/// The main error type for Horizon Shell operations.
///
/// Only caller contract violations are reported through this type. Toolkit
/// failures are degraded and logged inside the controller, and registry
/// misses (removing an unknown handler) are silent.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellError {
    /// An operation was attempted before the window was initialized.
    #[error("window has not been initialized. Call NativeWindow::initialize() first")]
    NotInitialized,
    /// `initialize` was called on a window that is already initialized.
    #[error("window has already been initialized")]
    AlreadyInitialized,
}

/// A specialized Result type for Horizon Shell operations.
pub type Result<T> = std::result::Result<T, ShellError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ShellError::AlreadyInitialized.to_string(),
            "window has already been initialized"
        );
        assert!(ShellError::NotInitialized.to_string().contains("initialize()"));
    }
}
