//! Core systems for Horizon Shell.
//!
//! This crate provides the toolkit-independent building blocks of the shell's
//! window controller:
//!
//! - **Handler Registry**: Ordered subscriber collection with stable, never
//!   reused identifiers and snapshot dispatch
//! - **Thread Affinity**: Confinement checks for state owned by the toolkit's
//!   event-loop thread
//! - **Logging**: `tracing` target names for every shell subsystem
//! - **Errors**: Precondition errors shared by the controller crates
//!
//! # Handler Registry Example
//!
//! ```
//! use horizon_shell_core::HandlerRegistry;
//! use std::sync::Arc;
//!
//! let registry: HandlerRegistry<dyn Fn(i32) + Send + Sync> = HandlerRegistry::new();
//!
//! let id = registry.add(Arc::new(|degrees: i32| {
//!     println!("Rotated to {degrees}");
//! }));
//! assert_eq!(id.as_raw(), 0);
//!
//! registry.dispatch(|handler| handler(90));
//!
//! registry.remove(id);
//! assert!(registry.is_empty());
//! ```

mod error;
pub mod logging;
pub mod registry;
pub mod thread_check;

pub use error::{Result, ShellError};
pub use registry::{HandlerGuard, HandlerId, HandlerRegistry};
pub use thread_check::ThreadAffinity;
