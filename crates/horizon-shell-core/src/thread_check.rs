//! Event-loop thread confinement.
//!
//! Toolkit callbacks arrive on the toolkit's event-loop thread, and window
//! state transitions are expected to happen there too. The controller is
//! still `Send + Sync` so hosts can keep it in an `Arc`. [`ThreadAffinity`]
//! remembers the thread that created the controller and lets each event entry
//! point check it in debug builds.

use std::thread::{self, ThreadId};

/// The event-loop thread a controller belongs to.
///
/// # Example
///
/// ```
/// use horizon_shell_core::ThreadAffinity;
///
/// let affinity = ThreadAffinity::current();
/// assert!(affinity.is_event_loop());
///
/// // Panics in debug builds when called from another thread.
/// affinity.check("on_rotation_changed");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadAffinity {
    event_loop: ThreadId,
}

impl ThreadAffinity {
    /// Bind to the calling thread.
    pub fn current() -> Self {
        Self {
            event_loop: thread::current().id(),
        }
    }

    /// Check if the calling thread is the bound event-loop thread.
    #[inline]
    pub fn is_event_loop(&self) -> bool {
        thread::current().id() == self.event_loop
    }

    /// Verify that `operation` runs on the event-loop thread.
    ///
    /// # Panics
    ///
    /// In debug builds, panics when called from any other thread. Release
    /// builds skip the check.
    #[inline]
    pub fn check(&self, operation: &'static str) {
        if cfg!(debug_assertions) && !self.is_event_loop() {
            off_event_loop(operation);
        }
    }
}

#[cold]
#[inline(never)]
fn off_event_loop(operation: &'static str) -> ! {
    let caller = thread::current();
    panic!(
        "{operation} called from thread \"{}\" ({:?}); window operations and \
         toolkit callbacks must run on the event-loop thread that created the window",
        caller.name().unwrap_or("<unnamed>"),
        caller.id(),
    )
}
