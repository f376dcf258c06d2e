//! Handler registry for Horizon Shell.
//!
//! This module provides an observer registry in the spirit of a signal/slot
//! connection table, specialised for the shell's needs:
//!
//! - [`HandlerRegistry<H>`] - Ordered collection of handlers of type `H`
//! - [`HandlerId`] - Stable identifier returned when a handler is added
//! - [`HandlerGuard`] - RAII guard that removes its handler when dropped
//!
//! # Identifiers
//!
//! Identifiers are taken from a counter that starts at zero and only ever
//! increments. A removed identifier is never handed out again, so a stale
//! [`HandlerId`] can never remove somebody else's handler.
//!
//! # Dispatch
//!
//! [`HandlerRegistry::dispatch`] visits handlers in ascending identifier
//! order, synchronously, on the calling thread. It iterates over a snapshot
//! taken before the first handler runs and releases the internal lock while
//! handlers execute. A handler may therefore add or remove handlers (including
//! itself) during dispatch; such changes take effect from the next dispatch.
//!
//! # Example
//!
//! ```
//! use horizon_shell_core::HandlerRegistry;
//! use std::sync::Arc;
//!
//! trait Listener: Send + Sync {
//!     fn notify(&self, value: u32);
//! }
//!
//! struct Printer;
//! impl Listener for Printer {
//!     fn notify(&self, value: u32) {
//!         println!("value = {value}");
//!     }
//! }
//!
//! let registry: HandlerRegistry<dyn Listener> = HandlerRegistry::new();
//! let first = registry.add(Arc::new(Printer));
//! let second = registry.add(Arc::new(Printer));
//! assert!(first < second);
//!
//! assert_eq!(registry.dispatch(|listener| listener.notify(7)), 2);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::logging::targets;

/// A unique identifier for a registered handler.
///
/// Identifiers are strictly increasing in registration order and are never
/// reused, even after the handler they named has been removed.
///
/// # Related
///
/// - [`HandlerRegistry::add`] - Returns a `HandlerId`
/// - [`HandlerRegistry::remove`] - Removes a handler by ID
/// - [`HandlerGuard`] - RAII alternative that removes on drop
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandlerId(u64);

impl HandlerId {
    /// Create an identifier from its raw value.
    ///
    /// Useful for hosts that hand identifiers across an FFI or scripting
    /// boundary as plain integers.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw integer value of this identifier.
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct Inner<H: ?Sized> {
    /// The identifier the next `add` will hand out.
    next_id: u64,
    handlers: BTreeMap<HandlerId, Arc<H>>,
}

/// An ordered registry of handlers keyed by [`HandlerId`].
///
/// # Type Parameter
///
/// - `H`: The handler type, usually a trait object such as
///   `dyn RotationHandler` or `dyn Fn(i32) + Send + Sync`.
///
/// # Thread Safety
///
/// `HandlerRegistry<H>` is `Send + Sync` whenever `H: Send + Sync`. The
/// internal lock is never held while a handler runs.
pub struct HandlerRegistry<H: ?Sized> {
    inner: Mutex<Inner<H>>,
}

impl<H: ?Sized> Default for HandlerRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ?Sized> HandlerRegistry<H> {
    /// Create an empty registry whose first identifier will be `0`.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: 0,
                handlers: BTreeMap::new(),
            }),
        }
    }

    /// Register a handler and return its identifier.
    ///
    /// No duplicate detection is performed: the same handler may be added
    /// several times and is then invoked once per registration.
    pub fn add(&self, handler: Arc<H>) -> HandlerId {
        let mut inner = self.inner.lock();
        let id = HandlerId(inner.next_id);
        inner.next_id += 1;
        inner.handlers.insert(id, handler);
        tracing::trace!(target: targets::REGISTRY, %id, count = inner.handlers.len(), "handler added");
        id
    }

    /// Remove a handler by its identifier.
    ///
    /// Returns `true` if the handler was registered. Removing an unknown or
    /// already removed identifier is a no-op that returns `false`.
    pub fn remove(&self, id: HandlerId) -> bool {
        let removed = self.inner.lock().handlers.remove(&id).is_some();
        tracing::trace!(target: targets::REGISTRY, %id, removed, "handler remove requested");
        removed
    }

    /// Check whether a handler is currently registered under `id`.
    pub fn contains(&self, id: HandlerId) -> bool {
        self.inner.lock().handlers.contains_key(&id)
    }

    /// Remove every handler. Identifiers keep counting from where they were.
    pub fn clear(&self) {
        self.inner.lock().handlers.clear();
    }

    /// Get the number of registered handlers.
    pub fn len(&self) -> usize {
        self.inner.lock().handlers.len()
    }

    /// Check if no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().handlers.is_empty()
    }

    /// Get the registered identifiers in dispatch order.
    pub fn ids(&self) -> Vec<HandlerId> {
        self.inner.lock().handlers.keys().copied().collect()
    }

    /// Take a snapshot of the registered handlers in dispatch order.
    pub fn snapshot(&self) -> Vec<Arc<H>> {
        self.inner.lock().handlers.values().cloned().collect()
    }

    /// Invoke `invoke` once for every registered handler.
    ///
    /// Handlers are visited in ascending identifier order over a snapshot
    /// taken before the first invocation. Returns the number of handlers
    /// invoked.
    pub fn dispatch<F>(&self, mut invoke: F) -> usize
    where
        F: FnMut(&H),
    {
        let snapshot = self.snapshot();
        tracing::trace!(target: targets::REGISTRY, handler_count = snapshot.len(), "dispatching");
        for handler in &snapshot {
            invoke(&**handler);
        }
        snapshot.len()
    }
}

impl<H: ?Sized> fmt::Debug for HandlerRegistry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("HandlerRegistry")
            .field("next_id", &inner.next_id)
            .field("ids", &inner.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

static_assertions::assert_impl_all!(HandlerRegistry<dyn Fn(i32) + Send + Sync>: Send, Sync);

/// A registration that removes its handler when dropped.
///
/// The guard holds only a weak reference to the registry, so it never keeps
/// the registry alive and dropping it after the registry is gone is harmless.
/// Created via [`HandlerRegistry::add_scoped`].
///
/// # Example
///
/// ```
/// use horizon_shell_core::HandlerRegistry;
/// use std::sync::atomic::{AtomicI32, Ordering};
/// use std::sync::Arc;
///
/// let registry: Arc<HandlerRegistry<dyn Fn(i32) + Send + Sync>> =
///     Arc::new(HandlerRegistry::new());
/// let total = Arc::new(AtomicI32::new(0));
/// {
///     let total = total.clone();
///     let _guard = registry.add_scoped(Arc::new(move |n: i32| {
///         total.fetch_add(n, Ordering::SeqCst);
///     }));
///     registry.dispatch(|handler| handler(90));
/// }
/// registry.dispatch(|handler| handler(180)); // Nothing happens - guard was dropped
/// assert_eq!(total.load(Ordering::SeqCst), 90);
/// ```
#[must_use = "dropping the guard immediately removes the handler"]
pub struct HandlerGuard<H: ?Sized> {
    registry: Weak<HandlerRegistry<H>>,
    id: HandlerId,
}

impl<H: ?Sized> HandlerRegistry<H> {
    /// Register a handler that is removed automatically when the returned
    /// guard is dropped.
    pub fn add_scoped(self: &Arc<Self>, handler: Arc<H>) -> HandlerGuard<H> {
        let id = self.add(handler);
        HandlerGuard {
            registry: Arc::downgrade(self),
            id,
        }
    }
}

impl<H: ?Sized> HandlerGuard<H> {
    /// Get the identifier of the guarded handler.
    pub fn id(&self) -> HandlerId {
        self.id
    }

    /// Release the guard without removing the handler.
    ///
    /// The handler then stays registered until removed by identifier.
    pub fn forget(self) -> HandlerId {
        let id = self.id;
        std::mem::forget(self);
        id
    }
}

impl<H: ?Sized> Drop for HandlerGuard<H> {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.id);
        }
    }
}

impl<H: ?Sized> fmt::Debug for HandlerGuard<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerGuard").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Callback = dyn Fn(i32) + Send + Sync;

    fn recorder(log: &Arc<Mutex<Vec<(u64, i32)>>>, tag: u64) -> Arc<Callback> {
        let log = log.clone();
        Arc::new(move |value| log.lock().push((tag, value)))
    }

    #[test]
    fn test_ids_start_at_zero_and_increase() {
        let registry: HandlerRegistry<Callback> = HandlerRegistry::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let ids: Vec<u64> = (0..3)
            .map(|tag| registry.add(recorder(&log, tag)).as_raw())
            .collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_removed_ids_are_not_reused() {
        let registry: HandlerRegistry<Callback> = HandlerRegistry::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let a = registry.add(recorder(&log, 0));
        let b = registry.add(recorder(&log, 1));
        assert!(registry.remove(b));
        assert!(registry.remove(a));

        let c = registry.add(recorder(&log, 2));
        assert_eq!(c.as_raw(), 2);

        registry.clear();
        let d = registry.add(recorder(&log, 3));
        assert_eq!(d.as_raw(), 3);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let registry: HandlerRegistry<Callback> = HandlerRegistry::new();
        assert!(!registry.remove(HandlerId::from_raw(42)));

        let log = Arc::new(Mutex::new(Vec::new()));
        let id = registry.add(recorder(&log, 0));
        assert!(registry.remove(id));
        assert!(!registry.remove(id));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_dispatch_skips_removed_and_keeps_order() {
        let registry: HandlerRegistry<Callback> = HandlerRegistry::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        for tag in 0..3 {
            registry.add(recorder(&log, tag));
        }
        registry.remove(HandlerId::from_raw(1));

        let invoked = registry.dispatch(|handler| handler(90));
        assert_eq!(invoked, 2);
        assert_eq!(*log.lock(), vec![(0, 90), (2, 90)]);
    }

    #[test]
    fn test_same_handler_registered_twice() {
        let registry: HandlerRegistry<Callback> = HandlerRegistry::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let handler = recorder(&log, 7);

        let first = registry.add(handler.clone());
        let second = registry.add(handler);
        assert_ne!(first, second);

        registry.dispatch(|handler| handler(180));
        assert_eq!(*log.lock(), vec![(7, 180), (7, 180)]);
    }

    #[test]
    fn test_mutation_during_dispatch() {
        let registry: Arc<HandlerRegistry<Callback>> = Arc::new(HandlerRegistry::new());
        let log = Arc::new(Mutex::new(Vec::new()));

        // First handler removes the second and registers a new one.
        let weak = Arc::downgrade(&registry);
        let log_clone = log.clone();
        registry.add(Arc::new(move |value: i32| {
            log_clone.lock().push((0, value));
            if let Some(registry) = weak.upgrade() {
                registry.remove(HandlerId::from_raw(1));
                let log_inner = log_clone.clone();
                registry.add(Arc::new(move |value: i32| log_inner.lock().push((9, value))));
            }
        }));
        registry.add(recorder(&log, 1));

        // The snapshot still contains the second handler.
        assert_eq!(registry.dispatch(|handler| handler(270)), 2);
        assert_eq!(*log.lock(), vec![(0, 270), (1, 270)]);
        assert_eq!(registry.ids(), vec![HandlerId::from_raw(0), HandlerId::from_raw(2)]);
    }

    #[test]
    fn test_scoped_guard_removes_on_drop() {
        let registry: Arc<HandlerRegistry<Callback>> = Arc::new(HandlerRegistry::new());
        let log = Arc::new(Mutex::new(Vec::new()));

        let guard = registry.add_scoped(recorder(&log, 0));
        assert!(registry.contains(guard.id()));
        drop(guard);
        assert!(registry.is_empty());

        let kept = registry.add_scoped(recorder(&log, 1)).forget();
        assert!(registry.contains(kept));
    }

    #[test]
    fn test_guard_outliving_registry() {
        let registry: Arc<HandlerRegistry<Callback>> = Arc::new(HandlerRegistry::new());
        let log = Arc::new(Mutex::new(Vec::new()));
        let guard = registry.add_scoped(recorder(&log, 0));
        drop(registry);
        drop(guard);
    }
}
