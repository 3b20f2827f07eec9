//! Reference-counted handles for the I/O objects promises are issued against.
//!
//! An I/O object must stay alive while completion handlers against it are
//! pending; tearing down a socket with a handler still in flight is the
//! classic defect this bookkeeping exists to prevent. The engine increments
//! the object's handler count once per promise issued against it and
//! decrements exactly once per promise destruction, invoking the object's
//! destruction hook when the count returns to zero.

use std::cell::Cell;
use std::rc::Rc;

/// Intrusive count of pending completion handlers.
///
/// Exposes only increment/decrement and a read-only view; the count itself
/// is never handed out mutably. Single-threaded by construction, like the
/// engine that drives it.
#[derive(Debug, Default)]
pub struct HandlerCount {
    pending: Cell<usize>,
}

impl HandlerCount {
    /// New count at zero.
    pub fn new() -> Self {
        Self {
            pending: Cell::new(0),
        }
    }

    /// Record one more pending handler, returning the new count.
    pub fn increment(&self) -> usize {
        let count = self.pending.get() + 1;
        self.pending.set(count);
        count
    }

    /// Record one handler as resolved, returning the remaining count.
    pub fn decrement(&self) -> usize {
        let current = self.pending.get();
        debug_assert!(current > 0, "handler count decremented below zero");
        let count = current.saturating_sub(1);
        self.pending.set(count);
        count
    }

    /// Number of handlers currently pending.
    pub fn current(&self) -> usize {
        self.pending.get()
    }
}

/// Capability every I/O object type exposes to the engine.
///
/// Implementors embed a [`HandlerCount`] and surface it through
/// [`handlers`](IoObject::handlers); the engine owns all mutation of the
/// count. [`destroy`](IoObject::destroy) is the destruction hook fired when
/// the last pending promise against the object resolves, letting the object
/// release descriptors or OS resources. Memory reclamation itself rides on
/// the [`IoHandle`] reference count.
pub trait IoObject {
    /// The object's pending-handler count.
    fn handlers(&self) -> &HandlerCount;

    /// Destruction hook, invoked when the handler count reaches zero.
    fn destroy(&self);
}

/// Shared-ownership handle pinning an I/O object while promises against it
/// are pending.
pub type IoHandle = Rc<dyn IoObject>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_count_is_zero() {
        let count = HandlerCount::new();
        assert_eq!(count.current(), 0);
    }

    #[test]
    fn increment_and_decrement_report_the_new_count() {
        let count = HandlerCount::new();

        assert_eq!(count.increment(), 1);
        assert_eq!(count.increment(), 2);
        assert_eq!(count.current(), 2);

        assert_eq!(count.decrement(), 1);
        assert_eq!(count.decrement(), 0);
        assert_eq!(count.current(), 0);
    }
}
