//! Bridge to the host's suspended computations.
//!
//! The core never implements coroutines; it only needs to ask three things
//! of whatever the host provides: can this computation still be resumed,
//! what is it currently suspended on, and resume it with a value. The
//! [`Coroutine`] trait is that seam.
//!
//! Values crossing the boundary are carried by [`ChainValue`], an explicit
//! sum over the host values the core must discriminate. The decision
//! whether a callback produced a plain value, a promise handle, or a
//! suspended computation is made where the value is produced, so the driver
//! never inspects types at runtime.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::promise::PromiseId;

/// What the core requires of the host's suspended-computation runtime.
pub trait Coroutine<V> {
    /// Whether the computation can still be resumed.
    ///
    /// A finished computation is a normal terminal state, not a fault; the
    /// driver discards its pending output without diagnostics.
    fn is_resumable(&self) -> bool;

    /// What the computation is currently suspended on, if anything.
    fn yielded(&self) -> Option<Yielded>;

    /// Resume with a value, running to the next yield point or completion.
    fn resume(&mut self, value: ChainValue<V>);
}

/// Shared handle to a host coroutine.
pub type CoroutineHandle<V> = Rc<RefCell<dyn Coroutine<V>>>;

/// A host value as seen by the completion layer.
///
/// `V` is the host's own value type; the core never looks inside it.
pub enum ChainValue<V> {
    /// Plain host value.
    Value(V),
    /// Handle to a pending operation.
    Promise(PromiseId),
    /// Handle to a suspended computation.
    Coroutine(CoroutineHandle<V>),
}

impl<V> ChainValue<V> {
    /// Wrap a host coroutine for the driver.
    pub fn coroutine<C>(coroutine: C) -> Self
    where
        C: Coroutine<V> + 'static,
    {
        ChainValue::Coroutine(Rc::new(RefCell::new(coroutine)))
    }
}

impl<V: fmt::Debug> fmt::Debug for ChainValue<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainValue::Value(value) => f.debug_tuple("Value").field(value).finish(),
            ChainValue::Promise(id) => f.debug_tuple("Promise").field(id).finish(),
            ChainValue::Coroutine(_) => f.write_str("Coroutine(..)"),
        }
    }
}

/// Inspection result for a suspended computation's current yield.
///
/// Only the promise case can be driven. Anything else showing up where a
/// chain expects a promise is a protocol violation, reported with a
/// warning-level diagnostic and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Yielded {
    /// Awaiting the identified pending promise.
    Promise(PromiseId),
    /// Suspended on something the completion layer cannot drive.
    Other,
}
