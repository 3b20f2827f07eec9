//! Serialization groups for completion handlers.
//!
//! A strand is a FIFO execution-ordering domain: callbacks registered under
//! the same strand run in the order their promises resolve at the engine
//! and never overlap each other. The engine is single-threaded, so no
//! locking is involved; the strand expresses grouping intent and carries
//! the lifetime bookkeeping that ties it to the promises registered under
//! it.

use std::rc::Rc;

use crate::callback::{CallbackSlot, Handler};
use crate::io_object::HandlerCount;

/// A serialization group.
///
/// The strand's handler count equals the number of unresolved promises
/// registered under it: incremented when a wrapped handler is registered,
/// decremented when that promise is destroyed. The promise releases its
/// handle along with the decrement, so the group object goes away with the
/// last unresolved promise unless the host still holds its own handle.
#[derive(Debug, Default)]
pub struct Strand {
    handlers: HandlerCount,
}

/// Shared handle to a [`Strand`].
pub type StrandHandle = Rc<Strand>;

impl Strand {
    /// Create a new serialization group.
    pub fn new() -> StrandHandle {
        Rc::new(Strand {
            handlers: HandlerCount::new(),
        })
    }

    /// The number of unresolved promises registered under this strand.
    pub fn handlers(&self) -> &HandlerCount {
        &self.handlers
    }

    /// Wrap a callback for serialized execution under this strand.
    ///
    /// The result registers exactly like a plain handler; the promise
    /// detaches the strand at registration time and stores the inner slot.
    pub fn wrap<V>(self: &Rc<Self>, slot: CallbackSlot<V>) -> Handler<V> {
        Handler::Serialized {
            strand: Rc::clone(self),
            slot,
        }
    }
}
