//! Core engine state and the resolution protocol.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::callback::{ErrorCode, Handler, Payload};
use crate::coroutine::ChainValue;
use crate::error::{CorolinkError, Result};
use crate::io_object::IoHandle;
use crate::promise::{Promise, PromiseId};
use crate::strand::StrandHandle;

/// Completion/resolution engine for one execution context.
///
/// One engine serves one single-threaded I/O event loop. All methods take
/// `&self`: resumption is re-entrant by design — a coroutine resumed from
/// inside [`resolve`](Engine::resolve) issues and registers new operations
/// against the same engine — so the pending table lives behind interior
/// mutability and no borrow is ever held across a call into host code.
///
/// The type is deliberately neither `Send` nor `Sync`. Hosts running one
/// I/O loop per thread create one engine per thread; each keeps its own
/// pending table and its own last-error slot, so unrelated chains resolving
/// on different threads cannot observe each other's error codes.
///
/// `V` is the host's value type, carried through callbacks and coroutine
/// resumption without ever being inspected.
#[derive(Debug)]
pub struct Engine<V> {
    pub(super) pending: RefCell<HashMap<PromiseId, Promise<V>>>,
    next_id: Cell<u64>,
    last_error: Cell<i64>,
}

impl<V> Engine<V> {
    /// Create an engine with an empty pending table.
    pub fn new() -> Self {
        Self {
            pending: RefCell::new(HashMap::new()),
            // 0 is reserved so a default-initialized id never looks live.
            next_id: Cell::new(1),
            last_error: Cell::new(0),
        }
    }

    /// Create a promise for an operation submitted against `origin`.
    ///
    /// Increments the origin's handler count; the matching decrement
    /// happens when the promise is destroyed, and the origin's destruction
    /// hook fires if that decrement reaches zero.
    pub fn issue(&self, origin: IoHandle) -> PromiseId {
        let id = PromiseId::new(self.next_id.get());
        // Wrapping add prevents overflow panics in long-running hosts.
        self.next_id.set(self.next_id.get().wrapping_add(1));
        // Construct first: the origin's count increment runs host-side
        // code, which must never execute under the table borrow.
        let promise = Promise::new(id, origin);
        self.pending.borrow_mut().insert(id, promise);
        id
    }

    /// Register the completion handler for a pending promise.
    ///
    /// A handler wrapped by [`Strand::wrap`](crate::Strand::wrap) is
    /// unwrapped here; the strand rides on the promise until resolution.
    /// Registering twice, or against an id that is not pending, is a
    /// contract breach and reported as an error.
    pub fn register(&self, id: PromiseId, handler: Handler<V>) -> Result<()> {
        let mut pending = self.pending.borrow_mut();
        let promise = pending.get_mut(&id).ok_or(CorolinkError::NotPending(id))?;
        promise.register(handler)
    }

    /// Deliver an operation's completion, resolving its promise.
    ///
    /// Called by the I/O subsystem exactly once per operation, from its own
    /// completion-delivery context. The promise leaves the pending table
    /// before any host code runs, so a second delivery for the same id
    /// finds nothing and fails with [`CorolinkError::NotPending`] without
    /// touching any handler count.
    ///
    /// The registered callback is invoked with the error/result pair and
    /// produces the value made available to a chained suspended
    /// computation. If a computation is parked on this promise, the raw
    /// error code is recorded in this engine's last-error slot, the
    /// computation is resumed with the produced value, and the chain is
    /// advanced to its next link. Otherwise the produced value itself is
    /// fed to the driver, which lets a callback hand back a freshly
    /// started coroutine to park on its first awaited promise.
    ///
    /// Teardown of the promise — callback destroyed, origin handler count
    /// decremented with the destruction hook fired at zero, strand
    /// released — runs on every path out of this function, including the
    /// error paths.
    pub fn resolve(&self, id: PromiseId, error: ErrorCode, payload: Payload) -> Result<()> {
        let mut promise = self
            .pending
            .borrow_mut()
            .remove(&id)
            .ok_or(CorolinkError::NotPending(id))?;
        let slot = promise
            .take_callback()
            .ok_or(CorolinkError::MissingCallback(id))?;

        let produced = slot.invoke(error, payload)?;
        match promise.take_chain() {
            Some(coroutine) => {
                self.last_error.set(i64::from(error.value()));
                coroutine.borrow_mut().resume(produced);
                self.advance(ChainValue::Coroutine(coroutine));
            }
            None => self.advance(produced),
        }
        Ok(())
        // `promise` drops here: origin and strand bookkeeping run in Drop.
    }

    /// Raw error code most recently recorded by a chained resolution on
    /// this engine.
    ///
    /// Execution-context-scoped: engines on other threads keep their own
    /// slots. Zero until the first chained resolution.
    pub fn last_error(&self) -> i64 {
        self.last_error.get()
    }

    /// Number of promises currently pending.
    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Whether the given promise is still pending.
    pub fn is_pending(&self, id: PromiseId) -> bool {
        self.pending.borrow().contains_key(&id)
    }

    /// Whether the given pending promise has a chained computation parked
    /// on it.
    pub fn is_chained(&self, id: PromiseId) -> bool {
        self.pending
            .borrow()
            .get(&id)
            .is_some_and(Promise::is_chained)
    }

    /// The strand a pending promise's handler is serialized under, if any.
    ///
    /// Lets the I/O subsystem post the completion through the promise's
    /// serialization group.
    pub fn strand_of(&self, id: PromiseId) -> Option<StrandHandle> {
        self.pending.borrow().get(&id).and_then(|p| p.strand().cloned())
    }
}

impl<V> Default for Engine<V> {
    fn default() -> Self {
        Self::new()
    }
}

// One engine per execution context; sharing one across threads would merge
// last-error slots that must stay independent.
static_assertions::assert_not_impl_any!(Engine<()>: Send, Sync);
