//! Core promise definition and lifetime bookkeeping.

use std::fmt;

use crate::callback::{CallbackSlot, Handler};
use crate::coroutine::CoroutineHandle;
use crate::error::{CorolinkError, Result};
use crate::io_object::IoHandle;
use crate::strand::StrandHandle;

/// Identifier of a pending promise.
///
/// Ids are allocated by the engine starting at 1 (0 is reserved) and wrap
/// on overflow. An id is only meaningful against the engine that issued it
/// and only while the promise is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PromiseId(u64);

impl PromiseId {
    pub(crate) const fn new(raw: u64) -> Self {
        PromiseId(raw)
    }

    /// Raw id value.
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PromiseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

static_assertions::assert_impl_all!(PromiseId: Send, Sync, Copy);

/// The pending result of a single asynchronous operation.
///
/// Holds the completion handler (set at most once), the handle to the I/O
/// object that submitted the operation, an optional strand, and, once a
/// suspended computation awaits this promise, the chain link used to resume
/// it on resolution.
///
/// Constructing a promise increments the origin's handler count; dropping
/// it decrements the count exactly once and fires the origin's destruction
/// hook at zero. Putting the decrement in `Drop` makes destroy-at-zero
/// unconditional: it runs on resolution, on engine teardown with
/// operations still in flight, and when resolution errors out partway.
pub struct Promise<V> {
    id: PromiseId,
    callback: Option<CallbackSlot<V>>,
    origin: IoHandle,
    strand: Option<StrandHandle>,
    chain: Option<CoroutineHandle<V>>,
}

impl<V> Promise<V> {
    pub(crate) fn new(id: PromiseId, origin: IoHandle) -> Self {
        origin.handlers().increment();
        Self {
            id,
            callback: None,
            origin,
            strand: None,
            chain: None,
        }
    }

    /// This promise's id.
    pub fn id(&self) -> PromiseId {
        self.id
    }

    /// Register the completion handler.
    ///
    /// A [`Handler::Serialized`] wrapper is unwrapped here: the strand is
    /// attached to the promise (its handler count incremented) and the
    /// inner slot stored. The call shape is the same either way.
    pub(crate) fn register(&mut self, handler: Handler<V>) -> Result<()> {
        if self.callback.is_some() {
            return Err(CorolinkError::CallbackAlreadySet(self.id));
        }
        let slot = match handler {
            Handler::Plain(slot) => slot,
            Handler::Serialized { strand, slot } => {
                strand.handlers().increment();
                self.strand = Some(strand);
                slot
            }
        };
        self.callback = Some(slot);
        Ok(())
    }

    pub(crate) fn take_callback(&mut self) -> Option<CallbackSlot<V>> {
        self.callback.take()
    }

    pub(crate) fn attach_chain(&mut self, coroutine: CoroutineHandle<V>) {
        self.chain = Some(coroutine);
    }

    pub(crate) fn take_chain(&mut self) -> Option<CoroutineHandle<V>> {
        self.chain.take()
    }

    pub(crate) fn is_chained(&self) -> bool {
        self.chain.is_some()
    }

    pub(crate) fn strand(&self) -> Option<&StrandHandle> {
        self.strand.as_ref()
    }
}

impl<V> Drop for Promise<V> {
    fn drop(&mut self) {
        if self.origin.handlers().decrement() == 0 {
            self.origin.destroy();
        }
        if let Some(strand) = self.strand.take() {
            strand.handlers().decrement();
        }
    }
}

impl<V> fmt::Debug for Promise<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Promise")
            .field("id", &self.id)
            .field("callback", &self.callback)
            .field("serialized", &self.strand.is_some())
            .field("chained", &self.chain.is_some())
            .finish()
    }
}
