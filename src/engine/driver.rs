//! Resumption driver: parks chains on the promises they await.

use tracing::warn;

use crate::coroutine::{ChainValue, Yielded};
use crate::engine::Engine;

impl<V> Engine<V> {
    /// Advance a resumption chain by one link.
    ///
    /// If `value` denotes a suspended computation that is still resumable
    /// and currently yielding a pending promise, the computation is parked
    /// on that promise: its resolution will resume the computation and feed
    /// the next yield back through here. Each link is driven by its own
    /// completion, so chains of any length advance without call-stack
    /// recursion.
    ///
    /// A computation that has finished is a normal terminal state; its
    /// output is discarded silently. A resumable computation suspended on
    /// anything other than a pending promise is a protocol violation: one
    /// warning-level diagnostic is emitted, the value is discarded, and the
    /// chain halts. Plain values carry no chain to drive.
    ///
    /// Public so hosts can start a chain directly from a coroutine they
    /// constructed; [`resolve`](Engine::resolve) calls it internally with
    /// resumed chains and with the produced value of non-chained callbacks.
    pub fn advance(&self, value: ChainValue<V>) {
        let coroutine = match value {
            ChainValue::Coroutine(coroutine) => coroutine,
            ChainValue::Value(_) | ChainValue::Promise(_) => return,
        };

        let (resumable, yielded) = {
            let coroutine = coroutine.borrow();
            (coroutine.is_resumable(), coroutine.yielded())
        };
        if !resumable {
            // Finished computations are a normal end of chain.
            return;
        }

        match yielded {
            Some(Yielded::Promise(id)) => {
                let mut pending = self.pending.borrow_mut();
                match pending.get_mut(&id) {
                    Some(promise) => promise.attach_chain(coroutine),
                    None => {
                        warn!(
                            promise = id.value(),
                            "yielded promise is not pending; halting chain"
                        );
                    }
                }
            }
            Some(Yielded::Other) | None => {
                warn!("invalid yield value; a pending promise was expected");
            }
        }
    }
}
