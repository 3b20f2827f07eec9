//! # Corolink: completion/resolution core for coroutine-driven I/O bindings
//!
//! Corolink is the adapter layer that lets a single-threaded host issue
//! asynchronous operations — timers, signals, name resolution, socket and
//! stream I/O — and receive each outcome either through an explicit callback
//! or by resuming a cooperatively-suspended computation that awaited it.
//!
//! The crate covers the completion side only. The underlying I/O engine is
//! a collaborator: it delivers exactly one error/result pair per operation
//! by calling [`Engine::resolve`], and everything from there — invoking the
//! type-erased callback, resuming a chained coroutine, walking the chain to
//! its next awaited operation, releasing the originating I/O object — is
//! this crate's job.
//!
//! ## Core pieces
//!
//! - [`Engine`] — the resolution engine and resumption driver for one
//!   execution context. Owns the pending-promise table and the
//!   context-scoped [`last_error`](Engine::last_error) slot.
//! - [`PromiseId`] — handle to a pending operation's result. Each promise
//!   resolves exactly once; resolution destroys it.
//! - [`CallbackSlot`] / [`Handler`] — type-erased completion handlers,
//!   optionally wrapped by a [`Strand`] for serialized execution.
//! - [`IoObject`] — the capability I/O object types implement so their
//!   destruction is deferred until every promise issued against them has
//!   resolved.
//! - [`Coroutine`] / [`ChainValue`] — the seam toward the host's suspended
//!   computations: resolving a promise a coroutine awaits resumes it, and
//!   its next yielded promise parks the chain again.
//!
//! ## Quick start
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use corolink::{
//!     CallbackSlot, ChainValue, Engine, ErrorCode, Handler, HandlerCount, IoObject, Payload,
//! };
//!
//! // A minimal I/O object: the timer the host layer would wrap.
//! #[derive(Default)]
//! struct Timer {
//!     handlers: HandlerCount,
//!     closed: Cell<bool>,
//! }
//!
//! impl IoObject for Timer {
//!     fn handlers(&self) -> &HandlerCount {
//!         &self.handlers
//!     }
//!
//!     fn destroy(&self) {
//!         self.closed.set(true);
//!     }
//! }
//!
//! let engine = Engine::<i64>::new();
//! let timer = Rc::new(Timer::default());
//!
//! // Submission: one promise per asynchronous operation.
//! let wait = engine.issue(timer.clone());
//! engine.register(
//!     wait,
//!     Handler::Plain(CallbackSlot::code(|error, expirations| {
//!         assert!(error.is_ok());
//!         ChainValue::Value(i64::from(expirations))
//!     })),
//! )?;
//!
//! // Completion delivery, normally from the I/O subsystem's event loop.
//! engine.resolve(wait, ErrorCode::OK, Payload::Code(1))?;
//!
//! // Last promise against the timer resolved: destruction hook fired.
//! assert!(timer.closed.get());
//! # Ok::<(), corolink::CorolinkError>(())
//! ```
//!
//! ## Chaining
//!
//! A host coroutine awaits an operation by suspending on its promise. Feed
//! the coroutine to [`Engine::advance`] (or return it from a completion
//! callback) and the engine parks it on the yielded promise; resolving that
//! promise resumes the coroutine with the callback's produced value and
//! parks it on its next yield. Chains are strictly linear and each link is
//! driven by its own completion, so resumption never recurses.
//!
//! ## Threading model
//!
//! One engine per execution context, enforced at compile time: [`Engine`]
//! is neither `Send` nor `Sync`. Hosts running one event loop per thread
//! create one engine per thread; last-error slots never bleed across.

pub mod callback;
pub mod coroutine;
pub mod engine;
pub mod error;
pub mod io_object;
pub mod promise;
pub mod strand;

pub use callback::{CallbackSlot, ErrorCode, Handler, Payload, PayloadKind};
pub use coroutine::{ChainValue, Coroutine, CoroutineHandle, Yielded};
pub use engine::Engine;
pub use error::{CorolinkError, Result};
pub use io_object::{HandlerCount, IoHandle, IoObject};
pub use promise::{Promise, PromiseId};
pub use strand::{Strand, StrandHandle};
