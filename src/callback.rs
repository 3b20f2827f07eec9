//! Type-erased storage for completion handlers.
//!
//! Each asynchronous operation completes with an error code and one of a
//! closed set of payload shapes: an integer code (timer expirations, signal
//! numbers, accepted descriptors), a transfer size (read/write/recv/send),
//! or a list of resolved endpoints. [`CallbackSlot`] stores a handler
//! specialized to one of those shapes as a tagged variant, so the engine can
//! invoke it through a single non-generic entry point and a mismatched
//! delivery surfaces as an error instead of a cast.

use std::fmt;
use std::net::SocketAddr;

use crate::coroutine::ChainValue;
use crate::error::{CorolinkError, Result};
use crate::strand::StrandHandle;

/// Raw operation error delivered alongside a completion.
///
/// Zero means success. The core records the raw value for the
/// [`last_error`](crate::Engine::last_error) accessor but otherwise passes
/// it through to the registered callback untouched; interpreting it is the
/// callback's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ErrorCode(i32);

impl ErrorCode {
    /// Successful completion.
    pub const OK: ErrorCode = ErrorCode(0);

    /// Wrap a raw error value.
    pub const fn new(raw: i32) -> Self {
        ErrorCode(raw)
    }

    /// The raw error value.
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Whether this code denotes success.
    pub const fn is_ok(self) -> bool {
        self.0 == 0
    }
}

impl From<i32> for ErrorCode {
    fn from(raw: i32) -> Self {
        ErrorCode(raw)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Operation-specific completion datum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Integer result: timer expirations, signal number, accepted descriptor.
    Code(i32),
    /// Bytes transferred by a stream operation.
    Size(usize),
    /// Addresses produced by name resolution.
    Endpoints(Vec<SocketAddr>),
}

impl Payload {
    /// Discriminant of this payload.
    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::Code(_) => PayloadKind::Code,
            Payload::Size(_) => PayloadKind::Size,
            Payload::Endpoints(_) => PayloadKind::Endpoints,
        }
    }
}

/// Discriminant-only mirror of [`Payload`], used for registration-time
/// typing and mismatch diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// Integer result.
    Code,
    /// Bytes transferred.
    Size,
    /// Resolved addresses.
    Endpoints,
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PayloadKind::Code => "code",
            PayloadKind::Size => "size",
            PayloadKind::Endpoints => "endpoints",
        };
        f.write_str(name)
    }
}

type CodeCallback<V> = Box<dyn FnOnce(ErrorCode, i32) -> ChainValue<V>>;
type SizeCallback<V> = Box<dyn FnOnce(ErrorCode, usize) -> ChainValue<V>>;
type EndpointsCallback<V> = Box<dyn FnOnce(ErrorCode, Vec<SocketAddr>) -> ChainValue<V>>;

/// A completion handler specialized to one payload shape.
///
/// The handler consumes the error/result pair and produces the value made
/// available to a chained suspended computation (or discarded if nothing is
/// chained). Stored as a tagged variant so resolution stays non-generic:
/// the engine hands the slot whatever [`Payload`] the I/O subsystem
/// delivered and dispatch happens here.
pub enum CallbackSlot<V> {
    /// Handler for [`Payload::Code`] completions.
    Code(CodeCallback<V>),
    /// Handler for [`Payload::Size`] completions.
    Size(SizeCallback<V>),
    /// Handler for [`Payload::Endpoints`] completions.
    Endpoints(EndpointsCallback<V>),
}

impl<V> CallbackSlot<V> {
    /// Handler for integer-code completions.
    pub fn code<F>(callback: F) -> Self
    where
        F: FnOnce(ErrorCode, i32) -> ChainValue<V> + 'static,
    {
        CallbackSlot::Code(Box::new(callback))
    }

    /// Handler for transfer-size completions.
    pub fn size<F>(callback: F) -> Self
    where
        F: FnOnce(ErrorCode, usize) -> ChainValue<V> + 'static,
    {
        CallbackSlot::Size(Box::new(callback))
    }

    /// Handler for name-resolution completions.
    pub fn endpoints<F>(callback: F) -> Self
    where
        F: FnOnce(ErrorCode, Vec<SocketAddr>) -> ChainValue<V> + 'static,
    {
        CallbackSlot::Endpoints(Box::new(callback))
    }

    /// Payload kind this slot accepts.
    pub fn kind(&self) -> PayloadKind {
        match self {
            CallbackSlot::Code(_) => PayloadKind::Code,
            CallbackSlot::Size(_) => PayloadKind::Size,
            CallbackSlot::Endpoints(_) => PayloadKind::Endpoints,
        }
    }

    /// Invoke the handler with a delivered completion.
    ///
    /// Consumes the slot either way: a mismatched payload is a contract
    /// breach by the I/O subsystem and the handler is destroyed without
    /// running.
    pub(crate) fn invoke(self, error: ErrorCode, payload: Payload) -> Result<ChainValue<V>> {
        match (self, payload) {
            (CallbackSlot::Code(callback), Payload::Code(code)) => Ok(callback(error, code)),
            (CallbackSlot::Size(callback), Payload::Size(len)) => Ok(callback(error, len)),
            (CallbackSlot::Endpoints(callback), Payload::Endpoints(endpoints)) => {
                Ok(callback(error, endpoints))
            }
            (slot, payload) => Err(CorolinkError::PayloadMismatch {
                expected: slot.kind(),
                delivered: payload.kind(),
            }),
        }
    }
}

impl<V> fmt::Debug for CallbackSlot<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CallbackSlot").field(&self.kind()).finish()
    }
}

/// A callback as supplied at registration time.
///
/// Serialized execution is opted into by wrapping the slot with
/// [`Strand::wrap`](crate::Strand::wrap); the registration call shape does
/// not change. The promise unwraps a [`Handler::Serialized`] on
/// registration, attaching the strand and storing the inner slot.
#[derive(Debug)]
pub enum Handler<V> {
    /// Bare completion handler.
    Plain(CallbackSlot<V>),
    /// Handler whose execution is serialized under a strand.
    Serialized {
        /// Group the callback is serialized under.
        strand: StrandHandle,
        /// The wrapped handler.
        slot: CallbackSlot<V>,
    },
}
