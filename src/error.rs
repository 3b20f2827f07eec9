//! Error types and handling for the completion core.
//!
//! Operation errors delivered by the I/O subsystem are *data*: they travel
//! through the normal completion path as [`ErrorCode`](crate::ErrorCode)
//! values and are never represented by this type. The variants here cover
//! contract breaches at the engine boundary, which callers are expected to
//! treat as defects rather than recoverable conditions.

use thiserror::Error;

use crate::callback::PayloadKind;
use crate::promise::PromiseId;

/// Result type alias for completion-core operations.
///
/// Simplifies signatures throughout the crate by fixing the error type
/// while allowing different success types.
pub type Result<T> = std::result::Result<T, CorolinkError>;

/// Error type for contract breaches at the engine boundary.
///
/// Every variant indicates misuse by the host or the I/O subsystem, not a
/// runtime condition to retry. Resource bookkeeping (handler-count
/// decrements, destroy-at-zero) still runs on the paths that produce these
/// errors, so a defective caller cannot leak I/O objects or strands.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CorolinkError {
    /// The promise is not in the pending table.
    ///
    /// Returned when resolving or registering against an id the engine
    /// does not know. A second resolution of the same promise lands here,
    /// because the first one removed it from the table; no handler count
    /// is touched on this path.
    #[error("promise {0} is not pending")]
    NotPending(PromiseId),

    /// The promise was resolved before a callback was registered.
    ///
    /// The completion handler must be in place by the time the underlying
    /// operation can complete. Submission code that issues a promise and
    /// fails to register a handler is broken.
    #[error("promise {0} resolved with no registered callback")]
    MissingCallback(PromiseId),

    /// A callback was already registered for this promise.
    ///
    /// Each promise carries exactly one completion handler, set at most
    /// once before resolution.
    #[error("promise {0} already has a callback registered")]
    CallbackAlreadySet(PromiseId),

    /// The completion payload does not match the registered callback.
    ///
    /// The I/O subsystem delivered a payload variant other than the one
    /// the callback was registered for, e.g. a transfer size where the
    /// handler expects resolver endpoints.
    #[error("callback expects a {expected} payload, completion delivered {delivered}")]
    PayloadMismatch {
        /// Payload kind the registered callback accepts.
        expected: PayloadKind,
        /// Payload kind the completion actually carried.
        delivered: PayloadKind,
    },
}

// Errors cross thread boundaries when hosts funnel them into their own
// reporting channels, even though the engine itself is single-threaded.
static_assertions::assert_impl_all!(CorolinkError: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    mod error_messages {
        use super::*;

        #[test]
        fn not_pending() {
            let error = CorolinkError::NotPending(PromiseId::new(7));
            assert_eq!(error.to_string(), "promise #7 is not pending");
        }

        #[test]
        fn missing_callback() {
            let error = CorolinkError::MissingCallback(PromiseId::new(3));
            assert_eq!(
                error.to_string(),
                "promise #3 resolved with no registered callback"
            );
        }

        #[test]
        fn callback_already_set() {
            let error = CorolinkError::CallbackAlreadySet(PromiseId::new(1));
            assert_eq!(
                error.to_string(),
                "promise #1 already has a callback registered"
            );
        }

        #[test]
        fn payload_mismatch() {
            let error = CorolinkError::PayloadMismatch {
                expected: PayloadKind::Size,
                delivered: PayloadKind::Code,
            };
            assert_eq!(
                error.to_string(),
                "callback expects a size payload, completion delivered code"
            );
        }
    }
}
