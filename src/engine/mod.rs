//! Resolution engine and resumption driver.
//!
//! The engine owns the pending-promise table and executes the resolution
//! protocol when the I/O subsystem delivers a completion: invoke the
//! registered callback, resume a chained suspended computation if one is
//! parked on the promise, and tear the promise down. The driver half walks
//! a chain one link at a time — each link is parked on its own promise and
//! driven by that promise's own completion, so chains advance iteratively
//! with no call-stack recursion however long they grow.

mod core;
mod driver;


pub use self::core::Engine;
