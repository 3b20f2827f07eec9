//! Pending-result objects.
//!
//! A [`Promise`] represents the not-yet-available outcome of exactly one
//! asynchronous operation. It is created when the operation is submitted,
//! lives in the engine's pending table, and is destroyed by its one
//! resolution. Destruction carries the lifetime bookkeeping: the origin
//! I/O object's handler count drops by one (with the destruction hook fired
//! at zero) and any attached strand is released the same way.

mod core;

#[cfg(test)]
mod tests;

pub use self::core::{Promise, PromiseId};
