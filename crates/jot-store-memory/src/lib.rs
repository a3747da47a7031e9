//! In-process backend for the jot client.
//!
//! Implements both [`jot_core::auth::AuthGateway`] and
//! [`jot_core::store::NoteStore`] against process-local maps, with the same
//! observable contract as the hosted backends: server-assigned timestamps,
//! a session channel that publishes every transition, and per-user note
//! collections. Used by `jot-app`'s integration tests and the headless
//! example.

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::MemoryBackend;

#[cfg(test)]
mod tests;
