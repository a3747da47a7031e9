//! Core types and trait definitions for the jot note-taking client.
//!
//! This crate is deliberately free of HTTP and backend dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod auth;
pub mod error;
pub mod note;
pub mod store;
pub mod timestamp;
pub mod user;

pub use error::{Error, Result};
