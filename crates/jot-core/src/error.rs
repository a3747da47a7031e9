//! Error types for `jot-core`.
//!
//! The four variants are the application-level failure taxonomy. The string
//! payloads are already normalized, user-facing messages; `Display` yields
//! them verbatim so the state layer can store them without further mapping.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A required identifier was missing; raised before any backend call.
  #[error("{0}")]
  Validation(String),

  /// A credential or session failure from the auth backend.
  #[error("{0}")]
  Auth(String),

  /// A document CRUD failure from the store backend.
  #[error("{0}")]
  Repository(String),

  /// Required startup configuration is absent. Fatal at boot.
  #[error("missing required configuration: {}", .missing.join(", "))]
  Configuration { missing: Vec<String> },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
