//! Error type for `jot-store-memory`.
//!
//! `Display` output doubles as the user-facing message, so variants read as
//! complete sentences the way the hosted providers' messages do.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("an account already exists for {0}")]
  EmailTaken(String),

  #[error("password must be at least 6 characters")]
  WeakPassword,

  #[error("invalid email or password")]
  InvalidCredentials,

  #[error("no federated identity provider is configured")]
  NoFederatedIdentity,

  #[error("note not found: {0}")]
  NoteNotFound(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
