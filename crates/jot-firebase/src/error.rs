//! Error type for `jot-firebase`.
//!
//! `Display` output is the normalized user-facing message: structured
//! provider errors display their message field verbatim, transport errors
//! display the client's message, and unparseable error bodies fall back to a
//! fixed string.

use thiserror::Error;

/// Shown when an auth error body cannot be parsed.
pub(crate) const AUTH_FALLBACK: &str =
  "An unexpected error occurred while authenticating.";

/// Shown when a document-store error body cannot be parsed.
pub(crate) const STORE_FALLBACK: &str =
  "Unable to fetch notes due to an unexpected error.";

#[derive(Debug, Error)]
pub enum Error {
  /// A structured provider error.
  #[error("{message}")]
  Api {
    status:  reqwest::StatusCode,
    message: String,
  },

  #[error("{0}")]
  Transport(#[from] reqwest::Error),

  #[error("malformed response from the backend: {0}")]
  Decode(String),

  #[error("no federated identity provider is configured")]
  NoFederatedProvider,

  #[error("no active session")]
  NotSignedIn,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
