//! Note documents and their write payloads.
//!
//! A note is a single document in the owning user's collection. The store
//! traits deal in [`RawNoteDocument`] (timestamps as the backend reported
//! them); the repository layer normalizes to [`NoteDocument`] before anything
//! reaches application state.

use serde::{Deserialize, Serialize};

use crate::timestamp::RawTimestamp;

/// A normalized note, as held in application state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDocument {
  /// Backend-assigned, immutable, unique within the owning user's collection.
  pub id:         String,
  pub title:      Option<String>,
  pub content:    Option<String>,
  /// ISO-8601; set once at creation, never mutated afterwards.
  pub created_at: Option<String>,
  /// ISO-8601; refreshed by the server on every update.
  pub updated_at: Option<String>,
}

/// A note as the store backend returned it, timestamps not yet normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct RawNoteDocument {
  pub id:         String,
  pub title:      Option<String>,
  pub content:    Option<String>,
  pub created_at: RawTimestamp,
  pub updated_at: RawTimestamp,
}

impl NoteDocument {
  /// Normalize a backend document: timestamps become ISO-8601 strings, with
  /// unrecognized shapes propagating as absent.
  pub fn from_raw(raw: RawNoteDocument) -> Self {
    Self {
      id:         raw.id,
      title:      raw.title,
      content:    raw.content,
      created_at: raw.created_at.to_iso8601(),
      updated_at: raw.updated_at.to_iso8601(),
    }
  }
}

/// The payload for creating a note. Timestamps are server-assigned and not
/// representable here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
  pub title:   Option<String>,
  pub content: Option<String>,
}

/// A partial update. `created_at` is immutable and not representable here;
/// `updated_at` is refreshed by the server on every apply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteChanges {
  pub title:   Option<String>,
  pub content: Option<String>,
}
