//! The `NoteStore` trait — abstraction over the external document store.
//!
//! Documents live in a per-user collection at the logical path
//! `users/{user_id}/notes`. Every operation is parameterized by `user_id`;
//! the trait offers no way to read across users.

use std::future::Future;

use crate::note::{NoteChanges, NoteDraft, RawNoteDocument};

/// Abstraction over a hosted document store holding per-user note
/// collections.
///
/// The server assigns both timestamps on add (to the same instant) and
/// refreshes `updated_at` on every partial merge. Callers wanting the
/// materialized record after a write re-read it with
/// [`get_note`](NoteStore::get_note).
pub trait NoteStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read every document in the user's collection, in backend-default order.
  fn list_notes<'a>(
    &'a self,
    user_id: &'a str,
  ) -> impl Future<Output = Result<Vec<RawNoteDocument>, Self::Error>> + Send + 'a;

  /// Insert a new document with server-assigned `created_at == updated_at`.
  /// Returns the new document id.
  fn add_note<'a>(
    &'a self,
    user_id: &'a str,
    draft: &'a NoteDraft,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'a;

  /// Retrieve a single document. Returns `None` if not found.
  fn get_note<'a>(
    &'a self,
    user_id: &'a str,
    note_id: &'a str,
  ) -> impl Future<Output = Result<Option<RawNoteDocument>, Self::Error>> + Send + 'a;

  /// Apply a partial merge and refresh `updated_at` server-side.
  fn update_note<'a>(
    &'a self,
    user_id: &'a str,
    note_id: &'a str,
    changes: &'a NoteChanges,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Remove a document.
  fn delete_note<'a>(
    &'a self,
    user_id: &'a str,
    note_id: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
