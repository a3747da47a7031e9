//! The notes repository — normalizing wrapper over the document store.

use std::sync::Arc;

use jot_core::{
  Error, Result,
  note::{NoteChanges, NoteDocument, NoteDraft},
  store::NoteStore,
};

/// Stateless translator between the store backend and the normalized
/// [`NoteDocument`]. Every operation requires a non-empty `user_id` and
/// fails fast with [`Error::Validation`] before any backend call.
pub struct NotesRepository<N> {
  store: Arc<N>,
}

impl<N: NoteStore> NotesRepository<N> {
  pub fn new(store: Arc<N>) -> Self {
    Self { store }
  }

  /// Every document in the user's collection, in backend-default order.
  pub async fn fetch_all(&self, user_id: &str) -> Result<Vec<NoteDocument>> {
    require_user(user_id, "A user must be signed in to fetch notes.")?;

    let raw = self.store.list_notes(user_id).await.map_err(store_error)?;
    Ok(raw.into_iter().map(NoteDocument::from_raw).collect())
  }

  /// Insert a note, then re-read it so the returned record is exactly what
  /// the backend durably stored, server-assigned timestamps included.
  pub async fn create(
    &self,
    user_id: &str,
    draft: &NoteDraft,
  ) -> Result<NoteDocument> {
    require_user(user_id, "A user must be signed in to create a note.")?;

    let note_id = self
      .store
      .add_note(user_id, draft)
      .await
      .map_err(store_error)?;
    self.read_back(user_id, &note_id).await
  }

  /// Apply a partial merge, then re-read the updated record. `created_at`
  /// is not expressible in [`NoteChanges`] and therefore never touched.
  pub async fn update(
    &self,
    user_id: &str,
    note_id: &str,
    changes: &NoteChanges,
  ) -> Result<NoteDocument> {
    require_user(user_id, "A user must be signed in to update a note.")?;

    self
      .store
      .update_note(user_id, note_id, changes)
      .await
      .map_err(store_error)?;
    self.read_back(user_id, note_id).await
  }

  /// Remove a note. Returns the deleted id so callers can reconcile local
  /// lists without a re-fetch.
  pub async fn delete(&self, user_id: &str, note_id: &str) -> Result<String> {
    require_user(user_id, "A user must be signed in to delete a note.")?;

    self
      .store
      .delete_note(user_id, note_id)
      .await
      .map_err(store_error)?;
    Ok(note_id.to_string())
  }

  async fn read_back(&self, user_id: &str, note_id: &str) -> Result<NoteDocument> {
    let raw = self
      .store
      .get_note(user_id, note_id)
      .await
      .map_err(store_error)?
      .ok_or_else(|| {
        Error::Repository(format!("note {note_id} is missing after a write"))
      })?;
    Ok(NoteDocument::from_raw(raw))
  }
}

fn require_user(user_id: &str, message: &str) -> Result<()> {
  if user_id.is_empty() {
    return Err(Error::Validation(message.to_string()));
  }
  Ok(())
}

fn store_error<E: std::error::Error>(err: E) -> Error {
  Error::Repository(err.to_string())
}
