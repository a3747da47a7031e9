//! Transitions of the notes slice.

use jot_core::note::NoteDocument;

use crate::state::NotesState;

/// One state transition of the notes slice.
#[derive(Debug, Clone)]
pub(crate) enum NotesEvent {
  /// A notes operation entered flight.
  Pending,
  /// Fetch fulfilled: `items` is replaced wholesale.
  Fetched { user_id: String, items: Vec<NoteDocument> },
  /// Fetch rejected. A failed fetch cannot be trusted to represent a valid
  /// document set, so `items` is cleared.
  FetchFailed(String),
  /// A fetch resolved for a user other than the current session; its result
  /// was dropped and `items` is left untouched.
  FetchSuperseded,
  /// Create fulfilled: the confirmed record is prepended
  /// (most-recent-first is a UX contract, not a backend guarantee).
  Created { user_id: String, note: NoteDocument },
  /// Update fulfilled: the matching item is replaced, or appended when no
  /// match exists (a missed fetch must not lose the write).
  Updated { user_id: String, note: NoteDocument },
  /// Delete fulfilled: the matching item is removed.
  Deleted { user_id: String, note_id: String },
  /// A create/update/delete was rejected; `items` is left untouched.
  Failed(String),
  /// The owning user signed out; the slice resets.
  Cleared,
}

pub(crate) fn reduce(state: &mut NotesState, event: NotesEvent) {
  match event {
    NotesEvent::Pending => {
      state.loading = true;
      state.error = None;
    }
    NotesEvent::Fetched { user_id, items } => {
      state.loading = false;
      state.items = items;
      state.error = None;
      state.last_fetched_user_id = Some(user_id);
    }
    NotesEvent::FetchFailed(message) => {
      state.loading = false;
      state.error = Some(message);
      state.items.clear();
      state.last_fetched_user_id = None;
    }
    NotesEvent::FetchSuperseded => {
      state.loading = false;
    }
    NotesEvent::Created { user_id, note } => {
      state.loading = false;
      state.items.insert(0, note);
      state.error = None;
      state.last_fetched_user_id = Some(user_id);
    }
    NotesEvent::Updated { user_id, note } => {
      state.loading = false;
      match state.items.iter().position(|n| n.id == note.id) {
        Some(index) => state.items[index] = note,
        None => state.items.push(note),
      }
      state.error = None;
      state.last_fetched_user_id = Some(user_id);
    }
    NotesEvent::Deleted { user_id, note_id } => {
      state.loading = false;
      state.items.retain(|n| n.id != note_id);
      state.error = None;
      state.last_fetched_user_id = Some(user_id);
    }
    NotesEvent::Failed(message) => {
      state.loading = false;
      state.error = Some(message);
    }
    NotesEvent::Cleared => {
      state.items.clear();
      state.error = None;
      state.last_fetched_user_id = None;
    }
  }
}
