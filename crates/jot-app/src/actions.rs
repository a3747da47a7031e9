//! [`AppContext`] — the dispatchable actions over the application state.
//!
//! Each action applies the pending transition, awaits the underlying
//! operation, and applies fulfilled or rejected. Failures are recorded in
//! the relevant slice's `error` field and also returned to the caller, who
//! is free to ignore them; nothing is ever re-thrown past the store.
//!
//! Actions are not mutually exclusive: concurrent operations interleave at
//! the network, and each transition applies atomically on resolution.
//! Last-resolved wins at the list level.

use std::sync::Arc;

use jot_core::{
  Result,
  auth::AuthGateway,
  note::{NoteChanges, NoteDocument, NoteDraft},
  store::NoteStore,
  user::AuthUser,
};

use crate::{
  auth_slice::AuthEvent,
  notes_slice::NotesEvent,
  repository::NotesRepository,
  session::{SessionEvents, SessionManager},
  state::Store,
};

/// The explicitly constructed application context: the session manager, the
/// notes repository, and the store they mediate. Built once at boot and
/// passed to every consumer.
pub struct AppContext<A, N> {
  session: SessionManager<A>,
  notes:   NotesRepository<N>,
  store:   Store,
}

impl<A: AuthGateway, N: NoteStore> AppContext<A, N> {
  pub fn new(gateway: Arc<A>, note_store: Arc<N>) -> Self {
    Self {
      session: SessionManager::new(gateway),
      notes:   NotesRepository::new(note_store),
      store:   Store::new(),
    }
  }

  pub fn store(&self) -> &Store {
    &self.store
  }

  pub(crate) fn session_events(&self) -> Result<SessionEvents> {
    self.session.subscribe()
  }

  fn current_uid(&self) -> Option<String> {
    self.store.snapshot().auth.user.map(|u| u.uid)
  }

  // ── Auth actions ──────────────────────────────────────────────────────────

  pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser> {
    self.store.apply_auth(AuthEvent::Pending);
    match self.session.sign_up(email, password).await {
      Ok(user) => {
        self.store.apply_auth(AuthEvent::SignedIn(user.clone()));
        Ok(user)
      }
      Err(err) => {
        self.store.apply_auth(AuthEvent::Rejected(err.to_string()));
        Err(err)
      }
    }
  }

  pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser> {
    self.store.apply_auth(AuthEvent::Pending);
    match self.session.sign_in(email, password).await {
      Ok(user) => {
        self.store.apply_auth(AuthEvent::SignedIn(user.clone()));
        Ok(user)
      }
      Err(err) => {
        self.store.apply_auth(AuthEvent::Rejected(err.to_string()));
        Err(err)
      }
    }
  }

  pub async fn sign_in_federated(&self) -> Result<AuthUser> {
    self.store.apply_auth(AuthEvent::Pending);
    match self.session.sign_in_federated().await {
      Ok(user) => {
        self.store.apply_auth(AuthEvent::SignedIn(user.clone()));
        Ok(user)
      }
      Err(err) => {
        self.store.apply_auth(AuthEvent::Rejected(err.to_string()));
        Err(err)
      }
    }
  }

  pub async fn sign_out(&self) -> Result<()> {
    self.store.apply_auth(AuthEvent::Pending);
    match self.session.sign_out().await {
      Ok(()) => {
        self.store.apply_auth(AuthEvent::SignedOut);
        Ok(())
      }
      Err(err) => {
        self.store.apply_auth(AuthEvent::Rejected(err.to_string()));
        Err(err)
      }
    }
  }

  pub async fn request_password_reset(&self, email: &str) -> Result<()> {
    self.store.apply_auth(AuthEvent::Pending);
    match self.session.request_password_reset(email).await {
      Ok(()) => {
        self.store.apply_auth(AuthEvent::Settled);
        Ok(())
      }
      Err(err) => {
        self.store.apply_auth(AuthEvent::Rejected(err.to_string()));
        Err(err)
      }
    }
  }

  // ── Notes actions ─────────────────────────────────────────────────────────

  /// Fetch the user's notes and replace `items` wholesale.
  ///
  /// A resolution arriving after the session moved to a different user (or
  /// none) is discarded rather than applied: a slow fetch must never
  /// repopulate a cleared list with stale cross-user data.
  pub async fn fetch_notes(&self, user_id: &str) -> Result<Vec<NoteDocument>> {
    self.store.apply_notes(NotesEvent::Pending);
    match self.notes.fetch_all(user_id).await {
      Ok(items) => {
        if self.current_uid().as_deref() == Some(user_id) {
          self.store.apply_notes(NotesEvent::Fetched {
            user_id: user_id.to_string(),
            items:   items.clone(),
          });
        } else {
          tracing::debug!(
            user_id,
            "discarding a notes fetch that resolved after a session change"
          );
          self.store.apply_notes(NotesEvent::FetchSuperseded);
        }
        Ok(items)
      }
      Err(err) => {
        self.store.apply_notes(NotesEvent::FetchFailed(err.to_string()));
        Err(err)
      }
    }
  }

  pub async fn create_note(
    &self,
    user_id: &str,
    draft: &NoteDraft,
  ) -> Result<NoteDocument> {
    self.store.apply_notes(NotesEvent::Pending);
    match self.notes.create(user_id, draft).await {
      Ok(note) => {
        self.store.apply_notes(NotesEvent::Created {
          user_id: user_id.to_string(),
          note:    note.clone(),
        });
        Ok(note)
      }
      Err(err) => {
        self.store.apply_notes(NotesEvent::Failed(err.to_string()));
        Err(err)
      }
    }
  }

  pub async fn update_note(
    &self,
    user_id: &str,
    note_id: &str,
    changes: &NoteChanges,
  ) -> Result<NoteDocument> {
    self.store.apply_notes(NotesEvent::Pending);
    match self.notes.update(user_id, note_id, changes).await {
      Ok(note) => {
        self.store.apply_notes(NotesEvent::Updated {
          user_id: user_id.to_string(),
          note:    note.clone(),
        });
        Ok(note)
      }
      Err(err) => {
        self.store.apply_notes(NotesEvent::Failed(err.to_string()));
        Err(err)
      }
    }
  }

  pub async fn delete_note(&self, user_id: &str, note_id: &str) -> Result<String> {
    self.store.apply_notes(NotesEvent::Pending);
    match self.notes.delete(user_id, note_id).await {
      Ok(note_id) => {
        self.store.apply_notes(NotesEvent::Deleted {
          user_id: user_id.to_string(),
          note_id: note_id.clone(),
        });
        Ok(note_id)
      }
      Err(err) => {
        self.store.apply_notes(NotesEvent::Failed(err.to_string()));
        Err(err)
      }
    }
  }

  /// Reset the notes slice. Dispatched by the orchestrator on sign-out.
  pub fn clear_notes(&self) {
    self.store.apply_notes(NotesEvent::Cleared);
  }
}
