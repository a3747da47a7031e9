//! Application state and the store that owns it.
//!
//! The store wraps a watch channel: `send_modify` applies each slice event
//! atomically relative to every other mutation, and subscribers see a
//! consistent snapshot after every transition. All mutation goes through the
//! slice event contract; there is no way to write the state directly from
//! outside this crate.

use jot_core::{note::NoteDocument, user::AuthUser};
use tokio::sync::watch;

use crate::{auth_slice, notes_slice};

// ─── Slices ──────────────────────────────────────────────────────────────────

/// The auth slice. `loading` is true only while an auth operation (sign-in,
/// sign-up, sign-out, reset, or initial session resolution) is in flight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
  pub user:    Option<AuthUser>,
  pub loading: bool,
  pub error:   Option<String>,
}

/// The notes slice. `last_fetched_user_id` records which user's data `items`
/// currently reflects; it guards against presenting stale cross-user data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotesState {
  /// Most-recent-first for creates, otherwise fetch order.
  pub items:   Vec<NoteDocument>,
  pub loading: bool,
  pub error:   Option<String>,
  pub last_fetched_user_id: Option<String>,
}

/// The two independent state slices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
  pub auth:  AuthState,
  pub notes: NotesState,
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// Owner of the application state.
pub struct Store {
  state: watch::Sender<AppState>,
}

impl Store {
  pub fn new() -> Self {
    let (state, _) = watch::channel(AppState::default());
    Self { state }
  }

  /// A clone of the current state.
  pub fn snapshot(&self) -> AppState {
    self.state.borrow().clone()
  }

  /// Observe every state transition. The receiver's current value is the
  /// state as of subscription.
  pub fn subscribe(&self) -> watch::Receiver<AppState> {
    self.state.subscribe()
  }

  pub(crate) fn apply_auth(&self, event: auth_slice::AuthEvent) {
    self
      .state
      .send_modify(|state| auth_slice::reduce(&mut state.auth, event));
  }

  pub(crate) fn apply_notes(&self, event: notes_slice::NotesEvent) {
    self
      .state
      .send_modify(|state| notes_slice::reduce(&mut state.notes, event));
  }
}

impl Default for Store {
  fn default() -> Self {
    Self::new()
  }
}
