//! Transitions of the auth slice.

use jot_core::user::AuthUser;

use crate::state::AuthState;

/// One state transition of the auth slice.
#[derive(Debug, Clone)]
pub(crate) enum AuthEvent {
  /// An auth operation entered flight.
  Pending,
  /// A credential operation fulfilled with a signed-in user.
  SignedIn(AuthUser),
  /// Sign-out fulfilled.
  SignedOut,
  /// An operation with no identity payload fulfilled (password reset).
  Settled,
  /// An auth operation was rejected.
  Rejected(String),
  /// The session listener resolved the current identity.
  SessionResolved(Option<AuthUser>),
  /// The session listener itself failed; auth awareness is gone.
  ListenerFailed(String),
}

pub(crate) fn reduce(state: &mut AuthState, event: AuthEvent) {
  match event {
    AuthEvent::Pending => {
      state.loading = true;
      state.error = None;
    }
    AuthEvent::SignedIn(user) => {
      state.loading = false;
      state.user = Some(user);
      state.error = None;
    }
    AuthEvent::SignedOut => {
      state.loading = false;
      state.user = None;
      state.error = None;
    }
    AuthEvent::Settled => {
      state.loading = false;
      state.error = None;
    }
    AuthEvent::Rejected(message) => {
      state.loading = false;
      state.error = Some(message);
    }
    AuthEvent::SessionResolved(user) => {
      state.loading = false;
      state.user = user;
    }
    AuthEvent::ListenerFailed(message) => {
      state.loading = false;
      state.error = Some(message);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn user(uid: &str) -> AuthUser {
    AuthUser {
      uid:       uid.to_string(),
      email:     None,
      name:      None,
      image_url: None,
    }
  }

  #[test]
  fn pending_sets_loading_and_clears_error() {
    let mut state = AuthState {
      user:    None,
      loading: false,
      error:   Some("previous failure".into()),
    };
    reduce(&mut state, AuthEvent::Pending);
    assert!(state.loading);
    assert!(state.error.is_none());
  }

  #[test]
  fn signed_in_replaces_the_user() {
    let mut state = AuthState::default();
    reduce(&mut state, AuthEvent::Pending);
    reduce(&mut state, AuthEvent::SignedIn(user("u1")));
    assert!(!state.loading);
    assert_eq!(state.user.as_ref().map(|u| u.uid.as_str()), Some("u1"));
    assert!(state.error.is_none());
  }

  #[test]
  fn signed_out_clears_the_user() {
    let mut state = AuthState { user: Some(user("u1")), loading: true, error: None };
    reduce(&mut state, AuthEvent::SignedOut);
    assert!(state.user.is_none());
    assert!(!state.loading);
  }

  #[test]
  fn rejection_records_the_message_and_keeps_the_user() {
    let mut state = AuthState { user: Some(user("u1")), loading: true, error: None };
    reduce(&mut state, AuthEvent::Rejected("bad password".into()));
    assert_eq!(state.error.as_deref(), Some("bad password"));
    assert!(!state.loading);
    assert!(state.user.is_some());
  }

  #[test]
  fn settled_only_finishes_the_operation() {
    let mut state = AuthState { user: Some(user("u1")), loading: true, error: None };
    reduce(&mut state, AuthEvent::Settled);
    assert!(!state.loading);
    assert!(state.user.is_some());
    assert!(state.error.is_none());
  }

  #[test]
  fn session_resolution_sets_the_user_either_way() {
    let mut state = AuthState { user: None, loading: true, error: None };
    reduce(&mut state, AuthEvent::SessionResolved(Some(user("u1"))));
    assert_eq!(state.user.as_ref().map(|u| u.uid.as_str()), Some("u1"));
    assert!(!state.loading);

    reduce(&mut state, AuthEvent::SessionResolved(None));
    assert!(state.user.is_none());
  }
}
