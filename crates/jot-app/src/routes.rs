//! Route-guard policy.
//!
//! The navigation layer asks for a decision on every auth-state or path
//! change and applies whatever redirect comes back. No decision is made
//! while the session is still resolving, so a user who is about to be
//! restored never sees a flash of the sign-in view.

use crate::state::AuthState;

/// Where the navigation layer should send the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
  pub to: String,
  /// The originally requested destination, to return to after sign-in.
  pub preserve: Option<String>,
}

/// Which views are public, which are auth-only, and where redirects land.
#[derive(Debug, Clone)]
pub struct RoutePolicy {
  /// Reachable without a session; an entry matches itself and any sub-path.
  pub public_paths: Vec<String>,
  /// Only meaningful without a session (login/register).
  pub auth_paths:   Vec<String>,
  pub sign_in_path: String,
  pub home_path:    String,
}

impl Default for RoutePolicy {
  fn default() -> Self {
    Self {
      public_paths: vec![
        "/auth/login".into(),
        "/auth/register".into(),
        "/auth/reset".into(),
      ],
      auth_paths:   vec!["/auth/login".into(), "/auth/register".into()],
      sign_in_path: "/auth/login".into(),
      home_path:    "/".into(),
    }
  }
}

impl RoutePolicy {
  /// Decide a redirect for `current_path` under the given auth state.
  ///
  /// The query string is ignored for matching but preserved in the
  /// post-login destination.
  pub fn evaluate(&self, auth: &AuthState, current_path: &str) -> Option<Redirect> {
    if auth.loading {
      return None;
    }

    let path = current_path.split('?').next().unwrap_or(current_path);

    match &auth.user {
      None if !self.is_public(path) => Some(Redirect {
        to:       self.sign_in_path.clone(),
        preserve: Some(current_path.to_string()),
      }),
      Some(_) if self.auth_paths.iter().any(|p| p == path) => Some(Redirect {
        to:       self.home_path.clone(),
        preserve: None,
      }),
      _ => None,
    }
  }

  fn is_public(&self, path: &str) -> bool {
    self
      .public_paths
      .iter()
      .any(|public| path == public || path.starts_with(&format!("{public}/")))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use jot_core::user::AuthUser;

  fn signed_out() -> AuthState {
    AuthState::default()
  }

  fn signed_in() -> AuthState {
    AuthState {
      user: Some(AuthUser {
        uid:       "u1".into(),
        email:     None,
        name:      None,
        image_url: None,
      }),
      loading: false,
      error: None,
    }
  }

  fn resolving() -> AuthState {
    AuthState { user: None, loading: true, error: None }
  }

  #[test]
  fn no_decision_while_the_session_resolves() {
    let policy = RoutePolicy::default();
    assert_eq!(policy.evaluate(&resolving(), "/"), None);
  }

  #[test]
  fn signed_out_on_a_protected_view_redirects_to_sign_in() {
    let policy = RoutePolicy::default();
    let redirect = policy.evaluate(&signed_out(), "/notes?id=n1").unwrap();
    assert_eq!(redirect.to, "/auth/login");
    // The full original path, query included, comes back after sign-in.
    assert_eq!(redirect.preserve.as_deref(), Some("/notes?id=n1"));
  }

  #[test]
  fn signed_out_on_a_public_view_stays_put() {
    let policy = RoutePolicy::default();
    assert_eq!(policy.evaluate(&signed_out(), "/auth/login"), None);
    assert_eq!(policy.evaluate(&signed_out(), "/auth/reset"), None);
    // Sub-paths of a public entry are public too.
    assert_eq!(policy.evaluate(&signed_out(), "/auth/reset/sent"), None);
  }

  #[test]
  fn signed_in_on_an_auth_view_redirects_home() {
    let policy = RoutePolicy::default();
    let redirect = policy.evaluate(&signed_in(), "/auth/login").unwrap();
    assert_eq!(redirect.to, "/");
    assert_eq!(redirect.preserve, None);
  }

  #[test]
  fn signed_in_elsewhere_stays_put() {
    let policy = RoutePolicy::default();
    assert_eq!(policy.evaluate(&signed_in(), "/"), None);
    assert_eq!(policy.evaluate(&signed_in(), "/notes"), None);
    // Reset stays reachable for signed-in users.
    assert_eq!(policy.evaluate(&signed_in(), "/auth/reset"), None);
  }

  #[test]
  fn query_strings_do_not_defeat_matching() {
    let policy = RoutePolicy::default();
    assert_eq!(policy.evaluate(&signed_out(), "/auth/login?from=%2F"), None);
    let redirect = policy.evaluate(&signed_in(), "/auth/login?from=%2F").unwrap();
    assert_eq!(redirect.to, "/");
  }
}
