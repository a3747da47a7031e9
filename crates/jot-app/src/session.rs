//! The auth session manager — normalizing wrapper over the auth gateway.

use std::sync::Arc;

use tokio::sync::watch;

use jot_core::{
  Error, Result,
  auth::AuthGateway,
  user::{AuthUser, ProviderUser},
};

/// Wraps the external auth provider: gateway results are normalized to
/// [`AuthUser`] and gateway errors to [`Error::Auth`] carrying the
/// provider's message.
pub struct SessionManager<A> {
  gateway: Arc<A>,
}

impl<A: AuthGateway> SessionManager<A> {
  pub fn new(gateway: Arc<A>) -> Self {
    Self { gateway }
  }

  pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser> {
    self
      .gateway
      .sign_up(email, password)
      .await
      .map(AuthUser::from)
      .map_err(auth_error)
  }

  pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser> {
    self
      .gateway
      .sign_in(email, password)
      .await
      .map(AuthUser::from)
      .map_err(auth_error)
  }

  pub async fn sign_in_federated(&self) -> Result<AuthUser> {
    self
      .gateway
      .sign_in_federated()
      .await
      .map(AuthUser::from)
      .map_err(auth_error)
  }

  pub async fn sign_out(&self) -> Result<()> {
    self.gateway.sign_out().await.map_err(auth_error)
  }

  pub async fn request_password_reset(&self, email: &str) -> Result<()> {
    self
      .gateway
      .request_password_reset(email)
      .await
      .map_err(auth_error)
  }

  /// Subscribe to the session stream. Setup failure is fatal to auth
  /// awareness and is the caller's to surface.
  pub fn subscribe(&self) -> Result<SessionEvents> {
    let rx = self.gateway.subscribe_session().map_err(auth_error)?;
    Ok(SessionEvents { rx, delivered_initial: false })
  }
}

fn auth_error<E: std::error::Error>(err: E) -> Error {
  Error::Auth(err.to_string())
}

/// The normalized session stream.
///
/// Yields the session state at subscription time immediately, then every
/// subsequent transition; intermediate states may coalesce, the latest
/// always wins. Ends when the gateway is dropped. Dropping the stream is the
/// unsubscribe.
pub struct SessionEvents {
  rx: watch::Receiver<Option<ProviderUser>>,
  delivered_initial: bool,
}

impl SessionEvents {
  /// The next session state, or `None` once the stream is closed.
  pub async fn next(&mut self) -> Option<Option<AuthUser>> {
    if !self.delivered_initial {
      self.delivered_initial = true;
      return Some(self.rx.borrow_and_update().clone().map(AuthUser::from));
    }

    match self.rx.changed().await {
      Ok(()) => Some(self.rx.borrow_and_update().clone().map(AuthUser::from)),
      Err(_) => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn provider(uid: &str) -> ProviderUser {
    ProviderUser {
      uid:          uid.to_string(),
      email:        None,
      display_name: None,
      photo_url:    None,
    }
  }

  #[tokio::test]
  async fn yields_the_current_session_immediately() {
    let (tx, rx) = watch::channel(Some(provider("u1")));
    let mut events = SessionEvents { rx, delivered_initial: false };

    // The first poll resolves without any sender activity.
    let first = events.next().await.unwrap();
    assert_eq!(first.map(|u| u.uid), Some("u1".to_string()));
    drop(tx);
  }

  #[tokio::test]
  async fn yields_every_transition_then_ends() {
    let (tx, rx) = watch::channel(None);
    let mut events = SessionEvents { rx, delivered_initial: false };

    assert_eq!(events.next().await, Some(None));

    tx.send_replace(Some(provider("u1")));
    let next = events.next().await.unwrap().unwrap();
    assert_eq!(next.uid, "u1");

    tx.send_replace(None);
    assert_eq!(events.next().await, Some(None));

    // Dropping the sender ends the stream.
    drop(tx);
    assert_eq!(events.next().await, None);
  }
}
