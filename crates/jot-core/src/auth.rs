//! The `AuthGateway` trait — abstraction over the external auth backend.
//!
//! Implemented by backend adapters (`jot-firebase`, `jot-store-memory`).
//! Higher layers depend on this abstraction, not on any concrete provider.
//!
//! All methods return `Send` futures so the trait can be used across task
//! boundaries in a multi-threaded runtime.

use std::future::Future;

use tokio::sync::watch;

use crate::user::ProviderUser;

/// Abstraction over an external authentication backend.
///
/// Successful credential operations start (or end) a backend session; every
/// session transition is also published on the subscription channel, which is
/// how the rest of the application observes identity changes.
pub trait AuthGateway: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Create an account and begin a session for it. Fails on weak or
  /// duplicate credentials.
  fn sign_up<'a>(
    &'a self,
    email: &'a str,
    password: &'a str,
  ) -> impl Future<Output = Result<ProviderUser, Self::Error>> + Send + 'a;

  /// Begin a session with existing credentials. Fails on invalid
  /// credentials.
  fn sign_in<'a>(
    &'a self,
    email: &'a str,
    password: &'a str,
  ) -> impl Future<Output = Result<ProviderUser, Self::Error>> + Send + 'a;

  /// Begin a session through a federated identity provider's consent flow.
  /// Fails if the user cancels or the provider errors.
  fn sign_in_federated(
    &self,
  ) -> impl Future<Output = Result<ProviderUser, Self::Error>> + Send + '_;

  /// Terminate the current session. Fails only on transport failure.
  fn sign_out(
    &self,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Trigger a backend-sent password-reset email. Succeeds whenever the
  /// transport succeeds, regardless of whether the address has an account;
  /// the outcome must not reveal account existence.
  fn request_password_reset<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Subscribe to session transitions.
  ///
  /// The receiver's current value is the session state at subscription time;
  /// every subsequent sender update is a transition (sign-in, sign-out, or
  /// an identity-changing token refresh). Dropping the receiver is the
  /// unsubscribe.
  fn subscribe_session(
    &self,
  ) -> Result<watch::Receiver<Option<ProviderUser>>, Self::Error>;
}
