//! Firebase Authentication (Identity Toolkit v1) adapter.
//!
//! Credential operations exchange email/password or a federated credential
//! for an id token; the token is cached for the document-store adapter and
//! the resulting identity is published on the session channel. Sign-out is
//! local token disposal; the API has no server-side sign-out call.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use tokio::sync::{RwLock, watch};

use jot_core::{auth::AuthGateway, user::ProviderUser};

use crate::{
  config::FirebaseConfig,
  error::{AUTH_FALLBACK, Error, Result},
  wire,
};

const IDENTITY_TOOLKIT: &str = "https://identitytoolkit.googleapis.com";

// ─── Session tokens ──────────────────────────────────────────────────────────

/// The cached credentials of the active session, shared with the
/// document-store adapter for bearer auth.
pub(crate) struct SessionTokens {
  pub id_token:      String,
  #[allow(dead_code)] // kept for a future securetoken refresh exchange
  pub refresh_token: Option<String>,
  pub uid:           String,
}

pub(crate) type SharedTokens = Arc<RwLock<Option<SessionTokens>>>;

// ─── Federated consent flow ──────────────────────────────────────────────────

/// A credential obtained from a federated identity provider's consent flow.
#[derive(Debug, Clone)]
pub struct FederatedCredential {
  /// Provider identifier, e.g. `google.com`.
  pub provider_id: String,
  /// The provider-issued OpenID Connect id token.
  pub id_token:    String,
}

/// Runs the provider consent flow and yields the resulting credential.
///
/// The flow itself (browser popup, device code, ...) is the caller's
/// concern; this adapter only exchanges its output for a session.
#[async_trait::async_trait]
pub trait FederatedTokenSource: Send + Sync {
  async fn obtain(&self) -> Result<FederatedCredential>;
}

// ─── Wire shapes ─────────────────────────────────────────────────────────────

/// Common shape of the signUp / signInWithPassword / signInWithIdp
/// responses; fields not returned by a given flow default to `None`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CredentialResponse {
  local_id: String,
  id_token: String,
  #[serde(default)]
  refresh_token: Option<String>,
  #[serde(default)]
  email: Option<String>,
  #[serde(default)]
  display_name: Option<String>,
  #[serde(default)]
  photo_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupResponse {
  #[serde(default)]
  users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
  #[serde(default)]
  email: Option<String>,
  #[serde(default)]
  display_name: Option<String>,
  #[serde(default)]
  photo_url: Option<String>,
}

// ─── Adapter ─────────────────────────────────────────────────────────────────

pub struct FirebaseAuth {
  http:        reqwest::Client,
  api_key:     String,
  auth_domain: String,
  tokens:      SharedTokens,
  session:     watch::Sender<Option<ProviderUser>>,
  federated:   Option<Arc<dyn FederatedTokenSource>>,
}

impl FirebaseAuth {
  pub(crate) fn new(
    http: reqwest::Client,
    config: &FirebaseConfig,
    tokens: SharedTokens,
    federated: Option<Arc<dyn FederatedTokenSource>>,
  ) -> Self {
    let (session, _) = watch::channel(None);
    Self {
      http,
      api_key: config.api_key.clone(),
      auth_domain: config.auth_domain.clone(),
      tokens,
      session,
      federated,
    }
  }

  async fn post<T: serde::de::DeserializeOwned>(
    &self,
    action: &str,
    body: serde_json::Value,
  ) -> Result<T> {
    let url = format!(
      "{IDENTITY_TOOLKIT}/v1/accounts:{action}?key={}",
      self.api_key
    );
    let resp = self.http.post(url).json(&body).send().await?;

    if !resp.status().is_success() {
      let status = resp.status();
      let bytes = resp.bytes().await?;
      return Err(Error::Api {
        status,
        message: wire::error_message(&bytes, AUTH_FALLBACK),
      });
    }

    resp.json().await.map_err(|e| Error::Decode(e.to_string()))
  }

  /// Cache the session tokens, materialize the full profile, and publish
  /// the new identity on the session channel.
  async fn establish(&self, cred: CredentialResponse) -> Result<ProviderUser> {
    // The password flows omit profile fields; a lookup fills them in. A
    // failed lookup is not fatal, since the credential fields still identify
    // the session.
    let profile = match self.lookup(&cred.id_token).await {
      Ok(profile) => profile,
      Err(err) => {
        tracing::debug!(%err, "profile lookup after sign-in failed");
        None
      }
    };

    let user = match profile {
      Some(profile) => ProviderUser {
        uid:          cred.local_id.clone(),
        email:        profile.email.or(cred.email),
        display_name: profile.display_name.or(cred.display_name),
        photo_url:    profile.photo_url.or(cred.photo_url),
      },
      None => ProviderUser {
        uid:          cred.local_id.clone(),
        email:        cred.email,
        display_name: cred.display_name,
        photo_url:    cred.photo_url,
      },
    };

    *self.tokens.write().await = Some(SessionTokens {
      id_token:      cred.id_token,
      refresh_token: cred.refresh_token,
      uid:           cred.local_id,
    });
    self.session.send_replace(Some(user.clone()));

    Ok(user)
  }

  async fn lookup(&self, id_token: &str) -> Result<Option<LookupUser>> {
    let resp: LookupResponse =
      self.post("lookup", json!({ "idToken": id_token })).await?;
    Ok(resp.users.into_iter().next())
  }
}

impl AuthGateway for FirebaseAuth {
  type Error = Error;

  async fn sign_up(&self, email: &str, password: &str) -> Result<ProviderUser> {
    let cred: CredentialResponse = self
      .post(
        "signUp",
        json!({ "email": email, "password": password, "returnSecureToken": true }),
      )
      .await?;
    self.establish(cred).await
  }

  async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderUser> {
    let cred: CredentialResponse = self
      .post(
        "signInWithPassword",
        json!({ "email": email, "password": password, "returnSecureToken": true }),
      )
      .await?;
    self.establish(cred).await
  }

  async fn sign_in_federated(&self) -> Result<ProviderUser> {
    let source = self.federated.as_ref().ok_or(Error::NoFederatedProvider)?;
    let credential = source.obtain().await?;

    let cred: CredentialResponse = self
      .post(
        "signInWithIdp",
        json!({
          "postBody": format!(
            "id_token={}&providerId={}",
            credential.id_token, credential.provider_id
          ),
          "requestUri": format!("https://{}", self.auth_domain),
          "returnSecureToken": true,
          "returnIdpCredential": true,
        }),
      )
      .await?;
    self.establish(cred).await
  }

  async fn sign_out(&self) -> Result<()> {
    *self.tokens.write().await = None;
    self.session.send_replace(None);
    Ok(())
  }

  async fn request_password_reset(&self, email: &str) -> Result<()> {
    let body = json!({ "requestType": "PASSWORD_RESET", "email": email });
    match self.post::<serde_json::Value>("sendOobCode", body).await {
      Ok(_) => Ok(()),
      // Reported as success so the outcome does not reveal whether an
      // account exists for the address.
      Err(Error::Api { message, .. }) if message.starts_with("EMAIL_NOT_FOUND") => {
        Ok(())
      }
      Err(err) => Err(err),
    }
  }

  fn subscribe_session(
    &self,
  ) -> Result<watch::Receiver<Option<ProviderUser>>> {
    Ok(self.session.subscribe())
  }
}
