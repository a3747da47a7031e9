//! Firebase adapters for the jot client.
//!
//! [`FirebaseAuth`] implements [`jot_core::auth::AuthGateway`] against the
//! Identity Toolkit v1 REST API; [`FirestoreNotes`] implements
//! [`jot_core::store::NoteStore`] against the Cloud Firestore v1 REST API.
//! Construction goes through [`FirebaseBackend`], which shares one HTTP
//! client and one session-token cell between the two so document requests
//! ride the auth adapter's bearer token.

mod wire;

pub mod auth;
pub mod config;
pub mod error;
pub mod notes;

pub use auth::{FederatedCredential, FederatedTokenSource, FirebaseAuth};
pub use config::FirebaseConfig;
pub use error::{Error, Result};
pub use notes::FirestoreNotes;

use std::{sync::Arc, time::Duration};

use tokio::sync::RwLock;

/// The two backend adapters, wired together.
pub struct FirebaseBackend {
  pub auth:  Arc<FirebaseAuth>,
  pub notes: Arc<FirestoreNotes>,
}

impl FirebaseBackend {
  /// Build both adapters from validated configuration. Federated sign-in is
  /// unavailable until a token source is supplied via
  /// [`with_federated_source`](Self::with_federated_source).
  pub fn new(config: &FirebaseConfig) -> Result<Self> {
    Self::with_federated_source(config, None)
  }

  /// Build with a consent-flow collaborator backing `sign_in_federated`.
  pub fn with_federated_source(
    config: &FirebaseConfig,
    federated: Option<Arc<dyn FederatedTokenSource>>,
  ) -> Result<Self> {
    let http = reqwest::Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;

    let tokens: auth::SharedTokens = Arc::new(RwLock::new(None));
    let auth = Arc::new(FirebaseAuth::new(
      http.clone(),
      config,
      Arc::clone(&tokens),
      federated,
    ));
    let notes = Arc::new(FirestoreNotes::new(http, config, tokens));

    Ok(Self { auth, notes })
  }
}
