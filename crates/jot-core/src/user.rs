//! The signed-in principal, in backend-native and normalized forms.

use serde::{Deserialize, Serialize};

/// The user record as the auth backend reports it.
///
/// Field names mirror the provider's wire representation; adapters construct
/// this directly from provider responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderUser {
  pub uid:          String,
  pub email:        Option<String>,
  pub display_name: Option<String>,
  pub photo_url:    Option<String>,
}

/// The normalized principal owned by the application's auth state.
///
/// Never persisted beyond the process; replaced wholesale on every session
/// transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
  pub uid:       String,
  pub email:     Option<String>,
  pub name:      Option<String>,
  pub image_url: Option<String>,
}

impl From<ProviderUser> for AuthUser {
  fn from(user: ProviderUser) -> Self {
    Self {
      uid:       user.uid,
      email:     user.email,
      name:      user.display_name,
      image_url: user.photo_url,
    }
  }
}
