//! Environment configuration for the Firebase backends.
//!
//! All six connection parameters are required at boot; any absence is a
//! fatal [`jot_core::Error::Configuration`] enumerating exactly which
//! variables are missing.

use jot_core::Error;

/// The connection parameters the hosted backends require.
#[derive(Debug, Clone)]
pub struct FirebaseConfig {
  pub api_key:             String,
  pub auth_domain:         String,
  pub project_id:          String,
  pub storage_bucket:      String,
  pub messaging_sender_id: String,
  pub app_id:              String,
}

impl FirebaseConfig {
  /// Load from `FIREBASE_*` environment variables.
  pub fn from_env() -> Result<Self, Error> {
    Self::load(config::Environment::with_prefix("FIREBASE"))
  }

  fn load(source: config::Environment) -> Result<Self, Error> {
    let settings = config::Config::builder()
      .add_source(source)
      .build()
      .map_err(|e| Error::Configuration {
        missing: vec![format!("unreadable environment: {e}")],
      })?;

    let mut missing = Vec::new();
    let api_key = lookup(&settings, "api_key", "FIREBASE_API_KEY", &mut missing);
    let auth_domain =
      lookup(&settings, "auth_domain", "FIREBASE_AUTH_DOMAIN", &mut missing);
    let project_id =
      lookup(&settings, "project_id", "FIREBASE_PROJECT_ID", &mut missing);
    let storage_bucket = lookup(
      &settings,
      "storage_bucket",
      "FIREBASE_STORAGE_BUCKET",
      &mut missing,
    );
    let messaging_sender_id = lookup(
      &settings,
      "messaging_sender_id",
      "FIREBASE_MESSAGING_SENDER_ID",
      &mut missing,
    );
    let app_id = lookup(&settings, "app_id", "FIREBASE_APP_ID", &mut missing);

    match (
      api_key,
      auth_domain,
      project_id,
      storage_bucket,
      messaging_sender_id,
      app_id,
    ) {
      (
        Some(api_key),
        Some(auth_domain),
        Some(project_id),
        Some(storage_bucket),
        Some(messaging_sender_id),
        Some(app_id),
      ) => Ok(Self {
        api_key,
        auth_domain,
        project_id,
        storage_bucket,
        messaging_sender_id,
        app_id,
      }),
      _ => Err(Error::Configuration { missing }),
    }
  }
}

/// Read one key, recording the environment-variable name on absence so every
/// missing variable is reported at once.
fn lookup(
  settings: &config::Config,
  key: &str,
  var: &str,
  missing: &mut Vec<String>,
) -> Option<String> {
  match settings.get_string(key) {
    Ok(value) if !value.is_empty() => Some(value),
    _ => {
      missing.push(var.to_string());
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn env(vars: &[(&str, &str)]) -> config::Environment {
    let source: HashMap<String, String> = vars
      .iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect();
    config::Environment::with_prefix("FIREBASE").source(Some(source))
  }

  const FULL: &[(&str, &str)] = &[
    ("FIREBASE_API_KEY", "key"),
    ("FIREBASE_AUTH_DOMAIN", "demo.firebaseapp.com"),
    ("FIREBASE_PROJECT_ID", "demo"),
    ("FIREBASE_STORAGE_BUCKET", "demo.appspot.com"),
    ("FIREBASE_MESSAGING_SENDER_ID", "123"),
    ("FIREBASE_APP_ID", "1:123:web:abc"),
  ];

  #[test]
  fn loads_a_complete_environment() {
    let config = FirebaseConfig::load(env(FULL)).unwrap();
    assert_eq!(config.project_id, "demo");
    assert_eq!(config.auth_domain, "demo.firebaseapp.com");
  }

  #[test]
  fn enumerates_every_missing_variable() {
    let partial: Vec<_> = FULL
      .iter()
      .copied()
      .filter(|(k, _)| *k != "FIREBASE_API_KEY" && *k != "FIREBASE_APP_ID")
      .collect();

    let err = FirebaseConfig::load(env(&partial)).unwrap_err();
    match err {
      Error::Configuration { missing } => {
        assert_eq!(missing, vec!["FIREBASE_API_KEY", "FIREBASE_APP_ID"]);
      }
      other => panic!("expected a configuration error, got {other:?}"),
    }
  }

  #[test]
  fn empty_values_count_as_missing() {
    let mut vars = FULL.to_vec();
    vars[2] = ("FIREBASE_PROJECT_ID", "");

    let err = FirebaseConfig::load(env(&vars)).unwrap_err();
    match err {
      Error::Configuration { missing } => {
        assert_eq!(missing, vec!["FIREBASE_PROJECT_ID"]);
      }
      other => panic!("expected a configuration error, got {other:?}"),
    }
  }
}
