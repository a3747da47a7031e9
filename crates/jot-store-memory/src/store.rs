//! [`MemoryBackend`] — the in-process implementation of both backend traits.

use std::collections::HashMap;

use chrono::{DateTime, Duration, DurationRound, Utc};
use tokio::sync::{Mutex, RwLock, watch};
use uuid::Uuid;

use jot_core::{
  auth::AuthGateway,
  note::{NoteChanges, NoteDraft, RawNoteDocument},
  store::NoteStore,
  timestamp::RawTimestamp,
  user::ProviderUser,
};

use crate::{Error, Result};

// ─── Records ─────────────────────────────────────────────────────────────────

struct Account {
  uid:          String,
  email:        String,
  password:     String,
  display_name: Option<String>,
  photo_url:    Option<String>,
}

impl Account {
  fn provider_user(&self) -> ProviderUser {
    ProviderUser {
      uid:          self.uid.clone(),
      email:        Some(self.email.clone()),
      display_name: self.display_name.clone(),
      photo_url:    self.photo_url.clone(),
    }
  }
}

struct StoredNote {
  title:      Option<String>,
  content:    Option<String>,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl StoredNote {
  fn to_raw(&self, id: &str) -> RawNoteDocument {
    RawNoteDocument {
      id:         id.to_string(),
      title:      self.title.clone(),
      content:    self.content.clone(),
      created_at: RawTimestamp::Native(self.created_at),
      updated_at: RawTimestamp::Native(self.updated_at),
    }
  }
}

// ─── Backend ─────────────────────────────────────────────────────────────────

/// An in-process auth and document-store backend.
///
/// Note collections are `Vec`s so list order is insertion order, the
/// backend-default ordering the repository contract leaves unspecified.
pub struct MemoryBackend {
  accounts:  RwLock<HashMap<String, Account>>,
  /// uid → ordered `(note_id, note)` pairs.
  notes:     RwLock<HashMap<String, Vec<(String, StoredNote)>>>,
  /// Strictly monotonic at millisecond granularity, so consecutive writes
  /// observe distinct server timestamps even after normalization truncates
  /// to milliseconds.
  clock:     Mutex<DateTime<Utc>>,
  session:   watch::Sender<Option<ProviderUser>>,
  federated: RwLock<Option<ProviderUser>>,
}

impl MemoryBackend {
  pub fn new() -> Self {
    let (session, _) = watch::channel(None);
    let now = Utc::now();
    Self {
      accounts:  RwLock::new(HashMap::new()),
      notes:     RwLock::new(HashMap::new()),
      clock:     Mutex::new(
        now.duration_trunc(Duration::milliseconds(1)).unwrap_or(now),
      ),
      session,
      federated: RwLock::new(None),
    }
  }

  /// Configure the identity the federated consent flow will yield.
  pub async fn set_federated_identity(&self, user: ProviderUser) {
    *self.federated.write().await = Some(user);
  }

  /// The current session, without subscribing.
  pub fn current_session(&self) -> Option<ProviderUser> {
    self.session.borrow().clone()
  }

  async fn server_now(&self) -> DateTime<Utc> {
    let mut clock = self.clock.lock().await;
    let now = Utc::now()
      .duration_trunc(Duration::milliseconds(1))
      .unwrap_or(*clock);
    *clock = if now > *clock {
      now
    } else {
      *clock + Duration::milliseconds(1)
    };
    *clock
  }
}

impl Default for MemoryBackend {
  fn default() -> Self {
    Self::new()
  }
}

// ─── AuthGateway ─────────────────────────────────────────────────────────────

impl AuthGateway for MemoryBackend {
  type Error = Error;

  async fn sign_up(&self, email: &str, password: &str) -> Result<ProviderUser> {
    if password.len() < 6 {
      return Err(Error::WeakPassword);
    }

    let mut accounts = self.accounts.write().await;
    if accounts.contains_key(email) {
      return Err(Error::EmailTaken(email.to_string()));
    }

    let account = Account {
      uid:          Uuid::new_v4().simple().to_string(),
      email:        email.to_string(),
      password:     password.to_string(),
      display_name: None,
      photo_url:    None,
    };
    let user = account.provider_user();
    accounts.insert(email.to_string(), account);
    drop(accounts);

    self.session.send_replace(Some(user.clone()));
    Ok(user)
  }

  async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderUser> {
    let accounts = self.accounts.read().await;
    let account = accounts
      .get(email)
      .filter(|a| a.password == password)
      .ok_or(Error::InvalidCredentials)?;
    let user = account.provider_user();
    drop(accounts);

    self.session.send_replace(Some(user.clone()));
    Ok(user)
  }

  async fn sign_in_federated(&self) -> Result<ProviderUser> {
    let user = self
      .federated
      .read()
      .await
      .clone()
      .ok_or(Error::NoFederatedIdentity)?;

    self.session.send_replace(Some(user.clone()));
    Ok(user)
  }

  async fn sign_out(&self) -> Result<()> {
    self.session.send_replace(None);
    Ok(())
  }

  async fn request_password_reset(&self, email: &str) -> Result<()> {
    // Succeeds whether or not an account exists for the address; the outcome
    // must not reveal account existence.
    tracing::debug!(email, "password reset requested");
    Ok(())
  }

  fn subscribe_session(
    &self,
  ) -> Result<watch::Receiver<Option<ProviderUser>>> {
    Ok(self.session.subscribe())
  }
}

// ─── NoteStore ───────────────────────────────────────────────────────────────

impl NoteStore for MemoryBackend {
  type Error = Error;

  async fn list_notes(&self, user_id: &str) -> Result<Vec<RawNoteDocument>> {
    let notes = self.notes.read().await;
    Ok(
      notes
        .get(user_id)
        .map(|collection| {
          collection.iter().map(|(id, note)| note.to_raw(id)).collect()
        })
        .unwrap_or_default(),
    )
  }

  async fn add_note(&self, user_id: &str, draft: &NoteDraft) -> Result<String> {
    let now = self.server_now().await;
    let id = Uuid::new_v4().simple().to_string();

    let mut notes = self.notes.write().await;
    notes.entry(user_id.to_string()).or_default().push((
      id.clone(),
      StoredNote {
        title:      draft.title.clone(),
        content:    draft.content.clone(),
        created_at: now,
        updated_at: now,
      },
    ));

    Ok(id)
  }

  async fn get_note(
    &self,
    user_id: &str,
    note_id: &str,
  ) -> Result<Option<RawNoteDocument>> {
    let notes = self.notes.read().await;
    Ok(notes.get(user_id).and_then(|collection| {
      collection
        .iter()
        .find(|(id, _)| id == note_id)
        .map(|(id, note)| note.to_raw(id))
    }))
  }

  async fn update_note(
    &self,
    user_id: &str,
    note_id: &str,
    changes: &NoteChanges,
  ) -> Result<()> {
    let now = self.server_now().await;

    let mut notes = self.notes.write().await;
    let note = notes
      .get_mut(user_id)
      .and_then(|collection| {
        collection
          .iter_mut()
          .find(|(id, _)| id == note_id)
          .map(|(_, note)| note)
      })
      .ok_or_else(|| Error::NoteNotFound(note_id.to_string()))?;

    // Partial merge: only fields present in the changes are touched.
    if let Some(title) = &changes.title {
      note.title = Some(title.clone());
    }
    if let Some(content) = &changes.content {
      note.content = Some(content.clone());
    }
    note.updated_at = now;

    Ok(())
  }

  async fn delete_note(&self, user_id: &str, note_id: &str) -> Result<()> {
    let mut notes = self.notes.write().await;
    let collection = notes
      .get_mut(user_id)
      .ok_or_else(|| Error::NoteNotFound(note_id.to_string()))?;

    let before = collection.len();
    collection.retain(|(id, _)| id != note_id);
    if collection.len() == before {
      return Err(Error::NoteNotFound(note_id.to_string()));
    }

    Ok(())
  }
}
