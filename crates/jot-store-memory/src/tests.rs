//! Behavior tests for `MemoryBackend`.

use chrono::{DateTime, Utc};
use jot_core::{
  auth::AuthGateway,
  note::{NoteChanges, NoteDraft},
  store::NoteStore,
  timestamp::RawTimestamp,
  user::ProviderUser,
};

use crate::{Error, MemoryBackend};

fn draft(title: &str, content: &str) -> NoteDraft {
  NoteDraft {
    title:   Some(title.to_string()),
    content: Some(content.to_string()),
  }
}

fn native(ts: &RawTimestamp) -> DateTime<Utc> {
  match ts {
    RawTimestamp::Native(dt) => *dt,
    other => panic!("expected a native timestamp, got {other:?}"),
  }
}

// ─── Accounts and sessions ───────────────────────────────────────────────────

#[tokio::test]
async fn sign_up_starts_a_session() {
  let backend = MemoryBackend::new();

  let user = backend.sign_up("alice@example.com", "hunter22").await.unwrap();
  assert_eq!(user.email.as_deref(), Some("alice@example.com"));

  let session = backend.current_session().unwrap();
  assert_eq!(session.uid, user.uid);
}

#[tokio::test]
async fn sign_up_rejects_duplicate_email() {
  let backend = MemoryBackend::new();
  backend.sign_up("alice@example.com", "hunter22").await.unwrap();

  let err = backend
    .sign_up("alice@example.com", "other-password")
    .await
    .unwrap_err();
  assert!(matches!(err, Error::EmailTaken(_)));
}

#[tokio::test]
async fn sign_up_rejects_weak_password() {
  let backend = MemoryBackend::new();
  let err = backend.sign_up("alice@example.com", "abc").await.unwrap_err();
  assert!(matches!(err, Error::WeakPassword));
}

#[tokio::test]
async fn sign_in_rejects_bad_credentials() {
  let backend = MemoryBackend::new();
  backend.sign_up("alice@example.com", "hunter22").await.unwrap();
  backend.sign_out().await.unwrap();

  let err = backend
    .sign_in("alice@example.com", "wrong")
    .await
    .unwrap_err();
  assert!(matches!(err, Error::InvalidCredentials));

  // A failed sign-in must not start a session.
  assert!(backend.current_session().is_none());
}

#[tokio::test]
async fn sign_out_clears_the_session() {
  let backend = MemoryBackend::new();
  backend.sign_up("alice@example.com", "hunter22").await.unwrap();
  backend.sign_out().await.unwrap();
  assert!(backend.current_session().is_none());
}

#[tokio::test]
async fn session_channel_observes_transitions() {
  let backend = MemoryBackend::new();
  let mut rx = backend.subscribe_session().unwrap();

  // Current value at subscription time is the signed-out state.
  assert!(rx.borrow().is_none());

  let user = backend.sign_up("alice@example.com", "hunter22").await.unwrap();
  rx.changed().await.unwrap();
  assert_eq!(
    rx.borrow_and_update().as_ref().map(|u| u.uid.clone()),
    Some(user.uid)
  );

  backend.sign_out().await.unwrap();
  rx.changed().await.unwrap();
  assert!(rx.borrow_and_update().is_none());
}

#[tokio::test]
async fn password_reset_succeeds_for_unknown_address() {
  let backend = MemoryBackend::new();
  backend
    .request_password_reset("nobody@example.com")
    .await
    .unwrap();
}

#[tokio::test]
async fn federated_sign_in_requires_configuration() {
  let backend = MemoryBackend::new();
  let err = backend.sign_in_federated().await.unwrap_err();
  assert!(matches!(err, Error::NoFederatedIdentity));

  backend
    .set_federated_identity(ProviderUser {
      uid:          "fed-1".into(),
      email:        Some("alice@example.com".into()),
      display_name: Some("Alice".into()),
      photo_url:    Some("https://example.com/alice.png".into()),
    })
    .await;

  let user = backend.sign_in_federated().await.unwrap();
  assert_eq!(user.uid, "fed-1");
  assert_eq!(backend.current_session().unwrap().uid, "fed-1");
}

// ─── Notes ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_then_list_returns_the_note() {
  let backend = MemoryBackend::new();

  let id = backend.add_note("u1", &draft("T", "C")).await.unwrap();
  let notes = backend.list_notes("u1").await.unwrap();

  assert_eq!(notes.len(), 1);
  assert_eq!(notes[0].id, id);
  assert_eq!(notes[0].title.as_deref(), Some("T"));
  assert_eq!(notes[0].content.as_deref(), Some("C"));
  assert_eq!(native(&notes[0].created_at), native(&notes[0].updated_at));
}

#[tokio::test]
async fn list_preserves_insertion_order() {
  let backend = MemoryBackend::new();
  let first = backend.add_note("u1", &draft("first", "")).await.unwrap();
  let second = backend.add_note("u1", &draft("second", "")).await.unwrap();

  let notes = backend.list_notes("u1").await.unwrap();
  assert_eq!(notes[0].id, first);
  assert_eq!(notes[1].id, second);
}

#[tokio::test]
async fn collections_are_scoped_per_user() {
  let backend = MemoryBackend::new();
  backend.add_note("u1", &draft("mine", "")).await.unwrap();

  assert!(backend.list_notes("u2").await.unwrap().is_empty());
}

#[tokio::test]
async fn get_missing_note_returns_none() {
  let backend = MemoryBackend::new();
  assert!(backend.get_note("u1", "missing").await.unwrap().is_none());
}

#[tokio::test]
async fn update_merges_and_refreshes_updated_at() {
  let backend = MemoryBackend::new();
  let id = backend.add_note("u1", &draft("T", "C")).await.unwrap();
  let before = backend.get_note("u1", &id).await.unwrap().unwrap();

  backend
    .update_note(
      "u1",
      &id,
      &NoteChanges { title: None, content: Some("C2".into()) },
    )
    .await
    .unwrap();

  let after = backend.get_note("u1", &id).await.unwrap().unwrap();
  assert_eq!(after.content.as_deref(), Some("C2"));
  // Fields absent from the changes are untouched.
  assert_eq!(after.title.as_deref(), Some("T"));
  assert_eq!(native(&after.created_at), native(&before.created_at));
  assert!(native(&after.updated_at) > native(&before.updated_at));
}

#[tokio::test]
async fn update_missing_note_fails() {
  let backend = MemoryBackend::new();
  let err = backend
    .update_note("u1", "missing", &NoteChanges::default())
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NoteNotFound(_)));
}

#[tokio::test]
async fn delete_removes_the_note() {
  let backend = MemoryBackend::new();
  let id = backend.add_note("u1", &draft("T", "C")).await.unwrap();
  backend.delete_note("u1", &id).await.unwrap();

  assert!(backend.list_notes("u1").await.unwrap().is_empty());
  assert!(backend.get_note("u1", &id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_missing_note_fails() {
  let backend = MemoryBackend::new();
  let err = backend.delete_note("u1", "missing").await.unwrap_err();
  assert!(matches!(err, Error::NoteNotFound(_)));
}
