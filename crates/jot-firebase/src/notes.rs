//! Cloud Firestore (v1 REST) adapter for the per-user notes collection.
//!
//! Documents live at `users/{uid}/notes/{id}` under the project's default
//! database. Creates and partial merges go through `documents:commit` so
//! `createdAt`/`updatedAt` can be assigned by the server with
//! `REQUEST_TIME` field transforms; reads and deletes address the document
//! resource URL directly. Every request carries the session's bearer id
//! token.

use serde_json::json;
use uuid::Uuid;

use jot_core::{
  note::{NoteChanges, NoteDraft, RawNoteDocument},
  store::NoteStore,
};

use crate::{
  auth::SharedTokens,
  config::FirebaseConfig,
  error::{Error, Result, STORE_FALLBACK},
  wire,
};

const FIRESTORE: &str = "https://firestore.googleapis.com";
const PAGE_SIZE: &str = "300";

pub struct FirestoreNotes {
  http:       reqwest::Client,
  project_id: String,
  tokens:     SharedTokens,
}

impl FirestoreNotes {
  pub(crate) fn new(
    http: reqwest::Client,
    config: &FirebaseConfig,
    tokens: SharedTokens,
  ) -> Self {
    Self { http, project_id: config.project_id.clone(), tokens }
  }

  /// Resource name of one note document (no URL prefix).
  fn document_name(&self, user_id: &str, note_id: &str) -> String {
    format!(
      "projects/{}/databases/(default)/documents/users/{user_id}/notes/{note_id}",
      self.project_id
    )
  }

  /// URL of the user's notes collection.
  fn collection_url(&self, user_id: &str) -> String {
    format!(
      "{FIRESTORE}/v1/projects/{}/databases/(default)/documents/users/{user_id}/notes",
      self.project_id
    )
  }

  fn commit_url(&self) -> String {
    format!(
      "{FIRESTORE}/v1/projects/{}/databases/(default)/documents:commit",
      self.project_id
    )
  }

  async fn bearer(&self) -> Result<String> {
    self
      .tokens
      .read()
      .await
      .as_ref()
      .map(|t| t.id_token.clone())
      .ok_or(Error::NotSignedIn)
  }

  async fn check(resp: reqwest::Response) -> Result<serde_json::Value> {
    if !resp.status().is_success() {
      let status = resp.status();
      let bytes = resp.bytes().await?;
      return Err(Error::Api {
        status,
        message: wire::error_message(&bytes, STORE_FALLBACK),
      });
    }
    resp.json().await.map_err(|e| Error::Decode(e.to_string()))
  }
}

impl NoteStore for FirestoreNotes {
  type Error = Error;

  async fn list_notes(&self, user_id: &str) -> Result<Vec<RawNoteDocument>> {
    let token = self.bearer().await?;
    let mut out = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
      let mut req = self
        .http
        .get(self.collection_url(user_id))
        .bearer_auth(&token)
        .query(&[("pageSize", PAGE_SIZE)]);
      if let Some(t) = &page_token {
        req = req.query(&[("pageToken", t.as_str())]);
      }

      let value = Self::check(req.send().await?).await?;
      if let Some(docs) = value.get("documents").and_then(|d| d.as_array()) {
        for doc in docs {
          out.push(wire::decode_document(doc)?);
        }
      }

      match value.get("nextPageToken").and_then(|t| t.as_str()) {
        Some(next) if !next.is_empty() => page_token = Some(next.to_string()),
        _ => break,
      }
    }

    Ok(out)
  }

  async fn add_note(&self, user_id: &str, draft: &NoteDraft) -> Result<String> {
    let token = self.bearer().await?;
    let note_id = Uuid::new_v4().simple().to_string();

    let body = json!({
      "writes": [{
        "update": {
          "name": self.document_name(user_id, &note_id),
          "fields": wire::encode_fields(
            draft.title.as_deref(),
            draft.content.as_deref(),
          ),
        },
        "currentDocument": { "exists": false },
        "updateTransforms": [
          { "fieldPath": "createdAt", "setToServerValue": "REQUEST_TIME" },
          { "fieldPath": "updatedAt", "setToServerValue": "REQUEST_TIME" },
        ],
      }]
    });

    Self::check(
      self.http.post(self.commit_url()).bearer_auth(&token).json(&body).send().await?,
    )
    .await?;

    Ok(note_id)
  }

  async fn get_note(
    &self,
    user_id: &str,
    note_id: &str,
  ) -> Result<Option<RawNoteDocument>> {
    let token = self.bearer().await?;
    let url = format!("{FIRESTORE}/v1/{}", self.document_name(user_id, note_id));

    let resp = self.http.get(url).bearer_auth(&token).send().await?;
    if resp.status() == reqwest::StatusCode::NOT_FOUND {
      return Ok(None);
    }

    let value = Self::check(resp).await?;
    Ok(Some(wire::decode_document(&value)?))
  }

  async fn update_note(
    &self,
    user_id: &str,
    note_id: &str,
    changes: &NoteChanges,
  ) -> Result<()> {
    let token = self.bearer().await?;

    // Only fields present in the changes enter the mask; the rest of the
    // document is left untouched by the merge.
    let mut field_paths = Vec::new();
    if changes.title.is_some() {
      field_paths.push("title");
    }
    if changes.content.is_some() {
      field_paths.push("content");
    }

    let body = json!({
      "writes": [{
        "update": {
          "name": self.document_name(user_id, note_id),
          "fields": wire::encode_fields(
            changes.title.as_deref(),
            changes.content.as_deref(),
          ),
        },
        "updateMask": { "fieldPaths": field_paths },
        "currentDocument": { "exists": true },
        "updateTransforms": [
          { "fieldPath": "updatedAt", "setToServerValue": "REQUEST_TIME" },
        ],
      }]
    });

    Self::check(
      self.http.post(self.commit_url()).bearer_auth(&token).json(&body).send().await?,
    )
    .await?;

    Ok(())
  }

  async fn delete_note(&self, user_id: &str, note_id: &str) -> Result<()> {
    let token = self.bearer().await?;
    let url = format!("{FIRESTORE}/v1/{}", self.document_name(user_id, note_id));

    Self::check(self.http.delete(url).bearer_auth(&token).send().await?).await?;
    Ok(())
  }
}
