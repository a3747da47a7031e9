//! Boots the full client core against the in-memory backend and walks one
//! user session end to end: sign-up, a couple of note edits, sign-out.
//!
//! ```text
//! cargo run -p jot-app --example headless
//! ```

use std::sync::Arc;

use anyhow::Result;
use jot_app::{AppContext, SessionOrchestrator};
use jot_core::note::{NoteChanges, NoteDraft};
use jot_store_memory::MemoryBackend;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let backend = Arc::new(MemoryBackend::new());
  let ctx = Arc::new(AppContext::new(Arc::clone(&backend), backend));
  let orchestrator = SessionOrchestrator::start(Arc::clone(&ctx))?;

  let user = ctx.sign_up("demo@example.com", "correct-horse").await?;
  tracing::info!(uid = %user.uid, "signed up");

  let note = ctx
    .create_note(
      &user.uid,
      &NoteDraft {
        title:   Some("First note".into()),
        content: Some("Hello from jot.".into()),
      },
    )
    .await?;

  ctx
    .update_note(
      &user.uid,
      &note.id,
      &NoteChanges { content: Some("Edited.".into()), ..Default::default() },
    )
    .await?;

  let state = ctx.store().snapshot();
  for note in &state.notes.items {
    tracing::info!(
      id = %note.id,
      title = note.title.as_deref().unwrap_or("(untitled)"),
      updated_at = note.updated_at.as_deref().unwrap_or("-"),
      "note"
    );
  }

  ctx.sign_out().await?;
  orchestrator.shutdown();
  Ok(())
}
