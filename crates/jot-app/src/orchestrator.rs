//! The session orchestrator — the process-wide coordinator started once at
//! application boot.
//!
//! It subscribes to the session stream, mirrors every resolution into the
//! auth slice, loads the notes of a newly signed-in user, and clears the
//! notes slice the moment the session ends.

use std::sync::Arc;

use jot_core::{Result, auth::AuthGateway, store::NoteStore};

use crate::{actions::AppContext, auth_slice::AuthEvent};

pub struct SessionOrchestrator;

impl SessionOrchestrator {
  /// Subscribe to the session stream and start the coordination task.
  ///
  /// Subscription setup failure is fatal to the application's auth
  /// awareness: no notes will ever load and every view behaves as
  /// signed-out. The failure is recorded in the auth slice and returned, so
  /// it surfaces as a visible top-level error rather than being swallowed.
  pub fn start<A, N>(ctx: Arc<AppContext<A, N>>) -> Result<OrchestratorHandle>
  where
    A: AuthGateway + 'static,
    N: NoteStore + 'static,
  {
    let mut events = match ctx.session_events() {
      Ok(events) => events,
      Err(err) => {
        tracing::error!(%err, "session subscription failed");
        ctx.store().apply_auth(AuthEvent::ListenerFailed(err.to_string()));
        return Err(err);
      }
    };

    // The session is unresolved until the stream's first emission.
    ctx.store().apply_auth(AuthEvent::Pending);

    let task = tokio::spawn(async move {
      let mut last_uid: Option<String> = None;

      while let Some(user) = events.next().await {
        let uid = user.as_ref().map(|u| u.uid.clone());
        ctx.store().apply_auth(AuthEvent::SessionResolved(user));

        if uid != last_uid {
          match &uid {
            Some(id) => {
              tracing::info!(uid = %id, "session established, loading notes");
              let ctx = Arc::clone(&ctx);
              let id = id.clone();
              // Spawned so a slow fetch never delays the next session
              // event; a stale resolution is discarded by the fetch action.
              tokio::spawn(async move {
                if let Err(err) = ctx.fetch_notes(&id).await {
                  tracing::debug!(%err, "notes load failed");
                }
              });
            }
            None => {
              tracing::info!("session ended, clearing notes");
              ctx.clear_notes();
            }
          }
        }
        last_uid = uid;
      }
    });

    Ok(OrchestratorHandle { task })
  }
}

/// Owns the coordination task. Consuming the handle is the only way to stop
/// it, so teardown is exactly-once.
pub struct OrchestratorHandle {
  task: tokio::task::JoinHandle<()>,
}

impl OrchestratorHandle {
  /// Stop the task and drop the session subscription.
  pub fn shutdown(self) {
    self.task.abort();
  }
}
