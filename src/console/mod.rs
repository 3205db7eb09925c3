//! Chat console orchestration
//!
//! Ties the session store to the decision service:
//! - `Console::submit` records a query, runs the round trip and records the
//!   response or a visible error entry
//! - `render` prepares transcripts for display
//! - `commands` parses interactive input
//! - `progress` drives the cosmetic loader

pub mod commands;
pub mod progress;
pub mod render;

pub use commands::{parse_command, Command};
pub use progress::{render_bar, LoaderProgress};
pub use render::{render_entry, render_transcript, RenderedLine};

use crate::backend::{BackendError, DecisionService, Pillar, QueryRequest};
use crate::config::LoaderConfig;
use crate::session::{SessionStore, StoreError};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Prefix of the transcript entry recorded when the round trip fails
pub const TRANSPORT_ERROR_PREFIX: &str = "Error contacting FAIV API: ";

/// What happened to a submitted query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input; nothing recorded
    Ignored,
    /// Response appended to the session
    Answered { session_id: String },
    /// Error entry appended to the session
    Failed { session_id: String, error: String },
    /// The session vanished before the reply arrived; reply discarded
    Dropped { session_id: String },
}

pub struct Console {
    store: SessionStore,
    backend: Arc<dyn DecisionService>,
    pillar: Pillar,
    loader: LoaderConfig,
}

impl Console {
    pub fn new(store: SessionStore, backend: Arc<dyn DecisionService>) -> Self {
        Self {
            store,
            backend,
            pillar: Pillar::default(),
            loader: LoaderConfig::default(),
        }
    }

    pub fn with_pillar(mut self, pillar: Pillar) -> Self {
        self.pillar = pillar;
        self
    }

    pub fn with_loader(mut self, loader: LoaderConfig) -> Self {
        self.loader = loader;
        self
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut SessionStore {
        &mut self.store
    }

    pub fn pillar(&self) -> Pillar {
        self.pillar
    }

    pub fn set_pillar(&mut self, pillar: Pillar) {
        info!("Pillar set to {}", pillar);
        self.pillar = pillar;
    }

    /// Rendered transcript of the active session
    pub fn render_active(&self) -> Vec<RenderedLine> {
        self.store
            .active_session()
            .map(|session| render_transcript(session.entries()))
            .unwrap_or_default()
    }

    pub async fn submit(&mut self, input: &str) -> SubmitOutcome {
        self.submit_with_progress(input, |_| {}).await
    }

    /// Submit a query to the active session, reporting loader percentages
    /// to `on_progress` while the request is outstanding (ending with 100)
    pub async fn submit_with_progress<F>(&mut self, input: &str, mut on_progress: F) -> SubmitOutcome
    where
        F: FnMut(u8),
    {
        if input.trim().is_empty() {
            return SubmitOutcome::Ignored;
        }

        self.store.ensure_non_empty();
        let session_id = self.store.active_id().to_string();

        let session_id = match self.store.append_query(&session_id, input) {
            Ok(()) => session_id,
            Err(StoreError::NotFound(_)) => {
                warn!("Active session {} missing, starting a new one", session_id);
                let fresh = self.store.create_session();
                if let Err(e) = self.store.append_query(&fresh, input) {
                    error!("Failed to record query: {}", e);
                }
                fresh
            }
        };

        let request = QueryRequest {
            session_id: session_id.clone(),
            input_text: input.to_string(),
            pillar: self.pillar,
        };

        let backend = Arc::clone(&self.backend);
        let mut progress = LoaderProgress::start(self.loader.clone());
        let mut ticker = tokio::time::interval(self.loader.tick());

        let call = backend.query(&request);
        tokio::pin!(call);

        let result = loop {
            tokio::select! {
                result = &mut call => break result,
                _ = ticker.tick() => on_progress(progress.percent()),
            }
        };

        progress.complete();
        on_progress(progress.percent());

        self.record_result(&session_id, result)
    }

    /// Record a finished round trip against `session_id`. A reply for a
    /// session that no longer exists is discarded rather than recreating it.
    pub fn record_result(
        &mut self,
        session_id: &str,
        result: Result<String, BackendError>,
    ) -> SubmitOutcome {
        let session_id = session_id.to_string();
        match result {
            Ok(text) => match self.store.append_response(&session_id, &text) {
                Ok(()) => SubmitOutcome::Answered { session_id },
                Err(e) => {
                    warn!("Discarding response: {}", e);
                    SubmitOutcome::Dropped { session_id }
                }
            },
            Err(e) => {
                let message = format!("{}{}", TRANSPORT_ERROR_PREFIX, e);
                error!("Query via {} failed: {}", self.backend.name(), e);
                match self.store.append_error(&session_id, &message) {
                    Ok(()) => SubmitOutcome::Failed {
                        session_id,
                        error: message,
                    },
                    Err(e) => {
                        warn!("Discarding error entry: {}", e);
                        SubmitOutcome::Dropped { session_id }
                    }
                }
            }
        }
    }
}
