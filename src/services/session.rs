//! Session service — per-browser form state and the submit lifecycle.
//!
//! DESIGN
//! ======
//! Each browser session (cookie-identified) owns one `FormState`: the prompt
//! text, the request status, and the latest script or error. A submission
//! moves the session to `InFlight`, the generation call runs on its own task,
//! and the task writes the outcome back. Completed sessions accept the next
//! submission.
//!
//! CONCURRENCY
//! ===========
//! A second submission while one is in flight is rejected and leaves the
//! session untouched. Separate sessions never block each other. The store
//! lock is only held for state transitions, never across the LLM call.
//! Because the generation task owns completion, a client that disconnects
//! mid-request cannot strand its session in `InFlight`.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;

use super::generate::{self, GenerateError};
use crate::state::AppState;

/// User-facing message shown when generation fails for any reason.
pub const GENERATION_FAILED_MESSAGE: &str =
    "Failed to generate script. Please ensure your API key is configured correctly.";

/// Prompt shown to a fresh session.
pub const DEFAULT_PROMPT: &str = "Generate a Python script for a text-based Hangman game that allows the user to \
guess letters until the word is completed or the attempts are over.";

const PRUNE_INTERVAL: Duration = Duration::from_secs(60);

// =============================================================================
// FORM STATE
// =============================================================================

/// Lifecycle of the most recent generation request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RequestStatus {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SubmitRejected {
    #[error("prompt must not be empty")]
    EmptyPrompt,
    #[error("a generation request is already in flight")]
    AlreadyInFlight,
}

impl crate::error::ErrorCode for SubmitRejected {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyPrompt => "E_EMPTY_PROMPT",
            Self::AlreadyInFlight => "E_ALREADY_IN_FLIGHT",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::AlreadyInFlight)
    }
}

/// Presentation state for one browser session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormState {
    pub prompt: String,
    pub status: RequestStatus,
    /// Latest generated script. Replaced wholesale on every request.
    pub script: Option<String>,
    /// User-facing error from the latest request.
    pub error: Option<String>,
}

impl Default for FormState {
    fn default() -> Self {
        Self { prompt: DEFAULT_PROMPT.to_owned(), status: RequestStatus::Idle, script: None, error: None }
    }
}

impl FormState {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == RequestStatus::InFlight
    }

    /// Whether the submit control should be enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.is_loading() && !self.prompt.trim().is_empty()
    }

    /// Start a request for `prompt`, clearing the previous script and error.
    ///
    /// # Errors
    ///
    /// Rejects blank prompts and submissions while a request is in flight.
    /// A rejected submission leaves the state unchanged.
    pub fn begin_submit(&mut self, prompt: &str) -> Result<(), SubmitRejected> {
        if self.is_loading() {
            return Err(SubmitRejected::AlreadyInFlight);
        }
        if prompt.trim().is_empty() {
            return Err(SubmitRejected::EmptyPrompt);
        }
        prompt.clone_into(&mut self.prompt);
        self.status = RequestStatus::InFlight;
        self.script = None;
        self.error = None;
        Ok(())
    }

    /// Record the outcome of the in-flight request.
    ///
    /// A reply with nothing left after cleanup is not a failure: the session
    /// simply has no script, so the empty-state placeholder shows again.
    pub fn complete(&mut self, result: Result<String, GenerateError>) {
        match result {
            Ok(script) => {
                self.status = RequestStatus::Succeeded;
                self.script = Some(script).filter(|s| !s.is_empty());
                self.error = None;
            }
            Err(GenerateError::EmptyResponse) => {
                self.status = RequestStatus::Succeeded;
                self.script = None;
                self.error = None;
            }
            Err(_) => {
                self.status = RequestStatus::Failed;
                self.script = None;
                self.error = Some(GENERATION_FAILED_MESSAGE.to_owned());
            }
        }
    }
}

// =============================================================================
// SESSION STORE
// =============================================================================

struct SessionEntry {
    form: FormState,
    last_seen: Instant,
}

impl SessionEntry {
    fn new(now: Instant) -> Self {
        Self { form: FormState::default(), last_seen: now }
    }
}

/// In-memory map of session ID to form state. Clone shares the same map.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, SessionEntry>>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current form state for `session_id`.
    ///
    /// Unknown sessions read as a fresh `FormState` without being stored; an
    /// entry is only created by the first submission.
    pub async fn snapshot(&self, session_id: Uuid) -> FormState {
        let mut sessions = self.inner.write().await;
        match sessions.get_mut(&session_id) {
            Some(entry) => {
                entry.last_seen = Instant::now();
                entry.form.clone()
            }
            None => FormState::default(),
        }
    }

    /// Move the session to `InFlight` for `prompt`.
    ///
    /// # Errors
    ///
    /// See [`FormState::begin_submit`].
    pub async fn begin_submit(&self, session_id: Uuid, prompt: &str) -> Result<(), SubmitRejected> {
        let now = Instant::now();
        let mut sessions = self.inner.write().await;
        // An unknown session cannot be in flight; don't store it for a blank prompt.
        if prompt.trim().is_empty() && !sessions.contains_key(&session_id) {
            return Err(SubmitRejected::EmptyPrompt);
        }
        let entry = sessions
            .entry(session_id)
            .or_insert_with(|| SessionEntry::new(now));
        entry.last_seen = now;
        entry.form.begin_submit(prompt)
    }

    /// Store the outcome for `session_id` and return the resulting status.
    pub async fn complete(&self, session_id: Uuid, result: Result<String, GenerateError>) -> RequestStatus {
        let now = Instant::now();
        let mut sessions = self.inner.write().await;
        let entry = sessions
            .entry(session_id)
            .or_insert_with(|| SessionEntry::new(now));
        entry.last_seen = now;
        entry.form.complete(result);
        entry.form.status
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drop sessions idle longer than `max_idle`. In-flight sessions are kept.
    pub async fn prune_idle(&self, max_idle: Duration) -> usize {
        self.prune_idle_at(Instant::now(), max_idle).await
    }

    async fn prune_idle_at(&self, now: Instant, max_idle: Duration) -> usize {
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.form.is_loading() || now.duration_since(entry.last_seen) <= max_idle);
        before - sessions.len()
    }
}

/// Spawn a background task that prunes idle sessions once a minute.
pub fn spawn_session_pruner(store: SessionStore, max_idle: Duration) -> JoinHandle<()> {
    info!(max_idle_secs = max_idle.as_secs(), "session pruning configured");
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(PRUNE_INTERVAL).await;
            let pruned = store.prune_idle(max_idle).await;
            if pruned > 0 {
                let remaining = store.len().await;
                info!(pruned, remaining, "session: pruned idle sessions");
            }
        }
    })
}

// =============================================================================
// SUBMIT
// =============================================================================

/// Move `session_id` to `InFlight` and spawn the generation task.
///
/// The returned handle resolves to the final status; dropping it does not
/// cancel the task, which always records its outcome in the store.
///
/// # Errors
///
/// Returns [`SubmitRejected`] when the prompt is blank or a request is
/// already in flight; the generation client is not called in either case.
pub async fn start_submission(
    state: &AppState,
    session_id: Uuid,
    prompt: &str,
) -> Result<JoinHandle<RequestStatus>, SubmitRejected> {
    if let Err(rejected) = state.sessions.begin_submit(session_id, prompt).await {
        info!(%session_id, reason = %rejected, "session: submission rejected");
        return Err(rejected);
    }
    info!(%session_id, prompt_len = prompt.len(), "session: generation started");

    let llm = state.llm.clone();
    let sessions = state.sessions.clone();
    let description = prompt.to_owned();
    Ok(tokio::spawn(async move {
        let result = generate::generate_script(llm.as_ref(), &description).await;
        let status = sessions.complete(session_id, result).await;
        if status == RequestStatus::Failed {
            warn!(%session_id, "session: generation failed");
        } else {
            info!(%session_id, "session: generation succeeded");
        }
        status
    }))
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
