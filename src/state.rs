//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the LLM client, the per-session form store, and the server
//! config. The LLM client is required: the server refuses to start without
//! a credential, so there is no "AI disabled" mode.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::llm::LlmChat;
use crate::services::session::SessionStore;

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Copy.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn LlmChat>,
    pub sessions: SessionStore,
    pub config: ServerConfig,
}

impl AppState {
    #[must_use]
    pub fn new(llm: Arc<dyn LlmChat>, config: ServerConfig) -> Self {
        Self { llm, sessions: SessionStore::new(), config }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::sync::Notify;

    use super::*;
    use crate::llm::types::{ChatRequest, Completion, FinishReason, LlmError, Sampling};

    /// Sampling, system instruction, prompt.
    type RecordedRequest = (Sampling, String, String);

    /// Scripted `LlmChat` that records every request.
    ///
    /// Replies are consumed in order; once exhausted it answers `print('done')`.
    /// With a gate, each call parks until the gate is notified.
    pub struct MockLlm {
        replies: Mutex<Vec<Result<String, LlmError>>>,
        calls: AtomicUsize,
        last: Mutex<Option<RecordedRequest>>,
        gate: Option<Arc<Notify>>,
    }

    impl MockLlm {
        #[must_use]
        pub fn replying(texts: &[&str]) -> Self {
            Self::with_replies(texts.iter().map(|t| Ok((*t).to_owned())).collect())
        }

        #[must_use]
        pub fn failing(err: LlmError) -> Self {
            Self::with_replies(vec![Err(err)])
        }

        #[must_use]
        pub fn with_replies(replies: Vec<Result<String, LlmError>>) -> Self {
            Self { replies: Mutex::new(replies), calls: AtomicUsize::new(0), last: Mutex::new(None), gate: None }
        }

        /// Park every call until `gate` is notified.
        #[must_use]
        pub fn gated(mut self, gate: Arc<Notify>) -> Self {
            self.gate = Some(gate);
            self
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn last_request(&self) -> Option<RecordedRequest> {
            self.last.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl LlmChat for MockLlm {
        async fn complete(&self, request: ChatRequest<'_>) -> Result<Completion, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() =
                Some((request.sampling, request.system.to_owned(), request.prompt.to_owned()));

            if let Some(gate) = &self.gate {
                gate.notified().await;
            }

            let reply = {
                let mut replies = self.replies.lock().unwrap();
                if replies.is_empty() { Ok("print('done')".to_owned()) } else { replies.remove(0) }
            };
            reply.map(|text| Completion {
                text,
                model: "mock".into(),
                finish: FinishReason::Stop,
                input_tokens: 10,
                output_tokens: 20,
            })
        }
    }

    /// Create a test `AppState` around `llm` with default server config.
    #[must_use]
    pub fn test_app_state(llm: Arc<dyn LlmChat>) -> AppState {
        AppState::new(llm, ServerConfig::default())
    }
}
