//! Model call types shared by the Gemini client and its callers.
//!
//! A call is single-turn: one system instruction, one user prompt, and the
//! sampling settings. The reply is flattened to its text plus usage numbers.

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The credential variable is unset or blank.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    #[error("HTTP client build failed: {0}")]
    HttpClient(String),

    /// The request never produced an HTTP response (DNS, TLS, timeout).
    #[error("model request failed: {0}")]
    Transport(String),

    #[error("model returned status {status}")]
    Status { status: u16, body: String },

    #[error("model response could not be decoded: {0}")]
    Decode(String),
}

impl crate::error::ErrorCode for LlmError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingApiKey { .. } => "E_MISSING_API_KEY",
            Self::HttpClient(_) => "E_HTTP_CLIENT",
            Self::Transport(_) => "E_LLM_TRANSPORT",
            Self::Status { .. } => "E_LLM_STATUS",
            Self::Decode(_) => "E_LLM_DECODE",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// REQUEST / RESPONSE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampling {
    pub max_tokens: u32,
    pub temperature: f32,
}

/// One single-turn generation request.
#[derive(Debug, Clone, Copy)]
pub struct ChatRequest<'a> {
    pub system: &'a str,
    pub prompt: &'a str,
    pub sampling: Sampling,
}

/// Why the model stopped producing output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    MaxTokens,
    /// Withheld by the provider's content filters.
    Blocked,
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// Answer text with reasoning parts removed. Empty when nothing came back.
    pub text: String,
    pub model: String,
    pub finish: FinishReason,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

// =============================================================================
// LLM CHAT TRAIT
// =============================================================================

/// Seam between the generation service and the model provider.
#[async_trait::async_trait]
pub trait LlmChat: Send + Sync {
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails or the reply is malformed.
    async fn complete(&self, request: ChatRequest<'_>) -> Result<Completion, LlmError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
