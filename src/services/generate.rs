//! Generation service — description → LLM → cleaned Python script.
//!
//! DESIGN
//! ======
//! One outbound chat call per request with a fixed persona instruction and a
//! low temperature. The raw completion is trimmed and stripped of a leading
//! and trailing markdown code fence. Fence handling is a prefix/suffix check,
//! not a markdown parser: nested or repeated fences pass through untouched.
//!
//! Failures are logged and returned as-is; there is no retry.

use std::sync::OnceLock;

use tracing::{info, warn};

use crate::config::env_parse;
use crate::error::ErrorCode;
use crate::llm::LlmChat;
use crate::llm::types::{ChatRequest, LlmError, Sampling};

const DEFAULT_GENERATE_MAX_TOKENS: u32 = 8192;

/// Sampling temperature for code generation. Kept low for determinism.
pub const TEMPERATURE: f32 = 0.2;

pub const SYSTEM_INSTRUCTION: &str = "You are an expert Python developer. Your sole purpose is to generate a single, \
complete, and functional Python script based on the user's request.

RULES:
- Do not provide any explanations, comments, or introductory text outside of the Python code itself.
- The entire output must be only the raw Python code.
- The script must be runnable in a standard Python 3 environment.
- Do not use any external libraries unless explicitly asked for in the user's request.
- The code should be well-structured and include comments where necessary for clarity.";

const FENCE: &str = "```";
const PYTHON_TAG: &str = "python";

fn generate_max_tokens() -> u32 {
    static VALUE: OnceLock<u32> = OnceLock::new();
    *VALUE.get_or_init(|| env_parse("GENERATE_MAX_TOKENS", DEFAULT_GENERATE_MAX_TOKENS))
}

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("model returned no script")]
    EmptyResponse,
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

impl ErrorCode for GenerateError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyDescription => "E_EMPTY_DESCRIPTION",
            Self::EmptyResponse => "E_EMPTY_RESPONSE",
            Self::Llm(_) => "E_LLM_ERROR",
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::EmptyDescription => false,
            Self::EmptyResponse => true,
            Self::Llm(e) => e.retryable(),
        }
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Ask the model for a Python script matching `description`.
///
/// # Errors
///
/// Returns [`GenerateError::EmptyDescription`] without calling the model when
/// the description is blank, [`GenerateError::Llm`] when the call fails, and
/// [`GenerateError::EmptyResponse`] when nothing is left after cleanup.
pub async fn generate_script(llm: &dyn LlmChat, description: &str) -> Result<String, GenerateError> {
    if description.trim().is_empty() {
        return Err(GenerateError::EmptyDescription);
    }

    let request = ChatRequest {
        system: SYSTEM_INSTRUCTION,
        prompt: description,
        sampling: Sampling { max_tokens: generate_max_tokens(), temperature: TEMPERATURE },
    };

    let completion = match llm.complete(request).await {
        Ok(completion) => completion,
        Err(e) => {
            warn!(error = %e, "generate: LLM call failed");
            return Err(e.into());
        }
    };

    info!(
        model = %completion.model,
        finish = ?completion.finish,
        input_tokens = completion.input_tokens,
        output_tokens = completion.output_tokens,
        "generate: LLM response"
    );

    let script = strip_code_fences(&completion.text);
    if script.is_empty() {
        warn!(finish = ?completion.finish, "generate: empty script after cleanup");
        return Err(GenerateError::EmptyResponse);
    }
    Ok(script)
}

// =============================================================================
// CLEANUP
// =============================================================================

/// Trim `raw` and drop one leading and one trailing code fence.
///
/// A leading fence is ```` ``` ```` followed by an optional language tag on
/// its own line, or ```` ```python ```` followed by code on the same line.
#[must_use]
pub fn strip_code_fences(raw: &str) -> String {
    let mut script = raw.trim();

    if let Some(rest) = script.strip_prefix(FENCE) {
        let (first_line, remainder) = rest.split_once('\n').unwrap_or((rest, ""));
        if is_language_tag(first_line.trim_end()) {
            script = remainder.trim();
        } else if let Some(inline) = rest.strip_prefix(PYTHON_TAG) {
            // "```python x = 1" keeps code on the fence line.
            script = inline.trim();
        }
    }

    if let Some(rest) = script.strip_suffix(FENCE) {
        script = rest.trim();
    }

    script.to_string()
}

fn is_language_tag(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '#' | '.' | '_'))
}

#[cfg(test)]
#[path = "generate_test.rs"]
mod tests;
