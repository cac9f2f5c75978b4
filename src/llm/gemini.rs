//! Google Gemini `generateContent` client.
//!
//! The system instruction travels in its own field, the prompt is a single
//! `user` turn, and sampling settings go in `generationConfig`. Reasoning
//! ("thought") parts are dropped from the reply. Parsing is a pure function
//! so it can be tested without a network.

use serde::{Deserialize, Serialize};

use super::config::LlmConfig;
use super::types::{ChatRequest, Completion, FinishReason, LlmChat, LlmError};

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Build a client from environment variables.
    ///
    /// # Errors
    ///
    /// See [`LlmConfig::from_env`] and [`GeminiClient::from_config`].
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_config(LlmConfig::from_env()?)
    }

    /// # Errors
    ///
    /// Returns [`LlmError::HttpClient`] if the HTTP client cannot be built.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let http = config.timeouts.http_client()?;
        Ok(Self { http, api_key: config.api_key, model: config.model, base_url: config.base_url })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait::async_trait]
impl LlmChat for GeminiClient {
    async fn complete(&self, request: ChatRequest<'_>) -> Result<Completion, LlmError> {
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&build_request(request))
            .send()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;
        if !status.is_success() {
            return Err(LlmError::Status { status: status.as_u16(), body });
        }

        parse_response(&body, &self.model)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: [TextPart<'a>; 1],
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: UsageMetadata,
    model_version: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
}

fn build_request(request: ChatRequest<'_>) -> GenerateContentRequest<'_> {
    let system_instruction = (!request.system.trim().is_empty())
        .then(|| Content { role: None, parts: [TextPart { text: request.system }] });

    GenerateContentRequest {
        system_instruction,
        contents: [Content { role: Some("user"), parts: [TextPart { text: request.prompt }] }],
        generation_config: GenerationConfig {
            temperature: request.sampling.temperature,
            max_output_tokens: request.sampling.max_tokens,
        },
    }
}

// =============================================================================
// PARSING
// =============================================================================

fn finish_reason(raw: Option<&str>) -> FinishReason {
    match raw {
        Some("STOP") | None => FinishReason::Stop,
        Some("MAX_TOKENS") => FinishReason::MaxTokens,
        Some("SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT" | "SPII") => FinishReason::Blocked,
        Some(_) => FinishReason::Other,
    }
}

fn parse_response(json: &str, requested_model: &str) -> Result<Completion, LlmError> {
    let reply: GenerateContentResponse =
        serde_json::from_str(json).map_err(|e| LlmError::Decode(e.to_string()))?;

    let Some(candidate) = reply.candidates.into_iter().next() else {
        return Err(LlmError::Decode("generateContent: no candidates".to_owned()));
    };

    let text: String = candidate
        .content
        .into_iter()
        .flat_map(|c| c.parts)
        .filter(|part| !part.thought)
        .filter_map(|part| part.text)
        .collect();

    Ok(Completion {
        text,
        model: reply.model_version.unwrap_or_else(|| requested_model.to_owned()),
        finish: finish_reason(candidate.finish_reason.as_deref()),
        input_tokens: reply.usage_metadata.prompt_token_count,
        output_tokens: reply.usage_metadata.candidates_token_count,
    })
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
