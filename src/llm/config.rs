//! Model settings parsed from environment variables.

use std::time::Duration;

use super::types::LlmError;
use crate::config::env_parse;

pub const DEFAULT_API_KEY_VAR: &str = "API_KEY";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LlmTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for LlmTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

impl LlmTimeouts {
    /// # Errors
    ///
    /// Returns [`LlmError::HttpClient`] if the TLS backend fails to initialize.
    pub fn http_client(self) -> Result<reqwest::Client, LlmError> {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(self.request_secs))
            .connect_timeout(Duration::from_secs(self.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClient(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    /// Scheme and host only, without a trailing slash.
    pub base_url: String,
    pub timeouts: LlmTimeouts,
}

impl LlmConfig {
    /// Read the model settings.
    ///
    /// - `API_KEY` (required), or the variable named by `LLM_API_KEY_ENV`
    /// - `LLM_MODEL`: default `gemini-2.5-flash`
    /// - `LLM_BASE_URL`: default the public Gemini endpoint
    /// - `LLM_REQUEST_TIMEOUT_SECS` / `LLM_CONNECT_TIMEOUT_SECS`: 120 / 10
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::MissingApiKey`] when the credential is absent or blank.
    pub fn from_env() -> Result<Self, LlmError> {
        let key_var = std::env::var("LLM_API_KEY_ENV")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_KEY_VAR.to_owned());
        let Some(api_key) = std::env::var(&key_var).ok().filter(|v| !v.trim().is_empty()) else {
            return Err(LlmError::MissingApiKey { var: key_var });
        };

        let model = non_blank_env("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_owned());
        let base_url = non_blank_env("LLM_BASE_URL")
            .map_or_else(|| DEFAULT_BASE_URL.to_owned(), |url| url.trim_end_matches('/').to_owned());
        let timeouts = LlmTimeouts {
            request_secs: env_parse("LLM_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse("LLM_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { api_key, model, base_url, timeouts })
    }
}

fn non_blank_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
