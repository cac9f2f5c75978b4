//! LLM — Gemini client behind the [`LlmChat`] seam.
//!
//! DESIGN
//! ======
//! Configured from environment variables. Callers depend only on the
//! [`LlmChat`] trait so tests can substitute a scripted model.

pub mod config;
pub mod gemini;
pub mod types;

pub use gemini::GeminiClient;
pub use types::LlmChat;
