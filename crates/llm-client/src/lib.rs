//! `llm-client`: blocking chat-completion client used by `asdlc` to draft
//! story execution plans.
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint. Callers
//! depend on the [`Completion`] trait so tests can substitute a canned
//! implementation.
//!
//! ```rust,ignore
//! use llm_client::{Completion, LlmSettings, OpenAiClient};
//!
//! let client = OpenAiClient::new(LlmSettings::from_env()?)?;
//! let plan = client.complete("Plan a login page", Some(3072))?;
//! ```

pub mod client;
pub mod error;
pub mod types;

pub use client::{LlmOverrides, LlmSettings, OpenAiClient};
pub use error::{LlmError, Result};

/// A text-in, text-out model call.
pub trait Completion {
    /// Complete `prompt`. `max_tokens` overrides the configured budget.
    /// Errors are returned, never smuggled into the text.
    fn complete(&self, prompt: &str, max_tokens: Option<u32>) -> Result<String>;
}
