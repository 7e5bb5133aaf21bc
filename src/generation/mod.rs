//! Text generation services
//!
//! The changelog step only needs a single-shot completion, so the trait is
//! kept to one method. [`OpenAiService`] talks to an OpenAI-compatible
//! completions endpoint.

mod openai;

pub use openai::{DEFAULT_BASE_URL, OpenAiService};

use crate::error::Result;
use async_trait::async_trait;

/// Default completion model
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo-instruct";

/// Default completion length in tokens
pub const DEFAULT_MAX_TOKENS: u32 = 128;

/// Sampling parameters for a completion request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOptions {
    /// Model name
    pub model: String,
    /// Upper bound on generated tokens
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Nucleus sampling mass
    pub top_p: f32,
    /// Penalty for repeated tokens
    pub frequency_penalty: f32,
    /// Penalty for tokens already present
    pub presence_penalty: f32,
}

impl CompletionOptions {
    /// Deterministic options: single best completion, no penalties
    pub fn deterministic(model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            max_tokens,
            temperature: 0.0,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        }
    }
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self::deterministic(DEFAULT_MODEL, DEFAULT_MAX_TOKENS)
    }
}

/// Single-shot text completion
#[async_trait]
pub trait Generator: Send + Sync {
    /// Complete `prompt`, returning the generated text if the service produced any
    async fn complete(&self, prompt: &str, options: &CompletionOptions) -> Result<Option<String>>;
}
