//! OpenAI completions client

use crate::error::{Error, Result};
use crate::generation::{CompletionOptions, Generator};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Public OpenAI API root
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    n: u32,
    frequency_penalty: f32,
    presence_penalty: f32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Completion client for OpenAI-compatible APIs using reqwest
pub struct OpenAiService {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiService {
    /// Create a new client
    ///
    /// `base_url` defaults to [`DEFAULT_BASE_URL`].
    pub fn new(api_key: String, base_url: Option<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let client = Client::builder()
            .user_agent("gpt-log")
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Generation(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }
}

#[async_trait]
impl Generator for OpenAiService {
    async fn complete(&self, prompt: &str, options: &CompletionOptions) -> Result<Option<String>> {
        debug!(model = %options.model, prompt_len = prompt.len(), "requesting completion");

        let request = CompletionRequest {
            model: &options.model,
            prompt,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
            top_p: options.top_p,
            n: 1,
            frequency_penalty: options.frequency_penalty,
            presence_penalty: options.presence_penalty,
        };

        let response = self
            .client
            .post(format!("{}/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Generation(format!("completion request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorResponse>(&body)
                .map_or(body, |e| e.error.message);
            return Err(Error::Generation(format!("{status}: {message}")));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::Generation(format!("failed to parse completion: {e}")))?;

        let text = completion.choices.into_iter().next().and_then(|c| c.text);
        debug!(has_text = text.is_some(), "completion received");
        Ok(text)
    }
}
