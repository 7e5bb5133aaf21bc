//! Generation service authentication

use super::{AuthSource, non_empty};
use crate::error::{Error, Result};

/// Resolved generation service credentials
#[derive(Debug, Clone)]
pub struct OpenAiAuthConfig {
    /// API key
    pub api_key: String,
    /// Where the key came from
    pub source: AuthSource,
}

/// Resolve the generation service API key from `OPENAI_API_KEY`.
pub fn get_openai_auth(env_key: Option<String>) -> Result<OpenAiAuthConfig> {
    non_empty(env_key)
        .map(|api_key| OpenAiAuthConfig {
            api_key,
            source: AuthSource::EnvVar,
        })
        .ok_or_else(|| Error::Config("OPENAI_API_KEY is not set".to_string()))
}
