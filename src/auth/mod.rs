//! Authentication for GitHub and the generation service
//!
//! Supports environment variables and, for GitHub, the `gh` CLI.

mod github;
mod openai;

pub use github::{GitHubAuthConfig, get_github_auth};
pub use openai::{OpenAiAuthConfig, get_openai_auth};

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token from CLI tool (gh)
    Cli,
    /// Token from environment variable
    EnvVar,
}

/// Treat blank values as absent
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
