//! GitHub authentication

use super::{AuthSource, non_empty};
use crate::error::{Error, Result};
use tokio::process::Command;
use tracing::debug;

/// Resolved GitHub credentials
#[derive(Debug, Clone)]
pub struct GitHubAuthConfig {
    /// Access token
    pub token: String,
    /// Where the token came from
    pub source: AuthSource,
}

/// Resolve a GitHub token.
///
/// `env_token` is the value of `GITHUB_TOKEN` (or `GH_TOKEN`) as read by the
/// caller. Without one, falls back to `gh auth token` so the tool can be run
/// locally by someone logged in with the GitHub CLI.
pub async fn get_github_auth(env_token: Option<String>) -> Result<GitHubAuthConfig> {
    if let Some(token) = non_empty(env_token) {
        debug!("using GitHub token from environment");
        return Ok(GitHubAuthConfig {
            token,
            source: AuthSource::EnvVar,
        });
    }

    if let Some(token) = get_gh_cli_token().await {
        debug!("using GitHub token from gh CLI");
        return Ok(GitHubAuthConfig {
            token,
            source: AuthSource::Cli,
        });
    }

    Err(Error::Config(
        "no GitHub token found; set GITHUB_TOKEN or run 'gh auth login'".to_string(),
    ))
}

async fn get_gh_cli_token() -> Option<String> {
    let output = Command::new("gh").args(["auth", "token"]).output().await.ok()?;
    if !output.status.success() {
        debug!(status = %output.status, "gh auth token failed");
        return None;
    }
    non_empty(String::from_utf8(output.stdout).ok())
}
