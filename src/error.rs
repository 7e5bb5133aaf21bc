//! Error types for gpt-log

use thiserror::Error;

/// Errors that can abort a changelog run
#[derive(Debug, Error)]
pub enum Error {
    /// Missing credential or unusable settings
    #[error("configuration error: {0}")]
    Config(String),

    /// No pull request, issue number or repository could be derived from the trigger event
    #[error("event context error: {0}")]
    EventContext(String),

    /// GitHub API call failed
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Generation service call failed
    #[error("generation service error: {0}")]
    Generation(String),

    /// The embedded changelog marker could not be decoded
    #[error("malformed changelog marker: {0}")]
    MalformedLog(String),

    /// Generic platform failure (used by alternative platform implementations)
    #[error("platform error: {0}")]
    Platform(String),

    /// Unexpected internal failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        Self::GitHubApi(err.to_string())
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
