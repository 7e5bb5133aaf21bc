//! Trigger event resolution
//!
//! GitHub Actions writes the webhook payload that started the workflow to the
//! file named by `GITHUB_EVENT_PATH`. The changelog step needs the pull
//! request (or issue) number from it and, as a last resort, the repository.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Deserialize)]
struct NumberRef {
    number: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct RepositoryRef {
    full_name: String,
}

/// The subset of a webhook payload the changelog step reads
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPayload {
    pull_request: Option<NumberRef>,
    issue: Option<NumberRef>,
    repository: Option<RepositoryRef>,
}

impl EventPayload {
    /// Parse a payload from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| Error::EventContext(format!("failed to parse event payload: {e}")))
    }

    /// Read and parse the payload file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::EventContext(format!("failed to read event payload {}: {e}", path.display()))
        })?;
        Self::from_json(&text)
    }

    /// Pull request number, falling back to the issue number
    pub fn target_number(&self) -> Option<u64> {
        self.pull_request
            .as_ref()
            .or(self.issue.as_ref())
            .map(|r| r.number)
    }

    /// `owner/repo` of the repository the event belongs to
    pub fn repository(&self) -> Option<&str> {
        self.repository.as_ref().map(|r| r.full_name.as_str())
    }
}

/// Pick the PR number: an explicit value wins over the event payload.
pub fn resolve_pr_number(explicit: Option<u64>, payload: Option<&EventPayload>) -> Result<u64> {
    if let Some(number) = explicit {
        debug!(number, "using explicit PR number");
        return Ok(number);
    }
    payload
        .and_then(EventPayload::target_number)
        .ok_or_else(|| {
            Error::EventContext(
                "no pull request or issue number in the trigger event; pass --pr".to_string(),
            )
        })
}

/// Pick the repository slug: an explicit value wins over the event payload.
pub fn resolve_repository(explicit: Option<&str>, payload: Option<&EventPayload>) -> Result<String> {
    explicit
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| payload.and_then(EventPayload::repository))
        .map(ToString::to_string)
        .ok_or_else(|| {
            Error::EventContext(
                "repository unknown; set GITHUB_REPOSITORY or pass --repo".to_string(),
            )
        })
}
