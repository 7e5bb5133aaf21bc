//! Core types for gpt-log

use serde::{Deserialize, Serialize};

/// One recorded changelog line for a commit
///
/// The serialized field names (`commitHash`, `changelog`) are part of the
/// marker format stored in pull request descriptions and must not change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommitLogEntry {
    /// Commit SHA the entry was generated for
    pub commit_hash: String,
    /// Generated description of the commit
    pub changelog: String,
}

impl CommitLogEntry {
    /// Create a new entry
    pub fn new(commit_hash: impl Into<String>, changelog: impl Into<String>) -> Self {
        Self {
            commit_hash: commit_hash.into(),
            changelog: changelog.into(),
        }
    }
}

/// Ordered changelog, oldest discovery first
pub type CommitLog = Vec<CommitLogEntry>;

/// A commit belonging to a pull request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrCommit {
    /// Commit SHA (hex)
    pub sha: String,
    /// Full commit message
    pub message: String,
}

/// Pull request fields needed to maintain the changelog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestDetails {
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// PR description; `None` when the PR was opened without one
    pub body: Option<String>,
}

/// Repository the platform service operates on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// REST API root, e.g. `https://api.github.com`
    pub api_url: String,
}

impl PlatformConfig {
    /// `owner/repo` slug
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}
