//! Source-control platform services
//!
//! Provides the pull request operations the changelog step needs behind a
//! trait so runs can be driven against GitHub or a test double.

mod detection;
mod github;

pub use detection::{DEFAULT_API_URL, parse_repo_info};
pub use github::GitHubService;

use crate::error::Result;
use crate::types::{PlatformConfig, PrCommit, PullRequestDetails};
use async_trait::async_trait;

/// Platform service trait for pull request operations
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Get the PR title and description
    async fn get_pr_details(&self, pr_number: u64) -> Result<PullRequestDetails>;

    /// List every commit of a PR, oldest first
    ///
    /// Implementations must follow pagination so the list is complete.
    async fn list_pr_commits(&self, pr_number: u64) -> Result<Vec<PrCommit>>;

    /// Unified diff of a single commit
    ///
    /// The patches of all changed files, joined with newlines in the order
    /// the platform returns the files.
    async fn get_commit_diff(&self, sha: &str) -> Result<String>;

    /// Replace the PR description
    async fn update_pr_body(&self, pr_number: u64, body: &str) -> Result<()>;

    /// Get the platform configuration
    fn config(&self) -> &PlatformConfig;
}
