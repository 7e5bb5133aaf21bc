//! Mock platform service for testing
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use gpt_log::error::{Error, Result};
use gpt_log::platform::PlatformService;
use gpt_log::types::{PlatformConfig, PrCommit, PullRequestDetails};
use std::collections::HashMap;
use std::sync::Mutex;

/// Call record for `update_pr_body`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateBodyCall {
    pub pr_number: u64,
    pub body: String,
}

/// Simple mock platform service for testing
///
/// This manually implements `PlatformService` rather than using a mocking
/// crate so that responses and recorded calls stay easy to inspect.
///
/// Features:
/// - Configurable PR, commit list and per-commit diffs
/// - Call tracking for verification
/// - Error injection for failure path testing
/// - Updates are written back, so a second run sees the first run's body
pub struct MockPlatformService {
    config: PlatformConfig,
    pr_details: Mutex<HashMap<u64, PullRequestDetails>>,
    commits: Mutex<HashMap<u64, Vec<PrCommit>>>,
    diffs: Mutex<HashMap<String, String>>,
    // Call tracking
    get_pr_details_calls: Mutex<Vec<u64>>,
    list_commits_calls: Mutex<Vec<u64>>,
    diff_calls: Mutex<Vec<String>>,
    update_body_calls: Mutex<Vec<UpdateBodyCall>>,
    // Error injection
    error_on_get_pr: Mutex<Option<String>>,
    error_on_list_commits: Mutex<Option<String>>,
    error_on_diff: Mutex<Option<String>>,
    error_on_update: Mutex<Option<String>>,
}

impl MockPlatformService {
    /// Create a new mock with the given config
    pub fn with_config(config: PlatformConfig) -> Self {
        Self {
            config,
            pr_details: Mutex::new(HashMap::new()),
            commits: Mutex::new(HashMap::new()),
            diffs: Mutex::new(HashMap::new()),
            get_pr_details_calls: Mutex::new(Vec::new()),
            list_commits_calls: Mutex::new(Vec::new()),
            diff_calls: Mutex::new(Vec::new()),
            update_body_calls: Mutex::new(Vec::new()),
            error_on_get_pr: Mutex::new(None),
            error_on_list_commits: Mutex::new(None),
            error_on_diff: Mutex::new(None),
            error_on_update: Mutex::new(None),
        }
    }

    /// Helper to set up a PR with a title, body and commits
    ///
    /// Each commit gets the diff `+change <sha>`.
    pub fn setup_pr(&self, pr_number: u64, title: &str, body: Option<&str>, shas: &[&str]) {
        self.set_pr_details(
            pr_number,
            PullRequestDetails {
                number: pr_number,
                title: title.to_string(),
                body: body.map(ToString::to_string),
            },
        );
        self.set_commits(
            pr_number,
            shas.iter().map(|sha| super::make_commit(sha)).collect(),
        );
        for sha in shas {
            self.set_diff(sha, &format!("+change {sha}"));
        }
    }

    pub fn set_pr_details(&self, pr_number: u64, details: PullRequestDetails) {
        self.pr_details.lock().unwrap().insert(pr_number, details);
    }

    pub fn set_commits(&self, pr_number: u64, commits: Vec<PrCommit>) {
        self.commits.lock().unwrap().insert(pr_number, commits);
    }

    pub fn set_diff(&self, sha: &str, diff: &str) {
        self.diffs
            .lock()
            .unwrap()
            .insert(sha.to_string(), diff.to_string());
    }

    /// Current body of a PR (reflects updates)
    pub fn body(&self, pr_number: u64) -> Option<String> {
        self.pr_details
            .lock()
            .unwrap()
            .get(&pr_number)
            .and_then(|d| d.body.clone())
    }

    // === Error injection methods ===

    pub fn fail_get_pr(&self, msg: &str) {
        *self.error_on_get_pr.lock().unwrap() = Some(msg.to_string());
    }

    pub fn fail_list_commits(&self, msg: &str) {
        *self.error_on_list_commits.lock().unwrap() = Some(msg.to_string());
    }

    pub fn fail_diff(&self, msg: &str) {
        *self.error_on_diff.lock().unwrap() = Some(msg.to_string());
    }

    pub fn fail_update(&self, msg: &str) {
        *self.error_on_update.lock().unwrap() = Some(msg.to_string());
    }

    // === Call verification methods ===

    pub fn get_pr_details_calls(&self) -> Vec<u64> {
        self.get_pr_details_calls.lock().unwrap().clone()
    }

    pub fn get_list_commits_calls(&self) -> Vec<u64> {
        self.list_commits_calls.lock().unwrap().clone()
    }

    pub fn get_diff_calls(&self) -> Vec<String> {
        self.diff_calls.lock().unwrap().clone()
    }

    pub fn get_update_body_calls(&self) -> Vec<UpdateBodyCall> {
        self.update_body_calls.lock().unwrap().clone()
    }

    /// Assert that the description was never written
    pub fn assert_not_updated(&self) {
        let calls = self.get_update_body_calls();
        assert!(
            calls.is_empty(),
            "Expected no update_pr_body calls but got: {calls:?}"
        );
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn get_pr_details(&self, pr_number: u64) -> Result<PullRequestDetails> {
        self.get_pr_details_calls.lock().unwrap().push(pr_number);

        if let Some(msg) = self.error_on_get_pr.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        self.pr_details
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .ok_or_else(|| {
                Error::Platform(format!(
                    "get_pr_details: no response configured for PR #{pr_number}"
                ))
            })
    }

    async fn list_pr_commits(&self, pr_number: u64) -> Result<Vec<PrCommit>> {
        self.list_commits_calls.lock().unwrap().push(pr_number);

        if let Some(msg) = self.error_on_list_commits.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        Ok(self
            .commits
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_commit_diff(&self, sha: &str) -> Result<String> {
        self.diff_calls.lock().unwrap().push(sha.to_string());

        if let Some(msg) = self.error_on_diff.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        Ok(self
            .diffs
            .lock()
            .unwrap()
            .get(sha)
            .cloned()
            .unwrap_or_default())
    }

    async fn update_pr_body(&self, pr_number: u64, body: &str) -> Result<()> {
        self.update_body_calls.lock().unwrap().push(UpdateBodyCall {
            pr_number,
            body: body.to_string(),
        });

        if let Some(msg) = self.error_on_update.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        if let Some(details) = self.pr_details.lock().unwrap().get_mut(&pr_number) {
            details.body = Some(body.to_string());
        }
        Ok(())
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
