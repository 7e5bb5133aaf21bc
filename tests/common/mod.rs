//! Shared fixtures for gpt-log tests

#![allow(dead_code)]

mod mock_generator;
mod mock_platform;

pub use mock_generator::{CompleteCall, MockGenerator};
pub use mock_platform::{MockPlatformService, UpdateBodyCall};

use gpt_log::types::{PlatformConfig, PrCommit};

/// Platform config for a test repository on github.com
pub fn github_config() -> PlatformConfig {
    PlatformConfig {
        owner: "octo".to_string(),
        repo: "widgets".to_string(),
        api_url: "https://api.github.com".to_string(),
    }
}

/// A commit whose message is `Commit <sha>`
pub fn make_commit(sha: &str) -> PrCommit {
    PrCommit {
        sha: sha.to_string(),
        message: format!("Commit {sha}"),
    }
}

/// Mock platform preconfigured with [`github_config`]
pub fn mock_platform() -> MockPlatformService {
    MockPlatformService::with_config(github_config())
}
