//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::{DEFAULT_API_URL, PlatformService};
use crate::types::{PlatformConfig, PrCommit, PullRequestDetails};
use async_trait::async_trait;
use octocrab::Octocrab;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Page size for paginated REST listings (GitHub maximum)
const PER_PAGE: u32 = 100;

#[derive(Deserialize)]
struct CommitListItem {
    sha: String,
    commit: CommitPayload,
}

#[derive(Deserialize)]
struct CommitPayload {
    message: String,
}

#[derive(Deserialize)]
struct CommitDetail {
    #[serde(default)]
    files: Vec<CommitFile>,
}

#[derive(Deserialize)]
struct CommitFile {
    filename: String,
    patch: Option<String>,
}

/// GitHub service using octocrab
///
/// Pull request reads and updates go through octocrab; the paginated commit
/// endpoints are queried with raw HTTP requests.
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
    /// Token for raw HTTP requests
    token: String,
    /// HTTP client for raw requests
    http_client: Client,
}

impl GitHubService {
    /// Create a new GitHub service
    pub fn new(token: &str, config: PlatformConfig, timeout: Duration) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());

        if config.api_url != DEFAULT_API_URL {
            builder = builder
                .base_uri(config.api_url.as_str())
                .map_err(|e| Error::GitHubApi(e.to_string()))?;
        }

        let client = builder
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        let http_client = Client::builder()
            .user_agent("gpt-log")
            .timeout(timeout)
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            token: token.to_string(),
            http_client,
        })
    }

    /// Fetch one page of a REST listing
    async fn get_page<T: DeserializeOwned>(&self, path: &str, page: u32) -> Result<T> {
        let url = format!("{}{path}", self.config.api_url);

        let response = self
            .http_client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .query(&[("per_page", PER_PAGE), ("page", page)])
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to fetch {path}: {e}")))?
            .error_for_status()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse {path}: {e}")))
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn get_pr_details(&self, pr_number: u64) -> Result<PullRequestDetails> {
        debug!(pr_number, "getting PR details");

        let pr = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .get(pr_number)
            .await?;

        let details = PullRequestDetails {
            number: pr.number,
            title: pr.title.clone().unwrap_or_default(),
            body: pr.body.clone(),
        };

        debug!(pr_number, has_body = details.body.is_some(), "got PR details");
        Ok(details)
    }

    async fn list_pr_commits(&self, pr_number: u64) -> Result<Vec<PrCommit>> {
        debug!(pr_number, "listing PR commits");
        let path = format!(
            "/repos/{}/{}/pulls/{pr_number}/commits",
            self.config.owner, self.config.repo
        );

        let mut commits = Vec::new();
        let mut page = 1;
        loop {
            let items: Vec<CommitListItem> = self.get_page(&path, page).await?;
            let done = items.len() < PER_PAGE as usize;
            commits.extend(items.into_iter().map(|item| PrCommit {
                sha: item.sha,
                message: item.commit.message,
            }));
            if done {
                break;
            }
            page += 1;
        }

        debug!(pr_number, count = commits.len(), "listed PR commits");
        Ok(commits)
    }

    async fn get_commit_diff(&self, sha: &str) -> Result<String> {
        debug!(sha, "fetching commit diff");
        let path = format!(
            "/repos/{}/{}/commits/{sha}",
            self.config.owner, self.config.repo
        );

        let mut patches = Vec::new();
        let mut page = 1;
        loop {
            let detail: CommitDetail = self.get_page(&path, page).await?;
            let done = detail.files.len() < PER_PAGE as usize;
            for file in detail.files {
                match file.patch {
                    Some(patch) => patches.push(patch),
                    // Binary files and very large diffs come without a patch
                    None => debug!(sha, file = %file.filename, "file has no patch"),
                }
            }
            if done {
                break;
            }
            page += 1;
        }

        debug!(sha, files = patches.len(), "fetched commit diff");
        Ok(patches.join("\n"))
    }

    async fn update_pr_body(&self, pr_number: u64, body: &str) -> Result<()> {
        debug!(pr_number, body_len = body.len(), "updating PR body");
        self.client
            .pulls(&self.config.owner, &self.config.repo)
            .update(pr_number)
            .body(body)
            .send()
            .await?;
        debug!(pr_number, "updated PR body");
        Ok(())
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::parse_repo_info;
    use mockito::Matcher;
    use serde_json::json;

    fn service(url: &str) -> GitHubService {
        let config = parse_repo_info("octo/widgets", Some(url)).unwrap();
        GitHubService::new("ghp_test", config, Duration::from_secs(5)).unwrap()
    }

    fn commit_items(range: std::ops::Range<usize>) -> serde_json::Value {
        serde_json::Value::Array(
            range
                .map(|i| {
                    json!({
                        "sha": format!("sha{i}"),
                        "commit": { "message": format!("Commit {i}") }
                    })
                })
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_list_pr_commits_follows_pages() {
        let mut server = mockito::Server::new_async().await;
        let first = server
            .mock("GET", "/repos/octo/widgets/pulls/7/commits")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("per_page".into(), "100".into()),
                Matcher::UrlEncoded("page".into(), "1".into()),
            ]))
            .match_header("authorization", "Bearer ghp_test")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(commit_items(0..100).to_string())
            .create_async()
            .await;
        let second = server
            .mock("GET", "/repos/octo/widgets/pulls/7/commits")
            .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(commit_items(100..102).to_string())
            .create_async()
            .await;

        let commits = service(&server.url()).list_pr_commits(7).await.unwrap();

        first.assert_async().await;
        second.assert_async().await;
        assert_eq!(commits.len(), 102);
        assert_eq!(commits[0].sha, "sha0");
        assert_eq!(commits[101].sha, "sha101");
        assert_eq!(commits[101].message, "Commit 101");
    }

    #[tokio::test]
    async fn test_commit_diff_joins_patches_in_order() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/octo/widgets/commits/abc123")
            .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "sha": "abc123",
                    "files": [
                        { "filename": "src/a.rs", "patch": "@@ -1 +1 @@\n-a\n+b" },
                        { "filename": "logo.png" },
                        { "filename": "src/c.rs", "patch": "@@ -0,0 +1 @@\n+c" }
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let diff = service(&server.url()).get_commit_diff("abc123").await.unwrap();
        assert_eq!(diff, "@@ -1 +1 @@\n-a\n+b\n@@ -0,0 +1 @@\n+c");
    }

    #[tokio::test]
    async fn test_api_failure_is_github_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/octo/widgets/pulls/9/commits")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body(r#"{"message":"Not Found"}"#)
            .create_async()
            .await;

        let err = service(&server.url()).list_pr_commits(9).await.unwrap_err();
        assert!(matches!(err, Error::GitHubApi(_)), "got {err:?}");
    }
}
