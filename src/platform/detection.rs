//! Repository and API endpoint detection

use crate::error::{Error, Result};
use crate::types::PlatformConfig;
use url::Url;

/// REST API root for github.com
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Build a platform config from an `owner/repo` slug and an optional API root.
///
/// The API root is what GitHub Actions exposes as `GITHUB_API_URL`; for
/// GitHub Enterprise it looks like `https://ghe.example.com/api/v3`.
pub fn parse_repo_info(slug: &str, api_url: Option<&str>) -> Result<PlatformConfig> {
    let slug = slug.trim().trim_end_matches(".git");
    let (owner, repo) = slug
        .split_once('/')
        .filter(|(owner, repo)| !owner.is_empty() && !repo.is_empty() && !repo.contains('/'))
        .ok_or_else(|| {
            Error::EventContext(format!("invalid repository '{slug}', expected owner/repo"))
        })?;

    let api_url = match api_url.map(str::trim).filter(|u| !u.is_empty()) {
        Some(raw) => {
            let parsed = Url::parse(raw)
                .map_err(|e| Error::Config(format!("invalid API URL '{raw}': {e}")))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(Error::Config(format!(
                    "invalid API URL '{raw}': unsupported scheme '{}'",
                    parsed.scheme()
                )));
            }
            raw.trim_end_matches('/').to_string()
        }
        None => DEFAULT_API_URL.to_string(),
    };

    Ok(PlatformConfig {
        owner: owner.to_string(),
        repo: repo.to_string(),
        api_url,
    })
}
