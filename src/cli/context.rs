//! Shared command context
//!
//! Resolves everything a run needs before the first remote call, so that a
//! missing credential or an unusable trigger event fails fast.

use crate::cli::run::RunArgs;
use gpt_log::auth::{get_github_auth, get_openai_auth};
use gpt_log::config::{ResolvedSettings, Settings, load_settings};
use gpt_log::error::Result;
use gpt_log::event::{EventPayload, resolve_pr_number, resolve_repository};
use gpt_log::generation::{Generator, OpenAiService};
use gpt_log::platform::{GitHubService, PlatformService, parse_repo_info};
use tracing::debug;

/// Context for a changelog run
///
/// - Credentials for GitHub and the generation service
/// - Pull request number and repository from the trigger event
/// - Settings merged from file and command line
pub struct CommandContext {
    /// Pull request (or issue) number
    pub pr_number: u64,
    /// Platform service (GitHub)
    pub platform: Box<dyn PlatformService>,
    /// Generation service
    pub generator: Box<dyn Generator>,
    /// Effective settings
    pub settings: ResolvedSettings,
}

impl CommandContext {
    /// Create a new command context
    ///
    /// Order matters: credentials are checked before the trigger event so a
    /// misconfigured workflow reports the missing secret first.
    pub async fn new(args: &RunArgs) -> Result<Self> {
        let openai = get_openai_auth(args.openai_api_key.clone())?;
        let github = get_github_auth(args.github_token.clone()).await?;
        debug!(
            github_source = ?github.source,
            openai_source = ?openai.source,
            "resolved credentials"
        );

        let payload = args
            .event_path
            .as_deref()
            .map(EventPayload::load)
            .transpose()?;
        let pr_number = resolve_pr_number(args.pr, payload.as_ref())?;
        let repository = resolve_repository(args.repo.as_deref(), payload.as_ref())?;

        let file_settings = load_settings(&args.workdir, args.config.as_deref())?;
        let settings = file_settings.merge(args.overrides.clone()).resolve()?;
        debug!(?settings, "resolved settings");

        let platform_config = parse_repo_info(&repository, args.api_url.as_deref())?;
        let platform = GitHubService::new(&github.token, platform_config, settings.timeout)?;
        let generator =
            OpenAiService::new(openai.api_key, args.openai_base_url.clone(), settings.timeout)?;

        Ok(Self {
            pr_number,
            platform: Box::new(platform),
            generator: Box::new(generator),
            settings,
        })
    }
}

/// Settings given on the command line, as a layer over the settings file
pub fn cli_overrides(
    model: Option<String>,
    max_tokens: Option<u32>,
    jobs: Option<usize>,
    max_diff_chars: Option<usize>,
) -> Settings {
    Settings {
        model,
        max_tokens,
        jobs,
        max_diff_chars,
        timeout_secs: None,
    }
}
