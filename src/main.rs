//! gpt-log - AI-written per-commit changelogs in pull request descriptions

mod cli;

use anyhow::Context;
use clap::Parser;
use cli::context::cli_overrides;
use cli::{RunArgs, init_tracing, report_failure, run_changelog};
use std::path::PathBuf;
use std::process::ExitCode;

/// Keep an AI-written changelog of every commit in a pull request description
#[derive(Parser)]
#[command(name = "gpt-log", version, about, long_about = None)]
struct Cli {
    /// Pull request or issue number [default: taken from the trigger event]
    #[arg(long)]
    pr: Option<u64>,

    /// Repository as owner/name
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repo: Option<String>,

    /// Webhook payload of the triggering event
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: Option<PathBuf>,

    /// GitHub REST API root
    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<String>,

    /// GitHub token [falls back to GH_TOKEN, then `gh auth token`]
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// API key for the generation service
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: Option<String>,

    /// Root of an OpenAI-compatible API
    #[arg(long, env = "OPENAI_BASE_URL")]
    openai_base_url: Option<String>,

    /// Settings file [default: .github/gpt-log.toml when present]
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Completion model
    #[arg(long, env = "GPT_LOG_MODEL")]
    model: Option<String>,

    /// Maximum tokens per generated entry
    #[arg(long)]
    max_tokens: Option<u32>,

    /// Number of commits to summarize concurrently
    #[arg(long, short = 'j')]
    jobs: Option<usize>,

    /// Truncate each commit diff to this many characters
    #[arg(long)]
    max_diff_chars: Option<usize>,

    /// Print the new description instead of updating the pull request
    #[arg(long)]
    dry_run: bool,

    /// Verbose output (debug logs and generated entries)
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_failure(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let workdir = std::env::current_dir().context("failed to determine working directory")?;

    let args = RunArgs {
        pr: cli.pr,
        repo: cli.repo,
        event_path: cli.event_path,
        api_url: cli.api_url,
        github_token: cli
            .github_token
            .or_else(|| std::env::var("GH_TOKEN").ok()),
        openai_api_key: cli.openai_api_key,
        openai_base_url: cli.openai_base_url,
        config: cli.config,
        workdir,
        overrides: cli_overrides(cli.model, cli.max_tokens, cli.jobs, cli.max_diff_chars),
        dry_run: cli.dry_run,
        verbose: cli.verbose,
    };

    run_changelog(args).await?;
    Ok(())
}
