//! Run command - update the changelog of one pull request

use crate::cli::CliProgress;
use crate::cli::context::CommandContext;
use crate::cli::style::{CHECK, Stylize, arrow, short_sha};
use anstream::println;
use gpt_log::changelog::{ChangelogOptions, ChangelogResult, execute_changelog};
use gpt_log::config::Settings;
use gpt_log::error::Result;
use std::path::PathBuf;

/// Inputs for a run, collected from the command line and environment
#[derive(Debug, Clone, Default)]
pub struct RunArgs {
    /// Explicit PR number
    pub pr: Option<u64>,
    /// Explicit `owner/repo`
    pub repo: Option<String>,
    /// Webhook payload file
    pub event_path: Option<PathBuf>,
    /// GitHub REST API root
    pub api_url: Option<String>,
    /// GitHub token from the environment
    pub github_token: Option<String>,
    /// Generation service API key from the environment
    pub openai_api_key: Option<String>,
    /// Generation service API root
    pub openai_base_url: Option<String>,
    /// Explicit settings file
    pub config: Option<PathBuf>,
    /// Directory the default settings file is looked up in
    pub workdir: PathBuf,
    /// Settings given on the command line
    pub overrides: Settings,
    /// Compute the new description without writing it
    pub dry_run: bool,
    /// Echo generated entries
    pub verbose: bool,
}

/// Run the changelog update
pub async fn run_changelog(args: RunArgs) -> Result<()> {
    let ctx = CommandContext::new(&args).await?;

    println!(
        "{} {}",
        "Updating changelog for".emphasis(),
        format!("{}#{}", ctx.platform.config().slug(), ctx.pr_number).accent()
    );

    let options = ChangelogOptions {
        completion: ctx.settings.completion.clone(),
        jobs: ctx.settings.jobs,
        max_diff_chars: ctx.settings.max_diff_chars,
        dry_run: args.dry_run,
    };

    let progress = if args.verbose || args.dry_run {
        CliProgress::verbose()
    } else {
        CliProgress::compact()
    };

    let result = execute_changelog(
        ctx.pr_number,
        ctx.platform.as_ref(),
        ctx.generator.as_ref(),
        &progress,
        &options,
    )
    .await?;

    print_summary(&result, args.dry_run);
    Ok(())
}

fn print_summary(result: &ChangelogResult, dry_run: bool) {
    println!();
    if dry_run {
        println!("{}", "Dry run - description not updated. New description:".muted());
        println!("{}", result.body);
        return;
    }

    if result.new_entries.is_empty() {
        println!(
            "{} {}",
            format!("{CHECK} Changelog up to date:").success(),
            format!("{} entries", result.total_entries).accent()
        );
        return;
    }

    println!(
        "{} {} added, {} total",
        format!("{CHECK} Changelog updated:").success(),
        result.new_entries.len().accent(),
        result.total_entries.accent()
    );
    for entry in &result.new_entries {
        println!(
            "  {} {} {}",
            arrow(),
            short_sha(&entry.commit_hash).accent(),
            entry.changelog
        );
    }
}
