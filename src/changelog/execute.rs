//! Changelog execution - effectful operations
//!
//! Reads the pull request, works out which commits still need an entry,
//! asks the generator for each of them and writes the re-encoded log back.
//! Any error aborts the run before the description is touched.

use crate::changelog::marker::decode_description;
use crate::changelog::plan::{
    build_prompt, clean_completion, find_new_commits, log_context, truncate_diff,
};
use crate::error::Result;
use crate::generation::{CompletionOptions, Generator};
use crate::platform::PlatformService;
use crate::progress::ProgressCallback;
use crate::types::{CommitLogEntry, PrCommit};
use futures::future::try_join_all;
use tracing::{debug, info};

/// Options for a changelog run
#[derive(Debug, Clone)]
pub struct ChangelogOptions {
    /// Completion request parameters
    pub completion: CompletionOptions,
    /// Commits summarized concurrently; 1 means strictly sequential
    pub jobs: usize,
    /// Cap on diff characters sent to the model
    pub max_diff_chars: Option<usize>,
    /// Compute the new description without writing it
    pub dry_run: bool,
}

impl Default for ChangelogOptions {
    fn default() -> Self {
        Self {
            completion: CompletionOptions::default(),
            jobs: 1,
            max_diff_chars: None,
            dry_run: false,
        }
    }
}

/// Result of a changelog run
#[derive(Debug, Clone)]
pub struct ChangelogResult {
    /// Pull request number
    pub pr_number: u64,
    /// Commits currently in the pull request
    pub commits_seen: usize,
    /// Entries added by this run, in commit order
    pub new_entries: Vec<CommitLogEntry>,
    /// Entries in the log after this run
    pub total_entries: usize,
    /// The description as written (or as it would be written on a dry run)
    pub body: String,
    /// Whether the description was written back
    pub updated: bool,
}

/// Bring the changelog in a pull request description up to date (EFFECTFUL)
///
/// Commits are summarized in batches of `options.jobs`. Every commit of a
/// batch sees the log as it stood before the batch, and results are appended
/// in commit order, so `jobs = 1` processes one commit after another with
/// each prompt seeing all earlier entries.
pub async fn execute_changelog(
    pr_number: u64,
    platform: &dyn PlatformService,
    generator: &dyn Generator,
    progress: &dyn ProgressCallback,
    options: &ChangelogOptions,
) -> Result<ChangelogResult> {
    let details = platform.get_pr_details(pr_number).await?;
    let decoded = decode_description(details.body.as_deref().unwrap_or_default())?;
    let mut log = decoded.log.clone();
    info!(
        pr_number,
        recorded = log.len(),
        had_marker = decoded.had_marker(),
        "read changelog"
    );

    let commits = platform.list_pr_commits(pr_number).await?;
    let new_commits = find_new_commits(&commits, &log);
    let total = new_commits.len();
    info!(pr_number, commits = commits.len(), new = total, "found new commits");
    progress
        .on_message(&format!(
            "{} commit(s) in PR #{pr_number}, {total} without a changelog entry",
            commits.len()
        ))
        .await;

    let mut new_entries = Vec::with_capacity(total);
    let jobs = options.jobs.max(1);
    for (batch_index, batch) in new_commits.chunks(jobs).enumerate() {
        let context = log_context(&log);
        let run = EntryRun {
            pr_title: &details.title,
            context: &context,
            total,
            platform,
            generator,
            progress,
            options,
        };
        let entries = try_join_all(
            batch
                .iter()
                .enumerate()
                .map(|(offset, commit)| run.generate_entry(commit, batch_index * jobs + offset)),
        )
        .await?;

        for entry in entries {
            progress.on_entry_generated(&entry).await;
            new_entries.push(entry.clone());
            log.push(entry);
        }
    }

    let body = decoded.reencode(&log)?;

    let updated = if options.dry_run {
        info!(pr_number, "dry run, not updating PR description");
        false
    } else {
        platform.update_pr_body(pr_number, &body).await?;
        info!(pr_number, entries = log.len(), "updated PR description");
        true
    };

    Ok(ChangelogResult {
        pr_number,
        commits_seen: commits.len(),
        new_entries,
        total_entries: log.len(),
        body,
        updated,
    })
}

/// Inputs shared by every commit of a batch
struct EntryRun<'a> {
    pr_title: &'a str,
    context: &'a str,
    total: usize,
    platform: &'a dyn PlatformService,
    generator: &'a dyn Generator,
    progress: &'a dyn ProgressCallback,
    options: &'a ChangelogOptions,
}

impl EntryRun<'_> {
    /// Fetch one commit's diff and generate its entry
    async fn generate_entry(&self, commit: &PrCommit, index: usize) -> Result<CommitLogEntry> {
        self.progress
            .on_commit_started(commit, index, self.total)
            .await;

        let diff = self.platform.get_commit_diff(&commit.sha).await?;
        let diff = truncate_diff(&diff, self.options.max_diff_chars);
        let prompt = build_prompt(self.pr_title, self.context, &commit.message, &diff);

        let completion = self
            .generator
            .complete(&prompt, &self.options.completion)
            .await?;
        let changelog = clean_completion(completion.as_deref());
        if changelog.is_empty() {
            debug!(sha = %commit.sha, "generator returned no text, recording empty entry");
        }

        Ok(CommitLogEntry::new(commit.sha.clone(), changelog))
    }
}
