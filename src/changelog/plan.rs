//! Changelog planning - pure functions
//!
//! Everything here is free of I/O: selecting the commits that still need an
//! entry, assembling the prompt and cleaning up the completion. The effectful
//! side lives in `execute`.

use crate::types::{CommitLogEntry, PrCommit};
use std::borrow::Cow;
use std::collections::HashSet;

/// Prefix the model is asked to answer after; removed from completions
pub const REPLY_PREFIX: &str = "Reply:";

/// Appended to a diff that was cut to fit the configured limit
pub const TRUNCATION_NOTE: &str = "\n[diff truncated]";

/// Commits that have no entry in the log yet, in pull request order.
///
/// A SHA listed twice in `commits` is only returned once.
pub fn find_new_commits<'a>(commits: &'a [PrCommit], log: &[CommitLogEntry]) -> Vec<&'a PrCommit> {
    let mut seen: HashSet<&str> = log.iter().map(|e| e.commit_hash.as_str()).collect();
    commits
        .iter()
        .filter(|c| seen.insert(c.sha.as_str()))
        .collect()
}

/// Text of all recorded entries in log order, one per line.
pub fn log_context(log: &[CommitLogEntry]) -> String {
    log.iter()
        .map(|e| e.changelog.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the completion prompt for one commit.
pub fn build_prompt(pr_title: &str, changelog: &str, commit_message: &str, diff: &str) -> String {
    format!(
        "You maintain the changelog of a pull request, one short entry per commit.\n\
         Describe what the commit below changes in one or two sentences.\n\
         Wrap code identifiers such as function, type and file names in backticks.\n\
         Refer to the pull request title where it helps explain the change, \
         and do not repeat earlier entries.\n\
         \n\
         PR title: {pr_title}\n\
         Changelog so far:\n\
         {changelog}\n\
         Commit message: {commit_message}\n\
         Commit diff:\n\
         {diff}\n\
         \n\
         {REPLY_PREFIX}"
    )
}

/// Turn a raw completion into entry text.
///
/// A missing completion becomes an empty entry.
pub fn clean_completion(text: Option<&str>) -> String {
    let text = text.unwrap_or_default().trim_start();
    text.strip_prefix(REPLY_PREFIX)
        .unwrap_or(text)
        .trim()
        .to_string()
}

/// Cap a diff at `max_chars` characters, cutting on a char boundary.
pub fn truncate_diff(diff: &str, max_chars: Option<usize>) -> Cow<'_, str> {
    let Some(max) = max_chars else {
        return Cow::Borrowed(diff);
    };
    match diff.char_indices().nth(max) {
        Some((cut, _)) => Cow::Owned(format!("{}{TRUNCATION_NOTE}", &diff[..cut])),
        None => Cow::Borrowed(diff),
    }
}
