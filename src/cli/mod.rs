//! CLI plumbing for the gpt-log binary

pub mod context;
pub mod run;
pub mod style;

pub use run::{RunArgs, run_changelog};

use anstream::{eprintln, println};
use async_trait::async_trait;
use gpt_log::progress::ProgressCallback;
use gpt_log::types::{CommitLogEntry, PrCommit};
use style::{Stylize, arrow, check, short_sha};
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "GPT_LOG";

/// Install the stderr log subscriber.
///
/// `GPT_LOG` takes precedence; otherwise `verbose` selects debug output.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "gpt_log=debug" } else { "gpt_log=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Report a failed run.
///
/// Inside GitHub Actions the message is also emitted as an error annotation.
pub fn report_failure(err: &anyhow::Error) {
    let message = format!("{err:#}");
    if std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true") {
        println!("::error::{}", escape_annotation(&message));
    }
    eprintln!("{} {message}", "error:".warn());
}

/// Workflow commands are line based; percent-encode line breaks.
fn escape_annotation(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Progress output for terminal and CI logs
pub struct CliProgress {
    show_entries: bool,
}

impl CliProgress {
    /// Progress that also echoes each generated entry
    pub const fn verbose() -> Self {
        Self { show_entries: true }
    }

    /// One line per commit
    pub const fn compact() -> Self {
        Self {
            show_entries: false,
        }
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_commit_started(&self, commit: &PrCommit, index: usize, total: usize) {
        let subject = commit.message.lines().next().unwrap_or_default();
        println!(
            "  {} {} {} {}",
            arrow(),
            format!("[{}/{total}]", index + 1).muted(),
            short_sha(&commit.sha).accent(),
            subject
        );
    }

    async fn on_entry_generated(&self, entry: &CommitLogEntry) {
        if self.show_entries {
            let text = if entry.changelog.is_empty() {
                "(empty)".muted()
            } else {
                entry.changelog.clone()
            };
            println!("    {} {} {text}", check(), short_sha(&entry.commit_hash).accent());
        }
    }

    async fn on_message(&self, message: &str) {
        println!("{}", message.muted());
    }
}
