//! Run settings
//!
//! Settings come from three layers, highest priority first: command line (and
//! the environment variables clap maps onto it), an optional TOML file, and
//! built-in defaults.

use crate::error::{Error, Result};
use crate::generation::{CompletionOptions, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Settings file looked up when no explicit path is given
pub const DEFAULT_SETTINGS_PATH: &str = ".github/gpt-log.toml";

/// Default HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Optional settings, as found in a settings file or on the command line
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Completion model
    pub model: Option<String>,
    /// Completion length in tokens
    pub max_tokens: Option<u32>,
    /// Commits summarized concurrently
    pub jobs: Option<usize>,
    /// Cap on diff characters sent to the model
    pub max_diff_chars: Option<usize>,
    /// HTTP request timeout
    pub timeout_secs: Option<u64>,
}

impl Settings {
    /// Layer `overrides` on top of `self`
    #[must_use]
    pub fn merge(self, overrides: Self) -> Self {
        Self {
            model: overrides.model.or(self.model),
            max_tokens: overrides.max_tokens.or(self.max_tokens),
            jobs: overrides.jobs.or(self.jobs),
            max_diff_chars: overrides.max_diff_chars.or(self.max_diff_chars),
            timeout_secs: overrides.timeout_secs.or(self.timeout_secs),
        }
    }

    /// Fill in defaults and validate
    pub fn resolve(self) -> Result<ResolvedSettings> {
        let jobs = self.jobs.unwrap_or(1);
        if jobs == 0 {
            return Err(Error::Config("jobs must be at least 1".to_string()));
        }
        let max_tokens = self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS);
        if max_tokens == 0 {
            return Err(Error::Config("max_tokens must be at least 1".to_string()));
        }
        let model = self
            .model
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(ResolvedSettings {
            completion: CompletionOptions::deterministic(model, max_tokens),
            jobs,
            max_diff_chars: self.max_diff_chars,
            timeout: Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        })
    }
}

/// Settings with defaults applied
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSettings {
    /// Completion request parameters
    pub completion: CompletionOptions,
    /// Commits summarized concurrently (at least 1)
    pub jobs: usize,
    /// Cap on diff characters sent to the model
    pub max_diff_chars: Option<usize>,
    /// HTTP request timeout
    pub timeout: Duration,
}

/// Load settings from disk.
///
/// An explicit `path` must exist. Without one, [`DEFAULT_SETTINGS_PATH`] under
/// `root` is read if present and empty settings are returned otherwise.
pub fn load_settings(root: &Path, path: Option<&Path>) -> Result<Settings> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let default = root.join(DEFAULT_SETTINGS_PATH);
            if !default.exists() {
                debug!("no settings file, using defaults");
                return Ok(Settings::default());
            }
            default
        }
    };

    let content = fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

    let settings: Settings = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))?;

    debug!(path = %path.display(), "loaded settings");
    Ok(settings)
}
