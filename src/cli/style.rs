//! Terminal styling helpers
//!
//! Output goes through `anstream`, which strips the escape codes when stdout
//! is not a terminal, so styles can be applied unconditionally.

use owo_colors::OwoColorize;
use std::fmt::Display;

/// Check mark used in summaries
pub const CHECK: &str = "✓";

/// Semantic styles for CLI output
pub trait Stylize: Display + Sized {
    /// Headings and key values
    fn emphasis(&self) -> String {
        self.bold().to_string()
    }

    /// Identifiers such as SHAs and PR numbers
    fn accent(&self) -> String {
        self.cyan().to_string()
    }

    /// Secondary information
    fn muted(&self) -> String {
        self.dimmed().to_string()
    }

    /// Success messages
    fn success(&self) -> String {
        self.green().to_string()
    }

    /// Warnings
    fn warn(&self) -> String {
        self.yellow().to_string()
    }
}

impl<T: Display> Stylize for T {}

/// Green check mark
pub fn check() -> String {
    CHECK.success()
}

/// Arrow prefix for list items
pub fn arrow() -> String {
    "→".muted()
}

/// Abbreviate a commit SHA for display
pub fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_sha() {
        assert_eq!(short_sha("0123456789abcdef"), "0123456");
        assert_eq!(short_sha("abc"), "abc");
    }
}
