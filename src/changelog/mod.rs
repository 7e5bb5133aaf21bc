//! Changelog engine
//!
//! Three-part layout:
//! 1. Marker - encode/decode the log embedded in the PR description (pure)
//! 2. Plan - pick new commits, build prompts, clean completions (pure)
//! 3. Execute - talk to the platform and the generator (effectful)

mod execute;
pub mod marker;
mod plan;

pub use execute::{ChangelogOptions, ChangelogResult, execute_changelog};
pub use marker::{DecodedDescription, decode_description, encode_description, encode_marker};
pub use plan::{
    REPLY_PREFIX, build_prompt, clean_completion, find_new_commits, log_context, truncate_diff,
};
