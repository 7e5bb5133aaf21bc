//! Encoding of the changelog inside a pull request description
//!
//! The log is stored as a single HTML comment so it stays invisible in the
//! rendered description:
//!
//! ```text
//! <!-- GPT-LOG:[{"commitHash":"a1","changelog":"Fixes bug"}] -->
//! ```
//!
//! Only the first marker in a description is honoured. Everything around it is
//! human-authored and must survive a run byte for byte.

use crate::error::{Error, Result};
use crate::types::{CommitLog, CommitLogEntry};
use regex::Regex;
use std::sync::LazyLock;

/// Opening delimiter of the marker
pub const MARKER_PREFIX: &str = "<!-- GPT-LOG:";

/// Closing delimiter of the marker
pub const MARKER_SUFFIX: &str = " -->";

/// Greedy within a single line; `.` does not cross newlines.
static MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!-- GPT-LOG:(.*) -->").unwrap());

/// A description split into its recorded log and the remaining human text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedDescription {
    /// Entries recorded by previous runs (empty when no marker was found)
    pub log: CommitLog,
    /// Description with the marker substring removed
    pub description: String,
    /// The marker substring exactly as found in the description
    pub marker: Option<String>,
}

impl DecodedDescription {
    /// Whether a marker was present
    pub fn had_marker(&self) -> bool {
        self.marker.is_some()
    }

    /// Append `log` to the remaining description.
    ///
    /// When `log` is the log that was decoded, the original marker text is
    /// reused so the payload bytes stay exactly as another writer left them.
    pub fn reencode(&self, log: &[CommitLogEntry]) -> Result<String> {
        match &self.marker {
            Some(marker) if log == self.log.as_slice() => {
                Ok(format!("{}{marker}", self.description))
            }
            _ => encode_description(&self.description, log),
        }
    }
}

/// Split a description into the recorded log and the surrounding text.
///
/// A description without a marker yields an empty log and is returned
/// unchanged. A marker whose payload is not a JSON array of entries is an
/// error; the caller must not fall back to an empty log.
pub fn decode_description(body: &str) -> Result<DecodedDescription> {
    let Some(captures) = MARKER_REGEX.captures(body) else {
        return Ok(DecodedDescription {
            log: Vec::new(),
            description: body.to_string(),
            marker: None,
        });
    };

    // Group 0 and 1 always exist on a successful match.
    let (Some(whole), Some(payload)) = (captures.get(0), captures.get(1)) else {
        return Err(Error::Internal("marker regex matched without groups".to_string()));
    };

    let log: CommitLog = serde_json::from_str(payload.as_str())
        .map_err(|e| Error::MalformedLog(format!("{e} (payload: {})", payload.as_str())))?;

    let mut description = String::with_capacity(body.len() - whole.len());
    description.push_str(&body[..whole.start()]);
    description.push_str(&body[whole.end()..]);

    Ok(DecodedDescription {
        log,
        description,
        marker: Some(whole.as_str().to_string()),
    })
}

/// Serialize a log into its marker form.
///
/// The payload is compact JSON. A `-->` inside a string is written as
/// `--\u003e` so generated text cannot close the HTML comment; every other
/// character is left as the serializer emits it.
pub fn encode_marker(log: &[CommitLogEntry]) -> Result<String> {
    let json = serde_json::to_string(log)
        .map_err(|e| Error::Internal(format!("failed to serialize changelog: {e}")))?;
    // `-->` can only occur inside string literals of the JSON text
    let json = json.replace("-->", "--\\u003e");
    Ok(format!("{MARKER_PREFIX}{json}{MARKER_SUFFIX}"))
}

/// Append the serialized marker to a description that no longer contains one.
pub fn encode_description(description: &str, log: &[CommitLogEntry]) -> Result<String> {
    let marker = encode_marker(log)?;
    let mut body = String::with_capacity(description.len() + marker.len());
    body.push_str(description);
    body.push_str(&marker);
    Ok(body)
}
