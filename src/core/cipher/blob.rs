//! Blob framing.
//!
//! A blob is an envelope wrapped in start/end sentinel lines so it can be
//! pasted through chat tools that re-wrap, indent or re-flow text.

use crate::core::constants::{BLOB_END, BLOB_START};

/// Wrap an envelope between the sentinel lines.
pub fn format_blob(envelope: &str) -> String {
    format!("{}\n{}\n{}", BLOB_START, envelope, BLOB_END)
}

/// Extract the envelope from a possibly mangled blob.
///
/// All whitespace is removed before the sentinels are located. Returns
/// `None` if either sentinel is missing, the first end sentinel does not
/// follow the start sentinel, or nothing lies between them.
pub fn parse_blob(text: &str) -> Option<String> {
    let normalized: String = text.chars().filter(|c| !c.is_whitespace()).collect();

    let start = normalized.find(BLOB_START)?;
    let end = normalized.find(BLOB_END)?;
    let payload_start = start + BLOB_START.len();

    if end <= payload_start {
        return None;
    }

    Some(normalized[payload_start..end].to_string())
}
