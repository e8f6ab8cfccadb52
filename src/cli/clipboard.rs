//! System clipboard access for blobs.

use crate::error::{Error, Result};

fn open() -> Result<arboard::Clipboard> {
    arboard::Clipboard::new().map_err(|e| Error::Clipboard(e.to_string()))
}

/// Replace the clipboard contents with `text`.
///
/// # Errors
///
/// Returns `Error::Clipboard` when no clipboard is reachable, for example
/// over SSH or in a headless session.
pub fn copy(text: &str) -> Result<()> {
    open()?
        .set_text(text)
        .map_err(|e| Error::Clipboard(e.to_string()))
}

/// Text currently on the clipboard.
///
/// # Errors
///
/// Returns `Error::Clipboard` when no clipboard is reachable or it holds
/// no text.
pub fn paste() -> Result<String> {
    open()?
        .get_text()
        .map_err(|e| Error::Clipboard(e.to_string()))
}
