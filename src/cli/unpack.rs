//! Unpack command.
//!
//! Decrypts a blob, optionally saves it to the store and restores its files.

use std::io::{self, IsTerminal, Read};
use std::path::Path;

use tracing::debug;

use crate::cli::project::Project;
use crate::cli::restore::{report, restore_document};
use crate::cli::{clipboard, output, prompt};
use crate::core::cipher::{self, parse_blob};
use crate::core::domain::StoreDocument;
use crate::core::manifest;
use crate::error::{Error, Result};

/// Options for unpacking.
pub struct Options<'a> {
    pub blob: Option<String>,
    pub file: Option<&'a Path>,
    pub clipboard: bool,
    pub secret: Option<String>,
    pub yes: bool,
    pub force: bool,
}

/// Unpack a blob into the repository.
pub fn execute(opts: Options<'_>) -> Result<()> {
    let text = read_blob(opts.blob, opts.file, opts.clipboard)?;
    let envelope = parse_blob(&text).ok_or(Error::InvalidBlob)?;
    debug!(envelope_len = envelope.len(), "blob parsed");

    let project = Project::locate(opts.yes)?;
    project.describe();

    let plaintext = decrypt(&project, &envelope, opts.secret)?;
    let document = StoreDocument::from_toml(&plaintext)?;
    output::success(&format!(
        "decrypted {}",
        output::plural(document.files().len(), "file")
    ));

    if prompt::confirm("Save this configuration to the store?", true, opts.yes)? {
        let path = project.storage.write(&project.storage_name(), &document)?;
        output::success(&format!("saved to {}", output::path(path.display())));
    }

    if prompt::confirm("Restore the files into this repository now?", true, opts.yes)? {
        let summary =
            restore_document(&project.root, &document, opts.force, prompt::overwrite)?;
        report(&summary);
    } else {
        output::hint(&format!("run {} later", output::cmd("envi restore")));
    }

    Ok(())
}

/// Blob text from the argument, a file, the clipboard, or stdin.
///
/// Without an explicit source an interactive session tries the clipboard
/// first and falls back to a pasted blob.
fn read_blob(blob: Option<String>, file: Option<&Path>, use_clipboard: bool) -> Result<String> {
    if let Some(blob) = blob {
        return Ok(blob);
    }
    if let Some(path) = file {
        return Ok(std::fs::read_to_string(path)?);
    }
    if use_clipboard {
        return clipboard::paste();
    }

    if io::stdin().is_terminal() {
        match clipboard::paste() {
            Ok(text) if parse_blob(&text).is_some() => {
                output::info("using the blob on the clipboard");
                return Ok(text);
            }
            Ok(_) => debug!("clipboard holds no blob"),
            Err(e) => debug!(error = %e, "clipboard read failed"),
        }
        output::info("paste the blob, then press Ctrl-D");
    }
    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;
    Ok(text)
}

/// Try the manifest secret first, then the given or prompted one.
fn decrypt(project: &Project, envelope: &str, secret: Option<String>) -> Result<String> {
    let mut failure = None;

    if let Some(derived) = manifest::manifest_secret(&project.root, &project.config)? {
        match cipher::decrypt(envelope, &derived.secret) {
            Ok(plaintext) => {
                output::success(&format!("decrypted with {}", derived.file));
                return Ok(plaintext);
            }
            Err(e) if e.is_authentication() => {
                output::warn(&format!("could not decrypt with {}", derived.file));
                failure = Some(e);
            }
            Err(e) => return Err(e),
        }
    }

    let secret = match secret {
        Some(secret) => Some(secret),
        None => prompt::secret()?,
    };

    match secret {
        Some(secret) => cipher::decrypt(envelope, &secret),
        None => Err(failure.unwrap_or(Error::NoSecret)),
    }
}
