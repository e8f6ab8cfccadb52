//! Pack command.
//!
//! Encrypts the repository's .env files into a blob that can be pasted
//! into chat.

use std::io::{self, IsTerminal};
use std::path::Path;

use tracing::{debug, info};

use crate::cli::project::Project;
use crate::cli::{clipboard, output, prompt};
use crate::core::cipher::{format_blob, Cipher, GcmEnvelope};
use crate::core::domain::{Metadata, StoreDocument};
use crate::core::manifest;
use crate::error::{Error, Result};

/// Pack .env files into an encrypted blob.
///
/// The blob goes to `out` when given, otherwise to the clipboard when asked
/// for or when stdout is a terminal. Stdout is the fallback.
pub fn execute(
    yes: bool,
    secret: Option<String>,
    out: Option<&Path>,
    use_clipboard: bool,
) -> Result<()> {
    let project = Project::locate(yes)?;
    project.describe();

    let files = project.read_env_files()?;
    let count = files.len();
    let document = StoreDocument::new(Metadata::now(&project.root), files);
    let plaintext = document.to_toml()?;

    let (secret, from_manifest) = match secret {
        Some(secret) => (secret, None),
        None => match manifest::manifest_secret(&project.root, &project.config)? {
            Some(derived) => (derived.secret, Some(derived.file)),
            None => {
                output::warn("no manifest file found, a secret is needed");
                match prompt::new_secret()? {
                    Some(secret) => (secret, None),
                    None => return Err(Error::NoSecret),
                }
            }
        },
    };

    let envelope = GcmEnvelope;
    info!(
        files = count,
        bytes = plaintext.len(),
        cipher = envelope.name(),
        "packing"
    );
    let blob = format_blob(&envelope.encrypt(&plaintext, &secret)?);
    let packed = output::plural(count, "file");

    if let Some(path) = out {
        std::fs::write(path, format!("{}\n", blob))?;
        output::success(&format!(
            "packed {} into {}",
            packed,
            output::path(path.display())
        ));
    } else if (use_clipboard || io::stdout().is_terminal()) && copy(&blob, use_clipboard) {
        output::success(&format!("packed {} to the clipboard", packed));
    } else {
        println!("{}", blob);
        output::success(&format!("packed {}", packed));
    }

    match from_manifest {
        Some(file) => {
            output::hint(&format!("encrypted with {}", file));
            output::dimmed("  anyone with an identical manifest can unpack it");
        }
        None => output::hint("share the secret separately from the blob"),
    }
    output::dimmed(&format!("  unpack with {}", output::cmd("envi unpack")));

    Ok(())
}

/// Copy the blob, reporting whether it landed on the clipboard.
///
/// Failures are only worth a warning when the clipboard was asked for.
fn copy(blob: &str, requested: bool) -> bool {
    match clipboard::copy(blob) {
        Ok(()) => true,
        Err(e) if requested => {
            output::warn(&format!("{}, printing the blob instead", e));
            false
        }
        Err(e) => {
            debug!(error = %e, "clipboard copy failed");
            false
        }
    }
}
