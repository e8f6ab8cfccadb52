//! Restore command.
//!
//! Writes stored .env files back into the repository, keeping local values
//! of redacted variables.

use std::path::Path;

use tracing::debug;

use crate::cli::project::{resolve, Project};
use crate::cli::prompt::{self, Overwrite};
use crate::cli::output;
use crate::core::domain::{Env, StoreDocument};
use crate::core::redact;
use crate::error::Result;

/// Outcome of restoring a document, by relative path.
#[derive(Debug, Default)]
pub struct Summary {
    pub restored: Vec<String>,
    pub unchanged: Vec<String>,
    pub skipped: Vec<String>,
}

/// Restore the repository's .env files from the store.
pub fn execute(yes: bool, force: bool) -> Result<()> {
    let project = Project::locate(yes)?;
    project.describe();

    let document = project.storage.load(&project.storage_name())?;
    output::kv("store", output::path(project.storage_path().display()));

    let summary = restore_document(&project.root, &document, force, prompt::overwrite)?;
    report(&summary);
    Ok(())
}

/// Write each file of `document` under `root`.
///
/// Redaction placeholders are filled from the file already on disk. Files
/// whose merged content equals the existing file are left alone; other
/// existing files are overwritten only with `force` or when `ask` agrees.
///
/// # Errors
///
/// Returns `Error::EnvFile` if an existing file cannot be read. Files
/// restored before it stay written; it and later files are untouched.
pub fn restore_document<F>(
    root: &Path,
    document: &StoreDocument,
    force: bool,
    mut ask: F,
) -> Result<Summary>
where
    F: FnMut(&str) -> Result<Overwrite>,
{
    let mut summary = Summary::default();
    let mut overwrite_all = force;

    if document.files().is_empty() {
        output::warn("no files in stored configuration");
        return Ok(summary);
    }

    for entry in document.files() {
        let target = resolve(root, &entry.path);

        let merged = if target.is_file() {
            // an unreadable file may hold the only copy of a redacted value
            let existing = Env::load(&target)?;
            let merged = redact::merge(&entry.env, &existing);

            if merged == existing {
                debug!(path = %entry.path, "unchanged");
                summary.unchanged.push(entry.path.clone());
                continue;
            }

            if !overwrite_all {
                match ask(&entry.path)? {
                    Overwrite::No => {
                        summary.skipped.push(entry.path.clone());
                        continue;
                    }
                    Overwrite::Yes => {}
                    Overwrite::All => overwrite_all = true,
                }
            }
            merged
        } else {
            entry.env.clone()
        };

        for key in redact::placeholders(&merged) {
            output::warn(&format!(
                "{} in {} has no local value, left redacted",
                output::key(key),
                entry.path
            ));
        }

        merged.save(&target)?;
        summary.restored.push(entry.path.clone());
    }

    Ok(summary)
}

/// Print a restore summary.
pub fn report(summary: &Summary) {
    if !summary.restored.is_empty() {
        output::success(&format!(
            "restored {}",
            output::plural(summary.restored.len(), "file")
        ));
        for path in &summary.restored {
            output::list_item(path);
        }
    }

    if !summary.unchanged.is_empty() {
        output::dimmed(&format!(
            "{} unchanged",
            output::plural(summary.unchanged.len(), "file")
        ));
        for path in &summary.unchanged {
            output::list_item(path);
        }
    }

    if !summary.skipped.is_empty() {
        output::warn(&format!(
            "skipped {} with local changes",
            output::plural(summary.skipped.len(), "file")
        ));
        for path in &summary.skipped {
            output::list_item(path);
        }
        output::hint(&format!("run {} to overwrite", output::cmd("envi restore --force")));
    }
}
