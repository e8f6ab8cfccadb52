//! Config commands.
//!
//! Edit the redaction list and the manifest search order in
//! `~/.envi/config.toml`.

use crate::cli::output;
use crate::cli::{ManifestAction, RedactAction};
use crate::core::config::Config;
use crate::core::constants::REDACTED_PLACEHOLDER;
use crate::error::Result;

/// Run a `config redact` subcommand.
pub fn redact(action: RedactAction) -> Result<()> {
    let mut config = Config::load()?;

    match action {
        RedactAction::Add { name } => {
            if config.add_redacted(&name) {
                config.save()?;
                output::success(&format!("{} will be redacted", output::key(&name)));
                output::dimmed(&format!(
                    "  its value is replaced with {} on capture and pack",
                    REDACTED_PLACEHOLDER
                ));
            } else {
                output::warn(&format!("{} is already redacted", output::key(&name)));
            }
        }
        RedactAction::Remove { name } => {
            if config.remove_redacted(&name) {
                config.save()?;
                output::success(&format!("{} will no longer be redacted", output::key(&name)));
            } else {
                output::warn(&format!("{} is not in the redaction list", output::key(&name)));
            }
        }
        RedactAction::List => {
            if config.redacted_variables.is_empty() {
                output::dimmed("no variables are redacted");
                output::hint(&format!("run {}", output::cmd("envi config redact add <NAME>")));
            }
            for name in &config.redacted_variables {
                println!("{}", name);
            }
        }
    }

    Ok(())
}

/// Run a `config manifest-files` subcommand.
pub fn manifest_files(action: ManifestAction) -> Result<()> {
    let mut config = Config::load()?;

    match action {
        ManifestAction::Add { filename } => {
            if config.add_manifest_file(&filename) {
                config.save()?;
                output::success(&format!("added {}", output::path(&filename)));
            } else {
                output::warn(&format!("{} is already listed", output::path(&filename)));
            }
        }
        ManifestAction::Remove { filename } => {
            if config.remove_manifest_file(&filename) {
                config.save()?;
                output::success(&format!("removed {}", output::path(&filename)));
            } else {
                output::warn(&format!("{} is not listed", output::path(&filename)));
            }
        }
        ManifestAction::List => {
            if config.manifest_files.is_empty() {
                output::dimmed("no manifest files are checked");
            }
            for filename in &config.manifest_files {
                println!("{}", filename);
            }
        }
    }

    Ok(())
}
