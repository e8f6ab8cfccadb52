//! Capture command.
//!
//! Reads every .env file in the repository into the local store.

use tracing::info;

use crate::cli::project::Project;
use crate::cli::{output, prompt};
use crate::core::domain::{Metadata, StoreDocument};
use crate::error::{Error, RepoError, Result};

/// Capture the repository's .env files into the store.
pub fn execute(yes: bool) -> Result<()> {
    let project = Project::locate(yes)?;
    project.describe();

    if project.package.is_none() {
        output::warn("no package name found in any manifest, using the folder name");
        output::hint("similarly named folders will share a store document");
        if !prompt::confirm("Continue with the folder name?", true, yes)? {
            return Err(RepoError::Cancelled.into());
        }
    }

    let files = match project.read_env_files() {
        Ok(files) => files,
        Err(Error::Repo(RepoError::NoEnvFiles(_))) => {
            output::warn("no .env files found");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    info!(files = files.len(), "capturing");
    let count = files.len();
    let document = StoreDocument::new(Metadata::now(&project.root), files);

    let name = project.storage_name();
    let path = output::path(project.storage_path().display());

    if project.storage.save(&name, &document)? {
        output::success(&format!("captured {} to {}", output::plural(count, "file"), path));
    } else {
        output::success(&format!("no changes, {} is up to date", path));
    }

    Ok(())
}
