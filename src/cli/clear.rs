//! Clear command.

use crate::cli::project::Project;
use crate::cli::{output, prompt};
use crate::error::Result;

/// Delete this repository's stored configuration.
pub fn execute(yes: bool, force: bool) -> Result<()> {
    let project = Project::locate(yes)?;
    project.describe();

    let name = project.storage_name();
    let path = output::path(project.storage_path().display());

    if !project.storage.exists(&name) {
        output::warn("no stored configuration for this repository");
        output::dimmed(&format!("  looked at {}", path));
        return Ok(());
    }

    if !prompt::confirm(&format!("Delete {}?", path), false, force || yes)? {
        output::info("cancelled");
        output::hint(&format!("run {} to delete without asking", output::cmd("envi clear --force")));
        return Ok(());
    }

    project.storage.remove(&name)?;
    output::success(&format!("deleted {}", path));
    Ok(())
}
