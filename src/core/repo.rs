//! Repository discovery.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::core::constants::{IGNORED_DIRS, VCS_MARKERS};

/// Walk up from `start` to the nearest directory holding a VCS marker.
pub fn find_root(start: &Path) -> Option<PathBuf> {
    let root = start
        .ancestors()
        .find(|dir| VCS_MARKERS.iter().any(|marker| dir.join(marker).exists()))
        .map(Path::to_path_buf);

    debug!(start = %start.display(), root = ?root, "repository root lookup");
    root
}

/// Whether a filename is `.env` or `.env.<anything>`.
pub fn is_env_file(name: &str) -> bool {
    name == ".env" || (name.starts_with(".env.") && name.len() > ".env.".len())
}

fn is_ignored(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| IGNORED_DIRS.contains(&name))
}

/// Every .env file under `root`, as sorted `/`-separated relative paths.
///
/// `node_modules` and VCS directories are not descended into. Unreadable
/// directories are logged and skipped.
pub fn find_env_files(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !is_ignored(entry))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "skipping unreadable path");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.file_name().to_str().is_some_and(is_env_file))
        .filter_map(|entry| relative_path(root, entry.path()))
        .collect();

    files.sort();
    debug!(root = %root.display(), count = files.len(), "env files found");
    files
}

fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}
