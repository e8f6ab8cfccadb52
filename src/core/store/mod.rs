//! Local document store.
//!
//! Each project's captured files live in one TOML document under
//! `~/.envi/store`, named after the project's package name or folder.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::core::config::envi_dir;
use crate::core::constants::{STORE_DIR, STORE_EXTENSION};
use crate::core::domain::StoreDocument;
use crate::error::{Result, StoreError};

/// Name used when a project name sanitizes to nothing.
const FALLBACK_NAME: &str = "project";

/// Filesystem store rooted at a directory.
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Store rooted at an explicit directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store in the default location (`~/.envi/store`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoHomeDir` if the home directory is unknown.
    pub fn open() -> Result<Self> {
        Ok(Self::new(envi_dir()?.join(STORE_DIR)))
    }

    /// Path of the document for a project name.
    ///
    /// Scoped names (`@org/app`) map to a subdirectory. Empty, `.` and `..`
    /// segments are dropped so a name can never escape the store root.
    pub fn path_for(&self, name: &str) -> PathBuf {
        let segments: Vec<&str> = name
            .split(['/', '\\'])
            .map(str::trim)
            .filter(|s| !s.is_empty() && *s != "." && *s != "..")
            .collect();

        let mut path = self.root.clone();
        match segments.split_last() {
            Some((file, dirs)) => {
                path.extend(dirs);
                path.push(format!("{}.{}", file, STORE_EXTENSION));
            }
            None => path.push(format!("{}.{}", FALLBACK_NAME, STORE_EXTENSION)),
        }
        path
    }

    /// Whether a document exists for the project.
    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).is_file()
    }

    /// Load and validate the document for a project.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if nothing has been captured, or a
    /// validation error if the document is invalid.
    pub fn load(&self, name: &str) -> Result<StoreDocument> {
        let path = self.path_for(name);
        debug!(path = %path.display(), "loading store document");

        if !path.is_file() {
            return Err(StoreError::NotFound(path).into());
        }

        let text = std::fs::read_to_string(&path)?;
        StoreDocument::from_toml(&text)
    }

    /// Save a document unless the stored files are already identical.
    ///
    /// Returns `true` if the document was written. An existing document
    /// that fails to load is overwritten.
    pub fn save(&self, name: &str, document: &StoreDocument) -> Result<bool> {
        match self.load(name) {
            Ok(existing) if existing.same_files(document) => {
                debug!(name, "store unchanged");
                return Ok(false);
            }
            Ok(_) | Err(crate::error::Error::Store(StoreError::NotFound(_))) => {}
            Err(e) => warn!(name, error = %e, "replacing unreadable store document"),
        }

        self.write(name, document)?;
        Ok(true)
    }

    /// Write a document unconditionally, returning its path.
    pub fn write(&self, name: &str, document: &StoreDocument) -> Result<PathBuf> {
        let path = self.path_for(name);
        let contents = document.to_toml()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        write_private(&path, contents.as_bytes())?;

        debug!(
            path = %path.display(),
            files = document.files().len(),
            "store document written"
        );
        Ok(path)
    }

    /// Delete the document for a project. Returns `false` if none existed.
    pub fn remove(&self, name: &str) -> Result<bool> {
        let path = self.path_for(name);
        if !path.is_file() {
            return Ok(false);
        }
        std::fs::remove_file(&path)?;
        debug!(path = %path.display(), "store document removed");
        Ok(true)
    }
}

/// Write a file readable only by the owner on Unix.
fn write_private(path: &Path, contents: &[u8]) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .mode(0o600)
            .open(path)?;
        file.write_all(contents)?;
        file.flush()?;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    }

    #[cfg(not(unix))]
    {
        let mut file = std::fs::File::create(path)?;
        file.write_all(contents)?;
    }

    Ok(())
}
