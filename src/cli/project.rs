//! Project context shared by the repository commands.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::{output, prompt};
use crate::core::config::Config;
use crate::core::domain::{Env, FileEntry};
use crate::core::store::Storage;
use crate::core::{manifest, redact, repo};
use crate::error::{RepoError, Result};

/// The repository a command operates on.
pub struct Project {
    pub root: PathBuf,
    pub config: Config,
    /// Package name from a manifest, if any.
    pub package: Option<String>,
    pub storage: Storage,
}

impl Project {
    /// Locate the project from the current directory.
    ///
    /// Outside a repository, asks before falling back to the current
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns `RepoError::Cancelled` if the user declines.
    pub fn locate(assume_yes: bool) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let root = match repo::find_root(&cwd) {
            Some(root) => root,
            None => {
                output::warn("no version control root found");
                let proceed = prompt::confirm(
                    &format!("Run in the current directory ({})?", cwd.display()),
                    false,
                    assume_yes,
                )?;
                if !proceed {
                    return Err(RepoError::Cancelled.into());
                }
                cwd
            }
        };

        Self::at(root, Config::load()?, Storage::open()?)
    }

    /// Project at a known root.
    pub fn at(root: PathBuf, config: Config, storage: Storage) -> Result<Self> {
        let package = manifest::package_name(&root, &config);
        debug!(root = %root.display(), package = ?package, "project located");

        Ok(Self {
            root,
            config,
            package,
            storage,
        })
    }

    /// Name of this project's store document.
    pub fn storage_name(&self) -> String {
        manifest::storage_name(&self.root, self.package.as_deref())
    }

    /// Path of this project's store document.
    pub fn storage_path(&self) -> PathBuf {
        self.storage.path_for(&self.storage_name())
    }

    /// Print the root and the name the store uses.
    pub fn describe(&self) {
        output::kv("root", output::path(self.root.display()));
        match &self.package {
            Some(name) => output::kv("package", name),
            None => output::kv("folder", self.storage_name()),
        }
    }

    /// Discover, parse and redact every .env file.
    ///
    /// Redacted variables are reported per file.
    pub fn read_env_files(&self) -> Result<Vec<FileEntry>> {
        let paths = repo::find_env_files(&self.root);
        if paths.is_empty() {
            return Err(RepoError::NoEnvFiles(self.root.clone()).into());
        }

        let mut files = Vec::with_capacity(paths.len());
        for relative in paths {
            let env = Env::load(self.root.join(&relative))?;
            let redaction = redact::apply(&env, &self.config.redacted_variables);

            output::list_item(&relative);
            for key in &redaction.redacted_keys {
                output::dimmed(&format!("    redacted {}", key));
            }

            files.push(FileEntry::new(relative, redaction.redacted));
        }

        Ok(files)
    }
}

/// Join a `/`-separated relative path onto a root.
pub fn resolve(root: &Path, relative: &str) -> PathBuf {
    relative
        .split('/')
        .filter(|part| !part.is_empty() && *part != "." && *part != "..")
        .fold(root.to_path_buf(), |path, part| path.join(part))
}
