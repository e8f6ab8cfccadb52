//! Configuration file management.
//!
//! Handles reading and writing the global `~/.envi/config.toml`. The loaded
//! [`Config`] is passed explicitly to the operations that need it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Global envi configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Manifest files checked, in order, for a project name and the
    /// shared encryption secret.
    #[serde(default = "default_manifest_files")]
    pub manifest_files: Vec<String>,
    /// Variables whose values never leave the machine.
    #[serde(default = "default_redacted_variables")]
    pub redacted_variables: Vec<String>,
}

fn default_manifest_files() -> Vec<String> {
    constants::DEFAULT_MANIFEST_FILES
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_redacted_variables() -> Vec<String> {
    constants::DEFAULT_REDACTED_VARIABLES
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            manifest_files: default_manifest_files(),
            redacted_variables: default_redacted_variables(),
        }
    }
}

/// The envi home directory (`~/.envi`).
///
/// # Errors
///
/// Returns `ConfigError::NoHomeDir` if the home directory is unknown.
pub fn envi_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
    Ok(home.join(constants::ENVI_DIR))
}

impl Config {
    /// Path to the global configuration file
    pub fn config_path() -> Result<PathBuf> {
        Ok(envi_dir()?.join(constants::CONFIG_FILE))
    }

    /// Load the global configuration, falling back to defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` or `ConfigError::Parse` if the file
    /// exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;

        debug!(
            manifest_files = config.manifest_files.len(),
            redacted = config.redacted_variables.len(),
            "config loaded"
        );

        Ok(config)
    }

    /// Save the global configuration
    ///
    /// # Errors
    ///
    /// Returns error if serialization or file write fails.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        debug!(path = %path.display(), "saving config");

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, contents)?;

        Ok(())
    }

    /// Add a variable to the redaction list. Returns `false` if present.
    pub fn add_redacted(&mut self, name: &str) -> bool {
        add_unique(&mut self.redacted_variables, name)
    }

    /// Remove a variable from the redaction list. Returns `false` if absent.
    pub fn remove_redacted(&mut self, name: &str) -> bool {
        remove_item(&mut self.redacted_variables, name)
    }

    /// Append a manifest file to the search order. Returns `false` if present.
    pub fn add_manifest_file(&mut self, filename: &str) -> bool {
        add_unique(&mut self.manifest_files, filename)
    }

    /// Remove a manifest file from the search order. Returns `false` if absent.
    pub fn remove_manifest_file(&mut self, filename: &str) -> bool {
        remove_item(&mut self.manifest_files, filename)
    }
}

fn add_unique(list: &mut Vec<String>, item: &str) -> bool {
    if list.iter().any(|existing| existing == item) {
        return false;
    }
    list.push(item.to_string());
    true
}

fn remove_item(list: &mut Vec<String>, item: &str) -> bool {
    let before = list.len();
    list.retain(|existing| existing != item);
    list.len() != before
}
