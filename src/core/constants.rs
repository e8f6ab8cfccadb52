//! Constants used throughout envi.
//!
//! Centralizes magic strings and format parameters.

/// Envi home directory relative to HOME (~/.envi).
pub const ENVI_DIR: &str = ".envi";

/// Store directory inside the envi home (~/.envi/store).
pub const STORE_DIR: &str = "store";

/// Global configuration file inside the envi home.
pub const CONFIG_FILE: &str = "config.toml";

/// Extension of store documents.
pub const STORE_EXTENSION: &str = "toml";

/// Current store document format version.
pub const STORE_VERSION: u32 = 1;

/// Value written in place of a redacted variable.
pub const REDACTED_PLACEHOLDER: &str = "__envi_redacted__";

/// Variables redacted when no configuration exists.
pub const DEFAULT_REDACTED_VARIABLES: &[&str] = &["GITHUB_PAT"];

/// Blob start sentinel.
pub const BLOB_START: &str = "__envi_start__";

/// Blob end sentinel.
pub const BLOB_END: &str = "__envi_end__";

/// Markers that identify a repository root.
pub const VCS_MARKERS: &[&str] = &[".git", ".jj", ".hg", ".svn"];

/// Directories never searched for .env files.
pub const IGNORED_DIRS: &[&str] = &["node_modules", ".git", ".jj", ".hg", ".svn"];

/// Manifest files checked for a project name and encryption secret, in
/// priority order.
pub const DEFAULT_MANIFEST_FILES: &[&str] = &[
    "package.json",
    "Cargo.toml",
    "go.mod",
    "pyproject.toml",
    "composer.json",
    "pubspec.yaml",
    "settings.gradle.kts",
    "settings.gradle",
    "pom.xml",
];
