//! Store document.
//!
//! The versioned container persisted in the local store and carried inside
//! encrypted blobs: metadata plus one parsed env per captured file.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use super::Env;
use crate::core::constants::STORE_VERSION;
use crate::error::{Result, StoreError};

/// Where and when a document was produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Absolute path of the repository the files were read from.
    #[serde(default)]
    pub updated_from: String,
    /// RFC 3339 timestamp of the capture.
    #[serde(default)]
    pub updated_at: String,
}

impl Metadata {
    /// Metadata stamped with the current time.
    pub fn now(updated_from: &Path) -> Self {
        Self {
            updated_from: updated_from.display().to_string(),
            updated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// One captured .env file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Path relative to the repository root, `/`-separated.
    pub path: String,
    pub env: Env,
}

impl FileEntry {
    pub fn new(path: impl Into<String>, env: Env) -> Self {
        Self {
            path: path.into(),
            env,
        }
    }
}

/// A versioned set of captured .env files.
///
/// Files are always kept sorted by path so two captures of the same file
/// set serialize identically regardless of discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreDocument {
    #[serde(rename = "__envi_version")]
    version: u32,
    pub metadata: Metadata,
    files: Vec<FileEntry>,
}

/// Unvalidated shape used to report precise structural errors.
#[derive(Deserialize)]
struct RawDocument {
    #[serde(rename = "__envi_version")]
    version: Option<i64>,
    #[serde(default)]
    metadata: Metadata,
    files: Option<Vec<FileEntry>>,
}

impl StoreDocument {
    /// Build a document from files in any order.
    pub fn new(metadata: Metadata, mut files: Vec<FileEntry>) -> Self {
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Self {
            version: STORE_VERSION,
            metadata,
            files,
        }
    }

    /// Format version.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Captured files, sorted by path.
    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    /// Whether both documents hold the same files, ignoring metadata.
    pub fn same_files(&self, other: &Self) -> bool {
        self.files == other.files
    }

    /// Serialize to the TOML store format.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Serialize` if TOML encoding fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| StoreError::Serialize(e).into())
    }

    /// Parse and validate a TOML store document.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Parse` for invalid TOML,
    /// `StoreError::MissingField` if the version or files list is absent,
    /// and `StoreError::UnsupportedVersion` for any version other than the
    /// current one.
    pub fn from_toml(text: &str) -> Result<Self> {
        let raw: RawDocument = toml::from_str(text).map_err(StoreError::Parse)?;

        let version = raw
            .version
            .ok_or(StoreError::MissingField("__envi_version"))?;
        if version != i64::from(STORE_VERSION) {
            return Err(StoreError::UnsupportedVersion {
                found: version,
                expected: STORE_VERSION,
            }
            .into());
        }

        let files = raw.files.ok_or(StoreError::MissingField("files"))?;
        debug!(files = files.len(), "store document parsed");

        Ok(Self::new(raw.metadata, files))
    }
}
