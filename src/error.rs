//! Error types.
//!
//! Errors are grouped by concern and wrapped by the top-level [`Error`].

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error returned by every fallible envi operation.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Repo(#[from] RepoError),

    /// Text did not contain a well-formed `__envi_start__ ... __envi_end__` blob.
    #[error("invalid blob: expected __envi_start__, encrypted data, __envi_end__")]
    InvalidBlob,

    /// No manifest to derive a secret from and none was supplied.
    #[error("no secret available: no manifest file found and no secret given")]
    NoSecret,

    /// An .env file exists but could not be read as UTF-8 text.
    #[error("cannot read {}: {source}", .path.display())]
    EnvFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Envelope encryption and decryption failures.
#[derive(Error, Debug)]
pub enum CipherError {
    /// The authentication tag did not verify.
    #[error("decryption failed: wrong secret or corrupted blob")]
    Authentication,

    /// The envelope could not be split into salt, iv, tag and ciphertext.
    #[error("malformed envelope: {0}")]
    Malformed(String),

    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("compression failed: {0}")]
    Compression(#[source] std::io::Error),

    #[error("decrypted payload is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Store document validation and persistence failures.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("unsupported store version {found} (expected {expected})")]
    UnsupportedVersion { found: i64, expected: u32 },

    #[error("invalid store document: missing field '{0}'")]
    MissingField(&'static str),

    #[error("failed to parse store document: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("failed to serialize store document: {0}")]
    Serialize(#[source] toml::ser::Error),

    #[error("no stored configuration at {}", .0.display())]
    NotFound(PathBuf),
}

/// Global configuration failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unable to determine home directory")]
    NoHomeDir,

    #[error("failed to read config: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[source] toml::ser::Error),
}

/// Repository discovery failures.
#[derive(Error, Debug)]
pub enum RepoError {
    #[error("operation cancelled")]
    Cancelled,

    #[error("no .env files found in {}", .0.display())]
    NoEnvFiles(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error means the secret was wrong (or the blob corrupted).
    pub fn is_authentication(&self) -> bool {
        matches!(self, Error::Cipher(CipherError::Authentication))
    }
}
