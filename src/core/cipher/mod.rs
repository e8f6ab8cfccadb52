//! Cryptographic operations.
//!
//! Provides the encryption abstraction used for shareable blobs and its
//! default implementation.
//!
//! ## Envelope layout
//!
//! ```text
//! base64( salt[32] || iv[16] || tag[16] || ciphertext[..] )
//! ```
//!
//! The plaintext is gzip-compressed before encryption. The key is stretched
//! from the secret and salt with Argon2id, then used with AES-256-GCM.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `Cipher` trait
//! 2. Add the implementation in a new file
//! 3. Re-export from this module

use crate::error::Result;

mod blob;
mod gcm;
mod kdf;

pub use blob::{format_blob, parse_blob};
pub use gcm::GcmEnvelope;
pub use kdf::{derive_secret, stretch_key};

/// Salt length in bytes.
pub const SALT_LEN: usize = 32;

/// Initialization vector length in bytes.
pub const IV_LEN: usize = 16;

/// Authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

/// Derived key length in bytes.
pub const KEY_LEN: usize = 32;

/// Length of the fixed envelope header preceding the ciphertext.
pub const HEADER_LEN: usize = SALT_LEN + IV_LEN + TAG_LEN;

/// Cryptographic backend trait.
///
/// Abstracts symmetric, secret-based encryption of text payloads.
pub trait Cipher {
    /// Encrypt plaintext under a shared secret.
    ///
    /// Every call must produce a different envelope for the same input.
    ///
    /// # Errors
    ///
    /// Returns `CipherError` if compression, key derivation or encryption
    /// fails.
    fn encrypt(&self, plaintext: &str, secret: &str) -> Result<String>;

    /// Decrypt an envelope produced by `encrypt`.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::Authentication` if the secret is wrong or the
    /// data was tampered with, and `CipherError::Malformed` if the envelope
    /// is structurally invalid.
    fn decrypt(&self, envelope: &str, secret: &str) -> Result<String>;

    /// Backend name for display.
    fn name(&self) -> &'static str;
}

/// Encrypt plaintext with the default envelope.
///
/// # Errors
///
/// Returns `CipherError` if encryption fails at any stage.
pub fn encrypt(plaintext: &str, secret: &str) -> Result<String> {
    GcmEnvelope::default().encrypt(plaintext, secret)
}

/// Decrypt an envelope with the default envelope.
///
/// # Errors
///
/// Returns `CipherError::Authentication` on a wrong secret or corrupted data.
pub fn decrypt(envelope: &str, secret: &str) -> Result<String> {
    GcmEnvelope::default().decrypt(envelope, secret)
}
