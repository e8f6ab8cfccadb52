//! Key material.
//!
//! Two steps: a manifest file is reduced to a fixed-length shared secret,
//! and a secret is stretched with a salt into an AES key.

use argon2::{Algorithm, Argon2, Params, Version};
use zeroize::Zeroizing;

use super::KEY_LEN;
use crate::error::{CipherError, Result};

/// Argon2id memory cost in KiB.
pub const KDF_MEMORY_KIB: u32 = 19_456;

/// Argon2id iterations.
pub const KDF_ITERATIONS: u32 = 2;

/// Argon2id lanes.
pub const KDF_PARALLELISM: u32 = 1;

/// Derive the shared secret for a manifest file.
///
/// The secret is the lowercase hex MD5 digest of the raw bytes, so anyone
/// holding an identical manifest derives the same secret. MD5 only fixes
/// the length here; strength comes from [`stretch_key`].
pub fn derive_secret(manifest: &[u8]) -> String {
    format!("{:x}", md5::compute(manifest))
}

/// Stretch a secret and salt into a 32-byte key with Argon2id.
///
/// # Errors
///
/// Returns `CipherError::KeyDerivation` if Argon2 rejects the inputs
/// (e.g. a salt shorter than 8 bytes).
pub fn stretch_key(secret: &[u8], salt: &[u8]) -> Result<Zeroizing<[u8; KEY_LEN]>> {
    let params = Params::new(
        KDF_MEMORY_KIB,
        KDF_ITERATIONS,
        KDF_PARALLELISM,
        Some(KEY_LEN),
    )
    .map_err(|e| CipherError::KeyDerivation(format!("argon2 params: {}", e)))?;

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password_into(secret, salt, &mut key[..])
        .map_err(|e| CipherError::KeyDerivation(format!("argon2: {}", e)))?;

    Ok(key)
}
