//! AES-256-GCM envelope implementation.
//!
//! Compresses with gzip, derives a per-envelope key with Argon2id and
//! encrypts with AES-256-GCM using a 16-byte IV.

use std::io::{Read, Write};

use aes_gcm::aead::consts::U16;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::aes::Aes256;
use aes_gcm::{AesGcm, Nonce, Tag};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::trace;

use super::{stretch_key, Cipher, HEADER_LEN, IV_LEN, SALT_LEN, TAG_LEN};
use crate::error::{CipherError, Result};

/// AES-256-GCM with a 128-bit nonce.
type Aes256Gcm16 = AesGcm<Aes256, U16>;

/// Password-based AES-256-GCM envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct GcmEnvelope;

impl GcmEnvelope {
    fn cipher(key: &[u8]) -> Result<Aes256Gcm16> {
        Aes256Gcm16::new_from_slice(key)
            .map_err(|e| CipherError::KeyDerivation(format!("invalid key: {}", e)).into())
    }
}

impl Cipher for GcmEnvelope {
    fn name(&self) -> &'static str {
        "aes-256-gcm"
    }

    fn encrypt(&self, plaintext: &str, secret: &str) -> Result<String> {
        trace!(plaintext_len = plaintext.len(), "encrypting");

        let mut buffer = compress(plaintext.as_bytes())?;

        let mut salt = [0u8; SALT_LEN];
        let mut iv = [0u8; IV_LEN];
        OsRng.fill_bytes(&mut salt);
        OsRng.fill_bytes(&mut iv);

        let key = stretch_key(secret.as_bytes(), &salt)?;
        let tag = Self::cipher(&key[..])?
            .encrypt_in_place_detached(Nonce::<U16>::from_slice(&iv), b"", &mut buffer)
            .map_err(|_| CipherError::Encryption("aes-gcm seal failed".to_string()))?;

        let mut combined = Vec::with_capacity(HEADER_LEN + buffer.len());
        combined.extend_from_slice(&salt);
        combined.extend_from_slice(&iv);
        combined.extend_from_slice(tag.as_slice());
        combined.extend_from_slice(&buffer);

        trace!(envelope_len = combined.len(), "encrypted");

        Ok(STANDARD.encode(combined))
    }

    fn decrypt(&self, envelope: &str, secret: &str) -> Result<String> {
        let combined = STANDARD
            .decode(envelope.trim())
            .map_err(|e| CipherError::Malformed(format!("invalid base64: {}", e)))?;

        trace!(envelope_len = combined.len(), "decrypting");

        if combined.len() < HEADER_LEN {
            return Err(CipherError::Malformed(format!(
                "{} bytes is shorter than the {}-byte header",
                combined.len(),
                HEADER_LEN
            ))
            .into());
        }

        let (salt, rest) = combined.split_at(SALT_LEN);
        let (iv, rest) = rest.split_at(IV_LEN);
        let (tag, ciphertext) = rest.split_at(TAG_LEN);

        let key = stretch_key(secret.as_bytes(), salt)?;
        let mut buffer = ciphertext.to_vec();
        Self::cipher(&key[..])?
            .decrypt_in_place_detached(
                Nonce::<U16>::from_slice(iv),
                b"",
                &mut buffer,
                Tag::<U16>::from_slice(tag),
            )
            .map_err(|_| CipherError::Authentication)?;

        let decompressed = decompress(&buffer)?;
        trace!(plaintext_len = decompressed.len(), "decrypted");

        String::from_utf8(decompressed).map_err(|e| CipherError::Utf8(e).into())
    }
}

fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).map_err(CipherError::Compression)?;
    encoder
        .finish()
        .map_err(|e| CipherError::Compression(e).into())
}

fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    GzDecoder::new(data)
        .read_to_end(&mut out)
        .map_err(CipherError::Compression)?;
    Ok(out)
}
