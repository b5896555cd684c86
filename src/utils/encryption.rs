//! AES-256-GCM encryption for exchange API secrets at rest.
//!
//! Blob layout, base64-encoded: `[version_byte][nonce(12)][ciphertext]`.
//! Version 1 is the only format so far; the byte exists so the vault can be
//! migrated without guessing.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::Aes256Gcm;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rand::RngCore;
use thiserror::Error;

const BLOB_VERSION: u8 = 0x01;
const NONCE_LEN: usize = 12;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    #[error("Encryption failed: {0}")]
    Encryption(String),
    #[error("Decryption failed: {0}")]
    Decryption(String),
    #[error("Malformed blob: {0}")]
    Malformed(String),
}

fn cipher_from_hex_key(key_hex: &str) -> Result<Aes256Gcm, CryptoError> {
    let key_bytes = hex::decode(key_hex).map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
    let key: [u8; 32] = key_bytes
        .try_into()
        .map_err(|_| CryptoError::InvalidKey("key must be 32 bytes (256 bits)".to_string()))?;
    Ok(Aes256Gcm::new(&key.into()))
}

/// Encrypt a secret under the hex-encoded 256-bit vault key
pub fn encrypt_secret(secret: &str, key_hex: &str) -> Result<String, CryptoError> {
    let cipher = cipher_from_hex_key(key_hex)?;

    // Fresh random nonce per encryption; GCM nonces must never repeat per key
    let mut nonce = [0u8; NONCE_LEN];
    rand::rngs::OsRng.fill_bytes(&mut nonce);

    let ciphertext = cipher
        .encrypt((&nonce).into(), secret.as_bytes())
        .map_err(|e| CryptoError::Encryption(e.to_string()))?;

    let mut blob = Vec::with_capacity(1 + NONCE_LEN + ciphertext.len());
    blob.push(BLOB_VERSION);
    blob.extend_from_slice(&nonce);
    blob.extend_from_slice(&ciphertext);
    Ok(BASE64.encode(blob))
}

/// Decrypt a blob produced by [`encrypt_secret`]
pub fn decrypt_secret(blob_b64: &str, key_hex: &str) -> Result<String, CryptoError> {
    let blob = BASE64
        .decode(blob_b64)
        .map_err(|e| CryptoError::Malformed(e.to_string()))?;

    if blob.len() < 1 + NONCE_LEN {
        return Err(CryptoError::Malformed(
            "blob shorter than version + nonce".to_string(),
        ));
    }
    if blob[0] != BLOB_VERSION {
        return Err(CryptoError::Malformed(format!(
            "unsupported blob version: {}",
            blob[0]
        )));
    }

    let cipher = cipher_from_hex_key(key_hex)?;
    let nonce: [u8; NONCE_LEN] = blob[1..1 + NONCE_LEN]
        .try_into()
        .map_err(|_| CryptoError::Malformed("failed to extract nonce".to_string()))?;

    let plaintext = cipher
        .decrypt((&nonce).into(), &blob[1 + NONCE_LEN..])
        .map_err(|e| CryptoError::Decryption(e.to_string()))?;

    String::from_utf8(plaintext).map_err(|e| CryptoError::Malformed(e.to_string()))
}
