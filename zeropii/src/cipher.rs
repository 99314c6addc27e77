//! The cryptographic transform applied to sensitive field values.
//!
//! AES-256-GCM with a fresh 96-bit nonce per call. The output is
//! `base64(nonce || ciphertext || tag)`, so it survives any string-preserving
//! store. Encryption is randomized: the same plaintext yields a different
//! ciphertext every time. Compare decrypted values, never ciphertexts.

use std::fmt;

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::error::TransformError;

/// Required key length in bytes.
pub const KEY_LEN: usize = 32;

const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

/// A key parsed once and reused for every field of a traversal.
#[derive(Clone)]
pub struct Cipher {
    inner: Aes256Gcm,
}

impl Cipher {
    /// Builds a cipher from the key string.
    ///
    /// The key's UTF-8 bytes are the AES key and must be exactly
    /// [`KEY_LEN`] bytes long.
    pub fn new(key: &str) -> Result<Self, TransformError> {
        if key.is_empty() {
            return Err(TransformError::EmptyKey);
        }
        let bytes = key.as_bytes();
        if bytes.len() != KEY_LEN {
            return Err(TransformError::InvalidKeyLength {
                expected: KEY_LEN,
                actual: bytes.len(),
            });
        }
        let inner = Aes256Gcm::new_from_slice(bytes).map_err(|_| TransformError::InvalidKeyLength {
            expected: KEY_LEN,
            actual: bytes.len(),
        })?;
        Ok(Self { inner })
    }

    /// Encrypts `plaintext`, including the empty string.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, TransformError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let sealed = self
            .inner
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|_| TransformError::Encryption)?;

        let mut envelope = Vec::with_capacity(NONCE_LEN + sealed.len());
        envelope.extend_from_slice(&nonce);
        envelope.extend_from_slice(&sealed);
        Ok(BASE64.encode(envelope))
    }

    /// Decrypts a value produced by [`Cipher::encrypt`] under the same key.
    pub fn decrypt(&self, ciphertext: &str) -> Result<String, TransformError> {
        let envelope = BASE64
            .decode(ciphertext)
            .map_err(|_| TransformError::MalformedCiphertext)?;
        if envelope.len() < NONCE_LEN + TAG_LEN {
            return Err(TransformError::MalformedCiphertext);
        }

        let (nonce, sealed) = envelope.split_at(NONCE_LEN);
        let plaintext = self
            .inner
            .decrypt(Nonce::from_slice(nonce), sealed)
            .map_err(|_| TransformError::Authentication)?;

        String::from_utf8(plaintext).map_err(|_| TransformError::MalformedCiphertext)
    }
}

impl fmt::Debug for Cipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cipher").finish_non_exhaustive()
    }
}

/// Encrypts `plaintext` under `key`.
pub fn encrypt(plaintext: &str, key: &str) -> Result<String, TransformError> {
    Cipher::new(key)?.encrypt(plaintext)
}

/// Decrypts `ciphertext` under `key`.
pub fn decrypt(ciphertext: &str, key: &str) -> Result<String, TransformError> {
    Cipher::new(key)?.decrypt(ciphertext)
}
