//! The process-wide encryption key.
//!
//! A `ProcessKey` is established once when a vault is built and never
//! changes for that vault's lifetime.  It comes either from configuration
//! (base64 text, see `Settings`) or from the OS RNG.

use aes_gcm::aead::{KeyInit, OsRng};
use aes_gcm::Aes256Gcm;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use zeroize::{Zeroize, Zeroizing};

use crate::errors::{DataVaultError, Result};

/// Length of the AES-256 key in bytes.
pub const KEY_LEN: usize = 32;

/// A 32-byte AES-256 key that zeroes its memory when dropped.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct ProcessKey {
    bytes: [u8; KEY_LEN],
}

impl ProcessKey {
    /// Wrap raw key bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Generate a fresh random key from the OS RNG.
    pub fn generate() -> Self {
        let mut key = Aes256Gcm::generate_key(&mut OsRng);
        let mut bytes = [0u8; KEY_LEN];
        bytes.copy_from_slice(key.as_slice());
        key.as_mut_slice().zeroize();
        Self { bytes }
    }

    /// Parse a key from its base64 text form.
    ///
    /// Accepts standard base64 with padding; surrounding whitespace is
    /// ignored.  The decoded key must be exactly 32 bytes.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let decoded = Zeroizing::new(
            BASE64
                .decode(encoded.trim())
                .map_err(|e| DataVaultError::KeyError(format!("key is not valid base64: {e}")))?,
        );

        if decoded.len() != KEY_LEN {
            return Err(DataVaultError::KeyError(format!(
                "key must be exactly {KEY_LEN} bytes, got {}",
                decoded.len()
            )));
        }

        let mut bytes = [0u8; KEY_LEN];
        bytes.copy_from_slice(&decoded);
        Ok(Self { bytes })
    }

    /// Encode the key as base64, e.g. for `datavault keygen`.
    pub fn to_base64(&self) -> Zeroizing<String> {
        Zeroizing::new(BASE64.encode(self.bytes))
    }

    /// Access the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl std::fmt::Debug for ProcessKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ProcessKey(***)")
    }
}
