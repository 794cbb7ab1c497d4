//! Record and CiphertextHandle types held by the vault.
//!
//! A record holds the encrypted value and the SHA-256 digest of the
//! passkey it was stored under.  The ciphertext doubles as the record's
//! lookup key, and callers receive it back as a `CiphertextHandle`.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};

use crate::crypto::PasskeyHash;
use crate::errors::{DataVaultError, Result};

/// A single encrypted entry in the vault.
#[derive(Debug, Clone)]
pub struct Record {
    ciphertext: Vec<u8>,
    passkey_hash: PasskeyHash,
    stored_at: DateTime<Utc>,
}

impl Record {
    pub(crate) fn new(ciphertext: Vec<u8>, passkey_hash: PasskeyHash) -> Self {
        Self {
            ciphertext,
            passkey_hash,
            stored_at: Utc::now(),
        }
    }

    /// The encrypted value bytes (nonce + ciphertext + tag).
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// SHA-256 digest of the passkey given at store time.
    pub fn passkey_hash(&self) -> &PasskeyHash {
        &self.passkey_hash
    }

    /// When this record was stored.
    pub fn stored_at(&self) -> DateTime<Utc> {
        self.stored_at
    }
}

/// The opaque retrieval handle returned by `Vault::store`.
///
/// Its text form (via `Display` / `FromStr`) is URL-safe base64 without
/// padding, which is what front-ends show to and accept from users.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CiphertextHandle(Vec<u8>);

impl CiphertextHandle {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Decode a handle from its base64 text form.
    pub fn decode(encoded: &str) -> Result<Self> {
        URL_SAFE_NO_PAD
            .decode(encoded.trim())
            .map(Self)
            .map_err(|_| DataVaultError::Validation("ciphertext handle is not valid base64".into()))
    }

    /// Encode the handle as URL-safe base64.
    pub fn encode(&self) -> String {
        URL_SAFE_NO_PAD.encode(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for CiphertextHandle {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for CiphertextHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for CiphertextHandle {
    type Err = DataVaultError;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_text_form_roundtrips() {
        let handle = CiphertextHandle::new(vec![0, 1, 2, 250, 251, 252, 253, 254, 255]);
        let parsed: CiphertextHandle = handle.to_string().parse().unwrap();
        assert_eq!(parsed, handle);
    }

    #[test]
    fn handle_text_is_url_safe() {
        let handle = CiphertextHandle::new(vec![0xFB, 0xFF, 0xBF]);
        let text = handle.encode();
        assert!(!text.contains('+') && !text.contains('/') && !text.contains('='));
    }

    #[test]
    fn decode_ignores_surrounding_whitespace() {
        let handle = CiphertextHandle::new(b"abc".to_vec());
        let padded = format!("  {handle}\n");
        assert_eq!(CiphertextHandle::decode(&padded).unwrap(), handle);
    }

    #[test]
    fn decode_rejects_invalid_text() {
        let result = CiphertextHandle::decode("not*base64!");
        assert!(matches!(result, Err(DataVaultError::Validation(_))));
    }
}
