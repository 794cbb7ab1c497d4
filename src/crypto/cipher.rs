//! The cipher service: string-level encryption under the process key.

use zeroize::Zeroize;

use crate::errors::{DataVaultError, Result};

use super::encryption;
use super::keys::ProcessKey;

/// Encrypts and decrypts vault plaintexts with one fixed `ProcessKey`.
#[derive(Debug)]
pub struct CipherService {
    key: ProcessKey,
}

impl CipherService {
    pub fn new(key: ProcessKey) -> Self {
        Self { key }
    }

    /// Encrypt a plaintext string.
    ///
    /// Output is non-deterministic: encrypting the same plaintext twice
    /// yields two different ciphertexts.
    pub fn encrypt(&self, plaintext: &str) -> Result<Vec<u8>> {
        encryption::encrypt(self.key.as_bytes(), plaintext.as_bytes())
    }

    /// Decrypt a ciphertext produced by `encrypt` under the same key.
    ///
    /// Fails with `Integrity` if the ciphertext was modified, truncated,
    /// or produced under another key.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<String> {
        let plaintext_bytes = encryption::decrypt(self.key.as_bytes(), ciphertext)?;

        // An authenticated payload that is not UTF-8 was never produced by
        // `encrypt`; treat it the same as a failed tag.
        String::from_utf8(plaintext_bytes).map_err(|e| {
            let mut bad_bytes = e.into_bytes();
            bad_bytes.zeroize();
            DataVaultError::Integrity
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> CipherService {
        CipherService::new(ProcessKey::new([0x42u8; 32]))
    }

    #[test]
    fn roundtrip() {
        let svc = service();
        let ct = svc.encrypt("hello world").unwrap();
        assert_eq!(svc.decrypt(&ct).unwrap(), "hello world");
    }

    #[test]
    fn empty_plaintext_roundtrips() {
        let svc = service();
        let ct = svc.encrypt("").unwrap();
        assert_eq!(svc.decrypt(&ct).unwrap(), "");
    }

    #[test]
    fn foreign_key_is_integrity_error() {
        let ct = service().encrypt("data").unwrap();
        let other = CipherService::new(ProcessKey::new([0x43u8; 32]));
        assert!(matches!(other.decrypt(&ct), Err(DataVaultError::Integrity)));
    }

    #[test]
    fn every_flipped_bit_is_detected() {
        let svc = service();
        let ct = svc.encrypt("tamper me").unwrap();
        for i in 0..ct.len() * 8 {
            let mut tampered = ct.clone();
            tampered[i / 8] ^= 1 << (i % 8);
            assert!(
                matches!(svc.decrypt(&tampered), Err(DataVaultError::Integrity)),
                "bit {i} flip went undetected"
            );
        }
    }

    #[test]
    fn truncated_input_is_integrity_error() {
        let svc = service();
        assert!(matches!(svc.decrypt(&[0u8; 5]), Err(DataVaultError::Integrity)));
        assert!(matches!(svc.decrypt(&[]), Err(DataVaultError::Integrity)));
    }
}
