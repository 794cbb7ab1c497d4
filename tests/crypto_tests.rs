//! Integration tests for the DataVault crypto module.

use datavault::crypto::{decrypt, encrypt, hash_passkey, CipherService, ProcessKey};
use datavault::errors::DataVaultError;

// ---------------------------------------------------------------------------
// Encryption round-trip
// ---------------------------------------------------------------------------

#[test]
fn encrypt_decrypt_roundtrip() {
    let key = [0xABu8; 32];
    let plaintext = b"some free-text data";

    let ciphertext = encrypt(&key, plaintext).expect("encrypt should succeed");

    // 12-byte nonce + 16-byte tag on top of the plaintext.
    assert_eq!(ciphertext.len(), plaintext.len() + 12 + 16);

    let recovered = decrypt(&key, &ciphertext).expect("decrypt should succeed");
    assert_eq!(recovered, plaintext);
}

#[test]
fn encrypt_produces_different_ciphertext_each_time() {
    let key = [0xCDu8; 32];
    let plaintext = b"hello";

    let ct1 = encrypt(&key, plaintext).expect("encrypt 1");
    let ct2 = encrypt(&key, plaintext).expect("encrypt 2");

    assert_ne!(
        ct1, ct2,
        "two encryptions of the same plaintext must differ"
    );
}

#[test]
fn decrypt_with_wrong_key_is_integrity_error() {
    let ciphertext = encrypt(&[0x11u8; 32], b"top secret").expect("encrypt");
    let result = decrypt(&[0x22u8; 32], &ciphertext);
    assert!(matches!(result, Err(DataVaultError::Integrity)));
}

#[test]
fn decrypt_with_corrupted_ciphertext_fails() {
    let key = [0xBBu8; 32];
    let mut ciphertext = encrypt(&key, b"VALUE=abc").expect("encrypt");
    // Flip a byte in the ciphertext portion (after the 12-byte nonce).
    if let Some(byte) = ciphertext.get_mut(15) {
        *byte ^= 0xFF;
    }

    let result = decrypt(&key, &ciphertext);
    assert!(matches!(result, Err(DataVaultError::Integrity)));
}

#[test]
fn decrypt_with_truncated_data_fails() {
    let key = [0xAAu8; 32];
    assert!(decrypt(&key, &[0u8; 5]).is_err());
    assert!(decrypt(&key, &[0u8; 27]).is_err());
}

// ---------------------------------------------------------------------------
// Cipher service
// ---------------------------------------------------------------------------

#[test]
fn cipher_service_with_configured_key_is_stable() {
    // Two services built from the same configured key can read each
    // other's output, as a restarted process with DATAVAULT_KEY would.
    let encoded = ProcessKey::generate().to_base64();
    let a = CipherService::new(ProcessKey::from_base64(&encoded).unwrap());
    let b = CipherService::new(ProcessKey::from_base64(&encoded).unwrap());

    let ct = a.encrypt("persisted across instances").unwrap();
    assert_eq!(b.decrypt(&ct).unwrap(), "persisted across instances");
}

#[test]
fn cipher_service_rejects_other_key() {
    let a = CipherService::new(ProcessKey::generate());
    let b = CipherService::new(ProcessKey::generate());

    let ct = a.encrypt("data").unwrap();
    assert!(matches!(b.decrypt(&ct), Err(DataVaultError::Integrity)));
}

// ---------------------------------------------------------------------------
// Passkey hashing
// ---------------------------------------------------------------------------

#[test]
fn passkey_hash_is_deterministic_and_fixed_length() {
    let h1 = hash_passkey("secret1");
    let h2 = hash_passkey("secret1");
    assert_eq!(h1, h2);
    assert_eq!(h1.len(), 32);
    assert_ne!(hash_passkey(""), hash_passkey(" "));
}
