//! One-way passkey hashing.
//!
//! Passkeys are hashed with plain SHA-256: the same passkey must always
//! map to the same digest so a record can be matched against a presented
//! passkey.  Digests are compared in constant time.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Length of a passkey digest in bytes.
pub const PASSKEY_HASH_LEN: usize = 32;

/// SHA-256 digest of a passkey.
pub type PasskeyHash = [u8; PASSKEY_HASH_LEN];

/// Hash a passkey.
pub fn hash_passkey(passkey: &str) -> PasskeyHash {
    Sha256::digest(passkey.as_bytes()).into()
}

/// Constant-time comparison of two passkey digests.
pub fn hashes_match(a: &PasskeyHash, b: &PasskeyHash) -> bool {
    a[..].ct_eq(&b[..]).into()
}
