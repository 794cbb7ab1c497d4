//! Cryptographic primitives for DataVault.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption (`encryption`)
//! - The string-level cipher service bound to one process key (`cipher`)
//! - The zeroizing process key type (`keys`)
//! - SHA-256 passkey hashing (`passkey`)
//! - Argon2id master-password verification (`kdf`)

pub mod cipher;
pub mod encryption;
pub mod kdf;
pub mod keys;
pub mod passkey;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{CipherService, ProcessKey, hash_passkey, ...};
pub use cipher::CipherService;
pub use encryption::{decrypt, encrypt};
pub use kdf::{Argon2Params, MasterCredential};
pub use keys::ProcessKey;
pub use passkey::{hash_passkey, PasskeyHash};
