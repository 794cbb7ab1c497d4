//! High-level vault operations used by the CLI session.
//!
//! `Vault` wraps the cipher service, the passkey hashing and the lockout
//! counter so the presentation layer works with three calls:
//! `store`, `retrieve` and `reauthorize`.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::crypto::kdf::MasterCredential;
use crate::crypto::keys::ProcessKey;
use crate::crypto::passkey::{hash_passkey, hashes_match};
use crate::crypto::CipherService;
use crate::errors::{DataVaultError, Result};

use super::lockout::{LockState, Lockout, MAX_FAILED_ATTEMPTS};
use super::record::{CiphertextHandle, Record};

/// Everything a vault needs at construction.
///
/// Built by `Settings::vault_config` in the binary, or directly by hosts
/// and tests.
#[derive(Debug)]
pub struct VaultConfig {
    /// Process-wide encryption key, fixed for the vault's lifetime.
    pub key: ProcessKey,
    /// Credential that clears a lockout.
    pub master: MasterCredential,
    /// Consecutive failures before lockout (default: 3).
    pub max_attempts: u32,
}

impl VaultConfig {
    pub fn new(key: ProcessKey, master: MasterCredential) -> Self {
        Self {
            key,
            master,
            max_attempts: MAX_FAILED_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

/// The in-memory, passkey-gated vault.
///
/// Not synchronized: every operation is a read-then-write on the record
/// map or the lockout counter, so a concurrent host must serialize access
/// (e.g. one `Mutex<Vault>`).
#[derive(Debug)]
pub struct Vault {
    cipher: CipherService,
    master: MasterCredential,

    /// Ciphertext -> record.  The ciphertext is the lookup key.
    records: HashMap<Vec<u8>, Record>,

    lockout: Lockout,
}

impl Vault {
    /// Create an empty, open vault.
    pub fn new(config: VaultConfig) -> Self {
        Self {
            cipher: CipherService::new(config.key),
            master: config.master,
            records: HashMap::new(),
            lockout: Lockout::new(config.max_attempts),
        }
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Encrypt `plaintext` and keep it under `passkey`.
    ///
    /// Returns the handle the caller must present to `retrieve`.  Losing
    /// the handle makes the record unreachable.  Does not touch the
    /// failed-attempt counter.
    pub fn store(&mut self, plaintext: &str, passkey: &str) -> Result<CiphertextHandle> {
        if plaintext.is_empty() || passkey.is_empty() {
            return Err(DataVaultError::Validation(
                "Both data and passkey are required!".into(),
            ));
        }

        let passkey_hash = hash_passkey(passkey);
        let ciphertext = self.cipher.encrypt(plaintext)?;

        self.records.insert(
            ciphertext.clone(),
            Record::new(ciphertext.clone(), passkey_hash),
        );
        debug!(records = self.records.len(), "record stored");

        Ok(CiphertextHandle::new(ciphertext))
    }

    /// Decrypt the record stored under `ciphertext` if `passkey` matches.
    ///
    /// While locked, fails with `LockedOut` without hashing the passkey or
    /// looking at any record.  An unknown ciphertext, a wrong passkey and a
    /// ciphertext that fails authentication are indistinguishable to the
    /// caller: each counts as a failed attempt and yields `Authentication`
    /// with the attempts remaining.
    pub fn retrieve(&mut self, ciphertext: &[u8], passkey: &str) -> Result<String> {
        if self.lockout.is_locked() {
            debug!("retrieval rejected: vault locked");
            return Err(DataVaultError::LockedOut);
        }

        let presented = hash_passkey(passkey);
        let outcome = self
            .records
            .get(ciphertext)
            .filter(|record| hashes_match(record.passkey_hash(), &presented))
            .ok_or(DataVaultError::Authentication { remaining: None })
            .and_then(|record| self.cipher.decrypt(record.ciphertext()));

        match outcome {
            Ok(plaintext) => {
                self.lockout.record_success();
                debug!("record retrieved");
                Ok(plaintext)
            }
            Err(err) => {
                if matches!(err, DataVaultError::Integrity) {
                    warn!("stored ciphertext failed authentication");
                }
                let remaining = self.lockout.record_failure();
                debug!(
                    failed_attempts = self.lockout.failed_attempts(),
                    remaining, "retrieval failed"
                );
                if self.lockout.is_locked() {
                    info!("vault locked after repeated failed retrievals");
                }
                Err(DataVaultError::Authentication {
                    remaining: Some(remaining),
                })
            }
        }
    }

    /// `retrieve` for a handle in its base64 text form.
    ///
    /// Text that does not decode is treated as an unknown ciphertext.
    pub fn retrieve_encoded(&mut self, handle: &str, passkey: &str) -> Result<String> {
        let ciphertext = CiphertextHandle::decode(handle)
            .map(CiphertextHandle::into_bytes)
            .unwrap_or_default();
        self.retrieve(&ciphertext, passkey)
    }

    /// Clear a lockout with the master password.
    ///
    /// On success the counter is reset and the vault is marked
    /// reauthorized.  On failure nothing changes.
    pub fn reauthorize(&mut self, master_password: &str) -> Result<()> {
        if !self.master.verify(master_password)? {
            debug!("reauthorization rejected");
            return Err(DataVaultError::Authentication { remaining: None });
        }

        self.lockout.reauthorize();
        info!("vault reauthorized");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn state(&self) -> LockState {
        self.lockout.state()
    }

    pub fn is_locked(&self) -> bool {
        self.lockout.is_locked()
    }

    pub fn failed_attempts(&self) -> u32 {
        self.lockout.failed_attempts()
    }

    /// Attempts left before lockout.
    pub fn attempts_remaining(&self) -> u32 {
        self.lockout.remaining()
    }

    pub fn max_attempts(&self) -> u32 {
        self.lockout.max_attempts()
    }

    pub fn is_reauthorized(&self) -> bool {
        self.lockout.is_reauthorized()
    }

    /// Look up a record by ciphertext.
    ///
    /// This is a metadata-only check: no passkey is needed, no decryption
    /// is performed, and the failed-attempt counter is untouched.
    pub fn record(&self, ciphertext: &[u8]) -> Option<&Record> {
        self.records.get(ciphertext)
    }

    /// Returns the number of records in the vault.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
