//! Master-password verification using Argon2id.
//!
//! The vault never keeps the master password itself.  At construction we
//! derive a 32-byte verifier from it with Argon2id and a random salt;
//! `reauthorize` re-derives from the candidate and compares the two in
//! constant time.  Parameters are configurable via `Argon2Params`
//! (loaded from `.datavault.toml` or sensible defaults).

use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::errors::{DataVaultError, Result};

/// Length of the salt in bytes (256 bits).
const SALT_LEN: usize = 32;

/// Length of the derived verifier in bytes.
const VERIFIER_LEN: usize = 32;

/// Minimum safe memory cost in KiB (8 MB).
const MIN_MEMORY_KIB: u32 = 8_192;

/// Configurable Argon2id parameters.
///
/// These map 1:1 to the fields in `Settings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Params {
    /// Memory cost in KiB (default: 19 456 = 19 MB).
    pub memory_kib: u32,
    /// Number of iterations (default: 2).
    pub iterations: u32,
    /// Parallelism lanes (default: 1).
    pub parallelism: u32,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

/// Derive a 32-byte value from a password and salt with explicit params.
///
/// The same password + salt + params always produce the same output.
/// Enforces minimum Argon2 parameters to prevent dangerously weak settings.
pub fn derive_with_params(
    password: &[u8],
    salt: &[u8],
    argon2_params: &Argon2Params,
) -> Result<[u8; VERIFIER_LEN]> {
    if argon2_params.memory_kib < MIN_MEMORY_KIB {
        return Err(DataVaultError::KeyDerivationFailed(format!(
            "Argon2 memory_kib must be at least {MIN_MEMORY_KIB} (got {})",
            argon2_params.memory_kib
        )));
    }
    if argon2_params.iterations < 1 {
        return Err(DataVaultError::KeyDerivationFailed(
            "Argon2 iterations must be at least 1".into(),
        ));
    }
    if argon2_params.parallelism < 1 {
        return Err(DataVaultError::KeyDerivationFailed(
            "Argon2 parallelism must be at least 1".into(),
        ));
    }

    let params = Params::new(
        argon2_params.memory_kib,
        argon2_params.iterations,
        argon2_params.parallelism,
        Some(VERIFIER_LEN),
    )
    .map_err(|e| DataVaultError::KeyDerivationFailed(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut out = [0u8; VERIFIER_LEN];
    argon2
        .hash_password_into(password, salt, &mut out)
        .map_err(|e| DataVaultError::KeyDerivationFailed(format!("Argon2id hashing failed: {e}")))?;

    Ok(out)
}

/// Generate a cryptographically random 32-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}

/// The fixed master credential used to clear a lockout.
///
/// Holds only the salt, the Argon2id verifier and the params used to
/// produce it.  The verifier is zeroed on drop.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct MasterCredential {
    salt: [u8; SALT_LEN],
    verifier: [u8; VERIFIER_LEN],
    #[zeroize(skip)]
    params: Argon2Params,
}

impl MasterCredential {
    /// Build a credential from the plaintext master password.
    pub fn new(password: &str, params: Argon2Params) -> Result<Self> {
        if password.is_empty() {
            return Err(DataVaultError::ConfigError(
                "master password cannot be empty".into(),
            ));
        }

        let salt = generate_salt();
        let verifier = derive_with_params(password.as_bytes(), &salt, &params)?;
        Ok(Self {
            salt,
            verifier,
            params,
        })
    }

    /// Check a candidate password against the stored verifier.
    pub fn verify(&self, candidate: &str) -> Result<bool> {
        let mut derived = derive_with_params(candidate.as_bytes(), &self.salt, &self.params)?;
        let matches: bool = derived[..].ct_eq(&self.verifier[..]).into();
        derived.zeroize();
        Ok(matches)
    }
}

impl std::fmt::Debug for MasterCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MasterCredential")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}
