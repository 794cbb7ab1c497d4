use thiserror::Error;

/// All errors that can occur in DataVault.
#[derive(Debug, Error)]
pub enum DataVaultError {
    // --- Vault errors ---
    #[error("{0}")]
    Validation(String),

    #[error("{}", auth_message(.remaining))]
    Authentication {
        /// Attempts left before lockout; `None` for master-password failures.
        remaining: Option<u32>,
    },

    #[error("Too many failed attempts — reauthorize with the master password to continue")]
    LockedOut,

    #[error("Ciphertext failed authentication — it was tampered with or not produced by this vault")]
    Integrity,

    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Key error: {0}")]
    KeyError(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

fn auth_message(remaining: &Option<u32>) -> String {
    match remaining {
        Some(n) => format!("Incorrect passkey! Attempts remaining: {n}"),
        None => "Incorrect password!".to_string(),
    }
}

/// Convenience type alias for DataVault results.
pub type Result<T> = std::result::Result<T, DataVaultError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authentication_message_includes_remaining_attempts() {
        let err = DataVaultError::Authentication { remaining: Some(2) };
        assert_eq!(err.to_string(), "Incorrect passkey! Attempts remaining: 2");
    }

    #[test]
    fn master_password_failure_has_no_attempt_count() {
        let err = DataVaultError::Authentication { remaining: None };
        assert_eq!(err.to_string(), "Incorrect password!");
    }
}
