use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::crypto::kdf::{Argon2Params, MasterCredential};
use crate::crypto::keys::ProcessKey;
use crate::errors::{DataVaultError, Result};
use crate::vault::VaultConfig;

/// Environment variable that overrides `encryption_key`.
pub const KEY_ENV_VAR: &str = "DATAVAULT_KEY";

/// Environment variable that overrides `master_password`.
pub const MASTER_PASSWORD_ENV_VAR: &str = "DATAVAULT_MASTER_PASSWORD";

/// Master password used when none is configured.
pub const DEFAULT_MASTER_PASSWORD: &str = "admin123";

/// Process-level configuration, loaded from `.datavault.toml`.
///
/// Every field has a sensible default so DataVault works out-of-the-box
/// without any config file at all.  The key and master password can also
/// come from the environment, which wins over the file.
#[derive(Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Base64-encoded 32-byte AES key.  A random key is generated at
    /// startup when unset, so handles only work within one process.
    #[serde(default)]
    pub encryption_key: Option<String>,

    /// Master password that clears a lockout.
    #[serde(default = "default_master_password")]
    pub master_password: String,

    /// Consecutive failed retrievals before lockout (default: 3).
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Argon2 memory cost in KiB for the master credential (default: 19 MB).
    #[serde(default = "default_argon2_memory_kib")]
    pub argon2_memory_kib: u32,

    /// Argon2 iteration count (default: 2).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,

    /// Argon2 parallelism degree (default: 1).
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_master_password() -> String {
    DEFAULT_MASTER_PASSWORD.to_string()
}

fn default_max_attempts() -> u32 {
    crate::vault::MAX_FAILED_ATTEMPTS
}

fn default_argon2_memory_kib() -> u32 {
    19_456 // 19 MB
}

fn default_argon2_iterations() -> u32 {
    2
}

fn default_argon2_parallelism() -> u32 {
    1
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            encryption_key: None,
            master_password: default_master_password(),
            max_attempts: default_max_attempts(),
            argon2_memory_kib: default_argon2_memory_kib(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
        }
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("encryption_key", &self.encryption_key.as_ref().map(|_| "***"))
            .field("master_password", &"***")
            .field("max_attempts", &self.max_attempts)
            .field("argon2_memory_kib", &self.argon2_memory_kib)
            .field("argon2_iterations", &self.argon2_iterations)
            .field("argon2_parallelism", &self.argon2_parallelism)
            .finish()
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    pub const FILE_NAME: &'static str = ".datavault.toml";

    /// Load settings from `<project_dir>/.datavault.toml`, then apply
    /// `DATAVAULT_KEY` / `DATAVAULT_MASTER_PASSWORD` from the environment.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let mut settings = Self::load_file(project_dir)?;
        settings.apply_env(|name| std::env::var(name).ok());
        Ok(settings)
    }

    /// Load settings from `<project_dir>/.datavault.toml` only.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load_file(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            DataVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Override the key and master password from an environment lookup.
    ///
    /// Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(KEY_ENV_VAR).filter(|v| !v.is_empty()) {
            self.encryption_key = Some(key);
        }
        if let Some(pw) = lookup(MASTER_PASSWORD_ENV_VAR).filter(|v| !v.is_empty()) {
            self.master_password = pw;
        }
    }

    /// Returns `true` if the built-in demo master password is in effect.
    pub fn uses_default_master_password(&self) -> bool {
        self.master_password == DEFAULT_MASTER_PASSWORD
    }

    /// Convert the Argon2 settings into crypto-layer params.
    pub fn argon2_params(&self) -> Argon2Params {
        Argon2Params {
            memory_kib: self.argon2_memory_kib,
            iterations: self.argon2_iterations,
            parallelism: self.argon2_parallelism,
        }
    }

    /// Build the runtime vault configuration.
    ///
    /// Parses the configured key (or generates one) and derives the
    /// master credential.
    pub fn vault_config(&self) -> Result<VaultConfig> {
        if self.max_attempts < 1 {
            return Err(DataVaultError::ConfigError(
                "max_attempts must be at least 1".into(),
            ));
        }

        let key = match &self.encryption_key {
            Some(encoded) => ProcessKey::from_base64(encoded)?,
            None => ProcessKey::generate(),
        };
        let master = MasterCredential::new(&self.master_password, self.argon2_params())?;

        Ok(VaultConfig::new(key, master).with_max_attempts(self.max_attempts))
    }
}

// ── Tests ────────────────────────────────────────────────────────────
