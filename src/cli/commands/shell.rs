//! `datavault shell` — interactive session over one in-memory vault.
//!
//! Menu entries mirror the vault surface:
//! - Home          — short description
//! - Store Data    — encrypt data under a passkey, print the handle
//! - Retrieve Data — decrypt with handle + passkey (refused while locked)
//! - Login         — clear a lockout with the master password
//!
//! The vault lives for the duration of the session and is dropped on quit.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{load_settings, Cli};
use crate::errors::{DataVaultError, Result};
use crate::vault::{CiphertextHandle, Vault};

/// Execute the `shell` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = load_settings(cli)?;

    if settings.encryption_key.is_none() {
        output::warning("No encryption key configured — using a random key for this session.");
        output::tip("Run `datavault keygen` and set DATAVAULT_KEY to keep handles valid across runs.");
    }
    if settings.uses_default_master_password() {
        output::warning("Using the built-in master password. Set DATAVAULT_MASTER_PASSWORD.");
    }

    let vault = Vault::new(settings.vault_config()?);
    Session::new(vault).run()
}

/// One entry of the navigation menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Home,
    StoreData,
    RetrieveData,
    Login,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 5] = [
        MenuItem::Home,
        MenuItem::StoreData,
        MenuItem::RetrieveData,
        MenuItem::Login,
        MenuItem::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Home => "Home",
            MenuItem::StoreData => "Store Data",
            MenuItem::RetrieveData => "Retrieve Data",
            MenuItem::Login => "Login",
            MenuItem::Quit => "Quit",
        }
    }
}

/// Interactive session state: the vault plus input handling rules.
///
/// The non-interactive methods (`store`, `retrieve`, `login`) hold the
/// session's input rules and are what the prompt loop calls.
pub struct Session {
    vault: Vault,
}

impl Session {
    pub fn new(vault: Vault) -> Self {
        Self { vault }
    }

    pub fn vault(&self) -> &Vault {
        &self.vault
    }

    /// Store data under a passkey.
    pub fn store(&mut self, data: &str, passkey: &str) -> Result<CiphertextHandle> {
        self.vault.store(data, passkey)
    }

    /// Retrieve data by its handle text and passkey.
    ///
    /// The lockout is checked before the inputs are even looked at; a
    /// missing field is a validation error and does not count as an
    /// attempt.
    pub fn retrieve(&mut self, handle: &str, passkey: &str) -> Result<Zeroizing<String>> {
        if self.vault.is_locked() {
            return Err(DataVaultError::LockedOut);
        }
        if handle.trim().is_empty() || passkey.is_empty() {
            return Err(DataVaultError::Validation("Both fields are required!".into()));
        }
        self.vault.retrieve_encoded(handle, passkey).map(Zeroizing::new)
    }

    /// Reauthorize with the master password.
    pub fn login(&mut self, master_password: &str) -> Result<()> {
        self.vault.reauthorize(master_password)
    }

    // ------------------------------------------------------------------
    // Prompt loop
    // ------------------------------------------------------------------

    /// Run the menu loop until the user quits.
    ///
    /// Vault errors are shown and the loop continues; a failing terminal
    /// prompt ends the session.
    pub fn run(&mut self) -> Result<()> {
        output::info("Secure Data Encryption System");

        loop {
            let choice = prompt_menu()?;
            let result = match choice {
                MenuItem::Home => {
                    show_home();
                    Ok(())
                }
                MenuItem::StoreData => self.store_interactive(),
                MenuItem::RetrieveData => self.retrieve_interactive(),
                MenuItem::Login => self.login_interactive(),
                MenuItem::Quit => return Ok(()),
            };

            match result {
                Ok(()) => {}
                Err(e @ DataVaultError::CommandFailed(_)) => return Err(e),
                Err(e) => output::error(&e.to_string()),
            }
        }
    }

    fn store_interactive(&mut self) -> Result<()> {
        let data = Zeroizing::new(prompt_text("Enter data")?);
        let passkey = prompt_secret("Enter passkey")?;

        let handle = self.store(&data, &passkey)?;
        output::success("Data stored securely!");
        output::handle(&handle);
        output::tip("Keep this value: it is the only way to retrieve your data.");
        Ok(())
    }

    fn retrieve_interactive(&mut self) -> Result<()> {
        if self.vault.is_locked() {
            output::warning("Too many failed attempts! Please reauthorize.");
            output::tip("Choose Login from the menu.");
            return Ok(());
        }

        let handle = prompt_text("Enter encrypted data")?;
        let passkey = prompt_secret("Enter passkey")?;

        match self.retrieve(&handle, &passkey) {
            Ok(plaintext) => {
                output::success(&format!("Decrypted data: {}", plaintext.as_str()));
                Ok(())
            }
            Err(e) if self.vault.is_locked() => {
                output::error(&e.to_string());
                output::warning("Too many failed attempts! Redirecting to login.");
                self.login_interactive()
            }
            Err(e) => Err(e),
        }
    }

    fn login_interactive(&mut self) -> Result<()> {
        let password = prompt_secret("Enter master password")?;
        self.login(&password)?;
        output::success("Reauthorized successfully!");
        Ok(())
    }
}

fn show_home() {
    output::info("Use this app to securely store and retrieve data using unique passkeys.");
    output::tip("Store Data returns an encrypted handle; keep it to retrieve the data later.");
}

fn prompt_menu() -> Result<MenuItem> {
    let labels: Vec<&str> = MenuItem::ALL.iter().map(|item| item.label()).collect();
    let index = dialoguer::Select::new()
        .with_prompt("Navigation")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(|e| DataVaultError::CommandFailed(format!("menu prompt: {e}")))?;
    Ok(MenuItem::ALL[index])
}

fn prompt_text(prompt: &str) -> Result<String> {
    dialoguer::Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| DataVaultError::CommandFailed(format!("input prompt: {e}")))
}

/// Hidden-input prompt; the value is never echoed.
fn prompt_secret(prompt: &str) -> Result<Zeroizing<String>> {
    dialoguer::Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| DataVaultError::CommandFailed(format!("password prompt: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::kdf::{Argon2Params, MasterCredential};
    use crate::crypto::ProcessKey;
    use crate::vault::VaultConfig;

    fn session() -> Session {
        let params = Argon2Params {
            memory_kib: 8_192,
            iterations: 1,
            parallelism: 1,
        };
        let master = MasterCredential::new("admin123", params).unwrap();
        Session::new(Vault::new(VaultConfig::new(ProcessKey::generate(), master)))
    }

    #[test]
    fn menu_labels_are_unique() {
        let mut labels: Vec<_> = MenuItem::ALL.iter().map(|m| m.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), MenuItem::ALL.len());
        assert_eq!(MenuItem::ALL[0], MenuItem::Home);
    }

    #[test]
    fn retrieve_by_handle_text() {
        let mut s = session();
        let handle = s.store("hello world", "secret1").unwrap();
        let text = handle.to_string();
        assert_eq!(s.retrieve(&text, "secret1").unwrap().as_str(), "hello world");
    }

    #[test]
    fn missing_fields_do_not_count_as_attempts() {
        let mut s = session();
        let handle = s.store("data", "k").unwrap().to_string();

        assert!(matches!(
            s.retrieve("", "k"),
            Err(DataVaultError::Validation(_))
        ));
        assert!(matches!(
            s.retrieve(&handle, ""),
            Err(DataVaultError::Validation(_))
        ));
        assert_eq!(s.vault().failed_attempts(), 0);
    }

    #[test]
    fn locked_session_reports_lockout_before_validation() {
        let mut s = session();
        let handle = s.store("data", "k").unwrap().to_string();
        for _ in 0..3 {
            let _ = s.retrieve(&handle, "wrong");
        }
        assert!(matches!(s.retrieve("", ""), Err(DataVaultError::LockedOut)));

        s.login("admin123").unwrap();
        assert_eq!(s.retrieve(&handle, "k").unwrap().as_str(), "data");
    }

    #[test]
    fn wrong_master_password_keeps_lock() {
        let mut s = session();
        let handle = s.store("data", "k").unwrap().to_string();
        for _ in 0..3 {
            let _ = s.retrieve(&handle, "wrong");
        }
        assert!(s.login("admin").is_err());
        assert!(s.vault().is_locked());
    }
}
