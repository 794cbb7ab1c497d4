//! `datavault keygen` — print a fresh random encryption key.

use std::io::{self, IsTerminal};

use crate::cli::output;
use crate::config::settings::KEY_ENV_VAR;
use crate::crypto::ProcessKey;
use crate::errors::Result;

/// Execute the `keygen` command.
///
/// Only the key goes to stdout so it can be captured with `$(...)`.
pub fn execute() -> Result<()> {
    let key = ProcessKey::generate();
    println!("{}", key.to_base64().as_str());

    if io::stdout().is_terminal() {
        output::tip(&format!(
            "Set {KEY_ENV_VAR} (or encryption_key in .datavault.toml) to this value."
        ));
    }

    Ok(())
}
