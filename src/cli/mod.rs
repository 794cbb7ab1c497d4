//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Settings;
use crate::errors::Result;

/// Environment variable holding the diagnostic log filter.
pub const LOG_ENV_VAR: &str = "DATAVAULT_LOG";

/// DataVault CLI: in-memory, passkey-protected data vault.
#[derive(Parser)]
#[command(
    name = "datavault",
    about = "Passkey-protected encrypted data vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory containing .datavault.toml (default: current directory)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Start an interactive session (store, retrieve, login)
    Shell,

    /// Generate a random encryption key for DATAVAULT_KEY
    Keygen,
}

/// Load settings from the `--config` directory, or the current directory.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    let dir = match &cli.config {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir()?,
    };
    Settings::load(&dir)
}

/// Install the diagnostic subscriber.
///
/// Filter comes from `DATAVAULT_LOG` (e.g. `datavault=debug`) and defaults
/// to `warn`, so the interactive session stays quiet.  Events go to stderr.
pub fn init_logging() {
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
