//! Vault module — in-memory, passkey-gated encrypted storage.
//!
//! This module provides:
//! - `Record` and `CiphertextHandle` types (`record`)
//! - The failed-attempt counter and lockout state (`lockout`)
//! - The `Vault` itself with store / retrieve / reauthorize (`store`)

pub mod lockout;
pub mod record;
pub mod store;

// Re-export the most commonly used items.
pub use lockout::{LockState, MAX_FAILED_ATTEMPTS};
pub use record::{CiphertextHandle, Record};
pub use store::{Vault, VaultConfig};
