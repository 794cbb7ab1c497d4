//! Failed-attempt counter and lockout state.
//!
//! The counter is shared by every record in a vault: three consecutive
//! failed retrievals against any mix of records lock the whole vault.
//! A vault is locked while `failed_attempts >= max_attempts` and it has not
//! been reauthorized.

/// Default number of consecutive failures that lock a vault.
pub const MAX_FAILED_ATTEMPTS: u32 = 3;

/// Observable lockout state of a vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Open,
    Locked,
}

#[derive(Debug, Clone)]
pub struct Lockout {
    failed_attempts: u32,
    reauthorized: bool,
    max_attempts: u32,
}

impl Lockout {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            failed_attempts: 0,
            reauthorized: false,
            max_attempts,
        }
    }

    pub fn state(&self) -> LockState {
        if self.failed_attempts >= self.max_attempts && !self.reauthorized {
            LockState::Locked
        } else {
            LockState::Open
        }
    }

    pub fn is_locked(&self) -> bool {
        self.state() == LockState::Locked
    }

    /// Count a failed retrieval; returns the attempts left before lockout.
    pub fn record_failure(&mut self) -> u32 {
        self.failed_attempts = self.failed_attempts.saturating_add(1);
        self.remaining()
    }

    /// A successful retrieval clears the counter but leaves `reauthorized`.
    pub fn record_success(&mut self) {
        self.failed_attempts = 0;
    }

    pub fn reauthorize(&mut self) {
        self.failed_attempts = 0;
        self.reauthorized = true;
    }

    pub fn remaining(&self) -> u32 {
        self.max_attempts.saturating_sub(self.failed_attempts)
    }

    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }

    pub fn is_reauthorized(&self) -> bool {
        self.reauthorized
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

impl Default for Lockout {
    fn default() -> Self {
        Self::new(MAX_FAILED_ATTEMPTS)
    }
}
