//! Error taxonomy for the game core.
//!
//! Mismatches, life loss and game over are ordinary state transitions, not
//! errors. The only error conditions the core reports are unknown config keys
//! and denied power-up uses.

use thiserror::Error;

/// Fatal configuration error at session start
///
/// The core never silently defaults an unknown key; UI layers may default
/// before calling in.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown difficulty key: {0:?}")]
    UnknownDifficulty(String),
    #[error("unknown game mode key: {0:?}")]
    UnknownMode(String),
}

/// Recoverable power-up denial
///
/// Reported to the caller for user feedback; no state is mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PowerupDenied {
    #[error("power-up not available")]
    NotAvailable,
    #[error("power-up on cooldown")]
    OnCooldown,
    #[error("insufficient score")]
    InsufficientScore,
    #[error("no active session")]
    SessionInactive,
}

impl PowerupDenied {
    /// Stable reason code for presentation and logging
    pub fn reason(self) -> &'static str {
        match self {
            PowerupDenied::NotAvailable => "not_available",
            PowerupDenied::OnCooldown => "on_cooldown",
            PowerupDenied::InsufficientScore => "insufficient_score",
            PowerupDenied::SessionInactive => "session_inactive",
        }
    }

    /// Human-readable feedback line
    pub fn message(self) -> &'static str {
        match self {
            PowerupDenied::NotAvailable => "power-up is not ready",
            PowerupDenied::OnCooldown => "power-up is cooling down",
            PowerupDenied::InsufficientScore => "not enough points",
            PowerupDenied::SessionInactive => "start a game first",
        }
    }
}
