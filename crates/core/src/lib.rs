//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and timing
//! logic. It has **zero dependencies** on UI, audio, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical sessions (for tests)
//! - **Testable**: Comprehensive unit tests for all game rules
//! - **Portable**: Can run in any environment (terminal, headless)
//!
//! # Module Structure
//!
//! - [`rng`]: seedable LCG backing sequence growth and AI rolls
//! - [`policy`]: difficulty/mode tables resolved into session parameters
//! - [`scoring`]: round points, combo tiers, streak/accuracy bookkeeping
//! - [`powerup`]: per-kind availability, cost and cooldown state
//! - [`achievement`]: ordered rule table evaluated after scoring events
//! - [`ai`]: weighted coin-flip opponent against the shared sequence
//! - [`session`]: the phase machine tying everything together
//! - [`error`]: config and power-up error taxonomy
//!
//! # Timing
//!
//! The session uses a fixed timestep system: every deferred step (playback,
//! round advance, power-up windows, cooldowns, speedrun countdown, AI turns)
//! is a millisecond countdown advanced by [`session::Session::tick`]. Call it
//! every frame with elapsed time; pause freezes it wholesale.
//!
//! # Example
//!
//! ```
//! use tui_simon_core::{policy, Session};
//! use tui_simon_types::{Difficulty, GameMode, Phase, TICK_MS};
//!
//! let config = policy::resolve(Difficulty::Normal, GameMode::Classic);
//! let mut session = Session::new(config, 12345);
//! session.start();
//! assert_eq!(session.level(), 1);
//!
//! // Drive playback until input opens, then answer correctly.
//! while session.phase() != Phase::AwaitingInput {
//!     session.tick(TICK_MS);
//! }
//! let first = session.sequence()[0];
//! session.submit(first);
//! assert_eq!(session.score(), 22);
//! ```

pub mod achievement;
pub mod ai;
pub mod error;
pub mod policy;
pub mod powerup;
pub mod rng;
pub mod scoring;
pub mod session;

pub use tui_simon_types as types;

// Re-export commonly used types for convenience
pub use achievement::{evaluate, Achievement, EvalContext};
pub use ai::{AiOpponent, AiTurn};
pub use error::{ConfigError, PowerupDenied};
pub use policy::{resolve, resolve_keys, DifficultyProfile, ModeProfile, SessionConfig};
pub use powerup::{PowerupBank, PowerupSlot};
pub use rng::{SequenceGenerator, SimpleRng};
pub use scoring::{calculate_round_score, ProgressTracker, Rank, RoundScore};
pub use session::{MultiplayerSlot, MultiplayerState, Session};
