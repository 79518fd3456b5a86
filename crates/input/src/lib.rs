//! Input module (session-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events and recognized voice transcripts into
//! [`tui_simon_types::Action`], leaving dispatch to the session.

pub mod map;
pub mod voice;

pub use tui_simon_types as types;

pub use map::{handle_key_event, should_quit};
pub use voice::{classify, VOICE_COMMANDS};
