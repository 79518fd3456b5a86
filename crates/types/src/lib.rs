//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, persistence DTOs).
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds unless noted:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `FLASH_MS` | 300 | Pad flash duration during playback and input |
//! | `ROUND_ADVANCE_DELAY_MS` | 1000 | Pause between a completed round and the next |
//! | `SHIELD_DURATION_MS` | 15000 | Shield power-up arming window |
//! | `DOUBLE_POINTS_DURATION_MS` | 20000 | Double-points power-up window |
//! | `SLOW_DURATION_MS` | 10000 | Slow power-up window |
//! | `COOLDOWN_TICK_MS` | 1000 | Power-up cooldown decrement interval |
//! | `SPEEDRUN_TICK_MS` | 1000 | Speedrun countdown decrement interval |
//!
//! # Difficulty Table
//!
//! Per-step playback speed and score bonus multiplier:
//!
//! | Difficulty | Speed | Bonus |
//! |------------|-------|-------|
//! | easy | 800ms | ×1 |
//! | normal | 600ms | ×2 |
//! | hard | 400ms | ×3 |
//! | expert | 200ms | ×5 |
//!
//! # Examples
//!
//! ```
//! use tui_simon_types::{Color, Difficulty, GameMode, Action};
//!
//! // Parse a color from its display name (case-insensitive)
//! let color = Color::from_str("Red").unwrap();
//! assert_eq!(color, Color::Red);
//!
//! // Difficulty and mode keys parse the same way
//! assert_eq!(Difficulty::from_str("expert"), Some(Difficulty::Expert));
//! assert_eq!(GameMode::from_str("speedrun"), Some(GameMode::Speedrun));
//!
//! // Actions are the single dispatch currency for keyboard and voice input
//! let action = Action::Press(Color::Green);
//! assert_eq!(action.as_str(), "green");
//! ```

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Number of pad colors
pub const COLOR_COUNT: usize = 4;

/// Pad flash duration for playback steps and accepted input
pub const FLASH_MS: u32 = 300;

/// Delay between round completion and the next sequence playback
pub const ROUND_ADVANCE_DELAY_MS: u32 = 1000;

/// Shield power-up arming window
pub const SHIELD_DURATION_MS: u32 = 15_000;

/// Double-points power-up window
pub const DOUBLE_POINTS_DURATION_MS: u32 = 20_000;

/// Slow power-up window
pub const SLOW_DURATION_MS: u32 = 10_000;

/// Slow power-up speed scale, expressed as a ratio (3/2 = 1.5x slower playback)
pub const SLOW_FACTOR_NUMERATOR: u32 = 3;

/// Slow power-up speed scale denominator
pub const SLOW_FACTOR_DENOMINATOR: u32 = 2;

/// Base points for a completed round, before multipliers
pub const BASE_ROUND_POINTS: u32 = 10;

/// Combo length at which round points gain the 1.5x combo tier
pub const COMBO_TIER_MIN: u32 = 5;

/// Combo length at which round points gain the 2x legendary tier
pub const LEGENDARY_TIER_MIN: u32 = 10;

/// Sliding accuracy window length (correctness bits)
pub const ACCURACY_WINDOW_LEN: usize = 100;

/// Power-up cooldown decrement interval
pub const COOLDOWN_TICK_MS: u32 = 1000;

/// Speedrun countdown decrement interval
pub const SPEEDRUN_TICK_MS: u32 = 1000;

/// Speedrun mode time limit in seconds
pub const SPEEDRUN_TIME_LIMIT_SECS: u32 = 60;

/// Survival mode starting lives
pub const SURVIVAL_LIVES: u32 = 3;

/// Memory mode pattern complexity (carried in config, reserved)
pub const MEMORY_COMPLEXITY: u32 = 2;

/// AI opponent answer accuracy
pub const AI_ACCURACY: f32 = 0.85;

/// Points the AI opponent earns per correct step
pub const AI_STEP_POINTS: u32 = 10;

/// Minimum randomized delay before an AI turn resolves
pub const AI_TURN_DELAY_MIN_MS: u32 = 1000;

/// Maximum randomized delay before an AI turn resolves
pub const AI_TURN_DELAY_MAX_MS: u32 = 3000;

/// The AI only risks a wrong answer once the sequence is longer than this
pub const AI_ERROR_FREE_SEQUENCE_LEN: usize = 2;


/// The four pad colors
///
/// No ordering semantics beyond equality; the numeric discriminant is only
/// used for uniform random draws and rendering layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
}

/// All pad colors in rendering order
pub const COLORS: [Color; COLOR_COUNT] = [Color::Red, Color::Blue, Color::Green, Color::Yellow];

impl Color {
    /// Parse a color from its display name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_simon_types::Color;
    ///
    /// assert_eq!(Color::from_str("red"), Some(Color::Red));
    /// assert_eq!(Color::from_str("YELLOW"), Some(Color::Yellow));
    /// assert_eq!(Color::from_str("purple"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(Color::Red),
            "blue" => Some(Color::Blue),
            "green" => Some(Color::Green),
            "yellow" => Some(Color::Yellow),
            _ => None,
        }
    }

    /// Lowercase display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
        }
    }

    /// Color for a uniform draw index in `0..4`
    pub fn from_index(index: usize) -> Self {
        COLORS[index % COLOR_COUNT]
    }
}

/// Difficulty keys, fully enumerated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
    Expert,
}

impl Difficulty {
    /// Parse a difficulty key (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            "expert" => Some(Difficulty::Expert),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        }
    }
}

/// Game mode keys, fully enumerated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    Classic,
    Speedrun,
    Survival,
    Memory,
    Multiplayer,
    Ai,
}

impl GameMode {
    /// Parse a mode key (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(GameMode::Classic),
            "speedrun" => Some(GameMode::Speedrun),
            "survival" => Some(GameMode::Survival),
            "memory" => Some(GameMode::Memory),
            "multiplayer" => Some(GameMode::Multiplayer),
            "ai" => Some(GameMode::Ai),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::Speedrun => "speedrun",
            GameMode::Survival => "survival",
            GameMode::Memory => "memory",
            GameMode::Multiplayer => "multiplayer",
            GameMode::Ai => "ai",
        }
    }
}

/// The six power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerupKind {
    Slow,
    Skip,
    Hint,
    Shield,
    Double,
    Reveal,
}

/// All power-up kinds in slot order
pub const POWERUP_KINDS: [PowerupKind; 6] = [
    PowerupKind::Slow,
    PowerupKind::Skip,
    PowerupKind::Hint,
    PowerupKind::Shield,
    PowerupKind::Double,
    PowerupKind::Reveal,
];

impl PowerupKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "slow" => Some(PowerupKind::Slow),
            "skip" => Some(PowerupKind::Skip),
            "hint" => Some(PowerupKind::Hint),
            "shield" => Some(PowerupKind::Shield),
            "double" => Some(PowerupKind::Double),
            "reveal" => Some(PowerupKind::Reveal),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerupKind::Slow => "slow",
            PowerupKind::Skip => "skip",
            PowerupKind::Hint => "hint",
            PowerupKind::Shield => "shield",
            PowerupKind::Double => "double",
            PowerupKind::Reveal => "reveal",
        }
    }

    /// Slot index for array-backed per-kind state
    pub fn index(&self) -> usize {
        match self {
            PowerupKind::Slow => 0,
            PowerupKind::Skip => 1,
            PowerupKind::Hint => 2,
            PowerupKind::Shield => 3,
            PowerupKind::Double => 4,
            PowerupKind::Reveal => 5,
        }
    }
}

/// Session phase
///
/// `Paused` is deliberately not a phase: it is an orthogonal flag so that a
/// paused session resumes exactly where it left off (mid-playback included).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No session running; waiting for start
    Idle,
    /// Sequence playback in progress; input is ignored
    Showing,
    /// Player reproduces the sequence
    AwaitingInput,
    /// Round completed; waiting out the inter-round delay
    Advancing,
    /// Terminal; stats frozen until the next start
    GameOver,
}

/// Actions that can be applied to a session
///
/// These are the single dispatch currency for keyboard input, voice commands
/// and programmatic drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start (or restart) a session
    Start,
    /// Toggle pause
    Pause,
    /// Reset to idle
    Reset,
    /// Press a pad
    Press(Color),
    /// Use a power-up
    Powerup(PowerupKind),
}

impl Action {
    /// Parse an action name (for command tables and protocols)
    ///
    /// Color names parse to pad presses; power-up names to power-up uses.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_simon_types::{Action, Color, PowerupKind};
    ///
    /// assert_eq!(Action::from_str("start"), Some(Action::Start));
    /// assert_eq!(Action::from_str("green"), Some(Action::Press(Color::Green)));
    /// assert_eq!(Action::from_str("shield"), Some(Action::Powerup(PowerupKind::Shield)));
    /// assert_eq!(Action::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" => Some(Action::Start),
            "pause" => Some(Action::Pause),
            "reset" => Some(Action::Reset),
            other => Color::from_str(other)
                .map(Action::Press)
                .or_else(|| PowerupKind::from_str(other).map(Action::Powerup)),
        }
    }

    /// Lowercase action name
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::Pause => "pause",
            Action::Reset => "reset",
            Action::Press(color) => color.as_str(),
            Action::Powerup(kind) => kind.as_str(),
        }
    }
}

/// Combo tier reached by a completed round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComboTier {
    None,
    /// Combo of 5+: 1.5x round points
    Combo,
    /// Combo of 10+: 2x round points
    Legendary,
}

impl ComboTier {
    /// Banner text for the presentation layer, if any
    pub fn banner(&self) -> Option<&'static str> {
        match self {
            ComboTier::None => None,
            ComboTier::Combo => Some("COMBO!"),
            ComboTier::Legendary => Some("LEGENDARY COMBO!"),
        }
    }
}

/// Audio cue kinds the core may request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueKind {
    /// The tone assigned to a pad
    Pad(Color),
    Success,
    Error,
    Achievement,
}

/// Frozen end-of-session summary, emitted with [`Effect::SessionEnded`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameSummary {
    pub score: u32,
    pub level: u32,
    pub average_reaction_ms: u32,
    pub accuracy: f32,
    pub new_high_score: bool,
}

/// A single recorded move (pattern recorder)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub color: Color,
    /// Session clock timestamp of the press
    pub at_ms: u64,
    /// Time since entering input phase or the previous press
    pub reaction_ms: u32,
}

/// Effect requests emitted by the core for the presentation layer
///
/// Fire-and-forget: the core never consumes a return value. Drained by
/// observers exactly once via the session's effect queue.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Light a pad
    Flash { color: Color, duration_ms: u32 },
    /// Spawn a particle burst at a pad
    Particles { color: Color },
    /// Play an audio cue
    Cue { kind: CueKind, duration_ms: u32 },
    /// Toast notification
    Announce { title: String, body: String },
    /// Combo banner for a completed round
    ComboBanner(ComboTier),
    /// Newly earned achievement (also announced in table order)
    AchievementUnlocked {
        id: &'static str,
        title: &'static str,
        description: &'static str,
    },
    /// Terminal game over with frozen stats
    SessionEnded(GameSummary),
}

/// Descriptor returned by a successful power-up use
///
/// The caller renders the effect; the state mutation already happened.
#[derive(Debug, Clone, PartialEq)]
pub enum PowerupEffect {
    /// Playback slowed by 1.5x for the window
    Slowed { duration_ms: u32 },
    /// Current round force-completed
    Skipped,
    /// Next expected pad, if the session is collecting input
    Hint { next: Option<Color> },
    /// One-shot mismatch absorption armed
    ShieldArmed { duration_ms: u32 },
    /// Score doubling armed
    DoubleArmed { duration_ms: u32 },
    /// Full current sequence, consumable once
    Revealed { sequence: Vec<Color> },
}
