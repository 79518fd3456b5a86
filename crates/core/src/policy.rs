//! Difficulty and game-mode policy tables.
//!
//! Maps the enumerated difficulty and mode keys to concrete numeric
//! parameters. The tables are static and fully enumerated; resolving a key
//! outside the set is a [`ConfigError`], never a silent default.

use tui_simon_types::{
    Difficulty, GameMode, AI_ACCURACY, MEMORY_COMPLEXITY, SPEEDRUN_TIME_LIMIT_SECS, SURVIVAL_LIVES,
};

use crate::error::ConfigError;

/// Per-step playback speed and score bonus for a difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyProfile {
    /// Base per-step playback interval in milliseconds
    pub speed_ms: u32,
    /// Score bonus multiplier
    pub bonus: u32,
}

/// Difficulty parameter table: (speed, bonus) per key
const DIFFICULTY_TABLE: [(Difficulty, u32, u32); 4] = [
    (Difficulty::Easy, 800, 1),
    (Difficulty::Normal, 600, 2),
    (Difficulty::Hard, 400, 3),
    (Difficulty::Expert, 200, 5),
];

/// Mode-specific parameters, tagged by mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModeProfile {
    Classic,
    Speedrun { time_limit_secs: u32 },
    Survival { lives: u32 },
    Memory { complexity: u32 },
    Multiplayer,
    Ai { accuracy: f32 },
}

/// Resolved session parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub difficulty: Difficulty,
    pub mode: GameMode,
    pub profile: DifficultyProfile,
    pub mode_profile: ModeProfile,
}

/// Resolve typed difficulty and mode keys to session parameters
pub fn resolve(difficulty: Difficulty, mode: GameMode) -> SessionConfig {
    let (_, speed_ms, bonus) = DIFFICULTY_TABLE
        .iter()
        .copied()
        .find(|(key, _, _)| *key == difficulty)
        .unwrap_or(DIFFICULTY_TABLE[1]);

    let mode_profile = match mode {
        GameMode::Classic => ModeProfile::Classic,
        GameMode::Speedrun => ModeProfile::Speedrun {
            time_limit_secs: SPEEDRUN_TIME_LIMIT_SECS,
        },
        GameMode::Survival => ModeProfile::Survival {
            lives: SURVIVAL_LIVES,
        },
        GameMode::Memory => ModeProfile::Memory {
            complexity: MEMORY_COMPLEXITY,
        },
        GameMode::Multiplayer => ModeProfile::Multiplayer,
        GameMode::Ai => ModeProfile::Ai {
            accuracy: AI_ACCURACY,
        },
    };

    SessionConfig {
        difficulty,
        mode,
        profile: DifficultyProfile { speed_ms, bonus },
        mode_profile,
    }
}

/// Resolve string keys, failing on anything outside the enumerated sets
pub fn resolve_keys(difficulty: &str, mode: &str) -> Result<SessionConfig, ConfigError> {
    let difficulty = Difficulty::from_str(difficulty)
        .ok_or_else(|| ConfigError::UnknownDifficulty(difficulty.to_string()))?;
    let mode = GameMode::from_str(mode).ok_or_else(|| ConfigError::UnknownMode(mode.to_string()))?;
    Ok(resolve(difficulty, mode))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_table_values() {
        assert_eq!(
            resolve(Difficulty::Easy, GameMode::Classic).profile,
            DifficultyProfile {
                speed_ms: 800,
                bonus: 1
            }
        );
        assert_eq!(
            resolve(Difficulty::Normal, GameMode::Classic).profile,
            DifficultyProfile {
                speed_ms: 600,
                bonus: 2
            }
        );
        assert_eq!(
            resolve(Difficulty::Hard, GameMode::Classic).profile,
            DifficultyProfile {
                speed_ms: 400,
                bonus: 3
            }
        );
        assert_eq!(
            resolve(Difficulty::Expert, GameMode::Classic).profile,
            DifficultyProfile {
                speed_ms: 200,
                bonus: 5
            }
        );
    }

    #[test]
    fn mode_profiles_carry_their_parameters() {
        match resolve(Difficulty::Normal, GameMode::Speedrun).mode_profile {
            ModeProfile::Speedrun { time_limit_secs } => assert_eq!(time_limit_secs, 60),
            other => panic!("unexpected profile: {other:?}"),
        }
        match resolve(Difficulty::Normal, GameMode::Survival).mode_profile {
            ModeProfile::Survival { lives } => assert_eq!(lives, 3),
            other => panic!("unexpected profile: {other:?}"),
        }
        match resolve(Difficulty::Normal, GameMode::Ai).mode_profile {
            ModeProfile::Ai { accuracy } => assert!((accuracy - 0.85).abs() < f32::EPSILON),
            other => panic!("unexpected profile: {other:?}"),
        }
    }

    #[test]
    fn resolve_keys_accepts_known_keys() {
        let config = resolve_keys("hard", "survival").unwrap();
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.mode, GameMode::Survival);
    }

    #[test]
    fn resolve_keys_rejects_unknown_difficulty() {
        let err = resolve_keys("nightmare", "classic").unwrap_err();
        assert_eq!(err, ConfigError::UnknownDifficulty("nightmare".into()));
    }

    #[test]
    fn resolve_keys_rejects_unknown_mode() {
        let err = resolve_keys("easy", "online").unwrap_err();
        assert_eq!(err, ConfigError::UnknownMode("online".into()));
    }
}
