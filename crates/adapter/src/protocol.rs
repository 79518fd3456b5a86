//! Persisted data shapes.
//!
//! Serde DTOs mirroring core state for storage. Core types stay free of
//! serialization concerns; conversions live here. Colors travel as their
//! lowercase display names so the files stay human-readable and stable
//! across enum reordering.

use serde::{Deserialize, Serialize};
use tui_simon_types::{Color, Difficulty, GameMode, GameSummary, MoveRecord};

/// Cross-session aggregate stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsProfile {
    pub games_played: u32,
    pub high_score: u32,
    pub total_score: u64,
    pub average_level: u32,
    pub perfect_games: u32,
    pub achievements: Vec<String>,
}

impl Default for StatsProfile {
    fn default() -> Self {
        Self {
            games_played: 0,
            high_score: 0,
            total_score: 0,
            average_level: 0,
            perfect_games: 0,
            achievements: Vec::new(),
        }
    }
}

impl StatsProfile {
    /// Fold a finished session into the aggregates
    pub fn record_session(&mut self, summary: &GameSummary) {
        self.high_score = self.high_score.max(summary.score);
        self.total_score += summary.score as u64;
        if summary.accuracy >= 100.0 {
            self.perfect_games += 1;
        }
        if self.games_played > 0 {
            self.average_level =
                (self.total_score as f64 / self.games_played as f64).round() as u32;
        }
    }

    /// Merge earned achievement ids, keeping insertion order, no duplicates
    pub fn merge_achievements(&mut self, earned: &[String]) {
        for id in earned {
            if !self.achievements.contains(id) {
                self.achievements.push(id.clone());
            }
        }
    }
}

/// One recorded move in a stored pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternMove {
    pub color: String,
    pub at_ms: u64,
    pub reaction_ms: u32,
}

impl From<&MoveRecord> for PatternMove {
    fn from(record: &MoveRecord) -> Self {
        Self {
            color: record.color.as_str().to_string(),
            at_ms: record.at_ms,
            reaction_ms: record.reaction_ms,
        }
    }
}

impl PatternMove {
    /// Back-convert to a core record; unknown color names are dropped by the
    /// caller
    pub fn to_record(&self) -> Option<MoveRecord> {
        Color::from_str(&self.color).map(|color| MoveRecord {
            color,
            at_ms: self.at_ms,
            reaction_ms: self.reaction_ms,
        })
    }
}

/// A named, durable recorded pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedPattern {
    pub name: String,
    pub moves: Vec<PatternMove>,
    pub difficulty: String,
    pub mode: String,
}

impl RecordedPattern {
    pub fn new(
        name: impl Into<String>,
        moves: &[MoveRecord],
        difficulty: Difficulty,
        mode: GameMode,
    ) -> Self {
        Self {
            name: name.into(),
            moves: moves.iter().map(PatternMove::from).collect(),
            difficulty: difficulty.as_str().to_string(),
            mode: mode.as_str().to_string(),
        }
    }
}

/// Persisted user settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sound_enabled: bool,
    pub master_volume: f32,
    pub theme: String,
    pub difficulty: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            master_volume: 0.7,
            theme: "dark".to_string(),
            difficulty: "normal".to_string(),
        }
    }
}
