//! Scoring module - round points, combo tiers, streak/accuracy bookkeeping.
//!
//! Round points follow the original ruleset:
//! - base points are `10 * bonus` (bonus from the difficulty profile);
//! - a combo of 10+ doubles the points (legendary tier), 5+ applies 1.5x;
//! - an armed double-points power-up doubles the result again;
//! - the final value is rounded to the nearest integer.

use arrayvec::ArrayVec;
use tui_simon_types::{
    ComboTier, ACCURACY_WINDOW_LEN, BASE_ROUND_POINTS, COMBO_TIER_MIN, LEGENDARY_TIER_MIN,
};

/// Result of scoring a completed round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundScore {
    pub points: u32,
    pub tier: ComboTier,
}

/// Calculate points for a completed round
///
/// Pure; the tracker applies the result.
pub fn calculate_round_score(bonus: u32, combo: u32, double_points: bool) -> RoundScore {
    let mut points = (BASE_ROUND_POINTS * bonus) as f64;

    let tier = if combo >= LEGENDARY_TIER_MIN {
        points *= 2.0;
        ComboTier::Legendary
    } else if combo >= COMBO_TIER_MIN {
        points *= 1.5;
        ComboTier::Combo
    } else {
        ComboTier::None
    };

    if double_points {
        points *= 2.0;
    }

    RoundScore {
        points: points.round() as u32,
        tier,
    }
}

/// Player rank derived from the profile high score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rank {
    Rookie,
    Novice,
    Intermediate,
    Advanced,
    Expert,
    Master,
    Grandmaster,
}

/// Monotone rank threshold table: minimum high score per rank
const RANK_THRESHOLDS: [(u32, Rank); 6] = [
    (5000, Rank::Grandmaster),
    (3000, Rank::Master),
    (2000, Rank::Expert),
    (1000, Rank::Advanced),
    (500, Rank::Intermediate),
    (100, Rank::Novice),
];

impl Rank {
    /// Rank for a high score
    pub fn from_score(high_score: u32) -> Self {
        RANK_THRESHOLDS
            .iter()
            .find(|(min, _)| high_score >= *min)
            .map(|(_, rank)| *rank)
            .unwrap_or(Rank::Rookie)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::Rookie => "Rookie",
            Rank::Novice => "Novice",
            Rank::Intermediate => "Intermediate",
            Rank::Advanced => "Advanced",
            Rank::Expert => "Expert",
            Rank::Master => "Master",
            Rank::Grandmaster => "Grandmaster",
        }
    }
}

/// Score, streak, combo, accuracy and reaction-time bookkeeping
///
/// Owned by the session; exposes only the operations the state machine needs
/// so the invariants (combo reset rules, bounded accuracy window) live in one
/// place.
#[derive(Debug, Clone, Default)]
pub struct ProgressTracker {
    score: u32,
    streak: u32,
    combo: u32,
    /// Sliding correctness bits, oldest evicted beyond the window
    accuracy_window: ArrayVec<u8, ACCURACY_WINDOW_LEN>,
    reaction_times_ms: Vec<u32>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn accuracy_window(&self) -> &[u8] {
        &self.accuracy_window
    }

    pub fn reaction_times_ms(&self) -> &[u32] {
        &self.reaction_times_ms
    }

    /// Accuracy over the sliding window, in percent; 100 when empty
    pub fn accuracy(&self) -> f32 {
        if self.accuracy_window.is_empty() {
            return 100.0;
        }
        let sum: u32 = self.accuracy_window.iter().map(|&bit| bit as u32).sum();
        sum as f32 / self.accuracy_window.len() as f32 * 100.0
    }

    /// Pre-round bonus for reaching a level
    pub fn on_round_start(&mut self, level: u32, bonus: u32) {
        self.score += level * bonus;
    }

    /// One correct single-step match
    pub fn on_correct_partial(&mut self) {
        self.streak += 1;
        self.combo += 1;
        self.push_accuracy_bit(1);
    }

    /// Completed round: applies the round score and reports the tier
    pub fn on_round_complete(&mut self, bonus: u32, double_points: bool) -> RoundScore {
        let result = calculate_round_score(bonus, self.combo, double_points);
        self.score += result.points;
        result
    }

    /// Unabsorbed mismatch: accuracy bit 0, combo reset
    ///
    /// Streak is untouched; resetting it is a terminal decision made by the
    /// session machine at game over.
    pub fn on_mismatch(&mut self) {
        self.push_accuracy_bit(0);
        self.combo = 0;
    }

    /// Terminal game over
    pub fn on_game_over(&mut self) {
        self.streak = 0;
    }

    pub fn record_reaction(&mut self, reaction_ms: u32) {
        self.reaction_times_ms.push(reaction_ms);
    }

    /// Rounded mean reaction time; 0 when none recorded
    pub fn average_reaction_ms(&self) -> u32 {
        if self.reaction_times_ms.is_empty() {
            return 0;
        }
        let sum: u64 = self.reaction_times_ms.iter().map(|&ms| ms as u64).sum();
        ((sum as f64 / self.reaction_times_ms.len() as f64).round()) as u32
    }

    /// Deduct a power-up cost; caller has verified affordability
    pub fn spend(&mut self, cost: u32) {
        self.score = self.score.saturating_sub(cost);
    }

    fn push_accuracy_bit(&mut self, bit: u8) {
        if self.accuracy_window.is_full() {
            self.accuracy_window.remove(0);
        }
        self.accuracy_window.push(bit);
    }
}
