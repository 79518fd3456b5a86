//! AI opponent simulator - a weighted coin-flip against the shared sequence.
//!
//! The AI keeps its own score and progress level. Each scheduled turn answers
//! `sequence[level]` correctly with probability `accuracy`, otherwise picks
//! uniformly among the three wrong pads. A miss (or running past the end of
//! the sequence) resets the AI's level; it never ends the player's game.

use tracing::debug;
use tui_simon_types::{
    Color, AI_ERROR_FREE_SEQUENCE_LEN, AI_STEP_POINTS, AI_TURN_DELAY_MAX_MS, AI_TURN_DELAY_MIN_MS,
    COLORS,
};

use crate::rng::SimpleRng;

/// Outcome of one resolved AI turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiTurn {
    pub choice: Color,
    pub correct: bool,
}

/// Independent opponent progress against the shared sequence
#[derive(Debug, Clone)]
pub struct AiOpponent {
    score: u32,
    level: usize,
    accuracy: f32,
    /// Countdown until the next scheduled turn resolves
    turn_timer_ms: Option<u32>,
}

impl AiOpponent {
    pub fn new(accuracy: f32) -> Self {
        Self {
            score: 0,
            level: 0,
            accuracy,
            turn_timer_ms: None,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn accuracy(&self) -> f32 {
        self.accuracy
    }

    pub fn turn_pending(&self) -> bool {
        self.turn_timer_ms.is_some()
    }

    /// Schedule one turn after a randomized 1-3s delay
    ///
    /// A turn already pending keeps its original deadline.
    pub fn schedule_turn(&mut self, rng: &mut SimpleRng) {
        if self.turn_timer_ms.is_none() {
            let delay = rng.next_between(AI_TURN_DELAY_MIN_MS, AI_TURN_DELAY_MAX_MS);
            self.turn_timer_ms = Some(delay);
        }
    }

    /// Advance the turn timer; resolves the turn when it elapses
    pub fn tick(
        &mut self,
        elapsed_ms: u32,
        sequence: &[Color],
        rng: &mut SimpleRng,
    ) -> Option<AiTurn> {
        let remaining = self.turn_timer_ms?;
        if remaining > elapsed_ms {
            self.turn_timer_ms = Some(remaining - elapsed_ms);
            return None;
        }
        self.turn_timer_ms = None;
        Some(self.take_turn(sequence, rng))
    }

    /// Resolve one turn immediately
    pub fn take_turn(&mut self, sequence: &[Color], rng: &mut SimpleRng) -> AiTurn {
        let expected = sequence.get(self.level).copied();

        let choice = match expected {
            Some(target) => {
                let errs = sequence.len() > AI_ERROR_FREE_SEQUENCE_LEN
                    && rng.next_f32() > self.accuracy;
                if errs {
                    wrong_color(target, rng)
                } else {
                    target
                }
            }
            // Past the end of the sequence: nothing to answer, any pad misses.
            None => Color::from_index(rng.next_range(COLORS.len() as u32) as usize),
        };

        let correct = expected == Some(choice);
        if correct {
            self.score += AI_STEP_POINTS;
            self.level += 1;
        } else {
            self.level = 0;
        }
        debug!(
            choice = choice.as_str(),
            correct,
            level = self.level,
            score = self.score,
            "ai turn"
        );

        AiTurn { choice, correct }
    }
}

fn wrong_color(target: Color, rng: &mut SimpleRng) -> Color {
    let wrong: Vec<Color> = COLORS.iter().copied().filter(|&c| c != target).collect();
    wrong[rng.next_range(wrong.len() as u32) as usize]
}
