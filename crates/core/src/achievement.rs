//! Achievement evaluator - a fixed, ordered rule table over session state.
//!
//! Rules are pure predicates on an immutable snapshot plus the earned-id set.
//! A rule fires at most once per profile lifetime; evaluation order is the
//! announcement order when several fire on the same event.

use tui_simon_types::{Difficulty, GameMode};

/// Immutable state snapshot the predicates read
#[derive(Debug, Clone, Copy)]
pub struct EvalContext<'a> {
    pub level: u32,
    pub score: u32,
    pub streak: u32,
    pub combo: u32,
    pub difficulty: Difficulty,
    pub mode: GameMode,
    pub reaction_times_ms: &'a [u32],
    pub accuracy_window: &'a [u8],
    /// AI opponent score, when playing against one
    pub ai_score: Option<u32>,
    pub saved_patterns: usize,
    pub voice_enabled: bool,
}

/// One achievement rule
pub struct Achievement {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    predicate: fn(&EvalContext) -> bool,
}

impl std::fmt::Debug for Achievement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Achievement").field("id", &self.id).finish()
    }
}

fn average_reaction_under(ctx: &EvalContext, limit_ms: f64, min_samples: usize) -> bool {
    if ctx.reaction_times_ms.len() < min_samples {
        return false;
    }
    let sum: u64 = ctx.reaction_times_ms.iter().map(|&ms| ms as u64).sum();
    (sum as f64 / ctx.reaction_times_ms.len() as f64) < limit_ms
}

/// The rule table, in announcement order
pub const RULES: &[Achievement] = &[
    // Level milestones
    Achievement {
        id: "first_win",
        title: "First Steps",
        description: "Complete your first level",
        predicate: |ctx| ctx.level == 1,
    },
    Achievement {
        id: "level_5",
        title: "Getting Warmed Up",
        description: "Reach level 5",
        predicate: |ctx| ctx.level == 5,
    },
    Achievement {
        id: "level_10",
        title: "Memory Master",
        description: "Reach level 10",
        predicate: |ctx| ctx.level == 10,
    },
    Achievement {
        id: "level_15",
        title: "Simon Expert",
        description: "Reach level 15",
        predicate: |ctx| ctx.level == 15,
    },
    Achievement {
        id: "level_20",
        title: "Memory Champion",
        description: "Reach level 20",
        predicate: |ctx| ctx.level == 20,
    },
    Achievement {
        id: "level_30",
        title: "Grandmaster",
        description: "Reach level 30",
        predicate: |ctx| ctx.level == 30,
    },
    // Streak milestones
    Achievement {
        id: "streak_10",
        title: "On Fire!",
        description: "Get 10 correct in a row",
        predicate: |ctx| ctx.streak == 10,
    },
    Achievement {
        id: "streak_25",
        title: "Unstoppable!",
        description: "Get 25 correct in a row",
        predicate: |ctx| ctx.streak == 25,
    },
    Achievement {
        id: "streak_50",
        title: "Legendary!",
        description: "Get 50 correct in a row",
        predicate: |ctx| ctx.streak == 50,
    },
    // Score thresholds
    Achievement {
        id: "score_1000",
        title: "High Scorer",
        description: "Score 1000 points",
        predicate: |ctx| ctx.score >= 1000,
    },
    Achievement {
        id: "score_5000",
        title: "Score Master",
        description: "Score 5000 points",
        predicate: |ctx| ctx.score >= 5000,
    },
    Achievement {
        id: "score_10000",
        title: "Score Legend",
        description: "Score 10000 points",
        predicate: |ctx| ctx.score >= 10000,
    },
    // Difficulty milestones
    Achievement {
        id: "expert_level_5",
        title: "Expert Player",
        description: "Reach level 5 on Expert difficulty",
        predicate: |ctx| ctx.level >= 5 && ctx.difficulty == Difficulty::Expert,
    },
    Achievement {
        id: "expert_level_10",
        title: "Expert Master",
        description: "Reach level 10 on Expert difficulty",
        predicate: |ctx| ctx.level >= 10 && ctx.difficulty == Difficulty::Expert,
    },
    // Combo milestones
    Achievement {
        id: "combo_5",
        title: "Combo Starter",
        description: "Achieve a 5x combo",
        predicate: |ctx| ctx.combo == 5,
    },
    Achievement {
        id: "combo_10",
        title: "Combo Master",
        description: "Achieve a 10x combo",
        predicate: |ctx| ctx.combo == 10,
    },
    Achievement {
        id: "combo_20",
        title: "Combo Legend",
        description: "Achieve a 20x combo",
        predicate: |ctx| ctx.combo == 20,
    },
    // Speed
    Achievement {
        id: "fast_reaction",
        title: "Lightning Fast",
        description: "Average reaction time under 300ms",
        predicate: |ctx| average_reaction_under(ctx, 300.0, 10),
    },
    // Accuracy
    Achievement {
        id: "perfect_accuracy",
        title: "Perfectionist",
        description: "Maintain 100% accuracy for 20 moves",
        predicate: |ctx| {
            ctx.accuracy_window.len() >= 20
                && ctx.accuracy_window[ctx.accuracy_window.len() - 20..]
                    .iter()
                    .all(|&bit| bit == 1)
        },
    },
    // Mode milestones
    Achievement {
        id: "survival_master",
        title: "Survivor",
        description: "Reach level 10 in Survival mode",
        predicate: |ctx| ctx.level >= 10 && ctx.mode == GameMode::Survival,
    },
    Achievement {
        id: "speedrun_champion",
        title: "Speed Demon",
        description: "Score 1000+ points in Speed Run mode",
        predicate: |ctx| ctx.score >= 1000 && ctx.mode == GameMode::Speedrun,
    },
    Achievement {
        id: "ai_defeated",
        title: "AI Conqueror",
        description: "Beat the AI opponent",
        predicate: |ctx| {
            matches!(ctx.ai_score, Some(ai_score) if ctx.score > ai_score) && ctx.level >= 5
        },
    },
    // Special
    Achievement {
        id: "pattern_creator",
        title: "Pattern Creator",
        description: "Save your first custom pattern",
        predicate: |ctx| ctx.saved_patterns >= 1,
    },
    Achievement {
        id: "voice_commander",
        title: "Voice Commander",
        description: "Use voice commands to play",
        predicate: |ctx| ctx.voice_enabled && ctx.level >= 3,
    },
    // Theme usage is not tracked; the rule is reserved and never fires.
    Achievement {
        id: "theme_explorer",
        title: "Theme Explorer",
        description: "Try all available themes",
        predicate: |_| false,
    },
];

/// Evaluate the rule table against a snapshot
///
/// Returns the newly earned rules in table order. Ids already present in
/// `earned` are skipped permanently, even if their condition holds again.
pub fn evaluate(ctx: &EvalContext, earned: &[String]) -> Vec<&'static Achievement> {
    RULES
        .iter()
        .filter(|rule| !earned.iter().any(|id| id.as_str() == rule.id) && (rule.predicate)(ctx))
        .collect()
}
