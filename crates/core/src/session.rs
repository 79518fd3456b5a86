//! Session state machine - ties generation, scoring, power-ups, achievements
//! and mode sub-state together.
//!
//! All deferred work (playback steps, the inter-round delay, power-up
//! windows, cooldown ticks, the speedrun countdown, AI turn delays) is a
//! millisecond countdown advanced by [`Session::tick`]. `start()` resets every
//! countdown, so a stale continuation can never fire into a new session.
//!
//! Phases: Idle -> Showing -> AwaitingInput -> {AwaitingInput | Advancing |
//! GameOver}; `paused` is an orthogonal flag that freezes every countdown and
//! makes `submit` inert.

use tracing::debug;
use tui_simon_types::{
    Action, Color, ComboTier, CueKind, Effect, GameSummary, MoveRecord, Phase, PowerupEffect,
    PowerupKind, DOUBLE_POINTS_DURATION_MS, FLASH_MS, ROUND_ADVANCE_DELAY_MS, SHIELD_DURATION_MS,
    SLOW_DURATION_MS, SLOW_FACTOR_DENOMINATOR, SLOW_FACTOR_NUMERATOR, SPEEDRUN_TICK_MS,
};

use crate::achievement::{self, EvalContext};
use crate::ai::AiOpponent;
use crate::error::PowerupDenied;
use crate::policy::{ModeProfile, SessionConfig};
use crate::powerup::PowerupBank;
use crate::rng::SequenceGenerator;
use crate::scoring::{ProgressTracker, Rank};

/// One local multiplayer slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MultiplayerSlot {
    pub score: u32,
    pub level: u32,
}

/// Local, same-device multiplayer sub-state
///
/// The credited slot alternates after each completed round.
#[derive(Debug, Clone, Default)]
pub struct MultiplayerState {
    current: usize,
    players: [MultiplayerSlot; 2],
}

impl MultiplayerState {
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn players(&self) -> &[MultiplayerSlot; 2] {
        &self.players
    }

    fn credit(&mut self, points: u32) {
        let slot = &mut self.players[self.current];
        slot.score += points;
        slot.level += 1;
    }

    fn alternate(&mut self) {
        self.current = 1 - self.current;
    }
}

/// Complete session state
///
/// Exactly one live value at a time; the presentation layer reads it through
/// accessors and drains the effect queue once per frame.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    generator: SequenceGenerator,
    tracker: ProgressTracker,
    powerups: PowerupBank,

    phase: Phase,
    started: bool,
    paused: bool,
    /// Monotonic episode id (increments on every start).
    episode_id: u32,
    /// Session wall clock; advances only while unpaused.
    clock_ms: u64,

    level: u32,
    sequence: Vec<Color>,
    user_input: Vec<Color>,

    // Playback
    show_index: usize,
    show_timer_ms: u32,
    // Inter-round delay
    advance_timer_ms: u32,
    // Reaction clock within the input phase
    input_elapsed_ms: u32,

    // Power-up windows
    shield_active: bool,
    shield_timer_ms: u32,
    double_points_active: bool,
    double_timer_ms: u32,
    slow_timer_ms: u32,

    // Mode sub-state
    lives: u32,
    time_remaining_secs: u32,
    speedrun_accum_ms: u32,
    ai: Option<AiOpponent>,
    multiplayer: Option<MultiplayerState>,

    // Pattern recorder
    recording: bool,
    recorded_moves: Vec<MoveRecord>,

    // Profile-backed read inputs
    high_score: u32,
    earned: Vec<String>,
    voice_enabled: bool,
    saved_pattern_count: usize,

    effects: Vec<Effect>,
}

impl Session {
    pub fn new(config: SessionConfig, seed: u32) -> Self {
        Self {
            config,
            generator: SequenceGenerator::new(seed),
            tracker: ProgressTracker::new(),
            powerups: PowerupBank::new(),
            phase: Phase::Idle,
            started: false,
            paused: false,
            episode_id: 0,
            clock_ms: 0,
            level: 0,
            sequence: Vec::new(),
            user_input: Vec::new(),
            show_index: 0,
            show_timer_ms: 0,
            advance_timer_ms: 0,
            input_elapsed_ms: 0,
            shield_active: false,
            shield_timer_ms: 0,
            double_points_active: false,
            double_timer_ms: 0,
            slow_timer_ms: 0,
            lives: 0,
            time_remaining_secs: 0,
            speedrun_accum_ms: 0,
            ai: None,
            multiplayer: None,
            recording: false,
            recorded_moves: Vec::new(),
            high_score: 0,
            earned: Vec::new(),
            voice_enabled: false,
            saved_pattern_count: 0,
            effects: Vec::new(),
        }
    }

    // Accessors

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> u32 {
        self.tracker.score()
    }

    pub fn streak(&self) -> u32 {
        self.tracker.streak()
    }

    pub fn combo(&self) -> u32 {
        self.tracker.combo()
    }

    pub fn accuracy(&self) -> f32 {
        self.tracker.accuracy()
    }

    pub fn average_reaction_ms(&self) -> u32 {
        self.tracker.average_reaction_ms()
    }

    pub fn sequence(&self) -> &[Color] {
        &self.sequence
    }

    pub fn user_input(&self) -> &[Color] {
        &self.user_input
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn time_remaining_secs(&self) -> u32 {
        self.time_remaining_secs
    }

    pub fn shield_active(&self) -> bool {
        self.shield_active
    }

    pub fn double_points_active(&self) -> bool {
        self.double_points_active
    }

    pub fn slow_active(&self) -> bool {
        self.slow_timer_ms > 0
    }

    pub fn powerups(&self) -> &PowerupBank {
        &self.powerups
    }

    pub fn ai(&self) -> Option<&AiOpponent> {
        self.ai.as_ref()
    }

    pub fn multiplayer(&self) -> Option<&MultiplayerState> {
        self.multiplayer.as_ref()
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn rank(&self) -> Rank {
        Rank::from_score(self.high_score)
    }

    pub fn earned_achievements(&self) -> &[String] {
        &self.earned
    }

    pub fn recording(&self) -> bool {
        self.recording
    }

    /// Next expected pad while collecting input
    pub fn next_expected(&self) -> Option<Color> {
        if self.phase == Phase::AwaitingInput {
            self.sequence.get(self.user_input.len()).copied()
        } else {
            None
        }
    }

    /// Current per-step playback interval, slow-aware
    pub fn effective_speed_ms(&self) -> u32 {
        let base = self.config.profile.speed_ms;
        if self.slow_timer_ms > 0 {
            base * SLOW_FACTOR_NUMERATOR / SLOW_FACTOR_DENOMINATOR
        } else {
            base
        }
    }

    // Profile wiring

    pub fn set_high_score(&mut self, high_score: u32) {
        self.high_score = high_score;
    }

    pub fn set_earned_achievements(&mut self, earned: Vec<String>) {
        self.earned = earned;
    }

    pub fn set_voice_enabled(&mut self, enabled: bool) {
        self.voice_enabled = enabled;
    }

    pub fn set_saved_pattern_count(&mut self, count: usize) {
        self.saved_pattern_count = count;
    }

    /// Drain pending effect requests, exactly once
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    // Lifecycle

    /// Apply a dispatched action
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Start => self.start(),
            Action::Pause => self.toggle_pause(),
            Action::Reset => self.reset(),
            Action::Press(color) => self.submit(color),
            Action::Powerup(kind) => {
                if let Err(denied) = self.use_powerup(kind) {
                    if denied == PowerupDenied::InsufficientScore {
                        let cost = self.powerups.slot(kind).cost;
                        self.announce("Insufficient Points!", format!("Need {cost} points"));
                    } else {
                        debug!(
                            kind = kind.as_str(),
                            reason = denied.reason(),
                            "power-up denied"
                        );
                    }
                }
            }
        }
    }

    /// Start a session
    ///
    /// Valid from any phase: starting over an existing session performs a
    /// full reset first, which structurally cancels every pending countdown.
    pub fn start(&mut self) {
        self.reset_fields();
        self.episode_id = self.episode_id.wrapping_add(1);
        self.started = true;

        match self.config.mode_profile {
            ModeProfile::Survival { lives } => self.lives = lives,
            ModeProfile::Speedrun { time_limit_secs } => {
                self.time_remaining_secs = time_limit_secs
            }
            ModeProfile::Ai { accuracy } => self.ai = Some(AiOpponent::new(accuracy)),
            ModeProfile::Multiplayer => self.multiplayer = Some(MultiplayerState::default()),
            ModeProfile::Classic | ModeProfile::Memory { .. } => {}
        }

        debug!(
            episode = self.episode_id,
            difficulty = self.config.difficulty.as_str(),
            mode = self.config.mode.as_str(),
            "session started"
        );
        self.next_round();
    }

    /// Reset to idle, discarding the running session
    pub fn reset(&mut self) {
        self.reset_fields();
        self.started = false;
        debug!("session reset");
    }

    /// Toggle the pause flag
    ///
    /// While paused every countdown is frozen and `submit` is inert; resume
    /// continues exactly where playback or input left off.
    pub fn toggle_pause(&mut self) {
        if !self.started {
            return;
        }
        self.paused = !self.paused;
        debug!(paused = self.paused, "pause toggled");
    }

    fn reset_fields(&mut self) {
        self.phase = Phase::Idle;
        self.paused = false;
        self.level = 0;
        self.sequence.clear();
        self.user_input.clear();
        self.tracker = ProgressTracker::new();
        self.powerups.reset();
        self.show_index = 0;
        self.show_timer_ms = 0;
        self.advance_timer_ms = 0;
        self.input_elapsed_ms = 0;
        self.shield_active = false;
        self.shield_timer_ms = 0;
        self.double_points_active = false;
        self.double_timer_ms = 0;
        self.slow_timer_ms = 0;
        self.lives = 0;
        self.time_remaining_secs = 0;
        self.speedrun_accum_ms = 0;
        self.ai = None;
        self.multiplayer = None;
        self.effects.clear();
    }

    // Round flow

    fn next_round(&mut self) {
        self.level += 1;
        self.user_input.clear();
        self.tracker
            .on_round_start(self.level, self.config.profile.bonus);

        let color = self.generator.next();
        self.sequence.push(color);

        self.phase = Phase::Showing;
        self.show_index = 0;
        // Half-interval lead-in before the first flash.
        self.show_timer_ms = self.effective_speed_ms() / 2;
        debug!(level = self.level, len = self.sequence.len(), "round started");
    }

    /// Submit a pad press
    ///
    /// Silently ignored outside the input phase (during playback, idle,
    /// game over, pause). This models "input ignored during animation" and
    /// must stay a no-op, not an error.
    pub fn submit(&mut self, color: Color) {
        if self.phase != Phase::AwaitingInput || self.paused {
            return;
        }

        let reaction_ms = self.input_elapsed_ms;
        self.input_elapsed_ms = 0;
        self.tracker.record_reaction(reaction_ms);

        if self.recording {
            self.recorded_moves.push(MoveRecord {
                color,
                at_ms: self.clock_ms,
                reaction_ms,
            });
        }

        self.user_input.push(color);
        self.push_effect(Effect::Flash {
            color,
            duration_ms: FLASH_MS,
        });
        self.push_effect(Effect::Cue {
            kind: CueKind::Pad(color),
            duration_ms: FLASH_MS,
        });
        self.push_effect(Effect::Particles { color });

        let index = self.user_input.len() - 1;
        if self.sequence[index] == color {
            self.on_correct();
        } else {
            self.on_mismatch();
        }

        // Every player submission schedules one AI response.
        if self.phase != Phase::GameOver {
            if let Some(ai) = self.ai.as_mut() {
                ai.schedule_turn(self.generator.rng_mut());
            }
        }
    }

    fn on_correct(&mut self) {
        self.tracker.on_correct_partial();
        if self.user_input.len() == self.sequence.len() {
            self.complete_round();
        }
    }

    fn complete_round(&mut self) {
        let result = self
            .tracker
            .on_round_complete(self.config.profile.bonus, self.double_points_active);

        self.push_effect(Effect::Cue {
            kind: CueKind::Success,
            duration_ms: 500,
        });
        if result.tier != ComboTier::None {
            self.push_effect(Effect::ComboBanner(result.tier));
        }

        if let Some(mp) = self.multiplayer.as_mut() {
            mp.credit(result.points);
            mp.alternate();
            let next = mp.current() + 1;
            self.announce("Next Up!", format!("Player {next}'s turn"));
        }

        self.evaluate_achievements();

        self.phase = Phase::Advancing;
        self.advance_timer_ms = ROUND_ADVANCE_DELAY_MS;
        debug!(
            level = self.level,
            points = result.points,
            score = self.tracker.score(),
            "round complete"
        );
    }

    fn on_mismatch(&mut self) {
        if self.shield_active {
            // One-shot forgiveness: roll the failed step back so the same
            // index can be retried. The absorbed mismatch costs nothing.
            self.shield_active = false;
            self.shield_timer_ms = 0;
            self.user_input.pop();
            self.announce("Shield Used!", "Mistake forgiven".to_string());
            self.push_effect(Effect::Cue {
                kind: CueKind::Achievement,
                duration_ms: 500,
            });
            debug!("mismatch absorbed by shield");
            return;
        }

        self.tracker.on_mismatch();

        if matches!(self.config.mode_profile, ModeProfile::Survival { .. }) && self.lives > 1 {
            self.lives -= 1;
            self.user_input.clear();
            let lives = self.lives;
            self.announce("Life Lost!", format!("{lives} lives remaining"));
            debug!(lives, "survival life lost, round retried");
            return;
        }

        self.finish();
    }

    /// Terminal game over; stats frozen until the next start
    fn finish(&mut self) {
        self.phase = Phase::GameOver;
        self.started = false;
        self.tracker.on_game_over();

        self.push_effect(Effect::Cue {
            kind: CueKind::Error,
            duration_ms: 1000,
        });

        let score = self.tracker.score();
        let new_high_score = score > self.high_score;
        if new_high_score {
            self.high_score = score;
            self.announce("New High Score!", format!("{score} points!"));
        }

        self.push_effect(Effect::SessionEnded(GameSummary {
            score,
            level: self.level,
            average_reaction_ms: self.tracker.average_reaction_ms(),
            accuracy: self.tracker.accuracy(),
            new_high_score,
        }));
        debug!(score, level = self.level, "game over");
    }

    fn evaluate_achievements(&mut self) {
        let fired = {
            let ctx = EvalContext {
                level: self.level,
                score: self.tracker.score(),
                streak: self.tracker.streak(),
                combo: self.tracker.combo(),
                difficulty: self.config.difficulty,
                mode: self.config.mode,
                reaction_times_ms: self.tracker.reaction_times_ms(),
                accuracy_window: self.tracker.accuracy_window(),
                ai_score: self.ai.as_ref().map(|ai| ai.score()),
                saved_patterns: self.saved_pattern_count,
                voice_enabled: self.voice_enabled,
            };
            achievement::evaluate(&ctx, &self.earned)
        };

        for rule in fired {
            self.earned.push(rule.id.to_string());
            self.push_effect(Effect::AchievementUnlocked {
                id: rule.id,
                title: rule.title,
                description: rule.description,
            });
            self.push_effect(Effect::Cue {
                kind: CueKind::Achievement,
                duration_ms: 800,
            });
            debug!(id = rule.id, "achievement earned");
        }
    }

    // Power-ups

    /// Use a power-up
    ///
    /// Denials report a reason and mutate nothing; a success has already
    /// deducted the cost and armed the cooldown when the effect descriptor is
    /// returned.
    pub fn use_powerup(&mut self, kind: PowerupKind) -> Result<PowerupEffect, PowerupDenied> {
        let cost = self
            .powerups
            .begin_use(kind, self.tracker.score(), self.started)?;
        self.tracker.spend(cost);

        let effect = match kind {
            PowerupKind::Slow => {
                self.slow_timer_ms = SLOW_DURATION_MS;
                self.announce("Time Warp!", "Sequence slowed for 10 seconds".to_string());
                PowerupEffect::Slowed {
                    duration_ms: SLOW_DURATION_MS,
                }
            }
            PowerupKind::Skip => {
                self.force_complete_round();
                self.announce("Skip Turn!", "Sequence auto-completed".to_string());
                PowerupEffect::Skipped
            }
            PowerupKind::Hint => {
                let next = self.next_expected();
                if let Some(color) = next {
                    self.announce("Hint!", format!("Next button: {}", color.as_str()));
                }
                PowerupEffect::Hint { next }
            }
            PowerupKind::Shield => {
                self.shield_active = true;
                self.shield_timer_ms = SHIELD_DURATION_MS;
                self.announce(
                    "Shield Activated!",
                    "Next mistake will be forgiven".to_string(),
                );
                PowerupEffect::ShieldArmed {
                    duration_ms: SHIELD_DURATION_MS,
                }
            }
            PowerupKind::Double => {
                self.double_points_active = true;
                self.double_timer_ms = DOUBLE_POINTS_DURATION_MS;
                self.announce("Double Points!", "2x points for 20 seconds".to_string());
                PowerupEffect::DoubleArmed {
                    duration_ms: DOUBLE_POINTS_DURATION_MS,
                }
            }
            PowerupKind::Reveal => {
                self.announce("Sequence Revealed!", "Pattern shown for reference".to_string());
                PowerupEffect::Revealed {
                    sequence: self.sequence.clone(),
                }
            }
        };
        Ok(effect)
    }

    /// Force-complete the current round (skip power-up)
    ///
    /// Copies the remaining suffix into the input and runs the normal
    /// completion path with a single step credit, mirroring a lone final
    /// submission.
    fn force_complete_round(&mut self) {
        if self.phase != Phase::AwaitingInput || self.user_input.len() >= self.sequence.len() {
            return;
        }
        while self.user_input.len() < self.sequence.len() {
            let next = self.sequence[self.user_input.len()];
            self.user_input.push(next);
        }
        self.tracker.on_correct_partial();
        self.complete_round();
    }

    // Pattern recorder

    pub fn start_recording(&mut self) {
        self.recording = true;
        self.recorded_moves.clear();
    }

    /// Stop recording and take the recorded moves
    pub fn stop_recording(&mut self) -> Vec<MoveRecord> {
        self.recording = false;
        std::mem::take(&mut self.recorded_moves)
    }

    // Clock

    /// Advance all countdowns by `elapsed_ms`
    ///
    /// Frozen while paused or when no session is running; every timer checks
    /// phase before mutating state, so late tick deliveries after a game
    /// over are no-ops.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.paused || !self.started {
            return;
        }
        self.clock_ms += elapsed_ms as u64;

        self.powerups.tick(elapsed_ms);
        self.tick_powerup_windows(elapsed_ms);
        if self.tick_speedrun(elapsed_ms) {
            return;
        }
        self.tick_ai(elapsed_ms);

        match self.phase {
            Phase::Showing => self.tick_showing(elapsed_ms),
            Phase::AwaitingInput => self.input_elapsed_ms += elapsed_ms,
            Phase::Advancing => {
                self.advance_timer_ms = self.advance_timer_ms.saturating_sub(elapsed_ms);
                if self.advance_timer_ms == 0 {
                    self.next_round();
                }
            }
            Phase::Idle | Phase::GameOver => {}
        }
    }

    fn tick_showing(&mut self, elapsed_ms: u32) {
        self.show_timer_ms = self.show_timer_ms.saturating_sub(elapsed_ms);
        if self.show_timer_ms > 0 {
            return;
        }

        if self.show_index < self.sequence.len() {
            let color = self.sequence[self.show_index];
            self.push_effect(Effect::Flash {
                color,
                duration_ms: FLASH_MS,
            });
            self.push_effect(Effect::Cue {
                kind: CueKind::Pad(color),
                duration_ms: FLASH_MS,
            });
            self.push_effect(Effect::Particles { color });
            self.show_index += 1;
            self.show_timer_ms = if self.show_index < self.sequence.len() {
                self.effective_speed_ms()
            } else {
                // Tail after the last flash; input opens once it resolves.
                self.effective_speed_ms() / 2
            };
        } else {
            self.phase = Phase::AwaitingInput;
            self.input_elapsed_ms = 0;
            debug!(level = self.level, "awaiting input");
        }
    }

    fn tick_powerup_windows(&mut self, elapsed_ms: u32) {
        if self.shield_timer_ms > 0 {
            self.shield_timer_ms = self.shield_timer_ms.saturating_sub(elapsed_ms);
            if self.shield_timer_ms == 0 {
                self.shield_active = false;
                debug!("shield expired");
            }
        }
        if self.double_timer_ms > 0 {
            self.double_timer_ms = self.double_timer_ms.saturating_sub(elapsed_ms);
            if self.double_timer_ms == 0 {
                self.double_points_active = false;
                debug!("double points expired");
            }
        }
        if self.slow_timer_ms > 0 {
            self.slow_timer_ms = self.slow_timer_ms.saturating_sub(elapsed_ms);
        }
    }

    fn tick_speedrun(&mut self, elapsed_ms: u32) -> bool {
        if !matches!(self.config.mode_profile, ModeProfile::Speedrun { .. }) {
            return false;
        }
        self.speedrun_accum_ms += elapsed_ms;
        while self.speedrun_accum_ms >= SPEEDRUN_TICK_MS {
            self.speedrun_accum_ms -= SPEEDRUN_TICK_MS;
            if self.time_remaining_secs > 0 {
                self.time_remaining_secs -= 1;
                if self.time_remaining_secs == 0 {
                    let score = self.tracker.score();
                    self.announce("Time Up!", format!("Final score: {score}"));
                    self.finish();
                    return true;
                }
            }
        }
        false
    }

    fn tick_ai(&mut self, elapsed_ms: u32) {
        if let Some(ai) = self.ai.as_mut() {
            ai.tick(elapsed_ms, &self.sequence, self.generator.rng_mut());
        }
    }

    fn announce(&mut self, title: &str, body: String) {
        self.effects.push(Effect::Announce {
            title: title.to_string(),
            body,
        });
    }

    fn push_effect(&mut self, effect: Effect) {
        self.effects.push(effect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::resolve;
    use tui_simon_types::{Difficulty, GameMode, TICK_MS};

    fn session(difficulty: Difficulty, mode: GameMode) -> Session {
        Session::new(resolve(difficulty, mode), 12345)
    }

    /// Tick until input opens (bounded)
    fn run_to_input(session: &mut Session) {
        for _ in 0..10_000 {
            if session.phase() == Phase::AwaitingInput {
                return;
            }
            session.tick(TICK_MS);
        }
        panic!("never reached input phase: {:?}", session.phase());
    }

    /// Reproduce the current sequence correctly
    fn play_round(session: &mut Session) {
        run_to_input(session);
        for color in session.sequence().to_vec() {
            session.submit(color);
        }
    }

    fn wrong_color(session: &Session) -> Color {
        let expected = session.sequence()[session.user_input().len()];
        *tui_simon_types::COLORS
            .iter()
            .find(|&&c| c != expected)
            .unwrap()
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = session(Difficulty::Normal, GameMode::Classic);
        assert_eq!(session.phase(), Phase::Idle);
        assert!(!session.started());
        assert_eq!(session.score(), 0);
        assert_eq!(session.level(), 0);
        assert!(session.sequence().is_empty());
    }

    #[test]
    fn test_start_enters_showing_with_one_color() {
        let mut session = session(Difficulty::Normal, GameMode::Classic);
        session.start();
        assert_eq!(session.phase(), Phase::Showing);
        assert_eq!(session.level(), 1);
        assert_eq!(session.sequence().len(), 1);
        // Pre-round bonus: level 1 * bonus 2.
        assert_eq!(session.score(), 2);
    }

    #[test]
    fn test_start_increments_episode_id() {
        let mut session = session(Difficulty::Normal, GameMode::Classic);
        session.start();
        assert_eq!(session.episode_id(), 1);
        session.start();
        assert_eq!(session.episode_id(), 2);
    }

    #[test]
    fn test_worked_scenario_first_round_total_22() {
        // Normal difficulty (speed 600, bonus 2); start -> +2; complete
        // round 1 -> +20; total 22, level advances to 2.
        let mut session = session(Difficulty::Normal, GameMode::Classic);
        session.start();
        play_round(&mut session);
        assert_eq!(session.score(), 22);
        assert_eq!(session.phase(), Phase::Advancing);

        // After the inter-round delay the next round begins.
        for _ in 0..200 {
            session.tick(TICK_MS);
            if session.level() == 2 {
                break;
            }
        }
        assert_eq!(session.level(), 2);
        assert_eq!(session.sequence().len(), 2);
    }

    #[test]
    fn test_input_ignored_outside_input_phase() {
        let mut session = session(Difficulty::Normal, GameMode::Classic);
        // Idle: ignored.
        session.submit(Color::Red);
        assert!(session.user_input().is_empty());

        session.start();
        // Showing: ignored.
        session.submit(Color::Red);
        assert!(session.user_input().is_empty());

        // Paused during input: ignored.
        run_to_input(&mut session);
        session.toggle_pause();
        session.submit(session.sequence()[0]);
        assert!(session.user_input().is_empty());
        session.toggle_pause();
        session.submit(session.sequence()[0]);
        assert_eq!(session.user_input().len(), 1);
    }

    #[test]
    fn test_user_input_never_exceeds_sequence() {
        let mut session = session(Difficulty::Easy, GameMode::Classic);
        session.start();
        for _ in 0..3 {
            play_round(&mut session);
            assert!(session.user_input().len() <= session.sequence().len());
        }
        // Extra presses during Advancing are ignored.
        session.submit(Color::Red);
        session.submit(Color::Blue);
        assert!(session.user_input().len() <= session.sequence().len());
    }

    #[test]
    fn test_mismatch_ends_classic_game() {
        let mut session = session(Difficulty::Normal, GameMode::Classic);
        session.start();
        run_to_input(&mut session);
        let wrong = wrong_color(&session);
        session.submit(wrong);
        assert_eq!(session.phase(), Phase::GameOver);
        assert!(!session.started());
        assert_eq!(session.streak(), 0);
    }

    #[test]
    fn test_mismatch_resets_combo_not_streak_midgame() {
        let mut session = session(Difficulty::Normal, GameMode::Survival);
        session.start();
        play_round(&mut session);
        let streak = session.streak();
        assert!(streak > 0);

        // Survival: first mismatch costs a life, not the streak.
        run_to_input(&mut session);
        let wrong = wrong_color(&session);
        session.submit(wrong);
        assert_eq!(session.combo(), 0);
        assert_eq!(session.streak(), streak);
    }

    #[test]
    fn test_survival_lives_and_game_over() {
        let mut session = session(Difficulty::Normal, GameMode::Survival);
        session.start();
        assert_eq!(session.lives(), 3);
        run_to_input(&mut session);

        let wrong = wrong_color(&session);
        session.submit(wrong);
        assert_eq!(session.lives(), 2);
        assert_eq!(session.phase(), Phase::AwaitingInput);
        assert!(session.user_input().is_empty(), "round retried from start");

        session.submit(wrong_color(&session));
        assert_eq!(session.lives(), 1);
        assert_eq!(session.phase(), Phase::AwaitingInput);

        session.submit(wrong_color(&session));
        assert_eq!(session.phase(), Phase::GameOver);
    }

    #[test]
    fn test_shield_absorbs_one_mismatch_with_single_step_retry() {
        let mut session = session(Difficulty::Normal, GameMode::Classic);
        session.start();
        for _ in 0..6 {
            play_round(&mut session);
        }
        run_to_input(&mut session);

        // Earn enough to afford the shield.
        assert!(session.score() >= 200, "score {}", session.score());
        session.use_powerup(PowerupKind::Shield).unwrap();
        assert!(session.shield_active());

        // First step correct, second wrong: only the wrong step rolls back.
        let sequence = session.sequence().to_vec();
        session.submit(sequence[0]);
        let combo_before = session.combo();
        session.submit(wrong_color(&session));
        assert_eq!(session.phase(), Phase::AwaitingInput);
        assert!(!session.shield_active(), "shield is consumed");
        assert_eq!(session.user_input().len(), 1, "failed step rolled back");
        assert_eq!(session.combo(), combo_before, "absorbed mismatch is free");

        // Retry the same index and finish the round.
        for &color in &sequence[1..] {
            session.submit(color);
        }
        assert_eq!(session.phase(), Phase::Advancing);
    }

    #[test]
    fn test_shield_expires_after_window() {
        let mut session = session(Difficulty::Normal, GameMode::Classic);
        session.start();
        for _ in 0..6 {
            play_round(&mut session);
        }
        session.use_powerup(PowerupKind::Shield).unwrap();
        assert!(session.shield_active());

        run_to_input(&mut session);
        let mut remaining = SHIELD_DURATION_MS;
        while remaining > 0 {
            session.tick(100);
            remaining -= 100;
        }
        assert!(!session.shield_active());
    }

    #[test]
    fn test_double_points_legendary_round_scores_80() {
        // Combo at the legendary tier, double active, bonus 2
        // -> 10*2 = 20, *2 (legendary) = 40, *2 (double) = 80 round points.
        let mut session = session(Difficulty::Normal, GameMode::Classic);
        session.start();

        // Eight completed rounds: combo is 36, score 342 - enough for the
        // double power-up (300) and well past the legendary threshold.
        for _ in 0..8 {
            play_round(&mut session);
        }
        assert!(session.combo() >= 10);
        assert_eq!(session.score(), 342);

        session.use_powerup(PowerupKind::Double).unwrap();
        assert!(session.double_points_active());
        assert_eq!(session.score(), 42);

        // Round 9 adds its pre-round bonus first, then 80 on completion.
        run_to_input(&mut session);
        let pre_round = session.score();
        assert_eq!(pre_round, 42 + 18);
        for color in session.sequence().to_vec() {
            session.submit(color);
        }
        assert_eq!(session.score(), pre_round + 80);
    }

    #[test]
    fn test_pause_freezes_playback_and_countdowns() {
        let mut session = session(Difficulty::Normal, GameMode::Speedrun);
        session.start();
        assert_eq!(session.time_remaining_secs(), 60);

        session.toggle_pause();
        for _ in 0..500 {
            session.tick(100);
        }
        assert_eq!(session.phase(), Phase::Showing, "playback frozen");
        assert_eq!(session.time_remaining_secs(), 60, "countdown frozen");

        session.toggle_pause();
        run_to_input(&mut session);
    }

    #[test]
    fn test_speedrun_timeout_forces_game_over() {
        let mut session = session(Difficulty::Normal, GameMode::Speedrun);
        session.start();
        for _ in 0..61 {
            session.tick(1000);
        }
        assert_eq!(session.phase(), Phase::GameOver);
        assert_eq!(session.time_remaining_secs(), 0);
    }

    #[test]
    fn test_skip_force_completes_round() {
        let mut session = session(Difficulty::Normal, GameMode::Classic);
        session.start();
        for _ in 0..5 {
            play_round(&mut session);
        }
        run_to_input(&mut session);

        let before = session.score();
        session.use_powerup(PowerupKind::Skip).unwrap();
        assert_eq!(session.phase(), Phase::Advancing);
        assert_eq!(session.user_input().len(), session.sequence().len());
        // Cost deducted, completion points added.
        assert_ne!(session.score(), before);
    }

    #[test]
    fn test_hint_reveals_next_expected() {
        let mut session = session(Difficulty::Normal, GameMode::Classic);
        session.start();
        for _ in 0..3 {
            play_round(&mut session);
        }
        run_to_input(&mut session);

        let expected = session.sequence()[0];
        match session.use_powerup(PowerupKind::Hint).unwrap() {
            PowerupEffect::Hint { next } => assert_eq!(next, Some(expected)),
            other => panic!("unexpected effect: {other:?}"),
        }
        // Hint mutates nothing beyond the slot and cost.
        assert!(session.user_input().is_empty());
        assert_eq!(session.phase(), Phase::AwaitingInput);
    }

    #[test]
    fn test_reveal_returns_full_sequence() {
        let mut session = session(Difficulty::Normal, GameMode::Classic);
        session.start();
        for _ in 0..7 {
            play_round(&mut session);
        }
        run_to_input(&mut session);

        let sequence = session.sequence().to_vec();
        match session.use_powerup(PowerupKind::Reveal).unwrap() {
            PowerupEffect::Revealed { sequence: revealed } => assert_eq!(revealed, sequence),
            other => panic!("unexpected effect: {other:?}"),
        }
    }

    #[test]
    fn test_slow_scales_playback_speed() {
        let mut session = session(Difficulty::Normal, GameMode::Classic);
        session.start();
        assert_eq!(session.effective_speed_ms(), 600);

        for _ in 0..4 {
            play_round(&mut session);
        }
        session.use_powerup(PowerupKind::Slow).unwrap();
        assert_eq!(session.effective_speed_ms(), 900);

        // Restored after the window.
        run_to_input(&mut session);
        let mut remaining = SLOW_DURATION_MS;
        while remaining > 0 {
            session.tick(100);
            remaining -= 100;
        }
        assert_eq!(session.effective_speed_ms(), 600);
    }

    #[test]
    fn test_powerup_denied_without_session() {
        let mut session = session(Difficulty::Normal, GameMode::Classic);
        assert_eq!(
            session.use_powerup(PowerupKind::Hint),
            Err(PowerupDenied::SessionInactive)
        );
    }

    #[test]
    fn test_powerup_double_use_single_deduction() {
        let mut session = session(Difficulty::Normal, GameMode::Classic);
        session.start();
        for _ in 0..3 {
            play_round(&mut session);
        }

        let before = session.score();
        session.use_powerup(PowerupKind::Hint).unwrap();
        let after_first = session.score();
        assert_eq!(after_first, before - 50);

        assert_eq!(
            session.use_powerup(PowerupKind::Hint),
            Err(PowerupDenied::OnCooldown)
        );
        assert_eq!(session.score(), after_first, "no double deduction");
    }

    #[test]
    fn test_achievements_fire_once_in_order() {
        let mut session = session(Difficulty::Normal, GameMode::Classic);
        session.start();
        play_round(&mut session);

        let effects = session.drain_effects();
        let unlocked: Vec<_> = effects
            .iter()
            .filter_map(|e| match e {
                Effect::AchievementUnlocked { id, .. } => Some(*id),
                _ => None,
            })
            .collect();
        assert_eq!(unlocked, vec!["first_win"]);
        assert!(session
            .earned_achievements()
            .contains(&"first_win".to_string()));

        // A fresh session against the same profile does not re-fire it.
        session.start();
        play_round(&mut session);
        let effects = session.drain_effects();
        assert!(!effects.iter().any(|e| matches!(
            e,
            Effect::AchievementUnlocked { id: "first_win", .. }
        )));
    }

    #[test]
    fn test_ai_opponent_progresses_independently() {
        let mut session = session(Difficulty::Normal, GameMode::Ai);
        session.start();
        assert!(session.ai().is_some());

        play_round(&mut session);
        assert!(session.ai().unwrap().turn_pending());

        // The AI resolves its turn within the delay ceiling; the player's
        // game is unaffected either way.
        for _ in 0..400 {
            session.tick(TICK_MS);
        }
        assert!(!session.ai().unwrap().turn_pending());
        assert_ne!(session.phase(), Phase::GameOver);
    }

    #[test]
    fn test_multiplayer_alternates_credited_slot() {
        let mut session = session(Difficulty::Normal, GameMode::Multiplayer);
        session.start();
        assert_eq!(session.multiplayer().unwrap().current(), 0);

        play_round(&mut session);
        let mp = session.multiplayer().unwrap();
        assert_eq!(mp.current(), 1, "turn alternates after a completed round");
        assert!(mp.players()[0].score > 0);
        assert_eq!(mp.players()[1].score, 0);

        play_round(&mut session);
        let mp = session.multiplayer().unwrap();
        assert_eq!(mp.current(), 0);
        assert!(mp.players()[1].score > 0);
    }

    #[test]
    fn test_recording_captures_moves() {
        let mut session = session(Difficulty::Normal, GameMode::Classic);
        session.start();
        session.start_recording();
        play_round(&mut session);
        play_round(&mut session);

        let moves = session.stop_recording();
        assert_eq!(moves.len(), 3, "1 + 2 submissions across two rounds");
        assert!(!session.recording());
        // Timestamps are monotone on the session clock.
        for pair in moves.windows(2) {
            assert!(pair[0].at_ms <= pair[1].at_ms);
        }
    }

    #[test]
    fn test_game_over_reports_summary_and_high_score() {
        let mut session = session(Difficulty::Normal, GameMode::Classic);
        session.set_high_score(10);
        session.start();
        play_round(&mut session);
        session.drain_effects();

        run_to_input(&mut session);
        session.submit(wrong_color(&session));

        let effects = session.drain_effects();
        let summary = effects
            .iter()
            .find_map(|e| match e {
                Effect::SessionEnded(summary) => Some(*summary),
                _ => None,
            })
            .expect("summary emitted");
        // 22 from round one plus the round-two pre-round bonus of 4.
        assert_eq!(summary.score, 26);
        assert!(summary.new_high_score);
        assert_eq!(session.high_score(), 26);
    }

    #[test]
    fn test_restart_cancels_pending_rounds() {
        let mut session = session(Difficulty::Normal, GameMode::Classic);
        session.start();
        play_round(&mut session);
        assert_eq!(session.phase(), Phase::Advancing);

        // Restart mid-advance: the stale advance timer must not fire into
        // the new session.
        session.start();
        assert_eq!(session.level(), 1);
        assert_eq!(session.sequence().len(), 1);
        for _ in 0..200 {
            session.tick(TICK_MS);
            if session.phase() == Phase::AwaitingInput {
                break;
            }
        }
        assert_eq!(session.level(), 1, "no stale round advance");
    }
}
