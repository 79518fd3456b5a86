//! Effect dispatch - maps drained core effects onto a presentation sink.
//!
//! The core appends [`Effect`] values to its queue; the front-end implements
//! [`EffectSink`] and this dispatcher forwards each drained effect exactly
//! once. All calls are fire-and-forget; the core never consumes a return
//! value.

use tui_simon_types::{Color, ComboTier, CueKind, Effect, GameSummary};

/// Presentation-side binding for core effect requests
pub trait EffectSink {
    /// Fire-and-forget audio request
    fn play_cue(&mut self, kind: CueKind, duration_ms: u32);
    /// Light a pad
    fn render_flash(&mut self, color: Color, duration_ms: u32);
    /// Particle burst at a pad
    fn render_particles(&mut self, color: Color);
    /// Non-blocking toast notification
    fn announce(&mut self, title: &str, body: &str);
    /// Combo banner for a completed round
    fn combo_banner(&mut self, tier: ComboTier);
    /// Terminal game over with frozen stats
    fn session_ended(&mut self, summary: &GameSummary);
}

/// Forward drained effects to a sink, in emission order
pub fn dispatch(effects: Vec<Effect>, sink: &mut dyn EffectSink) {
    for effect in effects {
        match effect {
            Effect::Flash { color, duration_ms } => sink.render_flash(color, duration_ms),
            Effect::Particles { color } => sink.render_particles(color),
            Effect::Cue { kind, duration_ms } => sink.play_cue(kind, duration_ms),
            Effect::Announce { title, body } => sink.announce(&title, &body),
            Effect::ComboBanner(tier) => sink.combo_banner(tier),
            Effect::AchievementUnlocked {
                title, description, ..
            } => {
                sink.announce(title, description);
                sink.play_cue(CueKind::Achievement, 800);
            }
            Effect::SessionEnded(summary) => sink.session_ended(&summary),
        }
    }
}
