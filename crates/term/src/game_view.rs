//! Game view - renders a session into a text frame.
//!
//! Holds the transient presentation state (active flash, toasts, combo
//! banner) fed by the effect sink, and draws the 2x2 pad grid plus stat and
//! power-up lines. Audio cues have no terminal equivalent and are dropped.

use std::fmt::Write as _;

use crossterm::style::Stylize;
use tui_simon_adapter::EffectSink;
use tui_simon_core::Session;
use tui_simon_types::{Color, ComboTier, CueKind, GameMode, GameSummary, Phase, POWERUP_KINDS};

const TOAST_TTL_MS: i32 = 2500;
const BANNER_TTL_MS: i32 = 1500;

/// Pad grid layout, matching the classic board: green/red over yellow/blue
const PAD_LAYOUT: [[Color; 2]; 2] = [
    [Color::Green, Color::Red],
    [Color::Yellow, Color::Blue],
];

#[derive(Debug, Default)]
pub struct GameView {
    flash: Option<(Color, i32)>,
    toasts: Vec<(String, String, i32)>,
    banner: Option<(ComboTier, i32)>,
    last_summary: Option<GameSummary>,
}

impl GameView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decay flash/toast/banner timers
    pub fn tick(&mut self, elapsed_ms: u32) {
        let elapsed = elapsed_ms as i32;
        if let Some((_, ttl)) = self.flash.as_mut() {
            *ttl -= elapsed;
        }
        self.flash = self.flash.filter(|&(_, ttl)| ttl > 0);

        for (_, _, ttl) in self.toasts.iter_mut() {
            *ttl -= elapsed;
        }
        self.toasts.retain(|&(_, _, ttl)| ttl > 0);

        if let Some((_, ttl)) = self.banner.as_mut() {
            *ttl -= elapsed;
        }
        self.banner = self.banner.filter(|&(_, ttl)| ttl > 0);
    }

    /// Render one frame
    pub fn render(&self, session: &Session) -> String {
        let mut frame = String::new();

        let _ = writeln!(frame, "{}", " TUI SIMON ".bold());
        let _ = writeln!(frame, " {}", self.status_line(session));
        frame.push('\n');

        for row in PAD_LAYOUT {
            for pad_line in 0..3 {
                frame.push_str("   ");
                for color in row {
                    let lit = matches!(self.flash, Some((flash, _)) if flash == color);
                    frame.push_str(&pad_cell(color, lit, pad_line));
                    frame.push(' ');
                }
                frame.push('\n');
            }
            frame.push('\n');
        }

        let _ = writeln!(frame, " {}", self.stats_line(session));
        let _ = writeln!(frame, " {}", powerup_line(session));

        if let Some((tier, _)) = self.banner {
            if let Some(text) = tier.banner() {
                let _ = writeln!(frame, "\n {}", text.bold().yellow());
            }
        }
        for (title, body, _) in &self.toasts {
            let _ = writeln!(frame, " {} {}", title.clone().bold(), body);
        }

        if session.phase() == Phase::GameOver {
            if let Some(summary) = &self.last_summary {
                let _ = writeln!(
                    frame,
                    "\n {}  score {}  level {}  avg reaction {}ms  accuracy {:.0}%",
                    "GAME OVER".bold().red(),
                    summary.score,
                    summary.level,
                    summary.average_reaction_ms,
                    summary.accuracy,
                );
            }
        }

        let _ = writeln!(
            frame,
            "\n keys: 1/q green  2/w red  3/e yellow  4/r blue  z/x/c power-ups  p pause  esc quit"
        );
        frame
    }

    fn status_line(&self, session: &Session) -> String {
        if session.paused() {
            return "Paused - press p to resume".to_string();
        }
        match session.phase() {
            Phase::Idle => "Press space to begin".to_string(),
            Phase::Showing => format!("Level {} - watch the sequence", session.level()),
            Phase::AwaitingInput => format!("Level {} - your turn!", session.level()),
            Phase::Advancing => format!("Level {} complete!", session.level()),
            Phase::GameOver => "Game over - press space to play again".to_string(),
        }
    }

    fn stats_line(&self, session: &Session) -> String {
        let mut line = format!(
            "score {}  high {}  streak {}  combo {}x  accuracy {:.0}%  rank {}",
            session.score(),
            session.high_score(),
            session.streak(),
            session.combo(),
            session.accuracy(),
            session.rank().as_str(),
        );
        match session.config().mode {
            GameMode::Survival => {
                let _ = write!(line, "  lives {}", "♥".repeat(session.lives() as usize));
            }
            GameMode::Speedrun => {
                let secs = session.time_remaining_secs();
                let _ = write!(line, "  time {}:{:02}", secs / 60, secs % 60);
            }
            GameMode::Ai => {
                if let Some(ai) = session.ai() {
                    let _ = write!(line, "  ai {} (lvl {})", ai.score(), ai.level());
                }
            }
            GameMode::Multiplayer => {
                if let Some(mp) = session.multiplayer() {
                    let players = mp.players();
                    let _ = write!(
                        line,
                        "  p1 {}  p2 {}  (player {} up)",
                        players[0].score,
                        players[1].score,
                        mp.current() + 1
                    );
                }
            }
            GameMode::Classic | GameMode::Memory => {}
        }
        if session.shield_active() {
            line.push_str("  [shield]");
        }
        if session.double_points_active() {
            line.push_str("  [2x]");
        }
        if session.slow_active() {
            line.push_str("  [slow]");
        }
        line
    }
}

fn pad_cell(color: Color, lit: bool, _line: usize) -> String {
    let block = if lit { "██████" } else { "▒▒▒▒▒▒" };
    let styled = match color {
        Color::Red => block.red(),
        Color::Blue => block.blue(),
        Color::Green => block.green(),
        Color::Yellow => block.yellow(),
    };
    styled.to_string()
}

fn powerup_line(session: &Session) -> String {
    let mut line = String::from("power-ups:");
    for kind in POWERUP_KINDS {
        let slot = session.powerups().slot(kind);
        if slot.available {
            let _ = write!(line, "  {}({})", kind.as_str(), slot.cost);
        } else {
            let _ = write!(line, "  {}[{}s]", kind.as_str(), slot.cooldown_remaining);
        }
    }
    line
}

impl EffectSink for GameView {
    fn play_cue(&mut self, _kind: CueKind, _duration_ms: u32) {
        // Audio is out of scope for the terminal front-end.
    }

    fn render_flash(&mut self, color: Color, duration_ms: u32) {
        self.flash = Some((color, duration_ms as i32));
    }

    fn render_particles(&mut self, _color: Color) {
        // No particle system in a text frame; the flash carries the cue.
    }

    fn announce(&mut self, title: &str, body: &str) {
        self.toasts
            .push((title.to_string(), body.to_string(), TOAST_TTL_MS));
    }

    fn combo_banner(&mut self, tier: ComboTier) {
        self.banner = Some((tier, BANNER_TTL_MS));
    }

    fn session_ended(&mut self, summary: &GameSummary) {
        self.last_summary = Some(*summary);
    }
}
