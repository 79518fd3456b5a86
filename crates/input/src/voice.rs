//! Voice command classifier.
//!
//! A static command table maps recognized transcript text to actions with
//! substring matching; the first matching table entry wins. The classifier is
//! pure and independent of the dispatcher, so transcription backends only
//! need to hand over lowercase-able text.

use tui_simon_types::{Action, Color};

/// Recognized commands, in match priority order
pub const VOICE_COMMANDS: [(&str, Action); 7] = [
    ("start", Action::Start),
    ("pause", Action::Pause),
    ("reset", Action::Reset),
    ("green", Action::Press(Color::Green)),
    ("red", Action::Press(Color::Red)),
    ("yellow", Action::Press(Color::Yellow)),
    ("blue", Action::Press(Color::Blue)),
];

/// Classify a transcript into an action
///
/// Matching is case-insensitive and contains-based; first table match wins.
pub fn classify(text: &str) -> Option<Action> {
    let text = text.to_lowercase();
    VOICE_COMMANDS
        .iter()
        .find(|(keyword, _)| text.contains(keyword))
        .map(|&(_, action)| action)
}
