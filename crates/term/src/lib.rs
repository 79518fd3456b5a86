//! Terminal front-end module.
//!
//! Binds the core's effect interface to a crossterm-rendered text frame.
//! No game logic lives here; the view only reflects session state and the
//! transient cues fed through the effect sink.

pub mod game_view;
pub mod renderer;

pub use game_view::GameView;
pub use renderer::TerminalRenderer;
