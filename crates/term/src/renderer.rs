//! Terminal lifecycle and frame output.
//!
//! Raw mode + alternate screen, restored on exit even when the run loop
//! errors. Frames are pre-rendered strings; the renderer only owns cursor
//! and screen state.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::ResetColor,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
    QueueableCommand,
};

#[derive(Debug)]
pub struct TerminalRenderer {
    out: io::Stdout,
    entered: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            entered: false,
        }
    }

    /// Enter raw mode and the alternate screen
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.out.queue(EnterAlternateScreen)?;
        self.out.queue(cursor::Hide)?;
        self.out.flush()?;
        self.entered = true;
        Ok(())
    }

    /// Restore the terminal; safe to call more than once
    pub fn exit(&mut self) -> Result<()> {
        if self.entered {
            self.out.queue(ResetColor)?;
            self.out.queue(cursor::Show)?;
            self.out.queue(LeaveAlternateScreen)?;
            self.out.flush()?;
            terminal::disable_raw_mode()?;
            self.entered = false;
        }
        Ok(())
    }

    /// Draw a full frame from the top-left corner
    pub fn draw(&mut self, frame: &str) -> Result<()> {
        self.out.queue(cursor::MoveTo(0, 0))?;
        self.out.queue(Clear(ClearType::All))?;
        for line in frame.lines() {
            self.out.write_all(line.as_bytes())?;
            self.out.write_all(b"\r\n")?;
        }
        self.out.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}
