//! Scripted session drivers.
//!
//! Benchmarks, integration tests and demo automation all need the same
//! plumbing: advance the clock until input opens, then answer. Errors are
//! reported instead of panicking so drivers can be used against any mode.

use tui_simon_core::Session;
use tui_simon_types::{Phase, TICK_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveError {
    /// The session never reached the input phase within the budget
    InputNeverOpened,
    /// The session ended while driving (speedrun timeout, mismatch)
    SessionEnded,
}

impl DriveError {
    pub fn message(self) -> &'static str {
        match self {
            DriveError::InputNeverOpened => "input phase never opened",
            DriveError::SessionEnded => "session ended while driving",
        }
    }
}

/// Tick until the session accepts input
///
/// Bounded by `budget_ms` of simulated time.
pub fn run_until_input(session: &mut Session, budget_ms: u32) -> Result<(), DriveError> {
    let mut elapsed = 0;
    while session.phase() != Phase::AwaitingInput {
        if session.phase() == Phase::GameOver {
            return Err(DriveError::SessionEnded);
        }
        if elapsed >= budget_ms {
            return Err(DriveError::InputNeverOpened);
        }
        session.tick(TICK_MS);
        elapsed += TICK_MS;
    }
    Ok(())
}

/// Reproduce the current sequence correctly, completing one round
pub fn complete_round(session: &mut Session) -> Result<(), DriveError> {
    run_until_input(session, 120_000)?;
    for color in session.sequence().to_vec() {
        session.submit(color);
    }
    if session.phase() == Phase::GameOver {
        return Err(DriveError::SessionEnded);
    }
    Ok(())
}

/// Complete `rounds` consecutive rounds
pub fn play_rounds(session: &mut Session, rounds: u32) -> Result<(), DriveError> {
    for _ in 0..rounds {
        complete_round(session)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_simon_core::policy;
    use tui_simon_types::{Difficulty, GameMode};

    fn session() -> Session {
        Session::new(policy::resolve(Difficulty::Normal, GameMode::Classic), 7)
    }

    #[test]
    fn test_run_until_input() {
        let mut session = session();
        session.start();
        run_until_input(&mut session, 10_000).unwrap();
        assert_eq!(session.phase(), Phase::AwaitingInput);
    }

    #[test]
    fn test_run_until_input_requires_started_session() {
        let mut session = session();
        // Idle sessions never open input; the budget bounds the wait.
        assert_eq!(
            run_until_input(&mut session, 1_000),
            Err(DriveError::InputNeverOpened)
        );
    }

    #[test]
    fn test_play_rounds_advances_level() {
        let mut session = session();
        session.start();
        play_rounds(&mut session, 5).unwrap();
        assert!(session.level() >= 5);
        assert_eq!(session.sequence().len() as u32, session.level());
    }
}
