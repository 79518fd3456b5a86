//! Integration tests for the main game loop

use tui_simon::core::{policy, Session};
use tui_simon::engine::{complete_round, play_rounds, run_until_input};
use tui_simon::input::{classify, handle_key_event};
use tui_simon::types::{Action, Color, Difficulty, GameMode, Phase, TICK_MS};

use crossterm::event::{KeyCode, KeyEvent};

fn session(mode: GameMode) -> Session {
    Session::new(policy::resolve(Difficulty::Normal, mode), 12345)
}

#[test]
fn test_game_lifecycle() {
    let mut session = session(GameMode::Classic);
    assert_eq!(session.phase(), Phase::Idle);
    assert!(!session.started());

    session.dispatch(Action::Start);
    assert!(session.started());
    assert_eq!(session.phase(), Phase::Showing);
    assert_eq!(session.level(), 1);
    assert_eq!(session.sequence().len(), 1);
}

#[test]
fn test_full_round_via_dispatch() {
    let mut session = session(GameMode::Classic);
    session.dispatch(Action::Start);
    run_until_input(&mut session, 10_000).unwrap();

    let expected = session.sequence()[0];
    session.dispatch(Action::Press(expected));
    assert_eq!(session.phase(), Phase::Advancing);
    assert_eq!(session.score(), 22);
}

#[test]
fn test_pause_resume_via_dispatch() {
    let mut session = session(GameMode::Classic);
    session.dispatch(Action::Start);
    session.dispatch(Action::Pause);
    assert!(session.paused());

    // Nothing moves while paused.
    let phase = session.phase();
    for _ in 0..200 {
        session.tick(TICK_MS);
    }
    assert_eq!(session.phase(), phase);

    session.dispatch(Action::Pause);
    assert!(!session.paused());
    run_until_input(&mut session, 10_000).unwrap();
}

#[test]
fn test_reset_returns_to_idle() {
    let mut session = session(GameMode::Classic);
    session.dispatch(Action::Start);
    play_rounds(&mut session, 2).unwrap();
    assert!(session.score() > 0);

    session.dispatch(Action::Reset);
    assert_eq!(session.phase(), Phase::Idle);
    assert!(!session.started());
    assert_eq!(session.score(), 0);
    assert!(session.sequence().is_empty());
}

#[test]
fn test_keyboard_to_session_wiring() {
    let mut session = session(GameMode::Classic);

    // Space starts the game.
    let action = handle_key_event(KeyEvent::from(KeyCode::Char(' '))).unwrap();
    session.dispatch(action);
    assert!(session.started());

    run_until_input(&mut session, 10_000).unwrap();
    // Pad keys press pads; a wrong pad ends a classic game, the right one
    // completes the round. Drive the right one through the keymap.
    let expected = session.sequence()[0];
    let key = match expected {
        Color::Green => KeyCode::Char('1'),
        Color::Red => KeyCode::Char('2'),
        Color::Yellow => KeyCode::Char('3'),
        Color::Blue => KeyCode::Char('4'),
    };
    let action = handle_key_event(KeyEvent::from(key)).unwrap();
    session.dispatch(action);
    assert_eq!(session.phase(), Phase::Advancing);
}

#[test]
fn test_voice_commands_drive_the_session() {
    let mut session = session(GameMode::Classic);

    session.dispatch(classify("please start the game").unwrap());
    assert!(session.started());

    session.dispatch(classify("pause it").unwrap());
    assert!(session.paused());

    session.dispatch(classify("pause again").unwrap());
    assert!(!session.paused());

    run_until_input(&mut session, 10_000).unwrap();
    let expected = session.sequence()[0];
    session.dispatch(classify(expected.as_str()).unwrap());
    assert_eq!(session.phase(), Phase::Advancing);
}

#[test]
fn test_sequence_grows_by_one_per_round() {
    let mut session = session(GameMode::Classic);
    session.dispatch(Action::Start);
    for round in 1..=6u32 {
        assert_eq!(session.sequence().len() as u32, round);
        complete_round(&mut session).unwrap();
        run_until_input(&mut session, 30_000).unwrap();
    }
}

#[test]
fn test_playback_precedes_input_every_round() {
    let mut session = session(GameMode::Classic);
    session.dispatch(Action::Start);

    for _ in 0..4 {
        // Input is refused until the last playback step resolves.
        while session.phase() != Phase::AwaitingInput {
            let len = session.user_input().len();
            session.submit(Color::Red);
            assert_eq!(session.user_input().len(), len, "input accepted early");
            session.tick(TICK_MS);
        }
        for color in session.sequence().to_vec() {
            session.submit(color);
        }
    }
}
