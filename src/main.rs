//! Terminal Simon runner (default binary).
//!
//! This is the primary gameplay entrypoint. It uses crossterm for input, the
//! term crate for rendering, and the adapter crate for profile persistence.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use tui_simon::adapter::{self, ProfileStore, RecordedPattern, Settings, StatsProfile};
use tui_simon::core::{policy, Session};
use tui_simon::input::{handle_key_event, should_quit};
use tui_simon::term::{GameView, TerminalRenderer};
use tui_simon::types::{Action, Effect, TICK_MS};

struct CliArgs {
    difficulty: Option<String>,
    mode: String,
    data_dir: String,
}

fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut parsed = CliArgs {
        difficulty: None,
        mode: "classic".to_string(),
        data_dir: std::env::var("TUI_SIMON_DATA").unwrap_or_else(|_| ".tui-simon".to_string()),
    };

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--difficulty" => {
                i += 1;
                parsed.difficulty = Some(
                    args.get(i)
                        .ok_or_else(|| anyhow::anyhow!("--difficulty requires a value"))?
                        .clone(),
                );
            }
            "--mode" => {
                i += 1;
                parsed.mode = args
                    .get(i)
                    .ok_or_else(|| anyhow::anyhow!("--mode requires a value"))?
                    .clone();
            }
            "--data-dir" => {
                i += 1;
                parsed.data_dir = args
                    .get(i)
                    .ok_or_else(|| anyhow::anyhow!("--data-dir requires a value"))?
                    .clone();
            }
            other => anyhow::bail!("unknown argument: {other}"),
        }
        i += 1;
    }
    Ok(parsed)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = parse_args(&args)?;

    let store = ProfileStore::new(&cli.data_dir);
    let stats = store.load_stats().unwrap_or_else(|err| {
        warn!(error = %err, "failed to load stats, starting fresh");
        None
    });
    let settings = store.load_settings().unwrap_or_else(|err| {
        warn!(error = %err, "failed to load settings, using defaults");
        None
    });
    let patterns = store.load_patterns().unwrap_or_else(|err| {
        warn!(error = %err, "failed to load patterns");
        Vec::new()
    });

    let mut stats = stats.unwrap_or_default();
    let settings = settings.unwrap_or_default();

    // CLI difficulty wins over the persisted setting; unknown keys are fatal.
    let difficulty_key = cli.difficulty.unwrap_or_else(|| settings.difficulty.clone());
    let config = policy::resolve_keys(&difficulty_key, &cli.mode)?;

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(1);

    let mut session = Session::new(config, seed);
    session.set_high_score(stats.high_score);
    session.set_earned_achievements(stats.achievements.clone());
    session.set_saved_pattern_count(patterns.len());

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, &mut session, &mut stats, &store, patterns);
    let _ = term.exit();

    // Persist the current difficulty for the next launch.
    let settings = Settings {
        difficulty: difficulty_key,
        ..settings
    };
    if let Err(err) = store.save_settings(&settings) {
        warn!(error = %err, "failed to persist settings");
    }

    result
}

fn run(
    term: &mut TerminalRenderer,
    session: &mut Session,
    stats: &mut StatsProfile,
    store: &ProfileStore,
    mut patterns: Vec<RecordedPattern>,
) -> Result<()> {
    let mut view = GameView::new();
    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        term.draw(&view.render(session))?;

        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        return Ok(());
                    }

                    // `m` toggles the pattern recorder (presentation-level
                    // binding, so the core keymap stays mode-free).
                    if key.code == KeyCode::Char('m') {
                        toggle_recording(session, store, &mut patterns, &mut view);
                    } else if let Some(action) = handle_key_event(key) {
                        if action == Action::Start {
                            stats.games_played += 1;
                        }
                        session.dispatch(action);
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_duration {
            let elapsed = last_tick.elapsed().as_millis() as u32;
            last_tick = Instant::now();
            session.tick(elapsed);
            view.tick(elapsed);

            let effects = session.drain_effects();
            for effect in &effects {
                if let Effect::SessionEnded(summary) = effect {
                    stats.record_session(summary);
                    stats.merge_achievements(session.earned_achievements());
                    adapter::save_stats_best_effort(store, stats);
                }
            }
            adapter::dispatch(effects, &mut view);
        }
    }
}

fn toggle_recording(
    session: &mut Session,
    store: &ProfileStore,
    patterns: &mut Vec<RecordedPattern>,
    view: &mut GameView,
) {
    use tui_simon_adapter::EffectSink;

    if !session.recording() {
        session.start_recording();
        view.announce("Recording Started!", "Your moves are being recorded");
        return;
    }

    let moves = session.stop_recording();
    if moves.is_empty() {
        view.announce("Recording Stopped", "No moves captured");
        return;
    }

    let name = format!("pattern-{}", patterns.len() + 1);
    let config = *session.config();
    patterns.push(RecordedPattern::new(
        name.clone(),
        &moves,
        config.difficulty,
        config.mode,
    ));
    session.set_saved_pattern_count(patterns.len());
    if let Err(err) = store.save_patterns(patterns) {
        warn!(error = %err, "failed to persist patterns");
    }
    view.announce("Pattern Saved!", &format!("\"{name}\" saved successfully"));
}
