//! Shared helpers for integration tests.

#![allow(dead_code)]

use stop_engine::{Countdown, MatchEngine, MatchState, ScriptedLetters};

/// Route engine logs to the test output. Set `RUST_LOG=stop_engine=debug`
/// to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Draw a specific letter for the current turn.
///
/// Panics if the letter was not the one drawn: `ScriptedLetters` falls back
/// to another letter when the requested one is spent.
pub fn draw(engine: &MatchEngine, state: &MatchState, letter: char) -> MatchState {
    let next = engine
        .draw_letter(state, &mut ScriptedLetters::new([letter]))
        .expect("letter available");
    assert_eq!(
        next.current_letter(),
        Some(letter),
        "letter {letter:?} was not available to draw"
    );
    next
}

/// Draw `letter`, then submit `word` with time left on the clock.
pub fn play(engine: &MatchEngine, state: &MatchState, letter: char, word: &str) -> MatchState {
    let state = draw(engine, state, letter);
    engine.submit_word(&state, word, Countdown::Running(10))
}

/// Names of the players still in the match, in seat order.
pub fn alive_names(state: &MatchState) -> Vec<String> {
    state.alive_players().map(|(_, p)| p.name.clone()).collect()
}
