//! Turn clock integration tests.
//!
//! The clock and the engine only meet through a driver. These tests play
//! that role both ways: with a callback that feeds timeouts back into the
//! engine, and through `MatchDriver`.

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{draw, init_tracing};
use stop_engine::{
    ClockTick, Countdown, EliminationReason, MatchConfig, MatchDriver, MatchEngine, PlayerId,
    ScriptedLetters, TurnClock, VoteChoice,
};

/// Expiry callback eliminates the current player exactly once.
#[test]
fn test_callback_drives_timeout_elimination() {
    init_tracing();
    let engine = Rc::new(MatchEngine::default());
    let state = Rc::new(RefCell::new(
        engine.new_match("Animais", ["A", "B", "C"]).unwrap(),
    ));

    let mut clock = {
        let engine = Rc::clone(&engine);
        let state = Rc::clone(&state);
        TurnClock::new(20, move |reason: EliminationReason| {
            let next = engine.eliminate(&state.borrow(), reason);
            *state.borrow_mut() = next;
        })
    };

    let drawn = draw(&engine, &state.borrow(), 'G');
    *state.borrow_mut() = drawn;
    clock.restart();

    for _ in 0..19 {
        assert!(matches!(clock.tick(), ClockTick::Running(_)));
    }
    assert_eq!(state.borrow().alive_count(), 3);
    assert_eq!(clock.tick(), ClockTick::Expired);

    let after = state.borrow().clone();
    assert!(after.players()[0].eliminated);
    assert_eq!(after.eliminations()[0].reason, EliminationReason::Timeout);
    assert_eq!(after.current_index(), PlayerId::new(1));

    // Idle ticks and repeated cancels change nothing.
    clock.cancel();
    clock.cancel();
    for _ in 0..30 {
        assert_eq!(clock.tick(), ClockTick::Idle);
    }
    assert_eq!(*state.borrow(), after);
}

/// A word submitted after expiry is a timeout, whatever the word.
#[test]
fn test_submission_after_expiry_is_timeout() {
    init_tracing();
    let engine = MatchEngine::default();
    let state = engine.new_match("Animais", ["A", "B", "C"]).unwrap();
    let state = draw(&engine, &state, 'G');

    let mut clock = TurnClock::polling(1);
    clock.restart();
    clock.tick();
    assert_eq!(clock.countdown(), Countdown::Expired);

    let next = engine.submit_word(&state, "Gato", clock.countdown());
    assert_eq!(next.eliminations()[0].reason, EliminationReason::Timeout);
    assert!(!next.is_word_used("gato"));
}

fn driver(seconds: u32, names: &[&str], letters: &[char]) -> MatchDriver<ScriptedLetters> {
    init_tracing();
    let engine = MatchEngine::new(MatchConfig::default().with_turn_seconds(seconds));
    MatchDriver::new(
        engine,
        "Profissões",
        names.iter().copied(),
        ScriptedLetters::new(letters.iter().copied()),
    )
    .unwrap()
}

/// Accepting a word stops the clock; the next draw re-arms it at full time.
#[test]
fn test_driver_rearms_clock_per_turn() {
    let mut driver = driver(20, &["A", "B"], &['M', 'P']);

    driver.draw_letter().unwrap();
    for _ in 0..15 {
        driver.tick();
    }
    assert_eq!(driver.clock().remaining(), 5);

    driver.submit_word("Médico");
    assert!(!driver.clock().is_armed());
    assert_eq!(driver.tick(), ClockTick::Idle);

    driver.draw_letter().unwrap();
    assert_eq!(driver.clock().countdown(), Countdown::Running(20));
    assert_eq!(driver.state().current_player().unwrap().name, "B");
}

/// With no time on the clock, a word can never be accepted.
#[test]
fn test_zero_second_turn_never_accepts_word() {
    let mut driver = driver(0, &["A", "B"], &['G']);

    driver.draw_letter().unwrap();
    let state = driver.submit_word("Gato");

    assert!(state.accepted_words().is_empty());
    assert_eq!(state.eliminations().len(), 1);
    assert_eq!(state.eliminations()[0].reason, EliminationReason::Timeout);
    assert!(state.is_over());
    assert_eq!(state.winner_name(), Some("B"));
}

/// Timeouts alone can finish a match.
#[test]
fn test_driver_timeouts_end_match() {
    let mut driver = driver(2, &["A", "B", "C"], &['A', 'B', 'C']);

    for _ in 0..2 {
        driver.draw_letter().unwrap();
        driver.tick();
        assert_eq!(driver.tick(), ClockTick::Expired);
    }

    let state = driver.state();
    assert!(state.is_over());
    assert_eq!(state.winner_name(), Some("C"));
    assert!(!driver.clock().is_armed());
}

/// Opening a vote stops the countdown; a keep verdict passes the turn and
/// the clock stays off until the next draw.
#[test]
fn test_driver_vote_flow() {
    let mut driver = driver(5, &["A", "B", "C"], &['E', 'F']);
    driver.draw_letter().unwrap();
    driver.tick();

    driver.open_vote();
    driver.cast_vote(VoteChoice::No);
    driver.cast_vote(VoteChoice::No);
    driver.cast_vote(VoteChoice::Yes);
    let state = driver.resolve_vote().clone();

    assert_eq!(state.alive_count(), 3);
    assert_eq!(state.current_index(), PlayerId::new(1));
    assert!(!driver.clock().is_armed());
    assert!(driver.vote().is_none());

    driver.draw_letter().unwrap();
    assert_eq!(driver.clock().countdown(), Countdown::Running(5));
}

/// Conceding mid-turn stops the clock.
#[test]
fn test_driver_concede_cancels_clock() {
    let mut driver = driver(5, &["A", "B", "C"], &['E']);
    driver.draw_letter().unwrap();
    driver.concede();

    assert!(!driver.clock().is_armed());
    for _ in 0..10 {
        assert_eq!(driver.tick(), ClockTick::Idle);
    }
    assert_eq!(driver.state().alive_count(), 2);
}

/// Seeded drivers replay the same letters.
#[test]
fn test_seeded_driver_is_reproducible() {
    init_tracing();
    let letters = |seed| {
        let mut driver =
            MatchDriver::seeded(MatchEngine::default(), "Animais", ["A", "B"], seed).unwrap();
        (0..10)
            .map(|_| {
                let letter = driver.draw_letter().unwrap().current_letter().unwrap();
                driver.submit_word(&letter.to_string());
                letter
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(letters(7), letters(7));
}
