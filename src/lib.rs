//! # stop-engine
//!
//! Rules engine for STOP, the party word game: each turn a player gets a
//! freshly drawn letter and must name something in the match's category that
//! starts with it, before the countdown runs out, without repeating a word
//! anyone has used. A miss eliminates the player; the last one standing wins.
//!
//! ## Design Principles
//!
//! 1. **Snapshots, not mutation**: every command takes a `MatchState` and
//!    returns a new one. Drivers replace their copy wholesale, so observers
//!    never see a half-applied transition.
//!
//! 2. **No ambient time or randomness**: letter draws go through an
//!    injected `LetterSource`; the turn clock is ticked by whatever schedules
//!    the driver.
//!
//! 3. **Eliminations are outcomes, not errors**: only an invalid setup and an
//!    exhausted alphabet fail an operation.
//!
//! ## Modules
//!
//! - `core`: players, snapshot, configuration, letter sources, errors
//! - `rules`: the match engine, word checks, turn rotation
//! - `clock`: the per-turn countdown
//! - `vote`: show-of-hands tallies
//! - `driver`: reference driver tying engine, clock and vote together

pub mod core;
pub mod rules;
pub mod clock;
pub mod vote;
pub mod driver;

// Re-export commonly used types
pub use crate::core::{
    EliminationReason, EliminationRecord, LetterPolicy, LetterSource, MatchConfig, MatchError,
    MatchRng, MatchState, Phase, Player, PlayerId, ScriptedLetters, SetupIssue, SnapshotError,
    TurnOutcome, WordEntry,
};

pub use crate::rules::{MatchEngine, WordVerdict};

pub use crate::clock::{ClockTick, Countdown, TurnClock};

pub use crate::vote::{VoteChoice, VoteSession, VoteVerdict};

pub use crate::driver::MatchDriver;
