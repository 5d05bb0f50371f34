//! Core engine types: players, match snapshot, configuration, letter draws,
//! errors.
//!
//! Nothing in here knows the turn rules; those live in `rules`.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;
pub mod state;

pub use player::{normalize_roster, Player, PlayerId, MAX_SEATS};
pub use rng::{LetterSource, MatchRng, MatchRngState, ScriptedLetters};
pub use config::{
    LetterPolicy, MatchConfig, DEFAULT_ALPHABET, DEFAULT_CATEGORIES, DEFAULT_CATEGORY,
    DEFAULT_TURN_SECONDS,
};
pub use error::{MatchError, SetupIssue, SnapshotError};
pub use state::{EliminationReason, EliminationRecord, MatchState, Phase, TurnOutcome, WordEntry};
