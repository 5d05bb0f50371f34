//! Hard failures of the match engine.
//!
//! Only two things abort an operation without producing a new snapshot:
//! a match that cannot be set up, and an exhausted alphabet. Wrong letters,
//! repeated words, timeouts and the rest are ordinary eliminations recorded
//! on the snapshot (see `EliminationReason`), not errors.

use derive_more::{Display, Error};

/// Why a match could not be created.
#[derive(Clone, Debug, PartialEq, Eq, Display)]
pub enum SetupIssue {
    /// Fewer usable names than the configured minimum.
    #[display("need at least {min} players, got {found}")]
    TooFewPlayers { min: usize, found: usize },

    /// More names than the configured (or hard) maximum.
    #[display("at most {max} players allowed, got {found}")]
    TooManyPlayers { max: usize, found: usize },

    /// The configured alphabet has no letters.
    #[display("alphabet is empty")]
    EmptyAlphabet,

    /// The configured alphabet lists a letter twice.
    #[display("letter {letter:?} appears more than once in the alphabet")]
    RepeatedLetter { letter: char },

    /// The configured alphabet has a lowercase letter.
    #[display("letter {letter:?} must be uppercase")]
    LowercaseLetter { letter: char },
}

/// Engine error.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum MatchError {
    /// Construction-time validation failure. Fatal to the attempted match.
    #[display("invalid setup: {issue}")]
    InvalidSetup { issue: SetupIssue },

    /// Every letter has been drawn. The match cannot continue, but no
    /// player is at fault.
    #[display("no letters remaining: all {alphabet_size} letters have been drawn")]
    NoLettersRemaining { alphabet_size: usize },
}

/// Why a deserialized snapshot was rejected.
///
/// Snapshots coming back from storage are checked before the engine sees
/// them, so a hand-edited or truncated file cannot point the turn at a seat
/// that does not exist.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum SnapshotError {
    #[display("snapshot has {found} players, expected 1 to {max}")]
    PlayerCount { max: usize, found: usize },

    #[display("current seat {seat} is out of range for {players} players")]
    SeatOutOfRange { seat: usize, players: usize },

    #[display("current seat {seat} is eliminated but the match is running")]
    SeatEliminated { seat: usize },

    #[display("match over flag is {is_over} with {alive} players alive")]
    OutcomeMismatch { is_over: bool, alive: usize },

    #[display("winner does not match the last player standing")]
    WinnerMismatch,

    #[display("pending letter {letter:?} is not among the drawn letters")]
    LetterNotDrawn { letter: char },
}

impl MatchError {
    /// Shorthand for an `InvalidSetup` error.
    #[must_use]
    pub fn invalid_setup(issue: SetupIssue) -> Self {
        Self::InvalidSetup { issue }
    }
}
