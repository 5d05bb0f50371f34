//! Match configuration.
//!
//! Drivers configure the engine once, before creating matches:
//! - the letter alphabet and whether letters may repeat within a match
//! - the per-turn countdown
//! - roster size limits
//!
//! `MatchConfig` is a plain serde struct, so it can be loaded from whatever
//! format the driver keeps its settings in.

use serde::{Deserialize, Deserializer, Serialize};

use super::error::{MatchError, SetupIssue};
use super::player::MAX_SEATS;

/// Letters used by the Portuguese edition of the game (no K, W or Y).
pub const DEFAULT_ALPHABET: [char; 23] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'X', 'Z',
];

/// Countdown per turn, in seconds.
pub const DEFAULT_TURN_SECONDS: u32 = 20;

/// Category offered by default.
pub const DEFAULT_CATEGORY: &str = "Animais";

/// Categories offered by the stock game. Any label is accepted.
pub const DEFAULT_CATEGORIES: [&str; 7] = [
    "Animais",
    "Países",
    "Comidas",
    "Profissões",
    "Filmes",
    "Marcas",
    "Esportes",
];

/// Whether a letter may be drawn more than once in the same match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LetterPolicy {
    /// Each letter is drawn at most once; the match can run out of letters.
    #[default]
    NoRepeat,
    /// Every draw picks from the full alphabet.
    AllowRepeat,
}

/// Match configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Letters that can be drawn. Uppercase, no repeats. Uppercased on load.
    #[serde(deserialize_with = "uppercase_alphabet")]
    pub alphabet: Vec<char>,

    /// Letter repetition rule.
    pub letter_policy: LetterPolicy,

    /// Countdown per turn, in seconds.
    pub turn_seconds: u32,

    /// Fewest players a match can start with (never below 2).
    pub min_players: usize,

    /// Most players a match can start with. `None` = only the seat cap.
    pub max_players: Option<usize>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.to_vec(),
            letter_policy: LetterPolicy::NoRepeat,
            turn_seconds: DEFAULT_TURN_SECONDS,
            min_players: 2,
            max_players: None,
        }
    }
}

fn uppercase(letters: impl IntoIterator<Item = char>) -> Vec<char> {
    letters.into_iter().flat_map(char::to_uppercase).collect()
}

fn uppercase_alphabet<'de, D>(deserializer: D) -> Result<Vec<char>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<char>::deserialize(deserializer).map(uppercase)
}

fn same_letter(a: char, b: char) -> bool {
    a.to_uppercase().eq(b.to_uppercase())
}

impl MatchConfig {
    /// Use a custom alphabet. Letters are uppercased.
    pub fn with_alphabet(mut self, letters: impl IntoIterator<Item = char>) -> Self {
        self.alphabet = uppercase(letters);
        self
    }

    /// Use a custom letter policy.
    pub fn with_letter_policy(mut self, policy: LetterPolicy) -> Self {
        self.letter_policy = policy;
        self
    }

    /// Use a custom turn duration.
    pub fn with_turn_seconds(mut self, seconds: u32) -> Self {
        self.turn_seconds = seconds;
        self
    }

    /// Use a custom player range.
    pub fn with_player_limits(mut self, min: usize, max: Option<usize>) -> Self {
        self.min_players = min;
        self.max_players = max;
        self
    }

    /// Effective minimum roster size.
    #[must_use]
    pub fn min_players(&self) -> usize {
        self.min_players.max(2)
    }

    /// Effective maximum roster size.
    #[must_use]
    pub fn max_players(&self) -> usize {
        self.max_players.map_or(MAX_SEATS, |max| max.min(MAX_SEATS))
    }

    /// Check the alphabet.
    ///
    /// Letters are compared ignoring case, so `a` repeats `A`. A lowercase
    /// letter set directly on the field is rejected.
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.alphabet.is_empty() {
            return Err(MatchError::invalid_setup(SetupIssue::EmptyAlphabet));
        }
        for (i, &letter) in self.alphabet.iter().enumerate() {
            if self.alphabet[..i].iter().any(|&seen| same_letter(seen, letter)) {
                return Err(MatchError::invalid_setup(SetupIssue::RepeatedLetter {
                    letter: letter.to_uppercase().next().unwrap_or(letter),
                }));
            }
        }
        if let Some(&letter) = self.alphabet.iter().find(|letter| letter.is_lowercase()) {
            return Err(MatchError::invalid_setup(SetupIssue::LowercaseLetter { letter }));
        }
        Ok(())
    }

    /// Check a cleaned roster size against the limits.
    pub fn check_roster_size(&self, found: usize) -> Result<(), MatchError> {
        let min = self.min_players();
        if found < min {
            return Err(MatchError::invalid_setup(SetupIssue::TooFewPlayers { min, found }));
        }
        let max = self.max_players();
        if found > max {
            return Err(MatchError::invalid_setup(SetupIssue::TooManyPlayers { max, found }));
        }
        Ok(())
    }
}
