//! Match snapshot.
//!
//! ## MatchState
//!
//! Everything the driver and the rendering layer can observe about a match:
//! - Category, roster, whose turn it is
//! - The pending letter, drawn letters, used words
//! - Accepted-word and elimination history
//! - Outcome (`is_over`, winner)
//!
//! Snapshots are values. The engine never mutates one it has handed out; each
//! transition returns a fresh snapshot and the driver replaces its copy
//! wholesale. Collections are `im` persistent structures, so producing a new
//! snapshot costs O(1) plus the size of the change.

use derive_more::Display;
use im::{HashSet as ImHashSet, Vector};
use serde::{Deserialize, Serialize};

use super::error::SnapshotError;
use super::player::{Player, PlayerId, MAX_SEATS};

/// Why a player left the match.
///
/// These are recorded outcomes, not errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EliminationReason {
    /// The countdown reached zero before a word was accepted.
    #[display("timeout")]
    Timeout,
    /// The submitted word was empty after trimming.
    #[display("blank")]
    Blank,
    /// The word does not start with the drawn letter.
    #[display("wrong-letter")]
    WrongLetter,
    /// The word was already used in this match.
    #[display("duplicate")]
    Duplicate,
    /// The player gave up.
    #[display("concede")]
    Concede,
    /// The group voted the player out.
    #[display("vote")]
    Vote,
}

/// An accepted word. Append-only history.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordEntry {
    /// Seat that played the word.
    pub player: PlayerId,
    /// Name of that seat's player.
    pub player_name: String,
    /// Letter drawn for the turn.
    pub letter: char,
    /// The word, trimmed, original case.
    pub word: String,
}

/// An elimination. Append-only history.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EliminationRecord {
    pub player: PlayerId,
    pub player_name: String,
    pub reason: EliminationReason,
    /// Turn number the elimination ended.
    pub turn: u32,
}

/// What the most recent transition did, for display.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// The word was accepted and the turn passed on.
    Accepted { player: PlayerId, word: String },
    /// The player was eliminated.
    Eliminated {
        player: PlayerId,
        reason: EliminationReason,
    },
    /// A vote kept the player; the turn passed on without penalty.
    Kept { player: PlayerId },
}

/// Where the match is in its turn cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Current player has no letter yet.
    AwaitingLetter,
    /// A letter is drawn; waiting for a word.
    AwaitingWord,
    /// Terminal.
    GameOver,
}

/// Match snapshot.
///
/// Deserializing runs [`MatchState::check`]; an inconsistent snapshot is a
/// deserialization error rather than a panic later in the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMatchState")]
pub struct MatchState {
    pub(crate) category: String,
    pub(crate) players: Vector<Player>,
    pub(crate) current: PlayerId,
    pub(crate) current_letter: Option<char>,
    /// Lowercased.
    pub(crate) used_words: ImHashSet<String>,
    pub(crate) used_letters: ImHashSet<char>,
    pub(crate) accepted_words: Vector<WordEntry>,
    pub(crate) last_word: Option<String>,
    pub(crate) is_over: bool,
    pub(crate) winner_name: Option<String>,
    pub(crate) turn_number: u32,
    pub(crate) last_outcome: Option<TurnOutcome>,
    pub(crate) eliminations: Vector<EliminationRecord>,
}

/// Wire form of [`MatchState`], before the consistency check.
#[derive(Deserialize)]
struct RawMatchState {
    category: String,
    players: Vector<Player>,
    current: PlayerId,
    current_letter: Option<char>,
    used_words: ImHashSet<String>,
    used_letters: ImHashSet<char>,
    accepted_words: Vector<WordEntry>,
    last_word: Option<String>,
    is_over: bool,
    winner_name: Option<String>,
    turn_number: u32,
    last_outcome: Option<TurnOutcome>,
    eliminations: Vector<EliminationRecord>,
}

impl TryFrom<RawMatchState> for MatchState {
    type Error = SnapshotError;

    fn try_from(raw: RawMatchState) -> Result<Self, Self::Error> {
        let state = MatchState {
            category: raw.category,
            players: raw.players,
            current: raw.current,
            current_letter: raw.current_letter,
            used_words: raw.used_words,
            used_letters: raw.used_letters,
            accepted_words: raw.accepted_words,
            last_word: raw.last_word,
            is_over: raw.is_over,
            winner_name: raw.winner_name,
            turn_number: raw.turn_number,
            last_outcome: raw.last_outcome,
            eliminations: raw.eliminations,
        };
        state.check()?;
        Ok(state)
    }
}

impl MatchState {
    /// Fresh match: first seat to play, no letter drawn, turn 1.
    ///
    /// The roster must already be cleaned and size-checked; the engine's
    /// `new_match` is the public way in.
    pub(crate) fn new(category: impl Into<String>, roster: Vec<String>) -> Self {
        Self {
            category: category.into(),
            players: roster.into_iter().map(Player::new).collect(),
            current: PlayerId::new(0),
            current_letter: None,
            used_words: ImHashSet::new(),
            used_letters: ImHashSet::new(),
            accepted_words: Vector::new(),
            last_word: None,
            is_over: false,
            winner_name: None,
            turn_number: 1,
            last_outcome: None,
            eliminations: Vector::new(),
        }
    }

    // === Accessors ===

    /// Category label for the match.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Full roster in seat order, eliminated players included.
    #[must_use]
    pub fn players(&self) -> &Vector<Player> {
        &self.players
    }

    /// Player in a given seat.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    /// Number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Seat whose turn it is.
    #[must_use]
    pub fn current_index(&self) -> PlayerId {
        self.current
    }

    /// Letter drawn for the current turn, if any.
    #[must_use]
    pub fn current_letter(&self) -> Option<char> {
        self.current_letter
    }

    /// Words used so far, lowercased.
    #[must_use]
    pub fn used_words(&self) -> &ImHashSet<String> {
        &self.used_words
    }

    /// Letters drawn so far.
    #[must_use]
    pub fn used_letters(&self) -> &ImHashSet<char> {
        &self.used_letters
    }

    /// Accepted words in play order.
    #[must_use]
    pub fn accepted_words(&self) -> &Vector<WordEntry> {
        &self.accepted_words
    }

    /// Most recently accepted word, original case. Cleared by the next draw
    /// or by an elimination.
    #[must_use]
    pub fn last_word(&self) -> Option<&str> {
        self.last_word.as_deref()
    }

    /// Name of the last player standing. `None` while playing, and in the
    /// degenerate case where nobody is left.
    #[must_use]
    pub fn winner_name(&self) -> Option<&str> {
        self.winner_name.as_deref()
    }

    /// Turn counter, starting at 1.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// What the most recent turn-ending transition did.
    #[must_use]
    pub fn last_outcome(&self) -> Option<&TurnOutcome> {
        self.last_outcome.as_ref()
    }

    /// Eliminations in the order they happened.
    #[must_use]
    pub fn eliminations(&self) -> &Vector<EliminationRecord> {
        &self.eliminations
    }

    // === Consistency ===

    /// Check the invariants every engine-produced snapshot holds: the
    /// current seat exists, a running match has at least two players alive
    /// and the current one among them, a finished one has at most one and
    /// names them as winner, and a pending letter has been drawn.
    pub fn check(&self) -> Result<(), SnapshotError> {
        let players = self.players.len();
        if players == 0 || players > MAX_SEATS {
            return Err(SnapshotError::PlayerCount {
                max: MAX_SEATS,
                found: players,
            });
        }
        let seat = self.current.index();
        if seat >= players {
            return Err(SnapshotError::SeatOutOfRange { seat, players });
        }

        let alive = self.alive_count();
        if self.is_over != (alive <= 1) {
            return Err(SnapshotError::OutcomeMismatch {
                is_over: self.is_over,
                alive,
            });
        }
        if self.is_over {
            let survivor = self.alive_players().next().map(|(_, p)| p.name.as_str());
            if self.winner_name.as_deref() != survivor {
                return Err(SnapshotError::WinnerMismatch);
            }
        } else {
            if self.winner_name.is_some() {
                return Err(SnapshotError::WinnerMismatch);
            }
            if !self.players[seat].is_alive() {
                return Err(SnapshotError::SeatEliminated { seat });
            }
        }

        if let Some(letter) = self.current_letter {
            if !self.used_letters.contains(&letter) {
                return Err(SnapshotError::LetterNotDrawn { letter });
            }
        }
        Ok(())
    }

    // === Queries ===

    /// Players not yet eliminated.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_alive()).count()
    }

    /// Players not yet eliminated, in seat order.
    pub fn alive_players(&self) -> impl Iterator<Item = (PlayerId, &Player)> {
        self.players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_alive())
            .map(|(i, p)| (PlayerId(i as u8), p))
    }

    /// Player whose turn it is, or `None` once nobody can take a turn.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        if self.is_over {
            return None;
        }
        self.player(self.current).filter(|p| p.is_alive())
    }

    /// Has the match ended?
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.is_over
    }

    /// Where the match is in its turn cycle.
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.is_over {
            Phase::GameOver
        } else if self.current_letter.is_some() {
            Phase::AwaitingWord
        } else {
            Phase::AwaitingLetter
        }
    }

    /// Has `letter` been drawn in this match?
    #[must_use]
    pub fn is_letter_used(&self, letter: char) -> bool {
        self.used_letters.contains(&letter)
    }

    /// Has `word` been used, ignoring case and surrounding whitespace?
    #[must_use]
    pub fn is_word_used(&self, word: &str) -> bool {
        self.used_words.contains(&word.trim().to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_match_state_new() {
        let state = MatchState::new("Animais", roster(&["Ana", "Bia", "Caio"]));

        assert_eq!(state.category(), "Animais");
        assert_eq!(state.player_count(), 3);
        assert_eq!(state.alive_count(), 3);
        assert_eq!(state.current_index(), PlayerId::new(0));
        assert_eq!(state.current_player().map(|p| p.name.as_str()), Some("Ana"));
        assert_eq!(state.current_letter(), None);
        assert_eq!(state.turn_number(), 1);
        assert_eq!(state.phase(), Phase::AwaitingLetter);
        assert!(!state.is_over());
        assert!(state.winner_name().is_none());
        assert!(state.used_words().is_empty());
        assert!(state.used_letters().is_empty());
        assert!(state.accepted_words().is_empty());
        assert!(state.eliminations().is_empty());
        assert!(state.last_outcome().is_none());
    }

    #[test]
    fn test_alive_players_skips_eliminated() {
        let mut state = MatchState::new("Filmes", roster(&["Ana", "Bia", "Caio"]));
        state.players[1].eliminated = true;

        let alive: Vec<_> = state.alive_players().map(|(id, p)| (id, p.name.clone())).collect();
        assert_eq!(
            alive,
            vec![
                (PlayerId::new(0), "Ana".to_string()),
                (PlayerId::new(2), "Caio".to_string())
            ]
        );
        assert_eq!(state.alive_count(), 2);
    }

    #[test]
    fn test_current_player_none_when_seat_eliminated() {
        let mut state = MatchState::new("Filmes", roster(&["Ana", "Bia"]));
        state.players[0].eliminated = true;
        assert!(state.current_player().is_none());
    }

    #[test]
    fn test_phase_follows_letter_and_outcome() {
        let mut state = MatchState::new("Marcas", roster(&["Ana", "Bia"]));
        state.current_letter = Some('M');
        assert_eq!(state.phase(), Phase::AwaitingWord);
        state.is_over = true;
        assert_eq!(state.phase(), Phase::GameOver);
        assert!(state.current_player().is_none());
    }

    #[test]
    fn test_word_lookup_ignores_case() {
        let mut state = MatchState::new("Animais", roster(&["Ana", "Bia"]));
        state.used_words.insert("gato".to_string());
        assert!(state.is_word_used("Gato"));
        assert!(state.is_word_used("  GATO "));
        assert!(!state.is_word_used("gata"));
    }

    #[test]
    fn test_clone_is_independent() {
        let state = MatchState::new("Animais", roster(&["Ana", "Bia"]));
        let mut copy = state.clone();
        copy.used_letters.insert('A');
        copy.players[0].eliminated = true;

        assert!(state.used_letters().is_empty());
        assert!(state.players()[0].is_alive());
    }

    #[test]
    fn test_elimination_reason_names() {
        assert_eq!(EliminationReason::Timeout.to_string(), "timeout");
        assert_eq!(EliminationReason::WrongLetter.to_string(), "wrong-letter");
        assert_eq!(
            serde_json::to_string(&EliminationReason::WrongLetter).unwrap(),
            "\"wrong-letter\""
        );
        assert_eq!(
            serde_json::from_str::<EliminationReason>("\"concede\"").unwrap(),
            EliminationReason::Concede
        );
    }

    #[test]
    fn test_state_serialization() {
        let mut state = MatchState::new("Países", roster(&["Ana", "Bia"]));
        state.used_letters.insert('B');
        state.used_words.insert("brasil".to_string());

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: MatchState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }

    fn reload(
        state: &MatchState,
        edit: impl FnOnce(&mut serde_json::Value),
    ) -> serde_json::Result<MatchState> {
        let mut json = serde_json::to_value(state).unwrap();
        edit(&mut json);
        serde_json::from_value(json)
    }

    #[test]
    fn test_deserialize_rejects_seat_out_of_range() {
        let state = MatchState::new("Animais", roster(&["Ana", "Bia"]));
        let err = reload(&state, |json| json["current"] = 7.into()).unwrap_err();
        assert!(err.to_string().contains("current seat 7 is out of range for 2 players"));
    }

    #[test]
    fn test_deserialize_rejects_inconsistent_outcome() {
        let state = MatchState::new("Animais", roster(&["Ana", "Bia", "Caio"]));

        assert!(reload(&state, |json| json["is_over"] = true.into()).is_err());
        assert!(reload(&state, |json| json["players"] = serde_json::json!([])).is_err());
        assert!(reload(&state, |json| json["winner_name"] = "Ana".into()).is_err());
        assert!(reload(&state, |json| json["current_letter"] = "G".into()).is_err());
        assert!(reload(&state, |json| json["players"][0]["eliminated"] = true.into()).is_err());
    }

    #[test]
    fn test_check_accepts_finished_match() {
        let mut state = MatchState::new("Animais", roster(&["Ana", "Bia"]));
        state.players[0].eliminated = true;
        state.is_over = true;
        state.winner_name = Some("Bia".to_string());
        assert_eq!(state.check(), Ok(()));

        let restored = reload(&state, |_| {}).unwrap();
        assert_eq!(restored, state);
    }
}
