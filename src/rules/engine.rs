//! Match engine: pure transitions from a snapshot plus a command to a new
//! snapshot.
//!
//! ## Turn cycle
//!
//! ```text
//! new_match -> AwaitingLetter --draw_letter--> AwaitingWord
//!                   ^                               |
//!                   +---- accepted / eliminated ----+
//!                                                   |
//!                                      last player standing -> GameOver
//! ```
//!
//! Every command takes `&MatchState` and returns a fresh snapshot; the input
//! is never modified. Commands issued in the wrong phase (drawing twice,
//! submitting with no letter, anything after the match ended) return an
//! identical snapshot and log a warning.

use smallvec::SmallVec;
use tracing::{debug, info, instrument, warn};

use super::rotation::next_alive_index;
use super::validation::{check_word, WordVerdict};
use crate::clock::Countdown;
use crate::core::{
    normalize_roster, EliminationReason, EliminationRecord, LetterPolicy, LetterSource,
    MatchConfig, MatchError, MatchState, Phase, TurnOutcome, WordEntry, DEFAULT_CATEGORY,
};
use crate::vote::{VoteChoice, VoteSession, VoteVerdict};

/// Rules engine for one configuration. Stateless apart from the config; one
/// engine can serve any number of sequential matches.
#[derive(Clone, Debug, Default)]
pub struct MatchEngine {
    config: MatchConfig,
}

impl MatchEngine {
    /// Engine with the given configuration. The config is validated when a
    /// match is created.
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    // === Setup ===

    /// Start a match.
    ///
    /// Names are trimmed, blanks dropped and repeats removed before the
    /// roster size is checked. A blank category falls back to
    /// [`DEFAULT_CATEGORY`].
    ///
    /// ```
    /// use stop_engine::rules::MatchEngine;
    ///
    /// let engine = MatchEngine::default();
    /// let state = engine.new_match("Animais", ["Ana", " Bia ", ""]).unwrap();
    /// assert_eq!(state.player_count(), 2);
    ///
    /// assert!(engine.new_match("Animais", ["Ana", "  "]).is_err());
    /// ```
    #[instrument(skip(self, names))]
    pub fn new_match<I, S>(&self, category: &str, names: I) -> Result<MatchState, MatchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.config.validate()?;
        let roster = normalize_roster(names);
        self.config.check_roster_size(roster.len())?;

        let category = match category.trim() {
            "" => DEFAULT_CATEGORY,
            trimmed => trimmed,
        };
        info!(players = roster.len(), category, "match created");
        Ok(MatchState::new(category, roster))
    }

    // === Letters ===

    /// Letters the next draw can pick from, in alphabet order.
    #[must_use]
    pub fn remaining_letters(&self, state: &MatchState) -> SmallVec<[char; 32]> {
        match self.config.letter_policy {
            LetterPolicy::NoRepeat => self
                .config
                .alphabet
                .iter()
                .copied()
                .filter(|letter| !state.is_letter_used(*letter))
                .collect(),
            LetterPolicy::AllowRepeat => self.config.alphabet.iter().copied().collect(),
        }
    }

    /// Draw the letter for the current turn.
    ///
    /// Fails with `NoLettersRemaining` when the alphabet is exhausted; that
    /// is an unplayable match, not the player's fault. A source that answers
    /// with a letter outside the remaining set gets the first remaining
    /// letter instead.
    #[instrument(skip(self, state, source), fields(turn = state.turn_number))]
    pub fn draw_letter<S>(&self, state: &MatchState, source: &mut S) -> Result<MatchState, MatchError>
    where
        S: LetterSource + ?Sized,
    {
        if state.phase() != Phase::AwaitingLetter {
            warn!(phase = ?state.phase(), "draw_letter ignored");
            return Ok(state.clone());
        }

        let remaining = self.remaining_letters(state);
        let Some(&fallback) = remaining.first() else {
            return Err(MatchError::NoLettersRemaining {
                alphabet_size: self.config.alphabet.len(),
            });
        };
        let letter = match source.pick(&remaining) {
            Some(letter) if remaining.contains(&letter) => letter,
            picked => {
                warn!(?picked, %fallback, "letter source missed the remaining set");
                fallback
            }
        };

        let mut next = state.clone();
        next.current_letter = Some(letter);
        next.last_word = None;
        next.used_letters.insert(letter);
        debug!(%letter, remaining = remaining.len() - 1, "letter drawn");
        Ok(next)
    }

    // === Words ===

    /// Submit the current player's word.
    ///
    /// `countdown` is the turn clock's status at submission time; an expired
    /// countdown eliminates the player for timeout before the word is looked
    /// at. Pass `Countdown::Idle` for untimed play.
    #[instrument(skip(self, state), fields(turn = state.turn_number))]
    pub fn submit_word(&self, state: &MatchState, raw: &str, countdown: Countdown) -> MatchState {
        let Some(letter) = state.current_letter.filter(|_| !state.is_over) else {
            warn!(phase = ?state.phase(), "submit_word ignored");
            return state.clone();
        };

        if countdown.is_expired() {
            return self.eliminate(state, EliminationReason::Timeout);
        }

        match check_word(raw, letter, &state.used_words) {
            WordVerdict::Reject(reason) => self.eliminate(state, reason),
            WordVerdict::Accept { normalized, shown } => {
                self.accept_word(state, letter, normalized, shown)
            }
        }
    }

    fn accept_word(
        &self,
        state: &MatchState,
        letter: char,
        normalized: String,
        shown: String,
    ) -> MatchState {
        let mut next = state.clone();
        let seat = next.current;
        let player_name = next.players[seat.index()].name.clone();

        next.used_words.insert(normalized);
        next.accepted_words.push_back(WordEntry {
            player: seat,
            player_name,
            letter,
            word: shown.clone(),
        });
        debug!(%seat, word = %shown, "word accepted");

        next.last_outcome = Some(TurnOutcome::Accepted {
            player: seat,
            word: shown.clone(),
        });
        self.end_turn(&mut next);
        next.last_word = Some(shown);
        next
    }

    // === Eliminations ===

    /// The current player gives up. Works with or without a drawn letter.
    #[instrument(skip(self, state), fields(turn = state.turn_number))]
    pub fn concede(&self, state: &MatchState) -> MatchState {
        self.eliminate(state, EliminationReason::Concede)
    }

    /// Eliminate the current player.
    ///
    /// Shared by every elimination path; the turn clock's timeout feeds in
    /// here with `EliminationReason::Timeout`. When one player remains the
    /// match ends with that player as winner; when none remain it ends with
    /// no winner. Otherwise the turn passes to the next alive seat.
    #[instrument(skip(self, state), fields(turn = state.turn_number))]
    pub fn eliminate(&self, state: &MatchState, reason: EliminationReason) -> MatchState {
        if state.is_over {
            warn!(%reason, "eliminate ignored: match is over");
            return state.clone();
        }

        let mut next = state.clone();
        let seat = next.current;
        let player_name = {
            let player = &mut next.players[seat.index()];
            player.eliminated = true;
            player.name.clone()
        };
        info!(%seat, player = %player_name, %reason, "player eliminated");

        next.eliminations.push_back(EliminationRecord {
            player: seat,
            player_name,
            reason,
            turn: next.turn_number,
        });
        next.last_outcome = Some(TurnOutcome::Eliminated {
            player: seat,
            reason,
        });

        match next.alive_count() {
            0 => {
                warn!("no players left; match over without a winner");
                self.finish(&mut next, None);
            }
            1 => {
                let winner = next.alive_players().next().map(|(_, p)| p.name.clone());
                self.finish(&mut next, winner);
            }
            _ => self.end_turn(&mut next),
        }
        next
    }

    // === Votes ===

    /// Open a show of hands about the current player's word.
    #[must_use]
    pub fn open_vote(&self) -> VoteSession {
        VoteSession::new()
    }

    /// Record one hand.
    #[must_use]
    pub fn cast_vote(&self, session: VoteSession, choice: VoteChoice) -> VoteSession {
        session.cast(choice)
    }

    /// Close the vote. A yes majority eliminates the current player; a tie
    /// or no majority keeps them and ends their turn without a word.
    #[instrument(skip(self, state), fields(turn = state.turn_number))]
    pub fn resolve_vote(&self, state: &MatchState, session: VoteSession) -> MatchState {
        match session.verdict() {
            VoteVerdict::Eliminate => self.eliminate(state, EliminationReason::Vote),
            VoteVerdict::Keep => self.keep_player(state),
        }
    }

    fn keep_player(&self, state: &MatchState) -> MatchState {
        if state.is_over {
            warn!("vote ignored: match is over");
            return state.clone();
        }
        let mut next = state.clone();
        let seat = next.current;
        info!(%seat, "vote kept player");
        next.last_outcome = Some(TurnOutcome::Kept { player: seat });
        self.end_turn(&mut next);
        next
    }

    // === Bookkeeping ===

    /// Hand the turn to the next alive seat with no letter drawn.
    fn end_turn(&self, next: &mut MatchState) {
        if let Some(seat) = next_alive_index(&next.players, next.current) {
            next.current = seat;
        }
        next.current_letter = None;
        next.last_word = None;
        next.turn_number += 1;
    }

    /// Terminal transition. `is_over` and the winner are set together.
    fn finish(&self, next: &mut MatchState, winner: Option<String>) {
        next.current_letter = None;
        next.last_word = None;
        next.is_over = true;
        info!(winner = winner.as_deref().unwrap_or("<none>"), "match over");
        next.winner_name = winner;
    }
}
