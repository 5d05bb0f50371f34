//! Reference driver: one match, one turn clock, at most one vote.
//!
//! The engine is pure and owns no time. `MatchDriver` is the glue a
//! presentation layer would otherwise write itself:
//! - holds the single current snapshot and replaces it wholesale
//! - arms the clock when a letter is drawn, cancels it when the turn ends
//! - cancels the clock when a vote opens
//! - turns clock expiry into a timeout elimination
//!
//! ```
//! use stop_engine::core::{MatchConfig, ScriptedLetters};
//! use stop_engine::driver::MatchDriver;
//! use stop_engine::rules::MatchEngine;
//!
//! let engine = MatchEngine::new(MatchConfig::default());
//! let mut driver =
//!     MatchDriver::new(engine, "Animais", ["Ana", "Bia"], ScriptedLetters::new(['G'])).unwrap();
//!
//! driver.draw_letter().unwrap();
//! assert!(driver.clock().is_armed());
//!
//! let state = driver.submit_word("Gato");
//! assert_eq!(state.last_word(), Some("Gato"));
//! assert!(!driver.clock().is_armed());
//! ```

use tracing::{debug, warn};

use crate::clock::{ClockTick, TurnClock};
use crate::core::{EliminationReason, LetterSource, MatchError, MatchRng, MatchState};
use crate::rules::MatchEngine;
use crate::vote::{VoteChoice, VoteSession};

/// Runs one match at a time on top of a [`MatchEngine`].
#[derive(Debug)]
pub struct MatchDriver<S = MatchRng> {
    engine: MatchEngine,
    state: MatchState,
    clock: TurnClock,
    vote: Option<VoteSession>,
    letters: S,
}

impl MatchDriver<MatchRng> {
    /// Driver drawing letters from a seeded RNG.
    pub fn seeded<I, N>(
        engine: MatchEngine,
        category: &str,
        names: I,
        seed: u64,
    ) -> Result<Self, MatchError>
    where
        I: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        Self::new(engine, category, names, MatchRng::new(seed))
    }
}

impl<S: LetterSource> MatchDriver<S> {
    /// Create the match. Fails with `InvalidSetup` like
    /// [`MatchEngine::new_match`].
    pub fn new<I, N>(
        engine: MatchEngine,
        category: &str,
        names: I,
        letters: S,
    ) -> Result<Self, MatchError>
    where
        I: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        let state = engine.new_match(category, names)?;
        let clock = TurnClock::polling(engine.config().turn_seconds);
        Ok(Self {
            engine,
            state,
            clock,
            vote: None,
            letters,
        })
    }

    /// Current snapshot.
    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// The engine in use.
    #[must_use]
    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    /// The turn clock.
    #[must_use]
    pub fn clock(&self) -> &TurnClock {
        &self.clock
    }

    /// Open vote, if any.
    #[must_use]
    pub fn vote(&self) -> Option<&VoteSession> {
        self.vote.as_ref()
    }

    /// Draw a letter for the current player and arm the clock.
    ///
    /// With a zero-second turn the clock expires as it is armed, so the
    /// player is eliminated for timeout straight away.
    pub fn draw_letter(&mut self) -> Result<&MatchState, MatchError> {
        if self.vote.is_some() {
            warn!("draw_letter ignored: vote in progress");
            return Ok(&self.state);
        }
        let had_letter = self.state.current_letter().is_some();
        let next = self.engine.draw_letter(&self.state, &mut self.letters)?;
        let drew = !had_letter && next.current_letter().is_some();
        self.state = next;
        if drew {
            self.clock.restart();
            if self.clock.countdown().is_expired() {
                let next = self.engine.eliminate(&self.state, EliminationReason::Timeout);
                return Ok(self.replace(next));
            }
        }
        Ok(&self.state)
    }

    /// Submit the current player's word, with the clock's current status.
    pub fn submit_word(&mut self, raw: &str) -> &MatchState {
        if self.vote.is_some() {
            warn!("submit_word ignored: vote in progress");
            return &self.state;
        }
        let next = self
            .engine
            .submit_word(&self.state, raw, self.clock.countdown());
        self.replace(next)
    }

    /// The current player gives up. Discards any open vote.
    pub fn concede(&mut self) -> &MatchState {
        let next = self.engine.concede(&self.state);
        self.replace(next)
    }

    /// Advance the clock one second. On expiry the current player is
    /// eliminated for timeout.
    pub fn tick(&mut self) -> ClockTick {
        let tick = self.clock.tick();
        if tick == ClockTick::Expired {
            let next = self.engine.eliminate(&self.state, EliminationReason::Timeout);
            self.replace(next);
        }
        tick
    }

    /// Open a vote about the current player's word. Pauses the turn by
    /// cancelling the clock. An already-open vote is restarted.
    pub fn open_vote(&mut self) -> &VoteSession {
        self.clock.cancel();
        if self.vote.is_some() {
            debug!("vote reopened; previous tallies discarded");
        }
        self.vote.insert(self.engine.open_vote())
    }

    /// Count one hand. `None` when no vote is open.
    pub fn cast_vote(&mut self, choice: VoteChoice) -> Option<&VoteSession> {
        let Some(session) = self.vote.take() else {
            warn!(?choice, "cast_vote ignored: no vote open");
            return None;
        };
        let session = self.vote.insert(self.engine.cast_vote(session, choice));
        Some(&*session)
    }

    /// Close the vote and apply its verdict. Ignored when no vote is open.
    pub fn resolve_vote(&mut self) -> &MatchState {
        let Some(session) = self.vote.take() else {
            warn!("resolve_vote ignored: no vote open");
            return &self.state;
        };
        let next = self.engine.resolve_vote(&self.state, session);
        self.replace(next)
    }

    /// Start a fresh match with the same category and roster.
    pub fn rematch(&mut self) -> Result<&MatchState, MatchError> {
        let names: Vec<String> = self.state.players().iter().map(|p| p.name.clone()).collect();
        let next = self.engine.new_match(self.state.category(), names)?;
        self.clock.cancel();
        self.vote = None;
        self.state = next;
        Ok(&self.state)
    }

    /// Swap in a snapshot produced by the engine and bring the clock and
    /// vote in line with it.
    fn replace(&mut self, next: MatchState) -> &MatchState {
        if next.current_letter().is_none() {
            self.clock.cancel();
            self.vote = None;
        }
        self.state = next;
        &self.state
    }
}
