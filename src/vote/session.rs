//! Vote tallies.

use serde::{Deserialize, Serialize};

/// One raised hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteChoice {
    /// Eliminate the current player.
    Yes,
    /// Keep the current player.
    No,
}

/// How a closed session resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteVerdict {
    /// More yes than no.
    Eliminate,
    /// Tie or no majority.
    Keep,
}

/// Open vote. Tallies only grow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoteSession {
    yes: u32,
    no: u32,
}

impl VoteSession {
    /// Empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Session with the given tallies.
    #[must_use]
    pub fn with_tally(yes: u32, no: u32) -> Self {
        Self { yes, no }
    }

    /// Add one hand. Returns the updated session; `self` is untouched.
    #[must_use]
    pub fn cast(self, choice: VoteChoice) -> Self {
        match choice {
            VoteChoice::Yes => Self {
                yes: self.yes.saturating_add(1),
                ..self
            },
            VoteChoice::No => Self {
                no: self.no.saturating_add(1),
                ..self
            },
        }
    }

    /// Votes to eliminate.
    #[must_use]
    pub fn yes(&self) -> u32 {
        self.yes
    }

    /// Votes to keep.
    #[must_use]
    pub fn no(&self) -> u32 {
        self.no
    }

    /// Hands raised so far.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.yes.saturating_add(self.no)
    }

    /// Strict yes majority eliminates; anything else keeps.
    #[must_use]
    pub fn verdict(&self) -> VoteVerdict {
        if self.yes > self.no {
            VoteVerdict::Eliminate
        } else {
            VoteVerdict::Keep
        }
    }
}
