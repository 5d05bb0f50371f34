//! Letter draws: the injectable random source.
//!
//! The engine never reaches for ambient randomness. Every draw goes through a
//! `LetterSource` handed in by the driver:
//!
//! - `MatchRng`: seeded ChaCha8, the normal source for play
//! - `ScriptedLetters`: a fixed sequence, for tests and replays
//!
//! ```
//! use stop_engine::core::{LetterSource, MatchRng};
//!
//! let mut rng1 = MatchRng::new(42);
//! let mut rng2 = MatchRng::new(42);
//! let letters = ['A', 'B', 'C', 'D'];
//!
//! // Same seed, same draws
//! assert_eq!(rng1.pick(&letters), rng2.pick(&letters));
//! ```

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Source of letter draws.
pub trait LetterSource {
    /// Pick one of `remaining`, uniformly for random sources.
    ///
    /// Returns `None` only when `remaining` is empty.
    fn pick(&mut self, remaining: &[char]) -> Option<char>;
}

/// Deterministic RNG for letter draws.
///
/// Uses ChaCha8 so a seed reproduces a whole match's draws.
#[derive(Clone, Debug)]
pub struct MatchRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl MatchRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// Seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Get the current state for checkpointing.
    #[must_use]
    pub fn state(&self) -> MatchRngState {
        MatchRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &MatchRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl LetterSource for MatchRng {
    fn pick(&mut self, remaining: &[char]) -> Option<char> {
        if remaining.is_empty() {
            return None;
        }
        Some(remaining[self.inner.gen_range(0..remaining.len())])
    }
}

/// Serializable RNG state.
///
/// ChaCha8 word position makes restore O(1) regardless of how many letters
/// have been drawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

/// Replays a fixed sequence of letters.
///
/// A scripted letter that is not in `remaining` (already drawn, or not in
/// the alphabet) is skipped in favour of the first remaining letter, so a
/// script can never make the engine draw an illegal letter. Once the script
/// runs out the first remaining letter is used.
#[derive(Clone, Debug, Default)]
pub struct ScriptedLetters {
    script: VecDeque<char>,
}

impl ScriptedLetters {
    /// Script the given letters, in order. Letters are uppercased.
    pub fn new(letters: impl IntoIterator<Item = char>) -> Self {
        Self {
            script: letters.into_iter().flat_map(char::to_uppercase).collect(),
        }
    }

    /// Queue one more letter.
    pub fn push(&mut self, letter: char) {
        self.script.extend(letter.to_uppercase());
    }

    /// Letters not yet replayed.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.script.len()
    }
}

impl LetterSource for ScriptedLetters {
    fn pick(&mut self, remaining: &[char]) -> Option<char> {
        let first = *remaining.first()?;
        match self.script.pop_front() {
            Some(letter) if remaining.contains(&letter) => Some(letter),
            _ => Some(first),
        }
    }
}
