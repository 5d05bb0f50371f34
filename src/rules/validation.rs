//! Word checks for a turn with a drawn letter.
//!
//! Applied in a fixed order, first failure wins:
//! 1. blank after trimming
//! 2. first character (uppercased) differs from the drawn letter
//! 3. lowercased word already used
//!
//! The timeout check comes before all of these but depends on the clock, so
//! the engine does it.

use im::HashSet as ImHashSet;

use crate::core::EliminationReason;

/// Result of checking a submitted word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WordVerdict {
    /// Word is valid for this turn.
    Accept {
        /// Lowercased, for the used-word set.
        normalized: String,
        /// Trimmed, original case, for display and history.
        shown: String,
    },
    /// Word is invalid; the player is out.
    Reject(EliminationReason),
}

/// Check `raw` against the drawn `letter` and the words used so far.
#[must_use]
pub fn check_word(raw: &str, letter: char, used_words: &ImHashSet<String>) -> WordVerdict {
    let trimmed = raw.trim();
    let Some(first) = trimmed.chars().next() else {
        return WordVerdict::Reject(EliminationReason::Blank);
    };

    if !first.to_uppercase().eq(letter.to_uppercase()) {
        return WordVerdict::Reject(EliminationReason::WrongLetter);
    }

    let normalized = trimmed.to_lowercase();
    if used_words.contains(&normalized) {
        return WordVerdict::Reject(EliminationReason::Duplicate);
    }

    WordVerdict::Accept {
        normalized,
        shown: trimmed.to_string(),
    }
}
