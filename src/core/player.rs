//! Player identification and the match roster.
//!
//! ## PlayerId
//!
//! Seat index in the roster (0-based, at most 255 seats). Seat order is fixed
//! when the match is created and drives turn rotation.
//!
//! ## Player
//!
//! A named seat plus its elimination flag. Players are never removed from the
//! roster; elimination only flips the flag.

use serde::{Deserialize, Serialize};

/// Seat identifier supporting 1-255 players.
///
/// The first name in the roster sits at `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all seats of a roster with `player_count` players.
    ///
    /// ```
    /// use stop_engine::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(seats, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count.min(MAX_SEATS) as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

/// Hard cap on roster size imposed by `PlayerId`.
pub const MAX_SEATS: usize = u8::MAX as usize;

/// A seat in the match.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    /// Display name, already trimmed.
    pub name: String,

    /// Set once, by the elimination transition. Never cleared.
    pub eliminated: bool,
}

impl Player {
    /// Create a player that is still in the game.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            eliminated: false,
        }
    }

    /// Still taking turns?
    #[must_use]
    pub fn is_alive(&self) -> bool {
        !self.eliminated
    }
}

/// Clean a raw list of names into a roster.
///
/// Trims each name, drops blanks, and drops exact repeats (first occurrence
/// wins). Order is preserved because it becomes the turn order.
///
/// ```
/// use stop_engine::core::normalize_roster;
///
/// let roster = normalize_roster([" Ana ", "", "Bia", "Ana", "  "]);
/// assert_eq!(roster, vec!["Ana".to_string(), "Bia".to_string()]);
/// ```
pub fn normalize_roster<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut roster: Vec<String> = Vec::new();
    for name in names {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() || roster.iter().any(|n| n == trimmed) {
            continue;
        }
        roster.push(trimmed.to_string());
    }
    roster
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        assert_eq!(p0.index(), 0);
        assert_eq!(p1.index(), 1);
        assert_eq!(format!("{}", p1), "Seat 1");
    }

    #[test]
    fn test_player_id_all() {
        let players: Vec<_> = PlayerId::all(4).collect();
        assert_eq!(players.len(), 4);
        assert_eq!(players[0], PlayerId::new(0));
        assert_eq!(players[3], PlayerId::new(3));
    }

    #[test]
    fn test_new_player_is_alive() {
        let player = Player::new("Ana");
        assert!(player.is_alive());
        assert!(!player.eliminated);
        assert_eq!(player.name, "Ana");
    }

    #[test]
    fn test_normalize_trims_and_drops_blanks() {
        let roster = normalize_roster(["  Ana", "Bia  ", "", "   ", "\tCaio\n"]);
        assert_eq!(roster, vec!["Ana", "Bia", "Caio"]);
    }

    #[test]
    fn test_normalize_dedupes_after_trim() {
        let roster = normalize_roster(["Ana", " Ana ", "Bia", "Ana"]);
        assert_eq!(roster, vec!["Ana", "Bia"]);
    }

    #[test]
    fn test_normalize_is_case_sensitive() {
        // "ana" and "Ana" are different people as far as the roster knows.
        let roster = normalize_roster(["Ana", "ana"]);
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_player_serialization() {
        let player = Player::new("Ana");
        let json = serde_json::to_string(&player).unwrap();
        let deserialized: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(player, deserialized);
    }
}
