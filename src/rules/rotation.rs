//! Turn rotation over a fixed roster.

use im::Vector;

use crate::core::{Player, PlayerId};

/// Next seat, after `from`, whose player is still alive.
///
/// Scans circularly starting at `from + 1` for at most one full lap, so
/// `from` itself is the last seat checked. Returns `None` when nobody is
/// alive.
#[must_use]
pub fn next_alive_index(players: &Vector<Player>, from: PlayerId) -> Option<PlayerId> {
    let n = players.len();
    if n == 0 {
        return None;
    }
    (1..=n)
        .map(|step| (from.index() + step) % n)
        .find(|&idx| players[idx].is_alive())
        .map(|idx| PlayerId(idx as u8))
}
