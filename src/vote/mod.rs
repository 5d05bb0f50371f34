//! Vote resolution: a show of hands overriding normal word validation.
//!
//! A session only counts hands. The engine's `resolve_vote` turns the
//! verdict into a transition: a yes majority eliminates the current player
//! with `EliminationReason::Vote`; a tie or a no majority keeps them and
//! passes the turn on.

mod session;

pub use session::{VoteChoice, VoteSession, VoteVerdict};
