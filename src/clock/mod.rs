//! Turn clock: the per-turn countdown.
//!
//! The clock is coupled to the match only through the driver. A successful
//! letter draw arms it, anything that ends the turn (accepted word,
//! elimination, opening a vote) cancels it, and expiry hands the driver an
//! `EliminationReason::Timeout` to feed back into the engine.

mod turn_clock;

pub use turn_clock::{ClockTick, Countdown, ExpiryHandler, TurnClock};
