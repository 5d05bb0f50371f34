//! Tick-driven turn countdown.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::EliminationReason;

/// Countdown status as seen by the engine when a word is submitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Countdown {
    /// No countdown running (untimed play, or cancelled).
    Idle,
    /// Seconds left.
    Running(u32),
    /// Reached zero while armed. Stays expired until the next `start`.
    Expired,
}

impl Countdown {
    /// Has the turn run out of time? A running countdown at zero counts.
    #[must_use]
    pub fn is_expired(self) -> bool {
        matches!(self, Countdown::Expired | Countdown::Running(0))
    }
}

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClockTick {
    /// Clock not armed; nothing happened.
    Idle,
    /// One second elapsed; this many remain.
    Running(u32),
    /// The countdown just reached zero. The handler has been called.
    Expired,
}

/// Receives the timeout.
pub trait ExpiryHandler {
    fn on_expire(&mut self, reason: EliminationReason);
}

impl<F: FnMut(EliminationReason)> ExpiryHandler for F {
    fn on_expire(&mut self, reason: EliminationReason) {
        self(reason)
    }
}

fn ignore_expiry(_: EliminationReason) {}

/// Per-turn countdown.
///
/// The clock owns no timer. Whatever schedules the driver (a UI frame timer,
/// an async interval, a test loop) calls [`TurnClock::tick`] once per second.
/// The handler fires exactly once per armed run that reaches zero; `cancel`
/// or a new `start` before that suppresses it.
pub struct TurnClock<H = fn(EliminationReason)> {
    duration: u32,
    remaining: u32,
    armed: bool,
    expired: bool,
    handler: H,
}

impl TurnClock {
    /// Clock whose handler ignores expiry. Drivers read `ClockTick::Expired`
    /// from `tick` instead.
    #[must_use]
    pub fn polling(duration: u32) -> Self {
        TurnClock::new(duration, ignore_expiry as fn(EliminationReason))
    }
}

impl<H: ExpiryHandler> TurnClock<H> {
    /// Disarmed clock with a default duration.
    pub fn new(duration: u32, handler: H) -> Self {
        Self {
            duration,
            remaining: duration,
            armed: false,
            expired: false,
            handler,
        }
    }

    /// Default duration used by [`TurnClock::restart`].
    #[must_use]
    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Arm with `seconds` on the clock. Cancels any run in progress.
    ///
    /// `start(0)` expires at once and calls the handler before returning.
    pub fn start(&mut self, seconds: u32) {
        self.cancel();
        self.remaining = seconds;
        self.armed = true;
        self.expired = false;
        debug!(seconds, "turn clock started");
        if seconds == 0 {
            self.expire();
        }
    }

    /// Arm with the default duration.
    pub fn restart(&mut self) {
        self.start(self.duration);
    }

    /// Disarm without firing. Safe to call on a stopped clock.
    pub fn cancel(&mut self) {
        if self.armed {
            self.armed = false;
            trace!(remaining = self.remaining, "turn clock cancelled");
        }
        self.expired = false;
    }

    /// Advance one second.
    pub fn tick(&mut self) -> ClockTick {
        if !self.armed {
            return ClockTick::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            return ClockTick::Running(self.remaining);
        }
        self.expire();
        ClockTick::Expired
    }

    fn expire(&mut self) {
        self.armed = false;
        self.expired = true;
        debug!("turn clock expired");
        self.handler.on_expire(EliminationReason::Timeout);
    }

    /// Is a countdown in progress?
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Seconds left in the current run (0 once expired).
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Status to pass along with a word submission.
    #[must_use]
    pub fn countdown(&self) -> Countdown {
        if self.armed {
            Countdown::Running(self.remaining)
        } else if self.expired {
            Countdown::Expired
        } else {
            Countdown::Idle
        }
    }
}

impl<H> std::fmt::Debug for TurnClock<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnClock")
            .field("duration", &self.duration)
            .field("remaining", &self.remaining)
            .field("armed", &self.armed)
            .field("expired", &self.expired)
            .finish_non_exhaustive()
    }
}
