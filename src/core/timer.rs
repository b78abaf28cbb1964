//! Cancellable logical timers.
//!
//! The engine never sleeps. A host delivers time by calling `tick` with the
//! id of the timer it was told about; the slot holds at most one live timer,
//! and arming a new one or cancelling invalidates every older id. A late tick
//! for a dead id is rejected, so a stale expiry can never reach a later phase
//! or a later round.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::error::TransitionError;

/// Generation id of an armed timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerId(pub u64);

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a timer is counting down to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerKind {
    /// Repeating countdown for one rapid-round asker.
    RapidTurn,
    /// Fire-once delay before the accusation outcome is committed.
    RevealDelay,
    /// Fire-once delay before an escape guess is committed.
    GuessDelay,
}

/// A live timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    pub id: TimerId,
    pub kind: TimerKind,
    pub remaining: u32,
}

/// Result of delivering one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still counting; `remaining` ticks left.
    Running(u32),
    /// Reached zero and was removed from the slot.
    Expired(TimerKind),
}

/// Holder for the single live timer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSlot {
    next_id: u64,
    live: Option<Timer>,
}

impl TimerSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a timer, cancelling whatever was live.
    pub fn arm(&mut self, kind: TimerKind, ticks: u32) -> TimerId {
        self.cancel();
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.live = Some(Timer {
            id,
            kind,
            remaining: ticks,
        });
        trace!(%id, ?kind, ticks, "timer armed");
        id
    }

    /// Cancel the live timer, if any.
    pub fn cancel(&mut self) -> Option<Timer> {
        let cancelled = self.live.take();
        if let Some(timer) = &cancelled {
            trace!(id = %timer.id, kind = ?timer.kind, "timer cancelled");
        }
        cancelled
    }

    #[must_use]
    pub fn live(&self) -> Option<&Timer> {
        self.live.as_ref()
    }

    /// Deliver one tick to timer `id`.
    pub fn tick(&mut self, id: TimerId) -> Result<TickOutcome, TransitionError> {
        let timer = match self.live.as_mut() {
            Some(timer) if timer.id == id => timer,
            _ => return Err(TransitionError::StaleTimer(id.0)),
        };

        timer.remaining = timer.remaining.saturating_sub(1);
        if timer.remaining > 0 {
            return Ok(TickOutcome::Running(timer.remaining));
        }

        let kind = timer.kind;
        self.live = None;
        trace!(%id, ?kind, "timer expired");
        Ok(TickOutcome::Expired(kind))
    }
}
