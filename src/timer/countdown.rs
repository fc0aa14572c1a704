//! Countdown state machine.
//!
//! ```text
//! Idle --start--> Running --tick--> Running
//!                    |    --tick (remaining hits 0)--> Expired
//!                    +----stop--> Stopped
//! ```
//!
//! The countdown knows nothing about wall-clock time. A scheduler calls
//! `tick()` once per interval; the countdown decides what that tick means.

use serde::{Deserialize, Serialize};

/// Lifecycle of a countdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerState {
    /// Created but not started.
    Idle,
    /// Counting down; ticks are accepted.
    Running,
    /// Reached zero. Terminal until restarted.
    Expired,
    /// Cancelled before reaching zero. Terminal until restarted.
    Stopped,
}

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Time remains; publish the new value.
    Ticked {
        /// Units left after this tick.
        remaining: u32,
    },
    /// This tick reached zero. Returned exactly once per run.
    Expired,
    /// The countdown was not running; nothing changed.
    Ignored,
}

/// Fixed-length countdown measured in abstract time units.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    total: u32,
    granularity: u32,
    remaining: u32,
    state: TimerState,
}

impl Countdown {
    /// Create an idle countdown.
    ///
    /// `total` and `granularity` are expected to be non-zero; `RoundConfig`
    /// validates them before a countdown is built.
    #[must_use]
    pub fn new(total: u32, granularity: u32) -> Self {
        Self {
            total,
            granularity,
            remaining: total,
            state: TimerState::Idle,
        }
    }

    /// Begin (or restart) counting from the full duration.
    pub fn start(&mut self) {
        self.remaining = self.total;
        self.state = TimerState::Running;
    }

    /// Advance by one granularity step.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != TimerState::Running {
            return TickOutcome::Ignored;
        }

        self.remaining = self.remaining.saturating_sub(self.granularity);
        if self.remaining == 0 {
            self.state = TimerState::Expired;
            TickOutcome::Expired
        } else {
            TickOutcome::Ticked {
                remaining: self.remaining,
            }
        }
    }

    /// Cancel a running countdown. Returns whether anything changed.
    ///
    /// Stopping an idle, expired or already stopped countdown is a no-op.
    pub fn stop(&mut self) -> bool {
        if self.state == TimerState::Running {
            self.state = TimerState::Stopped;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn state(&self) -> TimerState {
        self.state
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }
}
