//! Round timer: a pure countdown plus the scheduler that ticks it.

pub mod countdown;
pub mod scheduler;

pub use countdown::{Countdown, TickOutcome, TimerState};
pub use scheduler::{ManualScheduler, Scheduler, TickAction, TickHandle, TokioScheduler};
