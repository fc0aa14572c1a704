//! # guess-the-word
//!
//! A timed word-guessing round engine. The engine owns the word queue, the
//! score and a countdown, and publishes state for a presentation layer to
//! render.
//!
//! ## Design Principles
//!
//! 1. **Explicit Publishing**: Every mutation ends by building an immutable
//!    `RoundState` and sending it to all subscribers.
//!
//! 2. **Injectable Time and Randomness**: Ticks come from a `Scheduler`,
//!    shuffles and hints from a seeded `RoundRng`. Tests drive both.
//!
//! 3. **Guaranteed Cancellation**: The tick handle is released on expiry,
//!    forced finish, `stop` and drop. No tick reaches a torn-down engine.
//!
//! ## Modules
//!
//! - `core`: Words, vocabulary, configuration, RNG
//! - `timer`: Countdown state machine and tick schedulers
//! - `round`: Word queue, score, hints, broadcasting, the engine
//! - `error`: Construction errors

pub mod core;
pub mod error;
pub mod round;
pub mod timer;

// Re-export commonly used types
pub use crate::core::{RoundConfig, RoundRng, RoundRngState, Vocabulary, Word};

pub use crate::error::{ConfigError, SchedulerError};

pub use crate::round::{
    Hint, RoundEngine, RoundFinished, RoundPhase, RoundState, ScoreCounter,
    StateBroadcaster, WordQueue,
};

pub use crate::timer::{
    Countdown, ManualScheduler, Scheduler, TickHandle, TickOutcome, TimerState,
    TokioScheduler,
};
