//! The round: word queue, score, hints, broadcasting and the engine tying
//! them to the countdown.

pub mod broadcast;
pub mod engine;
pub mod hint;
pub mod queue;
pub mod score;
pub mod state;

pub use broadcast::StateBroadcaster;
pub use engine::{RoundEngine, RoundPhase};
pub use hint::Hint;
pub use queue::WordQueue;
pub use score::ScoreCounter;
pub use state::{format_elapsed, RoundFinished, RoundState};
