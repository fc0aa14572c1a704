//! Core round types: words, vocabulary, configuration, RNG.
//!
//! These are the inputs a round is built from. Nothing here changes while a
//! round is running except the RNG streams.

pub mod config;
pub mod rng;
pub mod word;

pub use config::{RoundConfig, DEFAULT_DURATION, DEFAULT_GRANULARITY, DEFAULT_TICK_UNIT};
pub use rng::{RoundRng, RoundRngState};
pub use word::{Vocabulary, Word, STANDARD_WORDS};
