//! Round score.

use serde::{Deserialize, Serialize};

/// Signed score with no floor or ceiling. Skips may drive it negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCounter {
    value: i64,
    correct: u32,
    skipped: u32,
}

impl ScoreCounter {
    /// Points awarded for a correct guess.
    pub const CORRECT: i64 = 1;
    /// Points awarded for a skip.
    pub const SKIP: i64 = -1;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `delta` to the score.
    pub fn adjust(&mut self, delta: i64) {
        self.value = self.value.saturating_add(delta);
    }

    /// Record a correct guess.
    pub fn correct(&mut self) {
        self.correct = self.correct.saturating_add(1);
        self.adjust(Self::CORRECT);
    }

    /// Record a skip.
    pub fn skip(&mut self) {
        self.skipped = self.skipped.saturating_add(1);
        self.adjust(Self::SKIP);
    }

    /// Back to zero, counts included.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn value(&self) -> i64 {
        self.value
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn skipped_count(&self) -> u32 {
        self.skipped
    }
}
