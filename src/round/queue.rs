//! Word queue with reshuffle-on-exhaustion.

use im::Vector;

use crate::core::{RoundRng, Vocabulary, Word};

/// Ordered words still to be served this cycle.
///
/// Never observed empty: when the last word has been served, the next call to
/// `next` refills from the full vocabulary in a fresh random order.
#[derive(Debug)]
pub struct WordQueue {
    vocabulary: Vocabulary,
    pending: Vector<Word>,
    rng: RoundRng,
    refills: u32,
}

impl WordQueue {
    /// Create a queue already filled with one shuffle of `vocabulary`.
    #[must_use]
    pub fn new(vocabulary: Vocabulary, rng: RoundRng) -> Self {
        let mut queue = Self {
            vocabulary,
            pending: Vector::new(),
            rng,
            refills: 0,
        };
        queue.refill();
        queue
    }

    /// Remove and return the front word, refilling first if empty.
    pub fn next(&mut self) -> Word {
        loop {
            if let Some(word) = self.pending.pop_front() {
                return word;
            }
            // Vocabulary is non-empty, so this runs at most once.
            self.refill();
        }
    }

    fn refill(&mut self) {
        let mut words = self.vocabulary.words().to_vec();
        self.rng.shuffle(&mut words);
        self.pending = words.into_iter().collect();
        self.refills += 1;
        tracing::debug!(refills = self.refills, words = self.pending.len(), "word queue refilled");
    }

    /// Words left before the next refill.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Number of shuffles performed, including the initial fill.
    #[must_use]
    pub fn refills(&self) -> u32 {
        self.refills
    }

    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }
}
