//! Letter hints for the current word.
//!
//! A hint reveals the word's length and one letter at a random 1-based
//! position. It is derived once per word change and never on timer ticks.

use serde::{Deserialize, Serialize};

use crate::core::{RoundRng, Word};

/// One revealed letter of a word.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    /// Number of letters in the word.
    pub length: usize,
    /// 1-based position of the revealed letter.
    pub position: usize,
    /// The revealed letter, uppercased. May be more than one char for
    /// letters whose uppercase form expands (e.g. `ß` -> `SS`).
    pub letter: String,
}

impl Hint {
    /// Pick a position uniformly in `[1, length]` and reveal that letter.
    ///
    /// Returns `None` only for an empty word, which `Vocabulary` rejects.
    pub fn derive(word: &Word, rng: &mut RoundRng) -> Option<Self> {
        let length = word.letter_count();
        if length == 0 {
            return None;
        }

        let position = rng.gen_range_usize(1..length + 1);
        let letter = word.letter_at(position)?.to_uppercase().collect();

        Some(Self {
            length,
            position,
            letter,
        })
    }
}

impl std::fmt::Display for Hint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Current word has {} letters\nThe letter at position {} is {}",
            self.length, self.position, self.letter
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_matches_word() {
        let word = Word::new("basketball");
        let mut rng = RoundRng::new(42);

        for _ in 0..100 {
            let hint = Hint::derive(&word, &mut rng).unwrap();
            assert_eq!(hint.length, 10);
            assert!((1..=10).contains(&hint.position));

            let expected = word.letter_at(hint.position).unwrap().to_ascii_uppercase();
            assert_eq!(hint.letter, expected.to_string());
        }
    }

    #[test]
    fn test_every_position_reachable() {
        let word = Word::new("soup");
        let mut rng = RoundRng::new(7);
        let mut seen = [false; 4];

        for _ in 0..200 {
            let hint = Hint::derive(&word, &mut rng).unwrap();
            seen[hint.position - 1] = true;
        }

        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_single_letter_word() {
        let hint = Hint::derive(&Word::new("a"), &mut RoundRng::new(0)).unwrap();
        assert_eq!(hint.position, 1);
        assert_eq!(hint.letter, "A");
    }

    #[test]
    fn test_empty_word_has_no_hint() {
        assert!(Hint::derive(&Word::new(""), &mut RoundRng::new(0)).is_none());
    }

    #[test]
    fn test_display() {
        let hint = Hint {
            length: 5,
            position: 2,
            letter: "U".into(),
        };
        assert_eq!(
            hint.to_string(),
            "Current word has 5 letters\nThe letter at position 2 is U"
        );
    }

    #[test]
    fn test_expanding_uppercase() {
        let hint = Hint::derive(&Word::new("ß"), &mut RoundRng::new(0)).unwrap();
        assert_eq!(hint.letter, "SS");
    }
}
