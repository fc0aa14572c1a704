//! Words and the vocabulary they are drawn from.
//!
//! ## Word
//!
//! An immutable text token. Two words are equal when their text is equal.
//!
//! ## Vocabulary
//!
//! A validated, non-empty list of non-empty words. The default vocabulary is
//! compiled in; tests and hosts may supply their own.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The compiled-in word list.
pub const STANDARD_WORDS: [&str; 21] = [
    "queen",
    "hospital",
    "basketball",
    "cat",
    "change",
    "snail",
    "soup",
    "calendar",
    "sad",
    "desk",
    "guitar",
    "home",
    "railway",
    "zebra",
    "jelly",
    "car",
    "crow",
    "trade",
    "bag",
    "roll",
    "bubble",
];

/// A word to be guessed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Word(String);

impl Word {
    /// Create a new word.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The word's text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of letters (Unicode scalar values, not bytes).
    #[must_use]
    pub fn letter_count(&self) -> usize {
        self.0.chars().count()
    }

    /// Letter at a 1-based position, if the position is in range.
    #[must_use]
    pub fn letter_at(&self, position: usize) -> Option<char> {
        position
            .checked_sub(1)
            .and_then(|index| self.0.chars().nth(index))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Word {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Non-empty set of words a round draws from.
///
/// Construction rejects an empty list and empty entries, so every consumer
/// can rely on at least one word with at least one letter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Word>", into = "Vec<Word>")]
pub struct Vocabulary {
    words: Vec<Word>,
}

impl Vocabulary {
    /// Build a vocabulary from the given words.
    pub fn new<I, W>(words: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = W>,
        W: Into<Word>,
    {
        let words: Vec<Word> = words.into_iter().map(Into::into).collect();
        if words.is_empty() {
            return Err(ConfigError::EmptyVocabulary);
        }
        if let Some(index) = words.iter().position(Word::is_empty) {
            return Err(ConfigError::EmptyWord { index });
        }
        Ok(Self { words })
    }

    /// The compiled-in 21-word vocabulary.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            words: STANDARD_WORDS.iter().copied().map(Word::from).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Never true for a constructed vocabulary.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn contains(&self, word: &Word) -> bool {
        self.words.contains(word)
    }

    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<Word>> for Vocabulary {
    type Error = ConfigError;

    fn try_from(words: Vec<Word>) -> Result<Self, Self::Error> {
        Self::new(words)
    }
}

impl From<Vocabulary> for Vec<Word> {
    fn from(vocabulary: Vocabulary) -> Self {
        vocabulary.words
    }
}
