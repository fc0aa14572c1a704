//! Read-only projections handed to subscribers.
//!
//! ## RoundState
//!
//! Snapshot of everything a presentation layer renders: current word, its
//! hint, score, remaining time and the finished flag. Snapshots are
//! immutable; each mutation produces a new one.
//!
//! ## RoundFinished
//!
//! One-shot event delivered once per round, carrying the final score.

use serde::{Deserialize, Serialize};

use super::hint::Hint;
use crate::core::Word;

/// Snapshot of a round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    /// Word being guessed. `None` before the first `start`.
    pub word: Option<Word>,
    /// Hint for `word`.
    pub hint: Option<Hint>,
    pub score: i64,
    /// Time units left on the countdown.
    pub remaining: u32,
    /// Set when the round finishes, cleared by acknowledgement.
    pub finished: bool,
}

impl RoundState {
    /// Hint text, or an empty string before the round starts.
    #[must_use]
    pub fn hint_text(&self) -> String {
        self.hint.as_ref().map(ToString::to_string).unwrap_or_default()
    }

    /// Remaining time as elapsed-time text, one unit per second.
    #[must_use]
    pub fn remaining_display(&self) -> String {
        format_elapsed(u64::from(self.remaining))
    }
}

/// Final result of a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundFinished {
    pub final_score: i64,
    /// Words guessed correctly.
    pub correct: u32,
    /// Words skipped.
    pub skipped: u32,
}

/// Format seconds as `MM:SS`, or `H:MM:SS` from one hour up.
#[must_use]
pub fn format_elapsed(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "00:00");
        assert_eq!(format_elapsed(9), "00:09");
        assert_eq!(format_elapsed(60), "01:00");
        assert_eq!(format_elapsed(59 * 60 + 59), "59:59");
        assert_eq!(format_elapsed(3600), "1:00:00");
        assert_eq!(format_elapsed(3600 * 10 + 61), "10:01:01");
    }

    #[test]
    fn test_hint_text_before_start() {
        let state = RoundState {
            word: None,
            hint: None,
            score: 0,
            remaining: 60,
            finished: false,
        };
        assert_eq!(state.hint_text(), "");
        assert_eq!(state.remaining_display(), "01:00");
    }

    #[test]
    fn test_state_serde() {
        let state = RoundState {
            word: Some(Word::new("crow")),
            hint: Some(Hint {
                length: 4,
                position: 3,
                letter: "O".into(),
            }),
            score: -2,
            remaining: 17,
            finished: false,
        };

        let json = serde_json::to_string(&state).unwrap();
        let restored: RoundState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, restored);
    }
}
