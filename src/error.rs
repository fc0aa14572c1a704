//! Error types.
//!
//! Only construction is fallible. Once a `RoundEngine` exists, every game
//! operation succeeds; lifecycle misuse is logged and ignored.

use thiserror::Error;

/// Invalid round configuration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The vocabulary has no words to serve.
    #[error("vocabulary must contain at least one word")]
    EmptyVocabulary,

    /// A vocabulary entry has no letters, so no hint can be derived for it.
    #[error("vocabulary word at index {index} is empty")]
    EmptyWord {
        /// Position of the offending entry.
        index: usize,
    },

    /// The round would expire before it starts.
    #[error("round duration must be at least one time unit")]
    ZeroDuration,

    /// Ticks would never move the countdown.
    #[error("tick granularity must be at least one time unit")]
    ZeroGranularity,

    /// A zero tick interval cannot be scheduled.
    #[error("tick unit must be a non-zero duration")]
    ZeroTickUnit,
}

/// Failure to build a tick scheduler.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// No tokio runtime is available on the calling thread.
    #[error("no tokio runtime available: {0}")]
    NoRuntime(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages() {
        assert_eq!(
            ConfigError::EmptyVocabulary.to_string(),
            "vocabulary must contain at least one word"
        );
        assert_eq!(
            ConfigError::EmptyWord { index: 4 }.to_string(),
            "vocabulary word at index 4 is empty"
        );
    }

    #[test]
    fn test_scheduler_error_message() {
        let err = SchedulerError::NoRuntime("not inside a runtime".into());
        assert!(err.to_string().contains("not inside a runtime"));
    }
}
