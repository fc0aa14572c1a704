//! Round configuration.
//!
//! Hosts configure a round at construction by providing:
//! - the `Vocabulary` words are drawn from
//! - the countdown length and how much each tick removes
//! - the wall-clock length of one time unit
//! - an optional seed for deterministic shuffles and hints

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::word::Vocabulary;
use crate::error::ConfigError;

/// Default round length in time units.
pub const DEFAULT_DURATION: u32 = 60;

/// Default units removed per tick.
pub const DEFAULT_GRANULARITY: u32 = 1;

/// Default wall-clock length of one time unit.
pub const DEFAULT_TICK_UNIT: Duration = Duration::from_secs(1);

/// Complete round configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundConfig {
    /// Words the queue is refilled from.
    pub vocabulary: Vocabulary,

    /// Total countdown length, in time units.
    pub duration: u32,

    /// Time units removed by each tick.
    pub granularity: u32,

    /// Wall-clock length of one time unit.
    /// The scheduler fires every `tick_unit * granularity`.
    pub tick_unit: Duration,

    /// Seed for queue shuffles and hint positions.
    /// `None` draws a fresh seed for every engine.
    pub seed: Option<u64>,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            vocabulary: Vocabulary::standard(),
            duration: DEFAULT_DURATION,
            granularity: DEFAULT_GRANULARITY,
            tick_unit: DEFAULT_TICK_UNIT,
            seed: None,
        }
    }
}

impl RoundConfig {
    /// Create a config with the given vocabulary.
    #[must_use]
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    /// Create a config with custom round length.
    #[must_use]
    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = duration;
        self
    }

    /// Create a config with custom tick granularity.
    #[must_use]
    pub fn with_granularity(mut self, granularity: u32) -> Self {
        self.granularity = granularity;
        self
    }

    /// Create a config with custom unit length.
    #[must_use]
    pub fn with_tick_unit(mut self, tick_unit: Duration) -> Self {
        self.tick_unit = tick_unit;
        self
    }

    /// Create a config with a fixed seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Interval between scheduler ticks.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_unit.saturating_mul(self.granularity)
    }

    /// Check the numeric fields. The vocabulary validates itself.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.duration == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        if self.granularity == 0 {
            return Err(ConfigError::ZeroGranularity);
        }
        if self.tick_unit.is_zero() {
            return Err(ConfigError::ZeroTickUnit);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RoundConfig::default();
        assert_eq!(config.duration, 60);
        assert_eq!(config.granularity, 1);
        assert_eq!(config.tick_unit, Duration::from_secs(1));
        assert_eq!(config.vocabulary.len(), 21);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = RoundConfig::default()
            .with_duration(5)
            .with_granularity(2)
            .with_tick_unit(Duration::from_millis(100))
            .with_seed(123);

        assert_eq!(config.duration, 5);
        assert_eq!(config.granularity, 2);
        assert_eq!(config.seed, Some(123));
        assert_eq!(config.tick_interval(), Duration::from_millis(200));
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            RoundConfig::default().with_duration(0).validate(),
            Err(ConfigError::ZeroDuration)
        );
        assert_eq!(
            RoundConfig::default().with_granularity(0).validate(),
            Err(ConfigError::ZeroGranularity)
        );
        assert_eq!(
            RoundConfig::default().with_tick_unit(Duration::ZERO).validate(),
            Err(ConfigError::ZeroTickUnit)
        );
    }

    #[test]
    fn test_serialization() {
        let config = RoundConfig::default().with_seed(9);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: RoundConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
