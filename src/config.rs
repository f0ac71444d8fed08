//! Runtime configuration read from `BOOKING_*` environment variables.

use std::time::Duration;

use serde::Deserialize;

use crate::availability::{AvailabilitySource, RandomAvailability, DEFAULT_BOOKED_PROBABILITY};
use crate::cache::{CachedAvailability, DEFAULT_CAPACITY, DEFAULT_TTL};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing or incorrect environment variable: {0}")]
    Env(#[from] envy::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// How slot availability is simulated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityMode {
    /// Fresh draw every time a schedule is built
    Random,
    /// Draws remembered per date and slot until they expire
    Cached,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_mode")]
    pub availability_mode: AvailabilityMode,
    #[serde(default = "default_probability")]
    pub booked_probability: f64,
    /// Fixed seed for reproducible draws
    pub availability_seed: Option<u64>,
    #[serde(default = "default_ttl_secs")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_capacity")]
    pub cache_capacity: u64,
}

fn default_mode() -> AvailabilityMode {
    AvailabilityMode::Random
}

fn default_probability() -> f64 {
    DEFAULT_BOOKED_PROBABILITY
}

fn default_ttl_secs() -> u64 {
    DEFAULT_TTL.as_secs()
}

fn default_capacity() -> u64 {
    DEFAULT_CAPACITY
}

impl Default for Config {
    fn default() -> Self {
        Self {
            availability_mode: default_mode(),
            booked_probability: default_probability(),
            availability_seed: None,
            cache_ttl_secs: default_ttl_secs(),
            cache_capacity: default_capacity(),
        }
    }
}

impl Config {
    /// Load `.env` if present, then read `BOOKING_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Read configuration from key/value pairs, keeping the `BOOKING_` ones.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: Config = envy::prefixed("BOOKING_").from_iter(vars)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.booked_probability) {
            return Err(ConfigError::Invalid(format!(
                "booked_probability must be between 0 and 1, got {}",
                self.booked_probability
            )));
        }
        if self.availability_mode == AvailabilityMode::Cached && self.cache_capacity == 0 {
            return Err(ConfigError::Invalid(
                "cache_capacity must be positive in cached mode".to_string(),
            ));
        }
        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Build the availability source this configuration describes.
    pub fn availability_source(&self) -> Box<dyn AvailabilitySource> {
        let random = match self.availability_seed {
            Some(seed) => RandomAvailability::seeded(self.booked_probability, seed),
            None => RandomAvailability::new(self.booked_probability),
        };

        match self.availability_mode {
            AvailabilityMode::Random => Box::new(random),
            AvailabilityMode::Cached => Box::new(CachedAvailability::with_limits(
                random,
                self.cache_capacity,
                self.cache_ttl(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(vars(&[("PATH", "/usr/bin")])).unwrap();
        assert_eq!(config.availability_mode, AvailabilityMode::Random);
        assert_eq!(config.booked_probability, 0.18);
        assert_eq!(config.availability_seed, None);
        assert_eq!(config.cache_ttl(), DEFAULT_TTL);
    }

    #[test]
    fn test_reads_prefixed_vars() {
        let config = Config::from_vars(vars(&[
            ("BOOKING_AVAILABILITY_MODE", "cached"),
            ("BOOKING_BOOKED_PROBABILITY", "0.5"),
            ("BOOKING_AVAILABILITY_SEED", "42"),
            ("BOOKING_CACHE_TTL_SECS", "60"),
        ]))
        .unwrap();
        assert_eq!(config.availability_mode, AvailabilityMode::Cached);
        assert_eq!(config.booked_probability, 0.5);
        assert_eq!(config.availability_seed, Some(42));
        assert_eq!(config.cache_ttl(), Duration::from_secs(60));
    }

    #[test]
    fn test_rejects_bad_probability() {
        let err = Config::from_vars(vars(&[("BOOKING_BOOKED_PROBABILITY", "1.5")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_unknown_mode() {
        let err = Config::from_vars(vars(&[("BOOKING_AVAILABILITY_MODE", "psychic")])).unwrap_err();
        assert!(matches!(err, ConfigError::Env(_)));
    }

    #[test]
    fn test_seeded_source_builds() {
        let config = Config {
            availability_seed: Some(3),
            booked_probability: 1.0,
            ..Config::default()
        };
        let source = config.availability_source();
        let date = chrono::NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let slot = crate::availability::SlotTime::from_hour(6).unwrap();
        assert!(source.is_booked(date, slot));
    }
}
