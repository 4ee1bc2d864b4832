//! Poller configuration
//!
//! Fixed-interval polling: there is no backoff, and fetch failures consume
//! the same attempt budget as successful fetches.

use std::time::Duration;

use crate::error::PollerError;

/// Default delay between two fetches
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(2);

/// Default attempt budget (two minutes at the default interval)
pub const DEFAULT_MAX_ATTEMPTS: u32 = 60;

/// Poller configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerConfig {
    /// Delay before every fetch, including the first one
    pub interval: Duration,

    /// Total number of fetches, failed ones included
    pub max_attempts: u32,
}

impl PollerConfig {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - AESTHETIC_POLL_INTERVAL_MS (optional, milliseconds, default: 2000)
    /// - AESTHETIC_POLL_MAX_ATTEMPTS (optional, default: 60)
    pub fn from_env() -> Self {
        let interval = std::env::var("AESTHETIC_POLL_INTERVAL_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_INTERVAL);

        let max_attempts = std::env::var("AESTHETIC_POLL_MAX_ATTEMPTS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(DEFAULT_MAX_ATTEMPTS);

        Self {
            interval,
            max_attempts,
        }
    }

    /// Longest time a poller can spend waiting between fetches
    pub fn budget(&self) -> Duration {
        self.interval.saturating_mul(self.max_attempts)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), PollerError> {
        if self.interval.is_zero() {
            return Err(PollerError::InvalidConfig(
                "interval must be greater than 0".to_string(),
            ));
        }

        if self.max_attempts == 0 {
            return Err(PollerError::InvalidConfig(
                "max_attempts must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL, DEFAULT_MAX_ATTEMPTS)
    }
}
