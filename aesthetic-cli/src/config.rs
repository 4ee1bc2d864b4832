//! Configuration module
//!
//! Handles CLI configuration: where the service lives, how to authenticate,
//! and how simulations are watched.

use std::time::Duration;

use aesthetic_client::{ClientConfig, SimulationClient};
use aesthetic_poller::PollerConfig;
use anyhow::{Context, Result};

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the simulation service
    pub api_url: String,

    /// Bearer token, if logged in
    pub token: Option<String>,

    /// Per-request timeout
    pub timeout: Duration,

    /// Delay between two status checks
    pub poll_interval: Duration,

    /// Status checks before giving up on a simulation
    pub poll_max_attempts: u32,
}

impl Config {
    /// Builds an HTTP client, authenticated when a token is configured
    pub fn client(&self) -> Result<SimulationClient> {
        let client_config = ClientConfig::new(self.api_url.clone()).with_timeout(self.timeout);
        let client = SimulationClient::from_config(&client_config)
            .context("Failed to create simulation client")?;

        Ok(match &self.token {
            Some(token) => client.with_token(token.clone()),
            None => client,
        })
    }

    /// Validated poller settings
    pub fn poller(&self) -> Result<PollerConfig> {
        let config = PollerConfig::new(self.poll_interval, self.poll_max_attempts);
        config.validate()?;
        Ok(config)
    }
}
