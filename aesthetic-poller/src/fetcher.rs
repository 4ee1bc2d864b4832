//! Status fetch seam
//!
//! The poller never talks HTTP itself; it asks a [`StatusFetcher`] for the
//! current state of a job. Authentication, timeouts and error translation
//! belong to the fetcher.

use aesthetic_client::{ClientError, SimulationClient};
use aesthetic_core::domain::simulation::{JobId, Simulation};
use async_trait::async_trait;

/// Source of fresh job snapshots
#[async_trait]
pub trait StatusFetcher: Send + Sync {
    /// Fetches the current state of `id`
    ///
    /// Every error is treated as transient by the poller.
    async fn fetch(&self, id: &JobId) -> Result<Simulation, ClientError>;
}

#[async_trait]
impl StatusFetcher for SimulationClient {
    async fn fetch(&self, id: &JobId) -> Result<Simulation, ClientError> {
        self.get_simulation(id).await
    }
}
