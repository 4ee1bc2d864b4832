//! Aesthetic Job Poller
//!
//! Watches simulation jobs until the service reports a terminal status.
//!
//! Creating a simulation is fire-and-forget: the service answers at once and
//! renders in the background. A [`JobPoller`] turns that into an observed
//! result by fetching the job at a fixed interval, handing every fetched
//! snapshot to an [`UpdateSink`], and finishing with exactly one
//! [`PollOutcome`]:
//!
//! - `Completed` / `Failed`: the service reported a terminal status
//! - `Exhausted`: the attempt budget ran out first
//! - `Cancelled`: the owner asked the poller to stop
//!
//! Several jobs are watched at once through a [`PollerTracker`], which owns
//! one independent poller task per job identifier.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use aesthetic_client::SimulationClient;
//! use aesthetic_core::domain::simulation::{JobId, Simulation};
//! use aesthetic_poller::{JobPoller, PollAttempt, PollerConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = Arc::new(SimulationClient::new("http://localhost:8000").with_token("..."));
//!     let poller = JobPoller::new(JobId::from(42), client, PollerConfig::default())?;
//!
//!     let handle = poller.spawn(|attempt: PollAttempt, sim: Simulation| {
//!         println!("#{} {}", attempt.sequence, sim.status);
//!     });
//!
//!     println!("{:?}", handle.outcome().await?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod fetcher;
pub mod poller;
pub mod sink;
pub mod tracker;

#[cfg(test)]
pub(crate) mod testing;

pub use config::PollerConfig;
pub use error::PollerError;
pub use fetcher::StatusFetcher;
pub use poller::{CancelToken, JobPoller, PollAttempt, PollHandle, PollOutcome};
pub use sink::{ChannelSink, UpdateSink};
pub use tracker::PollerTracker;
