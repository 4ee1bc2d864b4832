//! Poller error types

use aesthetic_core::domain::simulation::JobId;
use thiserror::Error;

/// Errors raised while setting up or joining pollers
///
/// These never describe the watched job itself: job failures and budget
/// exhaustion are reported through [`crate::PollOutcome`].
#[derive(Debug, Error)]
pub enum PollerError {
    #[error("Invalid poller configuration: {0}")]
    InvalidConfig(String),

    #[error("Job identifier cannot be empty")]
    EmptyJobId,

    #[error("Job {0} is already being watched")]
    AlreadyTracked(JobId),

    #[error("Poller task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}
