//! Job poller
//!
//! Drives a bounded sequence of status fetches for one job. Each poller runs
//! as a single cooperative task: it sleeps for the configured interval,
//! fetches, delivers the snapshot, and re-arms the timer only once the
//! previous attempt has been fully processed.

use std::sync::Arc;

use aesthetic_core::domain::simulation::{JobId, Simulation, SimulationStatus};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, Instant};
use tracing::{debug, info, warn};

use crate::config::PollerConfig;
use crate::error::PollerError;
use crate::fetcher::StatusFetcher;
use crate::sink::UpdateSink;

/// One fetch of a job's status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollAttempt {
    /// 1-based attempt number
    pub sequence: u32,
    /// Time since the poller started, measured when the fetch was dispatched
    pub elapsed: Duration,
}

/// How a poller finished
///
/// Exactly one outcome is produced per poller, and the variants are
/// mutually exclusive.
#[derive(Debug, Clone)]
pub enum PollOutcome {
    /// The service reported the job as completed
    Completed(Simulation),
    /// The service reported the job as failed
    Failed(Simulation),
    /// The attempt budget ran out before a terminal status was seen
    Exhausted { attempts: u32 },
    /// The owner cancelled the poller
    Cancelled { attempts: u32 },
}

impl PollOutcome {
    /// Terminal simulation snapshot, if the service reported one
    pub fn simulation(&self) -> Option<&Simulation> {
        match self {
            PollOutcome::Completed(sim) | PollOutcome::Failed(sim) => Some(sim),
            PollOutcome::Exhausted { .. } | PollOutcome::Cancelled { .. } => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, PollOutcome::Completed(_))
    }
}

/// Cooperative cancellation flag shared between a poller and its owner
#[derive(Debug, Clone)]
pub struct CancelToken {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Requests cancellation; idempotent
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves once cancellation has been requested
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Watches one job until it reaches a terminal state
pub struct JobPoller<F: StatusFetcher + ?Sized> {
    id: JobId,
    fetcher: Arc<F>,
    config: PollerConfig,
}

impl<F: StatusFetcher + ?Sized + 'static> JobPoller<F> {
    /// Creates a new poller
    ///
    /// Fails if the configuration is invalid or the identifier is empty;
    /// nothing is fetched in that case.
    pub fn new(id: JobId, fetcher: Arc<F>, config: PollerConfig) -> Result<Self, PollerError> {
        config.validate()?;

        if id.is_empty() {
            return Err(PollerError::EmptyJobId);
        }

        Ok(Self {
            id,
            fetcher,
            config,
        })
    }

    pub fn id(&self) -> &JobId {
        &self.id
    }

    /// Runs the poller on its own task
    pub fn spawn<S: UpdateSink + 'static>(self, sink: S) -> PollHandle {
        let id = self.id.clone();
        let cancel = CancelToken::new();
        let join = tokio::spawn(self.run(sink, cancel.clone()));

        PollHandle {
            id,
            cancel,
            join: Some(join),
        }
    }

    /// Runs the polling loop on the current task
    ///
    /// The first fetch happens after one interval, never inline.
    pub async fn run<S: UpdateSink>(self, mut sink: S, cancel: CancelToken) -> PollOutcome {
        info!(
            "Watching job {} (interval: {:?}, max attempts: {})",
            self.id, self.config.interval, self.config.max_attempts
        );

        let started = Instant::now();
        let mut attempts = 0u32;

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!("Stopped watching job {} after {} attempt(s): cancelled", self.id, attempts);
                    return PollOutcome::Cancelled { attempts };
                }
                _ = time::sleep(self.config.interval) => {}
            }

            attempts += 1;
            let attempt = PollAttempt {
                sequence: attempts,
                elapsed: started.elapsed(),
            };

            debug!(
                "Fetching job {} (attempt {}/{})",
                self.id, attempts, self.config.max_attempts
            );

            let result = self.fetcher.fetch(&self.id).await;

            // In-flight fetches are not aborted, but their results are dropped.
            if cancel.is_cancelled() {
                info!(
                    "Stopped watching job {} after {} attempt(s): cancelled during fetch",
                    self.id, attempts
                );
                return PollOutcome::Cancelled { attempts };
            }

            match result {
                Ok(simulation) => {
                    let status = simulation.status;
                    debug!("Job {} is {} (attempt {})", self.id, status, attempts);

                    if status.is_terminal() {
                        sink.on_update(attempt, simulation.clone());
                        info!(
                            "Job {} finished with status {} after {} attempt(s)",
                            self.id, status, attempts
                        );
                        return match status {
                            SimulationStatus::Completed => PollOutcome::Completed(simulation),
                            _ => PollOutcome::Failed(simulation),
                        };
                    }

                    sink.on_update(attempt, simulation);
                }
                Err(e) => {
                    warn!(
                        "Failed to fetch job {} (attempt {}/{}): {}",
                        self.id, attempts, self.config.max_attempts, e
                    );
                    sink.on_fetch_error(attempt, &e);
                }
            }

            if attempts >= self.config.max_attempts {
                warn!(
                    "Gave up on job {} after {} attempt(s) without a terminal status",
                    self.id, attempts
                );
                return PollOutcome::Exhausted { attempts };
            }
        }
    }
}

/// Owner's handle on a spawned poller
///
/// Dropping the handle cancels the poller.
#[derive(Debug)]
pub struct PollHandle {
    id: JobId,
    cancel: CancelToken,
    join: Option<JoinHandle<PollOutcome>>,
}

impl PollHandle {
    pub fn id(&self) -> &JobId {
        &self.id
    }

    /// Requests cancellation
    ///
    /// A pending timer is released immediately. A fetch already in flight
    /// runs to completion but its result is never delivered.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn is_finished(&self) -> bool {
        self.join.as_ref().is_none_or(|join| join.is_finished())
    }

    /// Waits for the poller to finish
    pub async fn outcome(mut self) -> Result<PollOutcome, PollerError> {
        match self.join.take() {
            Some(join) => Ok(join.await?),
            None => Ok(PollOutcome::Cancelled { attempts: 0 }),
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        // Also reached when an `outcome()` future is dropped before completion.
        self.cancel.cancel();
    }
}
