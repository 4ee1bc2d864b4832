//! Poller tracker
//!
//! Owns one [`PollHandle`] per watched job. Pollers run independently and
//! share nothing but the fetcher; the tracker only provides explicit
//! start/cancel lifecycle methods and a place to collect outcomes.

use std::collections::HashMap;
use std::sync::Arc;

use aesthetic_core::domain::simulation::JobId;
use tracing::{debug, info};

use crate::config::PollerConfig;
use crate::error::PollerError;
use crate::fetcher::StatusFetcher;
use crate::poller::{JobPoller, PollHandle, PollOutcome};
use crate::sink::UpdateSink;

/// Outcome of one tracked poller
pub type TrackedOutcome = (JobId, Result<PollOutcome, PollerError>);

/// Collection of in-flight pollers indexed by job identifier
///
/// Dropping the tracker cancels every poller it still owns.
pub struct PollerTracker<F: StatusFetcher + ?Sized> {
    fetcher: Arc<F>,
    config: PollerConfig,
    handles: HashMap<JobId, PollHandle>,
}

impl<F: StatusFetcher + ?Sized + 'static> PollerTracker<F> {
    /// Creates an empty tracker; every poller it starts uses `config`
    pub fn new(fetcher: Arc<F>, config: PollerConfig) -> Result<Self, PollerError> {
        config.validate()?;

        Ok(Self {
            fetcher,
            config,
            handles: HashMap::new(),
        })
    }

    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    /// Starts watching `id`
    ///
    /// Fails if a live poller already watches the same job. A finished
    /// poller for that job is replaced and its unreaped outcome discarded.
    pub fn start<S: UpdateSink + 'static>(&mut self, id: JobId, sink: S) -> Result<(), PollerError> {
        if self.is_tracking(&id) {
            return Err(PollerError::AlreadyTracked(id));
        }

        let poller = JobPoller::new(id.clone(), Arc::clone(&self.fetcher), self.config.clone())?;

        if self.handles.remove(&id).is_some() {
            debug!("Replacing finished poller for job {}", id);
        }

        info!("Tracking job {}", id);
        self.handles.insert(id, poller.spawn(sink));
        Ok(())
    }

    /// Requests cancellation of the poller for `id`
    ///
    /// The handle stays tracked so its `Cancelled` outcome can be reaped.
    /// Returns false if the job is not tracked.
    pub fn cancel(&self, id: &JobId) -> bool {
        match self.handles.get(id) {
            Some(handle) => {
                debug!("Cancelling poller for job {}", id);
                handle.cancel();
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&self) {
        if !self.handles.is_empty() {
            info!("Cancelling {} poller(s)", self.handles.len());
        }
        for handle in self.handles.values() {
            handle.cancel();
        }
    }

    /// Whether a poller for `id` is still running
    pub fn is_tracking(&self, id: &JobId) -> bool {
        self.handles
            .get(id)
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Identifiers of pollers still running, sorted
    pub fn active_ids(&self) -> Vec<JobId> {
        let mut ids: Vec<JobId> = self
            .handles
            .iter()
            .filter(|(_, handle)| !handle.is_finished())
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }

    /// Number of tracked pollers, finished or not
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Removes finished pollers and returns their outcomes
    pub async fn reap(&mut self) -> Vec<TrackedOutcome> {
        let finished: Vec<JobId> = self
            .handles
            .iter()
            .filter(|(_, handle)| handle.is_finished())
            .map(|(id, _)| id.clone())
            .collect();

        let mut outcomes = Vec::with_capacity(finished.len());
        for id in finished {
            if let Some(handle) = self.handles.remove(&id) {
                outcomes.push((id, handle.outcome().await));
            }
        }
        outcomes
    }

    /// Waits for every tracked poller and returns all outcomes
    pub async fn join_all(&mut self) -> Vec<TrackedOutcome> {
        let mut outcomes = Vec::with_capacity(self.handles.len());
        for (id, handle) in self.handles.drain() {
            outcomes.push((id, handle.outcome().await));
        }
        outcomes.sort_by(|a, b| a.0.cmp(&b.0));
        outcomes
    }
}

impl<F: StatusFetcher + ?Sized> Drop for PollerTracker<F> {
    fn drop(&mut self) {
        for handle in self.handles.values() {
            handle.cancel();
        }
    }
}
