//! Test doubles for the poller: a scripted fetcher and a recording sink

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use aesthetic_client::ClientError;
use aesthetic_core::domain::simulation::{JobId, Simulation, SimulationStatus};
use async_trait::async_trait;
use tokio::sync::Notify;
use tokio::time::Duration;

use crate::fetcher::StatusFetcher;
use crate::poller::PollAttempt;
use crate::sink::UpdateSink;

pub(crate) fn simulation(id: &str, status: SimulationStatus) -> Simulation {
    serde_json::from_value(serde_json::json!({ "id": id, "status": status }))
        .expect("valid simulation fixture")
}

/// One scripted response
#[derive(Debug, Clone)]
pub(crate) enum Step {
    Status(SimulationStatus),
    Error(u16),
}

/// Holds a fetch open until the test releases it
struct Gate {
    dispatched: Notify,
    release: Notify,
}

/// Replays a fixed script of responses; the last step repeats forever
pub(crate) struct ScriptedFetcher {
    steps: Mutex<VecDeque<Step>>,
    calls: AtomicU32,
    gate: Option<Gate>,
}

impl ScriptedFetcher {
    pub(crate) fn new(steps: Vec<Step>) -> Self {
        assert!(!steps.is_empty(), "script needs at least one step");
        Self {
            steps: Mutex::new(steps.into()),
            calls: AtomicU32::new(0),
            gate: None,
        }
    }

    pub(crate) fn always(status: SimulationStatus) -> Self {
        Self::new(vec![Step::Status(status)])
    }

    /// Every fetch blocks until [`ScriptedFetcher::release`] is called
    pub(crate) fn gated(status: SimulationStatus) -> Self {
        Self {
            gate: Some(Gate {
                dispatched: Notify::new(),
                release: Notify::new(),
            }),
            ..Self::always(status)
        }
    }

    pub(crate) fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) async fn wait_dispatched(&self) {
        if let Some(gate) = &self.gate {
            gate.dispatched.notified().await;
        }
    }

    pub(crate) fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.release.notify_one();
        }
    }

    fn next_step(&self) -> Step {
        let mut steps = self.steps.lock().unwrap();
        if steps.len() > 1 {
            steps.pop_front().unwrap()
        } else {
            steps[0].clone()
        }
    }
}

#[async_trait]
impl StatusFetcher for ScriptedFetcher {
    async fn fetch(&self, id: &JobId) -> Result<Simulation, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = &self.gate {
            gate.dispatched.notify_one();
            gate.release.notified().await;
        }

        match self.next_step() {
            Step::Status(status) => Ok(simulation(id.as_str(), status)),
            Step::Error(code) => Err(ClientError::api_error(code, "scripted failure")),
        }
    }
}

#[derive(Default)]
struct Recorded {
    updates: Vec<(PollAttempt, SimulationStatus)>,
    errors: Vec<u32>,
}

/// Sink that records everything it receives; clones share the record
#[derive(Clone, Default)]
pub(crate) struct Recorder {
    inner: Arc<Mutex<Recorded>>,
}

impl Recorder {
    pub(crate) fn len(&self) -> usize {
        self.inner.lock().unwrap().updates.len()
    }

    pub(crate) fn statuses(&self) -> Vec<SimulationStatus> {
        self.inner.lock().unwrap().updates.iter().map(|(_, s)| *s).collect()
    }

    pub(crate) fn sequences(&self) -> Vec<u32> {
        self.inner.lock().unwrap().updates.iter().map(|(a, _)| a.sequence).collect()
    }

    pub(crate) fn elapsed(&self) -> Vec<Duration> {
        self.inner.lock().unwrap().updates.iter().map(|(a, _)| a.elapsed).collect()
    }

    pub(crate) fn error_sequences(&self) -> Vec<u32> {
        self.inner.lock().unwrap().errors.clone()
    }
}

impl UpdateSink for Recorder {
    fn on_update(&mut self, attempt: PollAttempt, simulation: Simulation) {
        self.inner.lock().unwrap().updates.push((attempt, simulation.status));
    }

    fn on_fetch_error(&mut self, attempt: PollAttempt, _error: &ClientError) {
        self.inner.lock().unwrap().errors.push(attempt.sequence);
    }
}
