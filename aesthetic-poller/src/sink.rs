//! Delivery of observed job states

use aesthetic_client::ClientError;
use aesthetic_core::domain::simulation::Simulation;
use tokio::sync::mpsc;
use tracing::debug;

use crate::poller::PollAttempt;

/// Receiver of every successfully fetched job snapshot
///
/// Calls are strictly sequential and in attempt order. After a terminal
/// snapshot has been delivered the sink is never called again.
pub trait UpdateSink: Send {
    /// Called once per successful fetch
    fn on_update(&mut self, attempt: PollAttempt, simulation: Simulation);

    /// Called when a fetch fails; the attempt still counts against the budget
    fn on_fetch_error(&mut self, _attempt: PollAttempt, _error: &ClientError) {}
}

impl<F> UpdateSink for F
where
    F: FnMut(PollAttempt, Simulation) + Send,
{
    fn on_update(&mut self, attempt: PollAttempt, simulation: Simulation) {
        self(attempt, simulation)
    }
}

/// Forwards snapshots into an unbounded channel
///
/// A dropped receiver is not an error; updates are then discarded.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<(PollAttempt, Simulation)>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<(PollAttempt, Simulation)>) -> Self {
        Self { tx }
    }

    /// Creates a sink together with its receiving end
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<(PollAttempt, Simulation)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl UpdateSink for ChannelSink {
    fn on_update(&mut self, attempt: PollAttempt, simulation: Simulation) {
        let id = simulation.id.clone();
        if self.tx.send((attempt, simulation)).is_err() {
            debug!("Update receiver for job {} is gone, dropping update", id);
        }
    }
}
