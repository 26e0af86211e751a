//! Worker loop.
//!
//! A worker repeatedly takes one address from the shared work queue, fetches
//! it and publishes the timed outcome. It stops once the queue is closed and
//! empty; cancellation only bounds individual fetches.

use std::fmt;
use std::time::Instant;

use tokio::sync::mpsc;

use super::SharedQueue;
use crate::fetch::Fetcher;
use crate::models::Outcome;

/// Life cycle of a worker, traced at `trace` level on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// Waiting for the next address.
    Idle,
    Fetching,
    /// Waiting for the result stream to accept the outcome.
    Publishing,
    Terminated,
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkerState::Idle => "idle",
            WorkerState::Fetching => "fetching",
            WorkerState::Publishing => "publishing",
            WorkerState::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

struct Worker {
    id: usize,
    state: WorkerState,
}

impl Worker {
    fn transition(&mut self, next: WorkerState) {
        log::trace!("worker {}: {} -> {}", self.id, self.state, next);
        self.state = next;
    }
}

/// Runs one worker until the work queue is closed and drained.
///
/// Returns the number of outcomes this worker published.
pub async fn run_worker(
    id: usize,
    fetcher: Fetcher,
    queue: SharedQueue,
    results: mpsc::Sender<Outcome>,
) -> usize {
    let mut worker = Worker {
        id,
        state: WorkerState::Idle,
    };
    let mut processed = 0;

    loop {
        // The lock is released before fetching so other workers can dequeue.
        let next = queue.lock().await.recv().await;
        let Some(address) = next else {
            break;
        };

        worker.transition(WorkerState::Fetching);
        let start = Instant::now();
        let result = fetcher.fetch(&address).await;
        let outcome = Outcome {
            url: address,
            result,
            elapsed: start.elapsed(),
        };

        worker.transition(WorkerState::Publishing);
        if let Err(mpsc::error::SendError(outcome)) = results.send(outcome).await {
            log::warn!(
                "Worker {id}: result stream closed, dropping outcome for {}",
                outcome.url
            );
            break;
        }
        processed += 1;
        worker.transition(WorkerState::Idle);
    }

    worker.transition(WorkerState::Terminated);
    log::debug!("Worker {id} finished after {processed} addresses");
    processed
}
