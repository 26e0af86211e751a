//! The fetch pipeline: work queue, worker pool and result stream.
//!
//! ```text
//! source reader --> work queue (bounded) --> workers --> result stream --> result sink
//!       \______________ invalid lines ______________/
//! ```
//!
//! A `Service` owns both channels for exactly one run. Dropping a channel's
//! last sender is what closes it:
//! - the work queue closes when `process_source` returns, which stops the workers;
//! - the result stream closes in `close`, once no worker is left to publish.

mod sink;
mod source;
mod worker;

use std::path::PathBuf;
use std::sync::Arc;

use futures::stream::FuturesUnordered;
use tokio::sync::{mpsc, oneshot, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::{Config, MAX_WORKERS};
use crate::error_handling::InitializationError;
use crate::fetch::Fetcher;
use crate::initialization::init_client;
use crate::models::Outcome;

pub use sink::{drain_results, CollectSink, LogSink, ResultSink};
pub use worker::{run_worker, WorkerState};

/// Capacity of the result stream. Tokio channels need at least one slot, so
/// this is the closest thing to a synchronous handoff.
const RESULT_STREAM_CAPACITY: usize = 1;

/// Work queue receiver shared by all workers.
pub type SharedQueue = Arc<Mutex<mpsc::Receiver<String>>>;

/// Holds the streams and fetch settings of a single run.
pub struct Service {
    source: Option<PathBuf>,
    fetcher: Fetcher,
    queue_tx: Option<mpsc::Sender<String>>,
    queue_rx: Option<SharedQueue>,
    results_tx: mpsc::Sender<Outcome>,
    results_rx: Option<mpsc::Receiver<Outcome>>,
}

impl Service {
    /// Creates a service reading `source` (standard input when `None`).
    ///
    /// `queue_capacity` bounds the work queue and must be in `1..=MAX_WORKERS`.
    pub fn new(
        source: Option<PathBuf>,
        fetcher: Fetcher,
        queue_capacity: usize,
    ) -> Result<Self, InitializationError> {
        if !(1..=MAX_WORKERS).contains(&queue_capacity) {
            return Err(InitializationError::WorkerCountError(queue_capacity));
        }
        let (queue_tx, queue_rx) = mpsc::channel(queue_capacity);
        let (results_tx, results_rx) = mpsc::channel(RESULT_STREAM_CAPACITY);
        Ok(Self {
            source,
            fetcher,
            queue_tx: Some(queue_tx),
            queue_rx: Some(Arc::new(Mutex::new(queue_rx))),
            results_tx,
            results_rx: Some(results_rx),
        })
    }

    /// Creates a service from the run configuration, building its HTTP client.
    ///
    /// The work queue holds as many addresses as there are workers.
    pub fn from_config(
        config: &Config,
        cancel: CancellationToken,
    ) -> Result<Self, InitializationError> {
        let client = init_client(config)?;
        let fetcher = Fetcher::new(client, config.timeout, cancel);
        Self::new(config.source.clone(), fetcher, config.workers)
    }

    /// Spawns `count` workers on the work queue.
    ///
    /// Must run before `process_source`, otherwise the source reader blocks as
    /// soon as the queue is full. The service keeps no handle on the queue
    /// receiver afterwards, so the queue also closes if every worker is gone.
    /// Each task resolves to the number of addresses its worker processed.
    pub fn spawn_workers(&mut self, count: usize) -> FuturesUnordered<JoinHandle<usize>> {
        let tasks = FuturesUnordered::new();
        let Some(queue) = self.queue_rx.take() else {
            log::warn!("Workers already spawned, ignoring request for {count} more");
            return tasks;
        };
        for id in 0..count {
            tasks.push(tokio::spawn(run_worker(
                id,
                self.fetcher.clone(),
                Arc::clone(&queue),
                self.results_tx.clone(),
            )));
        }
        log::debug!("Spawned {count} workers");
        tasks
    }

    /// Hands out the receiving end of the result stream. Returns `None` after the first call.
    pub fn take_result_stream(&mut self) -> Option<mpsc::Receiver<Outcome>> {
        self.results_rx.take()
    }

    /// Closes the result stream and waits for the sink's completion signal.
    ///
    /// Call only after every worker has terminated. Consuming the service makes
    /// a second close impossible.
    pub async fn close<S>(self, completion: oneshot::Receiver<S>) -> Result<S, oneshot::error::RecvError> {
        drop(self);
        completion.await
    }
}
