//! Run orchestration.
//!
//! Wires a `Service` to its workers and sink and enforces the shutdown order:
//! source finished -> work queue closed -> all workers joined -> result stream
//! closed -> sink completion received.

mod state;

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use futures::StreamExt;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error_handling::SourceError;
use crate::service::{drain_results, LogSink, ResultSink, Service};

pub use state::RunState;

/// Result of a completed run.
#[derive(Debug)]
pub struct RunReport<S> {
    /// Outcome of reading the source; the only input to the exit status.
    pub source_result: Result<(), SourceError>,
    /// The sink, handed back once it drained every outcome.
    pub sink: S,
    /// Addresses fetched by workers (invalid lines are not counted).
    pub fetched: usize,
    pub elapsed: Duration,
}

impl<S> RunReport<S> {
    /// Process exit status: 1 when the source could not be read, 0 otherwise,
    /// however many individual URLs failed.
    pub fn exit_code(&self) -> i32 {
        if self.source_result.is_err() {
            1
        } else {
            0
        }
    }

    pub fn is_success(&self) -> bool {
        self.source_result.is_ok()
    }
}

/// Runs the pipeline with a logging sink.
///
/// # Errors
///
/// Returns an error if initialization fails or the sink stops before draining
/// all outcomes. Source failures are reported in `RunReport::source_result`.
///
/// # Example
///
/// ```no_run
/// use getpages::{run, Config};
/// use std::path::PathBuf;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config {
///     source: Some(PathBuf::from("urls.txt")),
///     ..Default::default()
/// };
/// let report = run(&config).await?;
/// std::process::exit(report.exit_code());
/// # }
/// ```
pub async fn run(config: &Config) -> Result<RunReport<LogSink>> {
    run_with_sink(config, LogSink::new()).await
}

/// Runs the pipeline, delivering every outcome to `sink`.
pub async fn run_with_sink<S: ResultSink>(config: &Config, sink: S) -> Result<RunReport<S>> {
    run_with_cancel(config, sink, CancellationToken::new()).await
}

/// Runs the pipeline with `cancel` as the root of every fetch.
///
/// Cancelling the token aborts in-flight fetches (reported as canceled
/// outcomes); it does not interrupt reading the source.
pub async fn run_with_cancel<S: ResultSink>(
    config: &Config,
    sink: S,
    cancel: CancellationToken,
) -> Result<RunReport<S>> {
    let start = Instant::now();
    let mut state = RunState::Init;

    let mut service =
        Service::from_config(config, cancel).context("Failed to initialize service")?;
    let mut workers = service.spawn_workers(config.workers);
    let stream = service
        .take_result_stream()
        .context("Result stream already taken")?;
    let (done_tx, done_rx) = oneshot::channel();
    tokio::spawn(drain_results(stream, sink, done_tx));
    state.advance();

    let source_result = service.process_source().await;
    if let Err(e) = &source_result {
        log::error!("Source failed: {e}");
    }
    state.advance();

    let mut fetched = 0;
    while let Some(task_result) = workers.next().await {
        match task_result {
            Ok(processed) => fetched += processed,
            Err(join_error) => log::warn!("Worker panicked: {:?}", join_error),
        }
    }

    let sink = service
        .close(done_rx)
        .await
        .context("Result sink stopped before draining all outcomes")?;
    state.advance();

    let elapsed = start.elapsed();
    log::debug!("Run {} after {:?}, {} addresses fetched", state, elapsed, fetched);

    Ok(RunReport {
        source_result,
        sink,
        fetched,
        elapsed,
    })
}
