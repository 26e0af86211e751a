//! Result sinks.
//!
//! A sink consumes every outcome from the result stream. When the stream
//! closes, `drain_results` hands the sink back over a one-shot channel; that
//! handoff is the completion signal the orchestrator waits for.

use tokio::sync::{mpsc, oneshot};

use crate::error_handling::ProcessingStats;
use crate::models::Outcome;

/// Consumer of outcomes, driven by `drain_results` on its own task.
pub trait ResultSink: Send + 'static {
    fn record(&mut self, outcome: Outcome);
}

impl<F> ResultSink for F
where
    F: FnMut(Outcome) + Send + 'static,
{
    fn record(&mut self, outcome: Outcome) {
        self(outcome)
    }
}

/// Drains `stream` into `sink` until every sender is gone, then returns the sink through `done`.
pub async fn drain_results<S: ResultSink>(
    mut stream: mpsc::Receiver<Outcome>,
    mut sink: S,
    done: oneshot::Sender<S>,
) {
    while let Some(outcome) = stream.recv().await {
        sink.record(outcome);
    }
    if done.send(sink).is_err() {
        log::warn!("Nobody is waiting for the result sink to finish");
    }
}

/// Logs one record per outcome and keeps aggregate statistics.
///
/// Successes are logged at `info`, failures at `error`.
#[derive(Debug, Default)]
pub struct LogSink {
    stats: ProcessingStats,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> &ProcessingStats {
        &self.stats
    }
}

impl ResultSink for LogSink {
    fn record(&mut self, outcome: Outcome) {
        self.stats.record(&outcome);
        match &outcome.result {
            Ok(length) => log::info!(
                "{} length={} elapsed={:?}",
                outcome.url,
                length,
                outcome.elapsed
            ),
            Err(e) => log::error!(
                "{} error={:?} kind={} elapsed={:?}",
                outcome.url,
                e.to_string(),
                e.kind(),
                outcome.elapsed
            ),
        }
    }
}

/// Keeps every outcome in arrival order.
#[derive(Debug, Default)]
pub struct CollectSink {
    outcomes: Vec<Outcome>,
}

impl CollectSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn into_outcomes(self) -> Vec<Outcome> {
        self.outcomes
    }
}

impl ResultSink for CollectSink {
    fn record(&mut self, outcome: Outcome) {
        self.outcomes.push(outcome);
    }
}
