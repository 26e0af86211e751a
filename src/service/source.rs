//! Source reader.
//!
//! Reads newline-delimited addresses, queues the valid ones and reports the
//! invalid ones straight to the result stream. Returning drops the work queue
//! sender, which is the only stop signal the workers get.

use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use super::Service;
use crate::error_handling::{AddressError, SourceError};
use crate::fetch::validate_address;
use crate::models::Outcome;

/// Line counters of one source scan.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SourceSummary {
    pub(crate) lines: u64,
    pub(crate) queued: u64,
    pub(crate) rejected: u64,
}

impl Service {
    /// Reads the configured source (standard input when unset) into the pipeline.
    ///
    /// Invalid lines, including empty ones, are reported as outcomes and never
    /// abort the scan. Only an open failure or an I/O fault while reading is
    /// returned as an error. The work queue is closed on every path.
    pub async fn process_source(&mut self) -> Result<(), SourceError> {
        let queue = self
            .queue_tx
            .take()
            .ok_or(SourceError::AlreadyProcessed)?;

        let summary = match &self.source {
            None => {
                log::info!("Reading URLs from stdin");
                dispatch_lines(BufReader::new(tokio::io::stdin()), queue, &self.results_tx).await?
            }
            Some(path) => {
                let file = File::open(path).await.map_err(|source| SourceError::Open {
                    path: path.clone(),
                    source,
                })?;
                log::info!("Reading URLs from {}", path.display());
                dispatch_lines(BufReader::new(file), queue, &self.results_tx).await?
            }
        };

        log::info!(
            "Read {} lines ({} queued, {} rejected)",
            summary.lines,
            summary.queued,
            summary.rejected
        );
        Ok(())
    }
}

/// Scans `reader` line by line and routes every line to the queue or the result stream.
///
/// Lines are split on `\n` with an optional trailing `\r` removed. A line that
/// is not valid UTF-8 is reported on its own; only I/O faults end the scan.
/// `queue` is consumed so that it is dropped, closing the work queue, whatever
/// the outcome of the scan.
pub(crate) async fn dispatch_lines<R>(
    mut reader: R,
    queue: mpsc::Sender<String>,
    results: &mpsc::Sender<Outcome>,
) -> Result<SourceSummary, SourceError>
where
    R: AsyncBufRead + Unpin,
{
    let mut summary = SourceSummary::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .await
            .map_err(SourceError::Scan)?;
        if read == 0 {
            break;
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
        summary.lines += 1;

        match route_line(&buf) {
            Ok(line) => {
                if queue.send(line).await.is_err() {
                    log::error!(
                        "No worker left to take line {}, stopping source scan",
                        summary.lines
                    );
                    break;
                }
                summary.queued += 1;
            }
            Err((line, e)) => {
                log::debug!("Invalid address on line {}: {}", summary.lines, e);
                summary.rejected += 1;
                if results.send(Outcome::invalid(line, e)).await.is_err() {
                    log::warn!(
                        "Result stream closed, dropping invalid line {}",
                        summary.lines
                    );
                }
            }
        }
    }

    Ok(summary)
}

/// Returns the line to queue, or the line to report together with its validation error.
fn route_line(raw: &[u8]) -> Result<String, (String, AddressError)> {
    match std::str::from_utf8(raw) {
        Ok(line) => match validate_address(line) {
            Ok(_) => Ok(line.to_owned()),
            Err(e) => Err((line.to_owned(), e)),
        },
        Err(_) => Err((
            String::from_utf8_lossy(raw).into_owned(),
            AddressError::InvalidUtf8,
        )),
    }
}
