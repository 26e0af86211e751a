//! Statistics printing.

use std::time::Duration;

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorKind, ProcessingStats};

/// Logs the aggregate outcome counts of a run.
///
/// Error kinds that never occurred are left out.
pub fn log_summary(stats: &ProcessingStats, elapsed: Duration) {
    let elapsed_secs = elapsed.as_secs_f64();
    let rate = if elapsed_secs > 0.0 {
        stats.total() as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Processed {} URLs in {:.2} seconds (~{:.2} URLs/sec): {} succeeded ({} bytes), {} failed",
        stats.total(),
        elapsed_secs,
        rate,
        stats.successes(),
        stats.bytes(),
        stats.total_errors()
    );

    for kind in ErrorKind::iter() {
        let count = stats.get_error_count(kind);
        if count > 0 {
            info!("   {}: {}", kind, count);
        }
    }
}
