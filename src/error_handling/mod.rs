//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions (per-item, source-level and initialization errors)
//! - Classification of transport errors into a closed set of kinds
//! - Outcome statistics tracking
//!
//! Per-item errors are recorded in an `Outcome` and never fail a run. Only a
//! `SourceError` turns into a non-zero exit status.

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::categorize_reqwest_error;
pub use stats::ProcessingStats;
pub use types::{
    AddressError, ErrorKind, FetchError, InitializationError, RequestError, SourceError,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Outcome;
    use std::time::Duration;
    use strum::IntoEnumIterator;

    #[test]
    fn test_processing_stats_initialization() {
        let stats = ProcessingStats::new();
        for kind in ErrorKind::iter() {
            assert_eq!(stats.get_error_count(kind), 0);
        }
        assert_eq!(stats.successes(), 0);
        assert_eq!(stats.total(), 0);
    }

    #[test]
    fn test_processing_stats_record() {
        let mut stats = ProcessingStats::new();
        stats.record(&Outcome::success("http://a/", 8, Duration::from_millis(3)));
        stats.record(&Outcome::success("http://b/", 12, Duration::from_millis(4)));
        stats.record(&Outcome::failure(
            "http://c/",
            FetchError::Status(404),
            Duration::from_millis(1),
        ));
        stats.record(&Outcome::invalid("::", AddressError::MissingScheme));

        assert_eq!(stats.successes(), 2);
        assert_eq!(stats.bytes(), 20);
        assert_eq!(stats.get_error_count(ErrorKind::Status), 1);
        assert_eq!(stats.get_error_count(ErrorKind::Validation), 1);
        assert_eq!(stats.get_error_count(ErrorKind::TransportTimeout), 0);
        assert_eq!(stats.total_errors(), 2);
        assert_eq!(stats.total(), 4);
    }
}
