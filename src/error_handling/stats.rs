//! Processing statistics tracking.
//!
//! Aggregates outcomes seen by a result sink: successes, bytes fetched and
//! failures per `ErrorKind`. All kinds are initialized to zero on creation.

use std::collections::HashMap;
use strum::IntoEnumIterator;

use super::types::ErrorKind;
use crate::models::Outcome;

/// Outcome counters kept by a single result sink.
#[derive(Debug, Clone)]
pub struct ProcessingStats {
    successes: usize,
    bytes: u64,
    errors: HashMap<ErrorKind, usize>,
}

impl ProcessingStats {
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for kind in ErrorKind::iter() {
            errors.insert(kind, 0);
        }
        ProcessingStats {
            successes: 0,
            bytes: 0,
            errors,
        }
    }

    /// Counts one outcome.
    pub fn record(&mut self, outcome: &Outcome) {
        match &outcome.result {
            Ok(length) => {
                self.successes += 1;
                self.bytes += length;
            }
            Err(e) => self.increment_error(e.kind()),
        }
    }

    pub fn increment_error(&mut self, kind: ErrorKind) {
        *self.errors.entry(kind).or_insert(0) += 1;
    }

    pub fn get_error_count(&self, kind: ErrorKind) -> usize {
        self.errors.get(&kind).copied().unwrap_or(0)
    }

    pub fn successes(&self) -> usize {
        self.successes
    }

    /// Sum of body lengths over all successful fetches.
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    pub fn total_errors(&self) -> usize {
        self.errors.values().sum()
    }

    pub fn total(&self) -> usize {
        self.successes + self.total_errors()
    }
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}
