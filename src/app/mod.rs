//! Reporting helpers used by the command-line application.

pub mod statistics;

// Re-export public API
pub use statistics::log_summary;
