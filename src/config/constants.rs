//! Configuration constants.
//!
//! Defaults for the CLI and the library `Config`, plus the HTTP status that
//! counts as a successful fetch.

use std::time::Duration;

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default size of the worker pool.
pub const DEFAULT_WORKERS: usize = 2;

/// Upper bound on the worker pool, which also sizes the work queue.
pub const MAX_WORKERS: usize = 10_000;

/// The single status code reported as success.
pub const SUCCESS_STATUS: u16 = 200;

/// Source path that selects standard input, same as leaving the source unset.
pub const STDIN_SOURCE: &str = "-";

/// User-Agent sent with every request unless overridden with `--user-agent`.
pub const DEFAULT_USER_AGENT: &str = concat!("getpages/", env!("CARGO_PKG_VERSION"));
