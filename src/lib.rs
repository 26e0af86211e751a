//! getpages library: fetch a list of URLs with a fixed worker pool
//!
//! Addresses are read line by line from a file or standard input, queued on a
//! bounded work queue and fetched by a fixed number of workers. Every line
//! yields exactly one [`Outcome`]: the body length and elapsed time on
//! success, or a classified [`FetchError`].
//!
//! # Example
//!
//! ```no_run
//! use getpages::{run_with_sink, CollectSink, Config};
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config {
//!     source: Some(PathBuf::from("urls.txt")),
//!     workers: 8,
//!     ..Default::default()
//! };
//!
//! let report = run_with_sink(&config, CollectSink::new()).await?;
//! for outcome in report.sink.outcomes() {
//!     println!("{} -> {:?}", outcome.url, outcome.length());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod app;
pub mod config;
pub mod error_handling;
pub mod fetch;
pub mod initialization;
mod models;
mod run;
pub mod service;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, Opt};
pub use error_handling::{
    AddressError, ErrorKind, FetchError, InitializationError, ProcessingStats, RequestError,
    SourceError,
};
pub use fetch::{fetch, Fetcher};
pub use models::Outcome;
pub use run::{run, run_with_cancel, run_with_sink, RunReport, RunState};
pub use service::{drain_results, run_worker, CollectSink, LogSink, ResultSink, Service, WorkerState};
