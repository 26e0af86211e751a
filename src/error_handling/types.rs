//! Error type definitions.
//!
//! Per-item errors (`FetchError`) end up inside an `Outcome` and never abort a
//! run. Source-level errors (`SourceError`) decide the exit status.
//! Initialization errors stop the run before any work starts.

use std::io;
use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::{Display as DisplayMacro, EnumIter as EnumIterMacro, IntoStaticStr};
use thiserror::Error;

use super::categorization::categorize_reqwest_error;
use crate::config::MAX_WORKERS;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Worker count outside `1..=MAX_WORKERS`.
    #[error(
        "Worker pool initialization error: workers count must be between 1 and {max}, got {0}",
        max = MAX_WORKERS
    )]
    WorkerCountError(usize),
}

/// Reasons a line of input is not an absolute URI.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressError {
    #[error("empty url")]
    Empty,

    /// The line is not valid UTF-8; the outcome carries a lossy rendering of it.
    #[error("invalid UTF-8 in url")]
    InvalidUtf8,

    /// Whitespace or a control character anywhere in the line.
    #[error("invalid character in url")]
    InvalidCharacter,

    #[error("missing protocol scheme")]
    MissingScheme,

    #[error(transparent)]
    Malformed(#[from] url::ParseError),
}

/// Reasons an address cannot be turned into a GET request.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error(transparent)]
    Address(#[from] AddressError),

    #[error("unsupported protocol scheme {0:?}")]
    UnsupportedScheme(String),

    #[error(transparent)]
    Builder(ReqwestError),
}

/// Failure recorded for a single address.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The source line failed validation and was never queued.
    #[error("parse URL {address:?}: {source}")]
    InvalidAddress {
        address: String,
        source: AddressError,
    },

    #[error("create request: {0}")]
    Request(#[source] RequestError),

    #[error("do request: {0}")]
    Transport(#[source] ReqwestError),

    /// The run's root cancellation token fired while the request was in flight.
    #[error("do request: request canceled")]
    Canceled,

    #[error("read request: {0}")]
    Read(#[source] ReqwestError),

    #[error("Status is not OK ({0})")]
    Status(u16),
}

impl FetchError {
    /// Closed classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::InvalidAddress { .. } => ErrorKind::Validation,
            FetchError::Request(_) => ErrorKind::Construct,
            FetchError::Transport(e) => categorize_reqwest_error(e),
            FetchError::Canceled => ErrorKind::TransportOther,
            FetchError::Read(_) => ErrorKind::Read,
            FetchError::Status(_) => ErrorKind::Status,
        }
    }

    /// True when the request deadline expired, whether before or after headers arrived.
    pub fn is_timeout(&self) -> bool {
        match self {
            FetchError::Transport(e) | FetchError::Read(e) => e.is_timeout(),
            _ => false,
        }
    }

    /// HTTP status carried by a `Status` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status(code) => Some(*code),
            _ => None,
        }
    }
}

/// Failures reading the URL source. These are the only errors that make a run fail.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("open source {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("scan source: {0}")]
    Scan(#[source] io::Error),

    /// The work queue was already handed over by an earlier call.
    #[error("source already processed")]
    AlreadyProcessed,
}

/// Closed set of per-item error kinds, displayed in kebab case (`transport-timeout`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro, DisplayMacro, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum ErrorKind {
    Validation,
    Construct,
    TransportTimeout,
    TransportOther,
    Read,
    Status,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}
