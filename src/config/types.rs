//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, DEFAULT_WORKERS, MAX_WORKERS, STDIN_SOURCE,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: One JSON object per line for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use getpages::Config;
/// use std::path::PathBuf;
/// use std::time::Duration;
///
/// let config = Config {
///     source: Some(PathBuf::from("urls.txt")),
///     timeout: Duration::from_secs(2),
///     workers: 8,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// File to read URLs from; `None` reads standard input
    pub source: Option<PathBuf>,

    /// Per-request timeout
    pub timeout: Duration,

    /// Number of concurrent workers (also the work queue capacity)
    pub workers: usize,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Log aggregate statistics when the run completes
    pub summary: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: None,
            timeout: DEFAULT_TIMEOUT,
            workers: DEFAULT_WORKERS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            summary: false,
        }
    }
}

/// Command-line options of the `getpages` binary.
#[derive(Debug, Parser)]
#[command(
    name = "getpages",
    version,
    about = "Fetch URLs with a fixed worker pool and report length, elapsed time or error"
)]
pub struct Opt {
    /// File with URLs, one per line (STDIN used if empty or `-`)
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Request timeout, e.g. `250ms`, `5s`, `1.5s`, `2m`
    #[arg(long, default_value = "5s", value_parser = parse_duration)]
    pub timeout: Duration,

    /// Workers count
    #[arg(long, default_value_t = DEFAULT_WORKERS, value_parser = parse_workers)]
    pub workers: usize,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Log aggregate statistics at the end of the run
    #[arg(long)]
    pub summary: bool,
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        let source = opt
            .source
            .filter(|path| !path.as_os_str().is_empty() && path.as_os_str() != STDIN_SOURCE);
        Self {
            source,
            timeout: opt.timeout,
            workers: opt.workers,
            user_agent: opt.user_agent,
            log_level: opt.log_level,
            log_format: opt.log_format,
            summary: opt.summary,
        }
    }
}

/// Parses a duration such as `250ms`, `5s`, `1.5s`, `2m` or `1h`.
///
/// A bare number is taken as seconds. Zero and negative durations are rejected.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    let split = s
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(s.len());
    let (number, unit) = s.split_at(split);
    if number.is_empty() {
        return Err(format!("invalid duration {s:?}"));
    }

    let duration = if let Ok(whole) = number.parse::<u64>() {
        match unit {
            "" | "s" => Duration::from_secs(whole),
            "ms" => Duration::from_millis(whole),
            "us" | "µs" => Duration::from_micros(whole),
            "m" => Duration::from_secs(whole.saturating_mul(60)),
            "h" => Duration::from_secs(whole.saturating_mul(3600)),
            other => return Err(format!("unknown unit {other:?} in duration {s:?}")),
        }
    } else {
        let value: f64 = number
            .parse()
            .map_err(|_| format!("invalid duration {s:?}"))?;
        let secs = match unit {
            "" | "s" => value,
            "ms" => value / 1_000.0,
            "us" | "µs" => value / 1_000_000.0,
            "m" => value * 60.0,
            "h" => value * 3600.0,
            other => return Err(format!("unknown unit {other:?} in duration {s:?}")),
        };
        Duration::try_from_secs_f64(secs).map_err(|e| format!("invalid duration {s:?}: {e}"))?
    };

    if duration.is_zero() {
        return Err(format!("duration {s:?} must be greater than zero"));
    }
    Ok(duration)
}

fn parse_workers(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(n) if (1..=MAX_WORKERS).contains(&n) => Ok(n),
        Ok(n) => Err(format!(
            "workers count must be between 1 and {MAX_WORKERS}, got {n}"
        )),
        Err(e) => Err(format!("invalid workers count {s:?}: {e}")),
    }
}
