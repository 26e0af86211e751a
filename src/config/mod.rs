//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (default timeout, pool size, success status)
//! - The library `Config` and the clap-based `Opt` CLI surface

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{parse_duration, Config, LogFormat, LogLevel, Opt};
