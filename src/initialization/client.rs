//! HTTP client initialization.

use crate::config::Config;
use reqwest::ClientBuilder;

/// Initializes the HTTP client shared by all workers.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the configuration
/// - Timeout from the configuration (each request also carries its own)
/// - The transport's default redirect policy
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<reqwest::Client, reqwest::Error> {
    ClientBuilder::new()
        .timeout(config.timeout)
        .connect_timeout(config.timeout)
        .user_agent(config.user_agent.clone())
        .build()
}
