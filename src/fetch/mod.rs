//! Single-address fetching.
//!
//! A fetch is one bounded GET: the body is drained and discarded while its
//! bytes are counted, and the result is classified into a `FetchError` kind.
//! Nothing is retried.

mod request;

#[cfg(test)]
mod tests;

use std::time::Duration;

use reqwest::{Client, Request, Response};
use tokio_util::sync::CancellationToken;

use crate::config::SUCCESS_STATUS;
use crate::error_handling::FetchError;

pub use request::{build_request, validate_address};

/// Shared, read-only fetch configuration handed to every worker.
///
/// Cloning is cheap: `reqwest::Client` and `CancellationToken` are reference counted.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    timeout: Duration,
    cancel: CancellationToken,
}

impl Fetcher {
    pub fn new(client: Client, timeout: Duration, cancel: CancellationToken) -> Self {
        Self {
            client,
            timeout,
            cancel,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetches `address` and returns the number of body bytes read.
    pub async fn fetch(&self, address: &str) -> Result<u64, FetchError> {
        fetch(&self.cancel, &self.client, self.timeout, address).await
    }
}

/// Fetches `address` with a request bounded by `timeout` and by `cancel`.
///
/// The body is always read to the end before the status is checked; a non-200
/// response is reported as `FetchError::Status` without a length.
pub async fn fetch(
    cancel: &CancellationToken,
    client: &Client,
    timeout: Duration,
    address: &str,
) -> Result<u64, FetchError> {
    let request = build_request(client, address, timeout).map_err(FetchError::Request)?;

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(FetchError::Canceled),
        result = execute(client, request) => result,
    }
}

async fn execute(client: &Client, request: Request) -> Result<u64, FetchError> {
    let mut response = client
        .execute(request)
        .await
        .map_err(FetchError::Transport)?;
    let status = response.status().as_u16();

    let drained = drain_body(&mut response).await;
    // Release the connection whether or not the body was read completely.
    drop(response);
    let length = drained.map_err(FetchError::Read)?;

    if status != SUCCESS_STATUS {
        log::debug!("Status {} after reading {} bytes", status, length);
        return Err(FetchError::Status(status));
    }
    Ok(length)
}

async fn drain_body(response: &mut Response) -> Result<u64, reqwest::Error> {
    let mut length: u64 = 0;
    while let Some(chunk) = response.chunk().await? {
        length += chunk.len() as u64;
    }
    Ok(length)
}
