//! Address validation and request building.
//!
//! A source line is accepted when it parses as an absolute URI. The fetcher
//! additionally requires an http or https scheme before it builds a request.

use std::time::Duration;

use reqwest::{Client, Request};
use url::{ParseError, Url};

use crate::error_handling::{AddressError, RequestError};

/// Checks that `address` is a syntactically valid absolute URI.
///
/// Empty input is rejected rather than skipped, so blank lines in a source
/// file are reported like any other malformed address. Whitespace and control
/// characters are rejected anywhere in the line: the URL parser would
/// otherwise trim or drop them and the request would go to a different address.
pub fn validate_address(address: &str) -> Result<Url, AddressError> {
    if address.is_empty() {
        return Err(AddressError::Empty);
    }
    if address
        .chars()
        .any(|c| c.is_ascii_whitespace() || c.is_control())
    {
        return Err(AddressError::InvalidCharacter);
    }
    match Url::parse(address) {
        Ok(url) => Ok(url),
        Err(ParseError::RelativeUrlWithoutBase) => Err(AddressError::MissingScheme),
        Err(e) => Err(AddressError::Malformed(e)),
    }
}

/// Builds a GET request for `address`, bounded by `timeout`.
///
/// Covers the whole exchange: connecting, waiting for headers and reading the body.
pub fn build_request(
    client: &Client,
    address: &str,
    timeout: Duration,
) -> Result<Request, RequestError> {
    let url = validate_address(address)?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(RequestError::UnsupportedScheme(other.to_string())),
    }
    client
        .get(url)
        .timeout(timeout)
        .build()
        .map_err(RequestError::Builder)
}
