use std::time::Duration;

use crate::error_handling::{AddressError, FetchError};

/// Result of processing one address.
///
/// `result` holds the body length on success and the error otherwise, so a
/// length and an error can never both be present.
#[derive(Debug)]
pub struct Outcome {
    pub url: String,
    pub result: Result<u64, FetchError>,
    pub elapsed: Duration,
}

impl Outcome {
    pub fn success(url: impl Into<String>, length: u64, elapsed: Duration) -> Self {
        Self {
            url: url.into(),
            result: Ok(length),
            elapsed,
        }
    }

    pub fn failure(url: impl Into<String>, error: FetchError, elapsed: Duration) -> Self {
        Self {
            url: url.into(),
            result: Err(error),
            elapsed,
        }
    }

    /// Outcome for a source line that failed validation: no request was made.
    pub fn invalid(url: impl Into<String>, source: AddressError) -> Self {
        let url = url.into();
        Self {
            result: Err(FetchError::InvalidAddress {
                address: url.clone(),
                source,
            }),
            url,
            elapsed: Duration::ZERO,
        }
    }

    pub fn length(&self) -> Option<u64> {
        self.result.as_ref().ok().copied()
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.result.as_ref().err()
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}
