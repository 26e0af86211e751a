//! Error categorization.
//!
//! Maps transport failures reported by `reqwest` onto the closed `ErrorKind` set.

use super::types::ErrorKind;

/// Categorizes a `reqwest::Error` raised while sending a request.
///
/// Timeouts are kept apart from every other transport failure so that callers
/// can tell a slow server from an unreachable one.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ErrorKind {
    if error.is_timeout() {
        ErrorKind::TransportTimeout
    } else if error.is_builder() {
        ErrorKind::Construct
    } else if error.is_body() || error.is_decode() {
        ErrorKind::Read
    } else {
        ErrorKind::TransportOther
    }
}
