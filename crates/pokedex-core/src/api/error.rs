//! Error types for API calls.

use std::fmt;

use reqwest::StatusCode;

/// A non-success HTTP response, carrying the status and response body.
///
/// Recovered from an `anyhow::Error` chain with `downcast_ref` where the
/// status matters (the login screen distinguishes bad credentials, the UI
/// detects an unrecovered 401).
#[derive(Debug)]
pub struct StatusError {
    pub status: StatusCode,
    pub body: String,
}

impl StatusError {
    pub fn is_unauthorized(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED
    }
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.body.is_empty() {
            write!(f, "HTTP {}", self.status)
        } else {
            write!(f, "HTTP {}: {}", self.status, self.body)
        }
    }
}

impl std::error::Error for StatusError {}

/// Marker chained onto the original 401 after a failed token refresh.
///
/// When this appears in an error chain the token store has already been
/// cleared and the UI must force navigation back to the login screen.
#[derive(Debug)]
pub struct SessionExpiredError;

impl fmt::Display for SessionExpiredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Session expired")
    }
}

impl std::error::Error for SessionExpiredError {}

/// Returns whether the error chain contains the session-expired marker.
pub fn is_session_expired(err: &anyhow::Error) -> bool {
    err.chain()
        .any(|cause| cause.downcast_ref::<SessionExpiredError>().is_some())
}

/// Returns the HTTP status carried by the error chain, if any.
pub fn status_of(err: &anyhow::Error) -> Option<StatusCode> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<StatusError>())
        .map(|status_err| status_err.status)
}
