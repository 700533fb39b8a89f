//! Error types for the Sharesies API client.
//!
//! Every fallible operation in this crate returns [`Result<T>`]. Nothing is
//! retried internally; each failure reaches the caller as soon as it happens.

use thiserror::Error;

/// A specialized `Result` type for Sharesies operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all Sharesies API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure (DNS, TLS, connection reset). Passed through unmodified.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with something other than `200 OK`.
    #[error("Request failed: status={status}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// Raw response body for debugging
        body: String,
    },

    /// The response body was not valid JSON or did not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Login or re-authentication was rejected by the server.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// A privileged call was attempted without an active session.
    #[error("Not authenticated; call authenticate first")]
    NotAuthenticated,

    /// The profile carries no account identity to act as.
    #[error("Profile has no user identities to act as")]
    NoIdentity,

    /// The bearer token returned by the server could not be decoded.
    #[error("Malformed bearer token: {0}")]
    Token(String),

    /// The client was constructed with an unusable configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid input provided to a function
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The caller-supplied deadline passed before the call completed.
    #[error("Deadline exceeded")]
    Timeout,
}

impl Error {
    /// Returns `true` if this is an authentication-related error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Authentication(_) | Error::NotAuthenticated)
    }

    /// The HTTP status code carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::RequestFailed { status, .. } => Some(*status),
            Error::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub(crate) fn request_failed(status: u16, body: impl Into<String>) -> Self {
        Error::RequestFailed {
            status,
            body: body.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_auth() {
        assert!(Error::NotAuthenticated.is_auth_error());
        assert!(Error::Authentication("rejected".into()).is_auth_error());
        assert!(!Error::Timeout.is_auth_error());
        assert!(!Error::request_failed(401, "").is_auth_error());
    }

    #[test]
    fn test_request_failed_status() {
        let err = Error::request_failed(503, "unavailable");
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.to_string(), "Request failed: status=503");
        assert_eq!(Error::NoIdentity.status(), None);
    }

    #[test]
    fn test_decode_from_serde() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::Decode(_)));
    }
}
