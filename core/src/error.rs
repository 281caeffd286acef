//! Error types for the HTTP client.
//!
//! # Design
//! Any response other than 200 lands in `Status` together with the raw body,
//! since error responses usually carry a diagnostic payload. Transport
//! failures keep only the rendered message of the underlying error.

use std::fmt;

/// Errors returned by `Client`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The endpoint passed at construction is not a valid absolute URL.
    InvalidEndpoint(String),

    /// The JSON request body could not be serialized.
    Serialization(String),

    /// The call did not complete within the configured timeout.
    Timeout(String),

    /// DNS, connect, TLS or IO failure while talking to the server.
    Transport(String),

    /// The server answered with a status other than 200.
    Status {
        status: u16,
        reason: String,
        body: Vec<u8>,
    },
}

impl ApiError {
    /// Status code of a non-200 response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Body of a non-200 response.
    pub fn body(&self) -> Option<&[u8]> {
        match self {
            ApiError::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidEndpoint(msg) => write!(f, "invalid endpoint: {msg}"),
            ApiError::Serialization(msg) => write!(f, "serialization failed: {msg}"),
            ApiError::Timeout(msg) => write!(f, "request timed out: {msg}"),
            ApiError::Transport(msg) => write!(f, "transport error: {msg}"),
            ApiError::Status { status, reason, .. } if reason.is_empty() => {
                write!(f, "HTTP {status}")
            }
            ApiError::Status { status, reason, .. } => {
                write!(f, "HTTP {status} {reason}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<url::ParseError> for ApiError {
    fn from(error: url::ParseError) -> Self {
        ApiError::InvalidEndpoint(error.to_string())
    }
}

impl From<ureq::Error> for ApiError {
    fn from(error: ureq::Error) -> Self {
        match error {
            ureq::Error::Timeout(_) => ApiError::Timeout(error.to_string()),
            other => ApiError::Transport(other.to_string()),
        }
    }
}
