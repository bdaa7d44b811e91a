//! Error types for the suggestion service client.

use thiserror::Error;

/// A failed call to the suggestion service.
///
/// `message` is written for the user and is what the session shows as its
/// error. `status` is set when the service answered with a non-2xx code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    /// User-facing description
    pub message: String,
    /// HTTP status, if the service answered
    pub status: Option<u16>,
}

impl ApiError {
    /// Error without an HTTP status
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    /// Error for a non-2xx response
    pub fn with_status(message: impl Into<String>, status: u16) -> Self {
        Self {
            message: message.into(),
            status: Some(status),
        }
    }

    /// The service could not be reached at all
    pub fn unreachable() -> Self {
        Self::new("Unable to connect to the server. Please ensure the suggestion service is running.")
    }

    /// The configured base URL is unusable
    pub fn invalid_url(reason: impl std::fmt::Display) -> Self {
        Self::new(format!("Invalid server URL: {reason}"))
    }

    /// Map a transport-level reqwest failure
    pub(crate) fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_connect() {
            Self::unreachable()
        } else {
            Self::new(format!("Request failed: {err}"))
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ApiError>;
