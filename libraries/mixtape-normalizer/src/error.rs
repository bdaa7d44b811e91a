//! Error types for response normalization

use thiserror::Error;

/// The payload could not be mapped to a suggestion batch
///
/// The display text is what ends up in front of the user, so it stays
/// generic; `detail` carries the specific cause for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizationError {
    /// No envelope held usable suggestions, or they were malformed
    #[error("invalid response format")]
    InvalidFormat {
        /// What exactly went wrong
        detail: String,
    },
}

impl NormalizationError {
    /// Create an invalid format error
    pub fn invalid_format(detail: impl Into<String>) -> Self {
        Self::InvalidFormat {
            detail: detail.into(),
        }
    }

    /// The specific cause
    pub fn detail(&self) -> &str {
        match self {
            Self::InvalidFormat { detail } => detail,
        }
    }
}

/// Result type for normalization
pub type Result<T> = std::result::Result<T, NormalizationError>;
