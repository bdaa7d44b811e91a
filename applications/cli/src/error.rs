/// Application error types
use mixtape_client::ApiError;
use mixtape_normalizer::NormalizationError;
use mixtape_session::SessionError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// The suggestion service call failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The suggestion service answered with something unusable
    #[error(transparent)]
    Normalization(#[from] NormalizationError),

    /// A session command was rejected
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed chat command
    #[error("{0}")]
    Usage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }
}
