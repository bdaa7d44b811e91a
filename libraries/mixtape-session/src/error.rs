//! Error types for session commands

use thiserror::Error;

/// Session errors
///
/// Only caller mistakes surface here. User-facing failures go through
/// `fail_operation` instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Playlist index out of bounds
    #[error("Index {index} out of bounds for playlist of length {len}")]
    IndexOutOfBounds {
        /// Offending index
        index: usize,
        /// Playlist length at the time
        len: usize,
    },
}

/// Result type for session commands
pub type Result<T> = std::result::Result<T, SessionError>;
