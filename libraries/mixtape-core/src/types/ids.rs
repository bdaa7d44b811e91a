/// ID types for Mixtape entities
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Song identifier
///
/// Opaque and assigned by this system. Ids coming from the suggestion
/// service are never trusted to be unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SongId(String);

impl SongId {
    /// Create a song ID from an existing string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Synthesize the id of the `index`-th suggestion captured at `epoch_ms`
    ///
    /// Distinct indices always give distinct ids, even when two batches share
    /// the same millisecond.
    pub fn for_suggestion(epoch_ms: i64, index: usize) -> Self {
        Self(format!("song-{epoch_ms}-{index}"))
    }

    /// Generate a new random song ID
    pub fn generate() -> Self {
        Self(format!("song-{}", Uuid::new_v4()))
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SongId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Chat message identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    /// Create a message ID from an existing string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random message ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
