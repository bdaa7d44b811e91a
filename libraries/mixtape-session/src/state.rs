//! Session state

use mixtape_core::{ChatMessage, PlaylistMetadata, Song};
use serde::{Deserialize, Serialize};

/// A long-running operation the session can be busy with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Generating an initial playlist from a prompt
    Generating,
    /// Refining the playlist from feedback
    Refining,
    /// Creating the playlist on the music platform
    Creating,
}

/// What the session is doing right now
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Nothing in flight
    #[default]
    Idle,
    /// Waiting for generated suggestions
    Generating,
    /// Waiting for refined suggestions
    Refining,
    /// Waiting for the platform to create the playlist
    Creating,
}

impl SessionStatus {
    /// Whether an operation is in flight
    pub fn is_loading(self) -> bool {
        self != SessionStatus::Idle
    }

    /// The in-flight operation, if any
    pub fn operation(self) -> Option<OperationKind> {
        match self {
            SessionStatus::Idle => None,
            SessionStatus::Generating => Some(OperationKind::Generating),
            SessionStatus::Refining => Some(OperationKind::Refining),
            SessionStatus::Creating => Some(OperationKind::Creating),
        }
    }
}

impl From<OperationKind> for SessionStatus {
    fn from(kind: OperationKind) -> Self {
        match kind {
            OperationKind::Generating => SessionStatus::Generating,
            OperationKind::Refining => SessionStatus::Refining,
            OperationKind::Creating => SessionStatus::Creating,
        }
    }
}

/// Everything one session knows
///
/// Invariants, upheld by [`crate::SessionStore`]:
/// - `status` is loading and `error` is set never at the same time
/// - playlist song ids are unique
/// - the transcript only grows, with non-decreasing timestamps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub(crate) transcript: Vec<ChatMessage>,
    pub(crate) playlist: Vec<Song>,
    pub(crate) status: SessionStatus,
    pub(crate) metadata: PlaylistMetadata,
    pub(crate) error: Option<String>,
}

impl SessionState {
    /// Conversation so far, oldest first
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Current playlist, in order
    pub fn playlist(&self) -> &[Song] {
        &self.playlist
    }

    /// Current status
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Whether an operation is in flight
    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    /// Playlist metadata
    pub fn metadata(&self) -> &PlaylistMetadata {
        &self.metadata
    }

    /// Last user-facing error, cleared when the next operation begins
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
