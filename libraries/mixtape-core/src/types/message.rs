/// Conversation types
use super::ids::MessageId;
use super::song::Song;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person building the playlist
    User,
    /// The suggestion service, as relayed by the assistant
    Assistant,
}

/// One turn of the conversation
///
/// Messages are append-only: once in a transcript they are never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Unique message id
    pub id: MessageId,
    /// Author
    #[serde(rename = "type")]
    pub role: Role,
    /// Display text
    pub content: String,
    /// When the message was appended
    pub timestamp: DateTime<Utc>,
    /// Playlist as it stood after this message, for assistant messages that
    /// produced or changed it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playlist_snapshot: Option<Vec<Song>>,
}

impl ChatMessage {
    /// New user message stamped with the current time
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content, None, Utc::now())
    }

    /// New assistant message stamped with the current time
    pub fn assistant(content: impl Into<String>, playlist_snapshot: Option<Vec<Song>>) -> Self {
        Self::new(Role::Assistant, content, playlist_snapshot, Utc::now())
    }

    /// New message with an explicit timestamp
    pub fn new(
        role: Role,
        content: impl Into<String>,
        playlist_snapshot: Option<Vec<Song>>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: MessageId::generate(),
            role,
            content: content.into(),
            timestamp,
            playlist_snapshot,
        }
    }

    /// Whether the user wrote this message
    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}
