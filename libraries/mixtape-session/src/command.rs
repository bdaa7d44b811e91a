//! Session commands
//!
//! Every state change goes through one of these variants. UI handlers and
//! transport completions build them; [`crate::SessionStore::apply`] runs them.

use crate::state::OperationKind;
use mixtape_core::{PlaylistMetadata, Song};

/// A single state transition request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Append a user message
    AppendUserMessage {
        /// Message text
        content: String,
    },

    /// Append an assistant message
    AppendAssistantMessage {
        /// Message text
        content: String,
        /// Playlist produced by this turn, if any
        snapshot: Option<Vec<Song>>,
    },

    /// Enter a loading status and clear any error
    BeginOperation(OperationKind),

    /// Return to idle, keeping the error as is
    EndOperation,

    /// Return to idle with a user-facing error
    FailOperation {
        /// Error shown to the user
        message: String,
    },

    /// Replace the playlist and adopt the proposed name and description
    SetPlaylist {
        /// New playlist contents
        songs: Vec<Song>,
        /// Proposed name
        name: String,
        /// Proposed description
        description: String,
    },

    /// Replace one playlist entry
    UpdateAt {
        /// Position to replace
        index: usize,
        /// Replacement song
        song: Song,
    },

    /// Remove one playlist entry
    RemoveAt {
        /// Position to remove
        index: usize,
    },

    /// Move one entry, shifting the others
    MoveTo {
        /// Current position
        from: usize,
        /// Position after the move
        to: usize,
    },

    /// Replace all metadata
    SetMetadata(PlaylistMetadata),

    /// Drop the playlist and start over, keeping the conversation
    ResetPlaylist,
}

impl SessionCommand {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            SessionCommand::AppendUserMessage { .. } => "append_user_message",
            SessionCommand::AppendAssistantMessage { .. } => "append_assistant_message",
            SessionCommand::BeginOperation(_) => "begin_operation",
            SessionCommand::EndOperation => "end_operation",
            SessionCommand::FailOperation { .. } => "fail_operation",
            SessionCommand::SetPlaylist { .. } => "set_playlist",
            SessionCommand::UpdateAt { .. } => "update_at",
            SessionCommand::RemoveAt { .. } => "remove_at",
            SessionCommand::MoveTo { .. } => "move_to",
            SessionCommand::SetMetadata(_) => "set_metadata",
            SessionCommand::ResetPlaylist => "reset_playlist",
        }
    }
}
