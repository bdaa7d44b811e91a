//! Mixtape Core
//!
//! Shared data model for the Mixtape playlist assistant.
//!
//! This crate holds the types every other crate in the workspace agrees on:
//! - **Songs**: `Song` and its system-assigned `SongId`
//! - **Conversation**: `ChatMessage`, `MessageId`, `Role`
//! - **Playlist**: `PlaylistMetadata` and the normalized `SuggestionBatch`
//!
//! # Example
//!
//! ```rust
//! use mixtape_core::{ChatMessage, Song, SongId};
//!
//! let song = Song::new(SongId::new("song-1"), "Daft Punk", "One More Time");
//! assert_eq!(song.search_query, "Daft Punk One More Time");
//!
//! let message = ChatMessage::user("something to run to");
//! assert!(message.playlist_snapshot.is_none());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod types;

pub use types::{
    ChatMessage, MessageId, PlaylistMetadata, Role, Song, SongId, SuggestionBatch,
};
