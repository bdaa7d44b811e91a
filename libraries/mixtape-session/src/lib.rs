//! Mixtape - Session State
//!
//! The state machine behind one playlist-building conversation.
//!
//! This crate provides:
//! - The conversation transcript (append-only, survives playlist resets)
//! - The working playlist with index-based edit commands
//! - Operation status (`Idle`, `Generating`, `Refining`, `Creating`) and the
//!   user-facing error, which are never set at the same time
//! - Operation tokens so that a late transport response can be told apart
//!   from the current one
//!
//! # Architecture
//!
//! `mixtape-session` knows nothing about HTTP or about the shape of the
//! suggestion service's responses. It consumes canonical [`mixtape_core`]
//! types only. Callers drive it from one thread of control; there is no
//! internal locking.
//!
//! # Example
//!
//! ```rust
//! use mixtape_core::{Song, SongId};
//! use mixtape_session::{Completion, OperationKind, SessionCommand, SessionStore, SessionStatus};
//!
//! let mut store = SessionStore::new();
//! store.append_user_message("upbeat workout songs");
//!
//! let token = store.begin_operation(OperationKind::Generating);
//! assert!(store.state().is_loading());
//!
//! // ... transport call and normalization happen elsewhere ...
//! let songs = vec![Song::new(SongId::new("song-1-0"), "A", "T")];
//!
//! let outcome = store
//!     .complete(
//!         &token,
//!         SessionCommand::SetPlaylist {
//!             songs,
//!             name: "P".into(),
//!             description: "D".into(),
//!         },
//!     )
//!     .unwrap();
//! assert_eq!(outcome, Completion::Applied);
//! store.end_operation();
//!
//! assert_eq!(store.state().status(), SessionStatus::Idle);
//! assert_eq!(store.state().playlist().len(), 1);
//! assert_eq!(store.state().metadata().name, "P");
//! ```

mod command;
mod error;
mod state;
mod store;

pub use command::SessionCommand;
pub use error::{Result, SessionError};
pub use state::{OperationKind, SessionState, SessionStatus};
pub use store::{Completion, OperationToken, SessionStore};
