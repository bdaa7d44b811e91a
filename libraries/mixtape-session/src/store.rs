//! Session store
//!
//! Owns the [`SessionState`] and is the only thing allowed to change it.
//! Each command is a small transition function; a failing command returns
//! before touching the state, so readers never see half-applied changes.

use crate::command::SessionCommand;
use crate::error::{Result, SessionError};
use crate::state::{OperationKind, SessionState, SessionStatus};
use chrono::{DateTime, Utc};
use mixtape_core::{ChatMessage, MessageId, PlaylistMetadata, Role, Song, SongId};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Handle for one in-flight operation
///
/// Returned by [`SessionStore::begin_operation`]. A token stops being current
/// as soon as another operation begins or the playlist is reset, which lets
/// late transport completions be recognized and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationToken {
    generation: u64,
    kind: OperationKind,
}

impl OperationToken {
    /// The operation this token was issued for
    pub fn kind(&self) -> OperationKind {
        self.kind
    }
}

/// Outcome of a token-guarded completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The command was applied
    Applied,
    /// The token was outdated and the command was discarded
    Stale,
}

/// Single-owner state machine for one session
#[derive(Debug, Default)]
pub struct SessionStore {
    state: SessionState,

    /// Bumped by every begin and reset
    generation: u64,
}

impl SessionStore {
    /// Create a store in the initial state
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the current state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Owned copy of the current state
    pub fn snapshot(&self) -> SessionState {
        self.state.clone()
    }

    /// Run one command
    pub fn apply(&mut self, command: SessionCommand) -> Result<()> {
        debug!(command = command.name(), "Applying session command");

        match command {
            SessionCommand::AppendUserMessage { content } => {
                self.append_user_message(content);
            }
            SessionCommand::AppendAssistantMessage { content, snapshot } => {
                self.append_assistant_message(content, snapshot);
            }
            SessionCommand::BeginOperation(kind) => {
                self.begin_operation(kind);
            }
            SessionCommand::EndOperation => self.end_operation(),
            SessionCommand::FailOperation { message } => self.fail_operation(message),
            SessionCommand::SetPlaylist {
                songs,
                name,
                description,
            } => self.set_playlist(songs, name, description),
            SessionCommand::UpdateAt { index, song } => self.update_at(index, song)?,
            SessionCommand::RemoveAt { index } => {
                self.remove_at(index)?;
            }
            SessionCommand::MoveTo { from, to } => self.move_to(from, to)?,
            SessionCommand::SetMetadata(metadata) => self.set_metadata(metadata),
            SessionCommand::ResetPlaylist => self.reset_playlist(),
        }

        Ok(())
    }

    /// Whether `token` belongs to the most recent operation
    pub fn is_current(&self, token: &OperationToken) -> bool {
        token.generation == self.generation
    }

    /// Apply a completion command only if `token` is still current
    pub fn complete(&mut self, token: &OperationToken, command: SessionCommand) -> Result<Completion> {
        if !self.is_current(token) {
            warn!(
                command = command.name(),
                operation = ?token.kind,
                token_generation = token.generation,
                current_generation = self.generation,
                "Discarding stale completion"
            );
            return Ok(Completion::Stale);
        }

        self.apply(command)?;
        Ok(Completion::Applied)
    }

    // ===== Conversation =====

    /// Append a user message stamped now
    pub fn append_user_message(&mut self, content: impl Into<String>) -> MessageId {
        self.push_message(Role::User, content.into(), None)
    }

    /// Append an assistant message, optionally with the playlist it produced
    pub fn append_assistant_message(
        &mut self,
        content: impl Into<String>,
        snapshot: Option<Vec<Song>>,
    ) -> MessageId {
        self.push_message(Role::Assistant, content.into(), snapshot)
    }

    fn push_message(&mut self, role: Role, content: String, snapshot: Option<Vec<Song>>) -> MessageId {
        let message = ChatMessage::new(role, content, snapshot, self.next_timestamp());
        let id = message.id.clone();
        self.state.transcript.push(message);
        id
    }

    /// Wall-clock time, clamped so the transcript never goes backwards
    fn next_timestamp(&self) -> DateTime<Utc> {
        let now = Utc::now();
        match self.state.transcript.last() {
            Some(last) if last.timestamp > now => last.timestamp,
            _ => now,
        }
    }

    // ===== Operation status =====

    /// Enter a loading status, clearing any error
    ///
    /// Calling this while already loading is allowed; the earlier operation's
    /// token stops being current.
    pub fn begin_operation(&mut self, kind: OperationKind) -> OperationToken {
        if self.state.status.is_loading() {
            warn!(
                current = ?self.state.status,
                requested = ?kind,
                "Operation started while another is in flight"
            );
        }

        self.generation += 1;
        self.state.status = SessionStatus::from(kind);
        self.state.error = None;

        OperationToken {
            generation: self.generation,
            kind,
        }
    }

    /// Return to idle
    pub fn end_operation(&mut self) {
        self.state.status = SessionStatus::Idle;
    }

    /// Return to idle and record a user-facing error
    pub fn fail_operation(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!(error = %message, "Operation failed");
        self.state.status = SessionStatus::Idle;
        self.state.error = Some(message);
    }

    // ===== Playlist =====

    /// Replace the playlist and merge name and description into metadata
    pub fn set_playlist(
        &mut self,
        songs: Vec<Song>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) {
        self.state.playlist = with_unique_ids(songs);
        self.state.metadata.name = name.into();
        self.state.metadata.description = description.into();
    }

    /// Replace the song at `index`
    pub fn update_at(&mut self, index: usize, song: Song) -> Result<()> {
        self.check_index(index)?;

        let collides = self
            .state
            .playlist
            .iter()
            .enumerate()
            .any(|(i, existing)| i != index && existing.id == song.id);

        let song = if collides {
            let id = SongId::generate();
            warn!(duplicate = %song.id, replacement = %id, "Re-keyed song with duplicate id");
            song.with_id(id)
        } else {
            song
        };

        self.state.playlist[index] = song;
        Ok(())
    }

    /// Remove and return the song at `index`
    pub fn remove_at(&mut self, index: usize) -> Result<Song> {
        self.check_index(index)?;
        Ok(self.state.playlist.remove(index))
    }

    /// Move the song at `from` so that it ends up at `to`
    ///
    /// A splice, not a swap: everything between the two positions shifts by
    /// one.
    pub fn move_to(&mut self, from: usize, to: usize) -> Result<()> {
        self.check_index(from)?;
        self.check_index(to)?;

        if from == to {
            return Ok(());
        }

        let song = self.state.playlist.remove(from);
        self.state.playlist.insert(to, song);
        Ok(())
    }

    /// Replace all metadata
    pub fn set_metadata(&mut self, metadata: PlaylistMetadata) {
        self.state.metadata = metadata;
    }

    /// Clear playlist, metadata, status and error; keep the transcript
    ///
    /// Any in-flight operation's token stops being current.
    pub fn reset_playlist(&mut self) {
        let transcript = std::mem::take(&mut self.state.transcript);
        self.state = SessionState {
            transcript,
            ..SessionState::default()
        };
        self.generation += 1;
    }

    fn check_index(&self, index: usize) -> Result<()> {
        let len = self.state.playlist.len();
        if index < len {
            Ok(())
        } else {
            Err(SessionError::IndexOutOfBounds { index, len })
        }
    }
}

/// Give later duplicates a fresh id
fn with_unique_ids(songs: Vec<Song>) -> Vec<Song> {
    let mut seen = HashSet::with_capacity(songs.len());
    songs
        .into_iter()
        .map(|song| {
            if seen.insert(song.id.clone()) {
                song
            } else {
                let id = SongId::generate();
                warn!(duplicate = %song.id, replacement = %id, "Re-keyed song with duplicate id");
                seen.insert(id.clone());
                song.with_id(id)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(id: &str) -> Song {
        Song::new(SongId::new(id), format!("Artist {id}"), format!("Title {id}"))
    }

    fn store_with(ids: &[&str]) -> SessionStore {
        let mut store = SessionStore::new();
        store.set_playlist(ids.iter().map(|id| song(id)).collect(), "Name", "Desc");
        store
    }

    fn ids(store: &SessionStore) -> Vec<&str> {
        store.state().playlist().iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn move_forward_splices() {
        let mut store = store_with(&["A", "B", "C", "D"]);
        store.move_to(0, 2).unwrap();
        assert_eq!(ids(&store), ["B", "C", "A", "D"]);
    }

    #[test]
    fn move_backward_splices() {
        let mut store = store_with(&["A", "B", "C", "D"]);
        store.move_to(3, 0).unwrap();
        assert_eq!(ids(&store), ["D", "A", "B", "C"]);
    }

    #[test]
    fn move_to_same_index_is_noop() {
        let mut store = store_with(&["A", "B", "C", "D"]);
        store.move_to(1, 1).unwrap();
        assert_eq!(ids(&store), ["A", "B", "C", "D"]);
    }

    #[test]
    fn move_out_of_bounds_fails_without_change() {
        let mut store = store_with(&["A", "B"]);
        assert_eq!(
            store.move_to(0, 2),
            Err(SessionError::IndexOutOfBounds { index: 2, len: 2 })
        );
        assert!(store.move_to(5, 0).is_err());
        assert_eq!(ids(&store), ["A", "B"]);
    }

    #[test]
    fn remove_shifts_later_entries() {
        let mut store = store_with(&["A", "B", "C"]);
        let removed = store.remove_at(1).unwrap();
        assert_eq!(removed.id.as_str(), "B");
        assert_eq!(ids(&store), ["A", "C"]);
    }

    #[test]
    fn remove_past_end_fails_without_change() {
        let mut store = store_with(&["A", "B", "C"]);
        assert!(store.remove_at(3).is_err());
        assert!(store.remove_at(usize::MAX).is_err());
        assert_eq!(ids(&store), ["A", "B", "C"]);
    }

    #[test]
    fn update_replaces_entry() {
        let mut store = store_with(&["A", "B"]);
        store.update_at(1, song("Z")).unwrap();
        assert_eq!(ids(&store), ["A", "Z"]);
        assert!(store.update_at(2, song("Y")).is_err());
    }

    #[test]
    fn update_with_colliding_id_is_rekeyed() {
        let mut store = store_with(&["A", "B"]);
        store.update_at(1, song("A")).unwrap();

        let playlist = store.state().playlist();
        assert_eq!(playlist[0].id.as_str(), "A");
        assert_ne!(playlist[1].id.as_str(), "A");
        assert_eq!(playlist[1].title, "Title A");
    }

    #[test]
    fn update_keeping_own_id_is_not_rekeyed() {
        let mut store = store_with(&["A", "B"]);
        store.update_at(1, song("B").with_reasoning("changed")).unwrap();
        assert_eq!(ids(&store), ["A", "B"]);
    }

    #[test]
    fn set_playlist_rekeys_duplicates() {
        let store = store_with(&["A", "A", "B"]);
        let ids = ids(&store);
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), 3);
        assert_eq!(ids[0], "A");
        assert_eq!(ids[2], "B");
    }

    #[test]
    fn set_playlist_keeps_visibility() {
        let mut store = SessionStore::new();
        store.set_metadata(PlaylistMetadata::new("old", "old", true));
        store.set_playlist(vec![song("A")], "new", "fresh");

        let metadata = store.state().metadata();
        assert_eq!(metadata.name, "new");
        assert_eq!(metadata.description, "fresh");
        assert!(metadata.is_public);
    }

    #[test]
    fn fail_then_begin_clears_error() {
        let mut store = SessionStore::new();
        store.begin_operation(OperationKind::Generating);
        store.fail_operation("x");
        assert_eq!(store.state().status(), SessionStatus::Idle);
        assert_eq!(store.state().error(), Some("x"));

        store.begin_operation(OperationKind::Generating);
        assert_eq!(store.state().status(), SessionStatus::Generating);
        assert!(store.state().error().is_none());
    }

    #[test]
    fn end_operation_keeps_error() {
        let mut store = SessionStore::new();
        store.fail_operation("boom");
        store.end_operation();
        assert_eq!(store.state().error(), Some("boom"));
    }

    #[test]
    fn newer_operation_supersedes_token() {
        let mut store = SessionStore::new();
        let first = store.begin_operation(OperationKind::Generating);
        let second = store.begin_operation(OperationKind::Refining);

        assert!(!store.is_current(&first));
        assert!(store.is_current(&second));
        assert_eq!(second.kind(), OperationKind::Refining);
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut store = SessionStore::new();
        let token = store.begin_operation(OperationKind::Generating);
        store.reset_playlist();

        let outcome = store
            .complete(
                &token,
                SessionCommand::SetPlaylist {
                    songs: vec![song("A")],
                    name: "late".into(),
                    description: "late".into(),
                },
            )
            .unwrap();

        assert_eq!(outcome, Completion::Stale);
        assert!(store.state().playlist().is_empty());
        assert_eq!(store.state().metadata().name, "");
    }

    #[test]
    fn current_completion_is_applied() {
        let mut store = SessionStore::new();
        let token = store.begin_operation(OperationKind::Refining);
        let outcome = store.complete(&token, SessionCommand::EndOperation).unwrap();
        assert_eq!(outcome, Completion::Applied);
        assert!(!store.state().is_loading());
    }

    #[test]
    fn timestamps_never_decrease() {
        let mut store = SessionStore::new();
        for i in 0..20 {
            store.append_user_message(format!("message {i}"));
        }
        let transcript = store.state().transcript();
        assert!(transcript.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn apply_dispatches_every_variant() {
        let mut store = SessionStore::new();
        let commands = vec![
            SessionCommand::AppendUserMessage { content: "hi".into() },
            SessionCommand::BeginOperation(OperationKind::Generating),
            SessionCommand::SetPlaylist {
                songs: vec![song("A"), song("B")],
                name: "N".into(),
                description: "D".into(),
            },
            SessionCommand::AppendAssistantMessage {
                content: "done".into(),
                snapshot: Some(vec![song("A"), song("B")]),
            },
            SessionCommand::EndOperation,
            SessionCommand::MoveTo { from: 0, to: 1 },
            SessionCommand::UpdateAt { index: 0, song: song("C") },
            SessionCommand::RemoveAt { index: 1 },
            SessionCommand::SetMetadata(PlaylistMetadata::new("M", "E", true)),
        ];

        for command in commands {
            store.apply(command).unwrap();
        }

        assert_eq!(ids(&store), ["C"]);
        assert_eq!(store.state().transcript().len(), 2);
        assert_eq!(store.state().metadata(), &PlaylistMetadata::new("M", "E", true));

        store.apply(SessionCommand::ResetPlaylist).unwrap();
        assert!(store.state().playlist().is_empty());
        assert_eq!(store.state().transcript().len(), 2);

        assert!(store.apply(SessionCommand::RemoveAt { index: 0 }).is_err());
    }
}
