//! Conversation controller
//!
//! Drives one session through the suggestion service: every user turn becomes
//! a generate or refine call, its payload goes through the normalizer, and the
//! result lands in the store. Failures of any kind end up as the session's
//! error plus an apologetic assistant message, never as a stuck loading
//! status.

use crate::error::{AppError, Result};
use mixtape_client::{CreatePlaylistRequest, CreatePlaylistResponse, SuggestionApi};
use mixtape_core::{PlaylistMetadata, Song, SuggestionBatch};
use mixtape_normalizer::{normalize, SuggestionKind};
use mixtape_session::{
    Completion, OperationKind, OperationToken, SessionCommand, SessionState, SessionStore,
};
use tracing::{debug, info, warn};

/// Name used when the user never picked one
pub const FALLBACK_PLAYLIST_NAME: &str = "My AI Playlist";

/// What became of a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// Nothing to do: empty input, empty playlist or an operation in flight
    Ignored,
    /// The operation succeeded
    Completed(T),
    /// The operation failed; the message is also the session's error
    Failed(String),
    /// The result arrived for an operation that was superseded
    Stale,
}

/// Values that take precedence over stored metadata when creating
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateOverrides {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_public: Option<bool>,
}

/// One playlist-building conversation
pub struct PlaylistAssistant<A> {
    api: A,
    store: SessionStore,
}

impl<A: SuggestionApi> PlaylistAssistant<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            store: SessionStore::new(),
        }
    }

    /// Current session state
    pub fn state(&self) -> &SessionState {
        self.store.state()
    }

    /// Handle one chat message from the user
    ///
    /// Generates a playlist when there is none yet, refines it otherwise.
    /// Returns the number of songs in the new playlist on success.
    pub async fn send_message(&mut self, text: &str) -> Result<Outcome<usize>> {
        let text = text.trim();
        if text.is_empty() || self.store.state().is_loading() {
            debug!(busy = self.store.state().is_loading(), "Ignoring message");
            return Ok(Outcome::Ignored);
        }

        self.store.append_user_message(text);

        let kind = if self.store.state().playlist().is_empty() {
            SuggestionKind::Generate
        } else {
            SuggestionKind::Refine
        };
        let token = self.store.begin_operation(match kind {
            SuggestionKind::Generate => OperationKind::Generating,
            SuggestionKind::Refine => OperationKind::Refining,
        });

        let fetched = self.fetch_suggestions(kind, text).await;
        match fetched {
            Ok(batch) => self.apply_batch(&token, kind, batch),
            Err(err) => self.fail(&token, format!("Sorry, I encountered an error: {err}"), &err),
        }
    }

    async fn fetch_suggestions(&self, kind: SuggestionKind, text: &str) -> Result<SuggestionBatch> {
        let raw = match kind {
            SuggestionKind::Generate => self.api.generate(text).await?,
            SuggestionKind::Refine => self.api.refine(text, self.store.state().playlist()).await?,
        };

        normalize(&raw, kind).map_err(|err| {
            warn!(detail = err.detail(), ?kind, "Could not normalize service response");
            AppError::from(err)
        })
    }

    fn apply_batch(
        &mut self,
        token: &OperationToken,
        kind: SuggestionKind,
        batch: SuggestionBatch,
    ) -> Result<Outcome<usize>> {
        if !self.store.is_current(token) {
            return Ok(Outcome::Stale);
        }

        let count = batch.len();
        let reply = match kind {
            SuggestionKind::Generate => format!(
                "Great! I've created a playlist called \"{}\" with {count} song suggestions. Feel free to ask for any changes!",
                batch.playlist_name
            ),
            SuggestionKind::Refine => format!(
                "I've refined your playlist based on your feedback. Here are {count} updated suggestions!"
            ),
        };

        self.store.complete(
            token,
            SessionCommand::AppendAssistantMessage {
                content: reply,
                snapshot: Some(batch.songs.clone()),
            },
        )?;
        self.store.complete(
            token,
            SessionCommand::SetPlaylist {
                songs: batch.songs,
                name: batch.playlist_name,
                description: batch.playlist_description,
            },
        )?;
        self.store.complete(token, SessionCommand::EndOperation)?;

        info!(count, ?kind, "Playlist updated");
        Ok(Outcome::Completed(count))
    }

    /// Create the current playlist on the music platform
    pub async fn create_playlist(&mut self) -> Result<Outcome<CreatePlaylistResponse>> {
        self.create_playlist_with(CreateOverrides::default()).await
    }

    /// Create the playlist, replacing stored metadata with `overrides` first
    ///
    /// A blank name resolves to the stored one, then to
    /// [`FALLBACK_PLAYLIST_NAME`]. A blank description resolves to the stored
    /// one. The resolved values are written back to the session before the
    /// service is called.
    pub async fn create_playlist_with(
        &mut self,
        overrides: CreateOverrides,
    ) -> Result<Outcome<CreatePlaylistResponse>> {
        let state = self.store.state();
        if state.playlist().is_empty() || state.is_loading() {
            debug!("Ignoring create request");
            return Ok(Outcome::Ignored);
        }

        let token = self.store.begin_operation(OperationKind::Creating);

        let current = self.store.state().metadata().clone();
        let name = [overrides.name.as_deref(), Some(current.name.as_str())]
            .into_iter()
            .flatten()
            .find(|n| !n.trim().is_empty())
            .unwrap_or(FALLBACK_PLAYLIST_NAME)
            .to_string();
        let description = overrides
            .description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(current.description);
        let is_public = overrides.is_public.unwrap_or(current.is_public);
        self.store.set_metadata(PlaylistMetadata::new(
            name.clone(),
            description.clone(),
            is_public,
        ));

        let request = CreatePlaylistRequest {
            playlist_name: name.clone(),
            playlist_description: description,
            is_public,
            songs: self.store.state().playlist().to_vec(),
        };

        let created = self.api.create_playlist(&request).await;
        match created {
            Ok(response) => {
                if !self.store.is_current(&token) {
                    return Ok(Outcome::Stale);
                }
                self.store.complete(
                    &token,
                    SessionCommand::AppendAssistantMessage {
                        content: format!(
                            "Success! Your playlist \"{name}\" has been created with {} tracks!",
                            response.tracks_added
                        ),
                        snapshot: None,
                    },
                )?;
                self.store.complete(&token, SessionCommand::EndOperation)?;
                Ok(Outcome::Completed(response))
            }
            Err(err) => {
                let err = AppError::from(err);
                self.fail(
                    &token,
                    format!("Sorry, I couldn't create your playlist: {err}"),
                    &err,
                )
            }
        }
    }

    /// Record a failed operation and apologize
    fn fail<T>(&mut self, token: &OperationToken, reply: String, err: &AppError) -> Result<Outcome<T>> {
        let message = err.to_string();
        warn!(error = %message, operation = ?token.kind(), "Operation failed");

        let outcome = self.store.complete(
            token,
            SessionCommand::FailOperation {
                message: message.clone(),
            },
        )?;
        if outcome == Completion::Stale {
            return Ok(Outcome::Stale);
        }

        self.store.append_assistant_message(reply, None);
        Ok(Outcome::Failed(message))
    }

    // ===== Playlist edits =====

    /// Remove the song at `index`
    pub fn remove_song(&mut self, index: usize) -> Result<Song> {
        Ok(self.store.remove_at(index)?)
    }

    /// Move the song at `from` to `to`
    pub fn move_song(&mut self, from: usize, to: usize) -> Result<()> {
        Ok(self.store.move_to(from, to)?)
    }

    /// Replace the song at `index`
    pub fn update_song(&mut self, index: usize, song: Song) -> Result<()> {
        Ok(self.store.update_at(index, song)?)
    }

    /// Replace name, description and visibility
    pub fn set_metadata(&mut self, metadata: PlaylistMetadata) {
        self.store.set_metadata(metadata);
    }

    /// Start a new playlist, keeping the conversation
    pub fn reset(&mut self) {
        self.store.reset_playlist();
    }
}
