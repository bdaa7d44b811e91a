//! Types for suggestion service requests and responses.

use mixtape_core::Song;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where the suggestion service listens unless configured otherwise
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5678/webhook";

/// Configuration for connecting to the suggestion service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL the endpoint paths are appended to
    pub base_url: String,
    /// Whole-request timeout
    pub timeout: Duration,
    /// Connection establishment timeout
    pub connect_timeout: Duration,
}

impl ClientConfig {
    /// Create a config for `base_url` with default timeouts.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Builder: set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            // Generation runs an LLM upstream and is slow
            timeout: Duration::from_secs(120),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

// =============================================================================
// Suggestion Types
// =============================================================================

/// Request body for the generate endpoint.
#[derive(Debug, Serialize)]
pub struct GenerateSuggestionsRequest {
    pub prompt: String,
}

/// Request body for the refine endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineSuggestionsRequest {
    pub feedback: String,
    pub current_playlist: CurrentPlaylist,
}

/// The playlist being refined, in the service's suggestion layout.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentPlaylist {
    pub suggestions: Vec<Song>,
    pub playlist_name: String,
    pub playlist_description: String,
}

impl CurrentPlaylist {
    /// Wrap `songs` with the placeholder name the service expects.
    pub fn new(songs: &[Song]) -> Self {
        Self {
            suggestions: songs.to_vec(),
            playlist_name: "Current Playlist".to_string(),
            playlist_description: "Current playlist state".to_string(),
        }
    }
}

// =============================================================================
// Playlist Creation Types
// =============================================================================

/// Ask the service to materialize a playlist on the music platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePlaylistRequest {
    pub playlist_name: String,
    /// Sent as is; empty when the playlist has no description
    pub playlist_description: String,
    pub is_public: bool,
    pub songs: Vec<Song>,
}

/// Wire form of [`CreatePlaylistRequest`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatePlaylistBody<'a> {
    pub playlist_name: &'a str,
    pub playlist_description: &'a str,
    pub is_public: bool,
    pub songs: Vec<TrackQuery<'a>>,
}

/// The part of a song the platform needs to find it.
#[derive(Debug, Serialize)]
pub(crate) struct TrackQuery<'a> {
    pub artist: &'a str,
    pub title: &'a str,
    #[serde(rename = "spotifySearchQuery")]
    pub search_query: &'a str,
}

impl<'a> From<&'a CreatePlaylistRequest> for CreatePlaylistBody<'a> {
    fn from(request: &'a CreatePlaylistRequest) -> Self {
        Self {
            playlist_name: &request.playlist_name,
            playlist_description: &request.playlist_description,
            is_public: request.is_public,
            songs: request
                .songs
                .iter()
                .map(|song| TrackQuery {
                    artist: &song.artist,
                    title: &song.title,
                    search_query: &song.search_query,
                })
                .collect(),
        }
    }
}

/// Response from a successful playlist creation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlaylistResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub playlist_id: String,
    #[serde(default)]
    pub playlist_url: String,
    #[serde(default)]
    pub tracks_added: u32,
}
