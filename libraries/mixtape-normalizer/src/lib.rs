//! Mixtape Response Normalizer
//!
//! Converts the raw JSON returned by the suggestion service's generate and
//! refine endpoints into a canonical [`SuggestionBatch`].
//!
//! The service is not consistent about how it wraps its answer (see
//! [`envelope`] for the known shapes), and individual suggestions may miss
//! any field. Normalization never guesses an empty playlist: when nothing
//! usable is found it fails with [`NormalizationError`].
//!
//! # Example
//!
//! ```rust
//! use mixtape_normalizer::{normalize_at, SuggestionKind};
//! use serde_json::json;
//!
//! let payload = json!({
//!     "body": { "message": { "content": {
//!         "suggestions": [{ "artist": "A", "title": "T" }],
//!         "playlistName": "P",
//!         "playlistDescription": "D"
//!     }}}
//! });
//!
//! let batch = normalize_at(&payload, SuggestionKind::Generate, 1_700_000_000_000).unwrap();
//! assert_eq!(batch.songs[0].artist, "A");
//! assert_eq!(batch.songs[0].id.as_str(), "song-1700000000000-0");
//! assert_eq!(batch.playlist_name, "P");
//! ```

#![forbid(unsafe_code)]

pub mod envelope;
mod error;
mod suggestion;

pub use envelope::{locate_content, Envelope};
pub use error::{NormalizationError, Result};

use chrono::Utc;
use mixtape_core::SuggestionBatch;
use serde_json::Value;

/// Which endpoint a payload came from
///
/// Only affects the defaults filled in for missing fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionKind {
    /// Initial playlist from a prompt
    Generate,
    /// Revised playlist from feedback
    Refine,
}

impl SuggestionKind {
    /// Reasoning used when a suggestion has none
    pub fn default_reasoning(self) -> &'static str {
        match self {
            SuggestionKind::Generate => "AI selected this song",
            SuggestionKind::Refine => "AI refined this song",
        }
    }

    /// Playlist name used when the content has none
    pub fn default_playlist_name(self) -> &'static str {
        match self {
            SuggestionKind::Generate => "AI Generated Playlist",
            SuggestionKind::Refine => "Refined AI Playlist",
        }
    }

    /// Playlist description used when the content has none
    pub fn default_playlist_description(self) -> &'static str {
        match self {
            SuggestionKind::Generate => "Created with AI",
            SuggestionKind::Refine => "Refined with AI",
        }
    }
}

/// Normalize `payload`, stamping song ids with the current time
pub fn normalize(payload: &Value, kind: SuggestionKind) -> Result<SuggestionBatch> {
    normalize_at(payload, kind, Utc::now().timestamp_millis())
}

/// Normalize `payload` with an explicit id epoch
///
/// Pure: the same payload, kind and epoch always give the same batch.
pub fn normalize_at(payload: &Value, kind: SuggestionKind, epoch_ms: i64) -> Result<SuggestionBatch> {
    let (_, content) = locate_content(payload)?;
    suggestion::batch_from_content(&content, kind, epoch_ms)
}
