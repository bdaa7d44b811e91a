/// Song type
use super::ids::SongId;
use serde::{Deserialize, Serialize};

/// A suggested or playlisted track
///
/// Serialized with the suggestion service's wire names so a playlist can be
/// sent back unchanged in a refine request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// System-assigned identifier
    pub id: SongId,
    /// Artist name
    pub artist: String,
    /// Track title
    pub title: String,
    /// Why the track was suggested
    pub reasoning: String,
    /// Query used to find the track on the music platform
    #[serde(rename = "spotifySearchQuery", alias = "searchQuery")]
    pub search_query: String,

    /// Album name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    /// Track length in milliseconds
    #[serde(
        rename = "duration",
        alias = "durationMs",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub duration_ms: Option<u64>,
    /// Track id on the music platform
    #[serde(
        rename = "spotifyId",
        alias = "platformId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub platform_id: Option<String>,
    /// Cover art URL
    #[serde(
        rename = "albumArt",
        alias = "artworkUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub artwork_url: Option<String>,
    /// Preview clip URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
}

impl Song {
    /// Fallback used when a suggestion carries no artist
    pub const UNKNOWN_ARTIST: &'static str = "Unknown Artist";
    /// Fallback used when a suggestion carries no title
    pub const UNKNOWN_TITLE: &'static str = "Unknown Title";

    /// Create a song with the default search query and empty reasoning
    pub fn new(id: SongId, artist: impl Into<String>, title: impl Into<String>) -> Self {
        let artist = artist.into();
        let title = title.into();
        Self {
            id,
            search_query: Self::default_search_query(&artist, &title),
            artist,
            title,
            reasoning: String::new(),
            album: None,
            duration_ms: None,
            platform_id: None,
            artwork_url: None,
            preview_url: None,
        }
    }

    /// `"{artist} {title}"`
    pub fn default_search_query(artist: &str, title: &str) -> String {
        format!("{artist} {title}")
    }

    /// Builder: set the reasoning
    #[must_use]
    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = reasoning.into();
        self
    }

    /// Builder: set the album
    #[must_use]
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    /// Copy of this song under a different id
    #[must_use]
    pub fn with_id(mut self, id: SongId) -> Self {
        self.id = id;
        self
    }

    /// "Artist - Title"
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.artist, self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_song_uses_default_search_query() {
        let song = Song::new(SongId::new("s1"), "Queen", "Don't Stop Me Now");
        assert_eq!(song.search_query, "Queen Don't Stop Me Now");
        assert_eq!(song.display_name(), "Queen - Don't Stop Me Now");
    }

    #[test]
    fn serializes_with_wire_names_and_omits_absent_fields() {
        let mut song = Song::new(SongId::new("s1"), "A", "T").with_album("Album");
        song.duration_ms = Some(215_000);

        let value = serde_json::to_value(&song).unwrap();
        assert_eq!(value["spotifySearchQuery"], "A T");
        assert_eq!(value["duration"], 215_000);
        assert_eq!(value["album"], "Album");
        assert!(value.get("spotifyId").is_none());
        assert!(value.get("previewUrl").is_none());
    }

    #[test]
    fn deserializes_canonical_aliases() {
        let song: Song = serde_json::from_value(json!({
            "id": "s1",
            "artist": "A",
            "title": "T",
            "reasoning": "r",
            "searchQuery": "a t",
            "durationMs": 1000,
            "platformId": "abc",
            "artworkUrl": "https://img"
        }))
        .unwrap();

        assert_eq!(song.search_query, "a t");
        assert_eq!(song.duration_ms, Some(1000));
        assert_eq!(song.platform_id.as_deref(), Some("abc"));
        assert_eq!(song.artwork_url.as_deref(), Some("https://img"));
    }
}
