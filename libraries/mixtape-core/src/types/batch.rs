/// Normalized suggestion results
use super::song::Song;
use serde::{Deserialize, Serialize};

/// The canonical result of one generate or refine call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionBatch {
    /// Suggested songs, in service order, with unique ids
    #[serde(rename = "suggestions")]
    pub songs: Vec<Song>,
    /// Proposed playlist name
    pub playlist_name: String,
    /// Proposed playlist description
    pub playlist_description: String,
}

impl SuggestionBatch {
    /// Number of suggested songs
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Whether the batch has no songs
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}
