/// Playlist metadata
use serde::{Deserialize, Serialize};

/// Name, description and visibility of the playlist being built
///
/// The default value is the "nothing chosen yet" state: empty strings and
/// private.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistMetadata {
    /// Playlist name
    pub name: String,
    /// Playlist description
    pub description: String,
    /// Whether the playlist is created as public on the platform
    pub is_public: bool,
}

impl PlaylistMetadata {
    /// Create metadata from all three fields
    pub fn new(name: impl Into<String>, description: impl Into<String>, is_public: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            is_public,
        }
    }
}
