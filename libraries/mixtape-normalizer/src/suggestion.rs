//! Mapping of raw suggestion entries onto [`Song`]

use crate::error::{NormalizationError, Result};
use crate::SuggestionKind;
use mixtape_core::{Song, SongId, SuggestionBatch};
use serde_json::{Map, Value};
use tracing::debug;

/// First non-empty string among `keys`
///
/// Empty strings, nulls and non-string values all count as absent.
fn text(entry: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| entry.get(*key))
        .filter_map(Value::as_str)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Duration in milliseconds, if the entry has a usable number
fn duration_ms(entry: &Map<String, Value>) -> Option<u64> {
    let value = entry.get("duration").or_else(|| entry.get("durationMs"))?;
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|ms| ms.is_finite() && *ms >= 0.0)
            .map(|ms| ms.round() as u64)
    })
}

/// Build one song from the raw entry at `index`
pub(crate) fn song_from_entry(
    entry: &Map<String, Value>,
    id: SongId,
    kind: SuggestionKind,
) -> Song {
    let artist = text(entry, &["artist"]).unwrap_or_else(|| Song::UNKNOWN_ARTIST.to_string());
    let title = text(entry, &["title"]).unwrap_or_else(|| Song::UNKNOWN_TITLE.to_string());
    let reasoning =
        text(entry, &["reasoning"]).unwrap_or_else(|| kind.default_reasoning().to_string());
    let search_query = text(entry, &["spotifySearchQuery", "searchQuery"])
        .unwrap_or_else(|| Song::default_search_query(&artist, &title));

    Song {
        id,
        artist,
        title,
        reasoning,
        search_query,
        album: text(entry, &["album"]),
        duration_ms: duration_ms(entry),
        platform_id: text(entry, &["spotifyId", "platformId"]),
        artwork_url: text(entry, &["albumArt", "artworkUrl"]),
        preview_url: text(entry, &["previewUrl"]),
    }
}

/// Turn a located content object into a batch
pub(crate) fn batch_from_content(
    content: &Value,
    kind: SuggestionKind,
    epoch_ms: i64,
) -> Result<SuggestionBatch> {
    let raw = content
        .get("suggestions")
        .and_then(Value::as_array)
        .ok_or_else(|| NormalizationError::invalid_format("suggestions is not an array"))?;

    let songs = raw
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let entry = entry.as_object().ok_or_else(|| {
                NormalizationError::invalid_format(format!(
                    "suggestion {index} is not an object"
                ))
            })?;
            Ok(song_from_entry(
                entry,
                SongId::for_suggestion(epoch_ms, index),
                kind,
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    let fields = content.as_object();
    let field = |key: &str| fields.and_then(|obj| text(obj, &[key]));

    debug!(count = songs.len(), ?kind, "Normalized suggestions");

    Ok(SuggestionBatch {
        songs,
        playlist_name: field("playlistName")
            .unwrap_or_else(|| kind.default_playlist_name().to_string()),
        playlist_description: field("playlistDescription")
            .unwrap_or_else(|| kind.default_playlist_description().to_string()),
    })
}
