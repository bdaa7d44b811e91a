//! Plain-text rendering of session state

use mixtape_core::{ChatMessage, Role, Song};
use mixtape_session::{SessionState, SessionStatus};

/// One chat line, e.g. `[14:03] you: more guitars`
pub fn message(msg: &ChatMessage) -> String {
    let who = match msg.role {
        Role::User => "you",
        Role::Assistant => "assistant",
    };
    format!("[{}] {who}: {}", msg.timestamp.format("%H:%M"), msg.content)
}

/// Numbered playlist with its name and description
pub fn playlist(state: &SessionState) -> String {
    let songs = state.playlist();
    if songs.is_empty() {
        return "No playlist yet. Describe what you'd like to hear.".to_string();
    }

    let metadata = state.metadata();
    let mut lines = vec![format!(
        "{} ({} songs, {})",
        metadata.name,
        songs.len(),
        if metadata.is_public { "public" } else { "private" }
    )];
    if !metadata.description.is_empty() {
        lines.push(metadata.description.clone());
    }
    lines.extend(
        songs
            .iter()
            .enumerate()
            .map(|(i, song)| format!("{:>3}. {}", i + 1, song_line(song))),
    );

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn song_line(song: &Song) -> String {
    let mut line = song.display_name();
    if let Some(album) = &song.album {
        line.push_str(&format!(" [{album}]"));
    }
    if let Some(ms) = song.duration_ms {
        let secs = ms / 1000;
        line.push_str(&format!(" ({}:{:02})", secs / 60, secs % 60));
    }
    if !song.reasoning.is_empty() {
        line.push_str(&format!("\n       {}", song.reasoning));
    }
    line
}

/// What to show while an operation is in flight
pub fn status(status: SessionStatus) -> Option<&'static str> {
    match status {
        SessionStatus::Idle => None,
        SessionStatus::Generating => Some("Generating your playlist..."),
        SessionStatus::Refining => Some("Refining your playlist..."),
        SessionStatus::Creating => Some("Creating your playlist..."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mixtape_core::SongId;
    use mixtape_session::SessionStore;

    #[test]
    fn empty_playlist_prompts_for_input() {
        let store = SessionStore::new();
        assert!(playlist(store.state()).starts_with("No playlist yet"));
    }

    #[test]
    fn playlist_is_numbered_from_one() {
        let mut store = SessionStore::new();
        let mut song = Song::new(SongId::new("a"), "A", "T").with_album("Al");
        song.duration_ms = Some(185_000);
        store.set_playlist(
            vec![song, Song::new(SongId::new("b"), "B", "U")],
            "Mix",
            "For running",
        );

        let text = playlist(store.state());
        assert!(text.starts_with("Mix (2 songs, private)"));
        assert!(text.contains("For running"));
        assert!(text.contains("  1. A - T [Al] (3:05)"));
        assert!(text.contains("  2. B - U"));
    }

    #[test]
    fn playlist_text_is_exact() {
        let mut store = SessionStore::new();
        store.set_playlist(
            vec![Song::new(SongId::new("a"), "A", "T").with_reasoning("Big chorus")],
            "Mix",
            "",
        );

        assert_eq!(
            playlist(store.state()),
            "Mix (1 songs, private)\n  1. A - T\n       Big chorus\n"
        );
    }

    #[test]
    fn status_text_only_while_loading() {
        assert!(status(SessionStatus::Idle).is_none());
        assert!(status(SessionStatus::Refining).is_some());
    }
}
