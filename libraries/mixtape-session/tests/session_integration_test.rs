//! Integration tests for the session store
//!
//! Each test walks through a realistic sequence of commands the way the
//! conversation controller issues them.

use mixtape_core::{PlaylistMetadata, Role, Song, SongId};
use mixtape_session::{
    Completion, OperationKind, SessionCommand, SessionError, SessionStatus, SessionStore,
};

fn create_test_song(id: &str) -> Song {
    Song::new(SongId::new(id), format!("Artist {id}"), format!("Title {id}"))
        .with_reasoning("fits the mood")
}

fn ids(store: &SessionStore) -> Vec<String> {
    store
        .state()
        .playlist()
        .iter()
        .map(|s| s.id.to_string())
        .collect()
}

#[test]
fn generate_cycle_end_to_end() {
    let mut store = SessionStore::new();

    store.append_user_message("upbeat workout songs");
    let token = store.begin_operation(OperationKind::Generating);
    assert_eq!(store.state().status(), SessionStatus::Generating);

    let songs = vec![Song::new(SongId::new("song-1-0"), "A", "T")];
    store.append_assistant_message("Here you go", Some(songs.clone()));
    store
        .complete(
            &token,
            SessionCommand::SetPlaylist {
                songs,
                name: "P".into(),
                description: "D".into(),
            },
        )
        .unwrap();
    store.complete(&token, SessionCommand::EndOperation).unwrap();

    let state = store.state();
    assert_eq!(state.status(), SessionStatus::Idle);
    assert_eq!(state.playlist().len(), 1);
    assert_eq!(state.playlist()[0].artist, "A");
    assert_eq!(state.metadata().name, "P");
    assert_eq!(state.metadata().description, "D");
    assert!(state.error().is_none());

    let roles: Vec<Role> = state.transcript().iter().map(|m| m.role).collect();
    assert_eq!(roles, [Role::User, Role::Assistant]);
    assert!(state.transcript()[0].playlist_snapshot.is_none());
    assert_eq!(
        state.transcript()[1].playlist_snapshot.as_ref().map(Vec::len),
        Some(1)
    );
}

#[test]
fn reset_preserves_transcript() {
    let mut store = SessionStore::new();
    for i in 0..5 {
        if i % 2 == 0 {
            store.append_user_message(format!("user {i}"));
        } else {
            store.append_assistant_message(format!("assistant {i}"), None);
        }
    }
    store.set_playlist(
        vec![create_test_song("1"), create_test_song("2"), create_test_song("3")],
        "Mix",
        "A mix",
    );
    store.set_metadata(PlaylistMetadata::new("Mix", "A mix", true));
    store.fail_operation("previous failure");

    store.reset_playlist();

    let state = store.state();
    assert!(state.playlist().is_empty());
    assert_eq!(state.metadata(), &PlaylistMetadata::default());
    assert_eq!(state.status(), SessionStatus::Idle);
    assert!(state.error().is_none());
    assert_eq!(state.transcript().len(), 5);
}

#[test]
fn index_errors_leave_playlist_unmodified() {
    let mut store = SessionStore::new();
    store.set_playlist(
        vec![create_test_song("a"), create_test_song("b")],
        "N",
        "D",
    );
    let before = store.snapshot();

    let len = store.state().playlist().len();
    assert_eq!(
        store.remove_at(len).unwrap_err(),
        SessionError::IndexOutOfBounds { index: len, len }
    );
    assert!(store.update_at(len, create_test_song("c")).is_err());
    assert!(store.move_to(0, len).is_err());
    assert!(store.move_to(len, 0).is_err());

    assert_eq!(store.snapshot(), before);
}

#[test]
fn edit_commands_on_empty_playlist_fail() {
    let mut store = SessionStore::new();
    assert!(store.remove_at(0).is_err());
    assert!(store.move_to(0, 0).is_err());
    assert!(store.update_at(0, create_test_song("x")).is_err());
}

#[test]
fn failure_returns_to_idle_with_error() {
    let mut store = SessionStore::new();
    let token = store.begin_operation(OperationKind::Creating);

    let outcome = store
        .complete(
            &token,
            SessionCommand::FailOperation {
                message: "API request failed: 500 Internal Server Error".into(),
            },
        )
        .unwrap();

    assert_eq!(outcome, Completion::Applied);
    assert_eq!(store.state().status(), SessionStatus::Idle);
    assert_eq!(
        store.state().error(),
        Some("API request failed: 500 Internal Server Error")
    );
}

#[test]
fn racing_operations_only_latest_applies() {
    let mut store = SessionStore::new();

    let slow = store.begin_operation(OperationKind::Generating);
    let fast = store.begin_operation(OperationKind::Refining);

    store
        .complete(
            &fast,
            SessionCommand::SetPlaylist {
                songs: vec![create_test_song("fast")],
                name: "Fast".into(),
                description: String::new(),
            },
        )
        .unwrap();
    store.complete(&fast, SessionCommand::EndOperation).unwrap();

    // The older request resolves last and must not win.
    let outcome = store
        .complete(
            &slow,
            SessionCommand::SetPlaylist {
                songs: vec![create_test_song("slow")],
                name: "Slow".into(),
                description: String::new(),
            },
        )
        .unwrap();

    assert_eq!(outcome, Completion::Stale);
    assert_eq!(ids(&store), ["fast"]);
    assert_eq!(store.state().metadata().name, "Fast");
}

#[test]
fn snapshot_is_detached_from_store() {
    let mut store = SessionStore::new();
    store.set_playlist(vec![create_test_song("a")], "N", "D");

    let snapshot = store.snapshot();
    store.remove_at(0).unwrap();

    assert_eq!(snapshot.playlist().len(), 1);
    assert!(store.state().playlist().is_empty());
}

#[test]
fn state_serializes_for_ui_consumers() {
    let mut store = SessionStore::new();
    store.append_user_message("hello");
    store.begin_operation(OperationKind::Refining);

    let value = serde_json::to_value(store.state()).unwrap();
    assert_eq!(value["status"], "refining");
    assert_eq!(value["transcript"][0]["type"], "user");
    assert_eq!(value["metadata"]["isPublic"], false);
}
