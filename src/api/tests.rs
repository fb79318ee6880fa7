use serde_json::json;

use super::client::{join_endpoint, song_filename};
use super::models::{AddPayload, AddResponse, LastStatus, SongEntry, StatusReport};

#[test]
fn song_add_serializes_to_the_flat_song_field() {
    let payload = AddPayload::Song {
        song: "abbey road.wav".to_string(),
    };
    assert_eq!(
        serde_json::to_value(&payload).unwrap(),
        json!({"song": "abbey road.wav"})
    );
}

#[test]
fn url_add_omits_an_absent_rename() {
    let payload = AddPayload::Url {
        url: "https://youtu.be/xyz".to_string(),
        rename: None,
    };
    assert_eq!(
        serde_json::to_value(&payload).unwrap(),
        json!({"url": "https://youtu.be/xyz"})
    );

    let payload = AddPayload::Url {
        url: "https://youtu.be/xyz".to_string(),
        rename: Some("My Song".to_string()),
    };
    assert_eq!(
        serde_json::to_value(&payload).unwrap(),
        json!({"url": "https://youtu.be/xyz", "rename": "My Song"})
    );
}

#[test]
fn status_report_serializes_all_four_fields() {
    let report = StatusReport {
        name: "abbey road".to_string(),
        position: 12.5,
        playing: true,
        time: 1700000000,
    };
    assert_eq!(
        serde_json::to_value(&report).unwrap(),
        json!({"name": "abbey road", "position": 12.5, "playing": true, "time": 1700000000u64})
    );
}

#[test]
fn add_reply_decodes_success_and_error_shapes() {
    let ok: AddResponse = serde_json::from_str(r#"{"name": "abbey road"}"#).unwrap();
    assert_eq!(ok.name.as_deref(), Some("abbey road"));
    assert_eq!(ok.error, None);

    let err: AddResponse = serde_json::from_str(r#"{"error": "Song not in library"}"#).unwrap();
    assert_eq!(err.name, None);
    assert_eq!(err.error.as_deref(), Some("Song not in library"));
}

#[test]
fn song_list_decodes_name_objects() {
    let entries: Vec<SongEntry> =
        serde_json::from_str(r#"[{"name": "a"}, {"name": "b"}]"#).unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn last_status_decodes_with_and_without_fields() {
    let full: LastStatus = serde_json::from_str(r#"{"name": "a", "time": 42.5}"#).unwrap();
    assert_eq!(full.name.as_deref(), Some("a"));
    assert_eq!(full.time, Some(42.5));

    let empty: LastStatus = serde_json::from_str("{}").unwrap();
    assert_eq!(empty.name, None);
    assert_eq!(empty.time, None);
}

#[test]
fn song_filename_appends_the_extension_once() {
    assert_eq!(song_filename("abbey road"), "abbey road.wav");
    assert_eq!(song_filename("abbey road.wav"), "abbey road.wav");
}

#[test]
fn join_endpoint_tolerates_trailing_slashes() {
    assert_eq!(
        join_endpoint("http://localhost:5000", "/api/songs"),
        "http://localhost:5000/api/songs"
    );
    assert_eq!(
        join_endpoint("http://localhost:5000/", "/api/songs"),
        "http://localhost:5000/api/songs"
    );
}
