use playstats::api::{INVALID_BODY_MESSAGE, parse_request};
use playstats::engine::EMPTY_REQUEST_MESSAGE;
use playstats::error::Error;
use playstats::types::{StatsRequest, Track};
use playstats::utils::*;

#[test]
fn test_extract_playlist_id_from_share_url() {
    let url = "https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=abc123";

    assert_eq!(
        extract_playlist_id(url),
        Some("37i9dQZF1DXcBWIGoYBM5M".to_string())
    );
}

#[test]
fn test_extract_playlist_id_from_bare_id() {
    // Bare ids need at least 22 alphanumeric characters
    assert_eq!(
        extract_playlist_id("37i9dQZF1DXcBWIGoYBM5M"),
        Some("37i9dQZF1DXcBWIGoYBM5M".to_string())
    );
    assert_eq!(
        extract_playlist_id("  37i9dQZF1DXcBWIGoYBM5M  "),
        Some("37i9dQZF1DXcBWIGoYBM5M".to_string())
    );
    assert_eq!(extract_playlist_id("tooShort123"), None);
}

#[test]
fn test_extract_playlist_id_rejects_garbage() {
    assert_eq!(extract_playlist_id(""), None);
    assert_eq!(extract_playlist_id("https://open.spotify.com/album/xyz"), None);
    assert_eq!(extract_playlist_id("37i9dQZF1DXcBWIGoYBM5M!"), None);
}

#[test]
fn test_extract_playlist_ids_keeps_order() {
    let inputs = vec![
        "https://open.spotify.com/playlist/aaaaaaaaaaaaaaaaaaaaaa",
        "nope",
        "bbbbbbbbbbbbbbbbbbbbbb",
        "https://example.com/",
    ];

    let (ids, rejected) = extract_playlist_ids(&inputs);

    assert_eq!(
        ids,
        vec![
            "aaaaaaaaaaaaaaaaaaaaaa".to_string(),
            "bbbbbbbbbbbbbbbbbbbbbb".to_string()
        ]
    );
    assert_eq!(
        rejected,
        vec!["nope".to_string(), "https://example.com/".to_string()]
    );
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(0), "0:00");
    assert_eq!(format_duration(999), "0:00");
    assert_eq!(format_duration(61_000), "1:01");
    assert_eq!(format_duration(213_456), "3:33");
    assert_eq!(format_duration(3_600_000), "60:00");
}

#[test]
fn test_join_artists() {
    assert_eq!(join_artists(&[]), "");
    assert_eq!(join_artists(&["Solo".to_string()]), "Solo");
    assert_eq!(
        join_artists(&["A".to_string(), "B".to_string(), "C".to_string()]),
        "A, B, C"
    );
}

#[test]
fn test_stats_request_defaults() {
    let request: StatsRequest = serde_json::from_str(r#"{"playlistIds": ["x"]}"#).unwrap();
    assert_eq!(request.playlist_ids, vec!["x".to_string()]);
    assert!(!request.merge);

    let request: StatsRequest = serde_json::from_str("{}").unwrap();
    assert!(request.playlist_ids.is_empty());
}

#[test]
fn test_track_name_helpers() {
    let track: Track = serde_json::from_str(
        r#"{"name": null, "artists": [{"name": "A"}, {"name": "B"}], "album": {"name": ""}}"#,
    )
    .unwrap();

    assert_eq!(track.name, "");
    assert_eq!(track.artist_names(), vec!["A".to_string(), "B".to_string()]);
    assert_eq!(track.album_name(), None);
}

#[test]
fn test_parse_request_messages() {
    let request = parse_request(br#"{"playlistIds": ["x"], "merge": true}"#).unwrap();
    assert!(request.merge);

    let err = parse_request(b"  ").unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(err.to_string(), EMPTY_REQUEST_MESSAGE);

    // a well-formed id list with a bad merge flag names the real problem
    let err = parse_request(br#"{"playlistIds": ["x"], "merge": "yes"}"#).unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with(INVALID_BODY_MESSAGE));
    assert!(message.contains("expected a boolean"));
}
