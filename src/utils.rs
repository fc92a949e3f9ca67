use std::sync::LazyLock;

use regex::Regex;

static PLAYLIST_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"playlist/([a-zA-Z0-9]+)|^([a-zA-Z0-9]{22,})$").expect("valid playlist id pattern")
});

/// Extracts a playlist id from a share URL (`.../playlist/<id>?si=...`) or a
/// bare id of 22 or more alphanumeric characters.
pub fn extract_playlist_id(input: &str) -> Option<String> {
    let caps = PLAYLIST_ID.captures(input.trim())?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string())
}

/// Splits user input into recognized ids and rejected inputs, keeping order.
pub fn extract_playlist_ids<S: AsRef<str>>(inputs: &[S]) -> (Vec<String>, Vec<String>) {
    let mut ids = Vec::new();
    let mut rejected = Vec::new();
    for input in inputs {
        match extract_playlist_id(input.as_ref()) {
            Some(id) => ids.push(id),
            None => rejected.push(input.as_ref().to_string()),
        }
    }
    (ids, rejected)
}

/// Formats milliseconds as `m:ss`.
pub fn format_duration(ms: u64) -> String {
    let total_secs = ms / 1000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

pub fn join_artists(artists: &[String]) -> String {
    artists.join(", ")
}
