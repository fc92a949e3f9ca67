use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tabled::Tabled;

// ---------- catalog wire types ----------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: u64,
}

/// Bearer credential with the instant after which it must not be handed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub owner: Option<Owner>,
    #[serde(default)]
    pub tracks: Option<TracksTotal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Owner {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TracksTotal {
    #[serde(default)]
    pub total: Option<u64>,
}

/// One page of `GET /playlists/{id}/tracks`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<Option<PlaylistEntry>>,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    #[serde(default)]
    pub added_at: Option<String>,
    #[serde(default)]
    pub track: Option<Track>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub album: Option<AlbumRef>,
    #[serde(default, deserialize_with = "lenient_duration")]
    pub duration_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtistRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlbumRef {
    #[serde(default)]
    pub name: Option<String>,
}

impl Track {
    pub fn artist_names(&self) -> Vec<String> {
        self.artists.iter().map(|a| a.name.clone()).collect()
    }

    pub fn album_name(&self) -> Option<&str> {
        self.album
            .as_ref()
            .and_then(|a| a.name.as_deref())
            .filter(|name| !name.is_empty())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Anything that is not a non-negative number counts as "no duration".
fn lenient_duration<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| {
        v.as_u64()
            .or_else(|| v.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
    }))
}

// ---------- request / response contract ----------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRequest {
    #[serde(default)]
    pub playlist_ids: Vec<String>,
    #[serde(default)]
    pub merge: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistMeta {
    pub name: String,
    pub description: String,
    pub owner: Option<String>,
    pub total_tracks: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistCount {
    pub name: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCount {
    pub year: i32,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddedSnapshot {
    pub added_at: String,
    pub name: String,
    pub artists: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationSnapshot {
    pub name: String,
    pub artists: Vec<String>,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSummary {
    pub top_artists: Vec<ArtistCount>,
    pub top_artist_per_year: BTreeMap<i32, ArtistCount>,
    pub songs_per_year: Vec<YearCount>,
    pub first_song: Option<AddedSnapshot>,
    pub last_song: Option<AddedSnapshot>,
    pub avg_artists_per_song: f64,
    pub unique_artists: usize,
    pub unique_albums: usize,
    pub longest_song: Option<DurationSnapshot>,
    pub shortest_song: Option<DurationSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Outcome {
    Stats {
        meta: PlaylistMeta,
        stats: Box<StatisticsSummary>,
    },
    Error {
        error: Value,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistOutcome {
    pub playlist_id: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl PlaylistOutcome {
    pub fn stats(&self) -> Option<&StatisticsSummary> {
        match &self.outcome {
            Outcome::Stats { stats, .. } => Some(stats),
            Outcome::Error { .. } => None,
        }
    }

    pub fn meta(&self) -> Option<&PlaylistMeta> {
        match &self.outcome {
            Outcome::Stats { meta, .. } => Some(meta),
            Outcome::Error { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&Value> {
        match &self.outcome {
            Outcome::Error { error } => Some(error),
            Outcome::Stats { .. } => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Stats { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    pub per_playlist: Vec<PlaylistOutcome>,
    pub merged: Option<StatisticsSummary>,
}

// ---------- CLI tables ----------

#[derive(Tabled)]
pub struct ArtistTableRow {
    pub artist: String,
    pub songs: u32,
}

#[derive(Tabled)]
pub struct YearTableRow {
    pub year: i32,
    pub songs: u32,
    pub top_artist: String,
}

#[derive(Tabled)]
pub struct SongTableRow {
    pub kind: String,
    pub name: String,
    pub artists: String,
    pub detail: String,
}
