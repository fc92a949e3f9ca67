use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::types::{
    AddedSnapshot, ArtistCount, DurationSnapshot, PlaylistEntry, StatisticsSummary, Track,
    YearCount,
};

/// Artist frequencies that remember first-seen order.
#[derive(Debug, Default)]
struct Frequencies {
    counts: Vec<ArtistCount>,
    index: HashMap<String, usize>,
}

impl Frequencies {
    fn bump(&mut self, name: &str) {
        match self.index.get(name) {
            Some(&i) => self.counts[i].count += 1,
            None => {
                self.index.insert(name.to_string(), self.counts.len());
                self.counts.push(ArtistCount {
                    name: name.to_string(),
                    count: 1,
                });
            }
        }
    }

    /// Descending by count; `sort_by` is stable, so ties keep first-seen order.
    fn ranked(mut self) -> Vec<ArtistCount> {
        self.counts.sort_by(|a, b| b.count.cmp(&a.count));
        self.counts
    }

    /// Highest count, earliest-seen artist on ties.
    fn top(&self) -> Option<ArtistCount> {
        self.counts
            .iter()
            .fold(None::<&ArtistCount>, |best, candidate| match best {
                Some(b) if b.count >= candidate.count => Some(b),
                _ => Some(candidate),
            })
            .cloned()
    }
}

/// Computes the statistics summary of a playlist's entries in one pass.
///
/// Tombstoned entries (`None`, or an entry without a track) are skipped but
/// still count towards the denominator of the artists-per-song average.
/// Entries whose `added_at` is missing or unparseable contribute to artist,
/// album and duration figures but not to the per-year figures or the
/// first/last snapshots.
pub fn compute_stats(entries: &[Option<PlaylistEntry>]) -> StatisticsSummary {
    let mut artists = Frequencies::default();
    let mut artists_by_year: BTreeMap<i32, Frequencies> = BTreeMap::new();
    let mut songs_per_year: BTreeMap<i32, u32> = BTreeMap::new();
    let mut unique_artists: HashSet<&str> = HashSet::new();
    let mut unique_albums: HashSet<&str> = HashSet::new();
    let mut total_artists: usize = 0;

    let mut first: Option<(DateTime<Utc>, &PlaylistEntry)> = None;
    let mut last: Option<(DateTime<Utc>, &PlaylistEntry)> = None;
    let mut shortest: Option<(u64, &Track)> = None;
    let mut longest: Option<(u64, &Track)> = None;

    for entry in entries.iter().flatten() {
        let Some(track) = entry.track.as_ref() else {
            continue;
        };

        for artist in &track.artists {
            artists.bump(&artist.name);
            unique_artists.insert(&artist.name);
        }
        if let Some(album) = track.album_name() {
            unique_albums.insert(album);
        }
        total_artists += track.artists.len();

        if let Some(added_at) = entry.added_at.as_deref().and_then(parse_added_at) {
            let year = added_at.year();
            *songs_per_year.entry(year).or_insert(0) += 1;
            let year_artists = artists_by_year.entry(year).or_default();
            for artist in &track.artists {
                year_artists.bump(&artist.name);
            }

            if first.is_none_or(|(at, _)| added_at < at) {
                first = Some((added_at, entry));
            }
            // ties go to the later entry
            if last.is_none_or(|(at, _)| added_at >= at) {
                last = Some((added_at, entry));
            }
        }

        if let Some(duration) = track.duration_ms {
            if shortest.is_none_or(|(d, _)| duration < d) {
                shortest = Some((duration, track));
            }
            if longest.is_none_or(|(d, _)| duration > d) {
                longest = Some((duration, track));
            }
        }
    }

    let avg_artists_per_song = if entries.is_empty() {
        0.0
    } else {
        total_artists as f64 / entries.len() as f64
    };

    StatisticsSummary {
        top_artists: artists.ranked(),
        top_artist_per_year: artists_by_year
            .iter()
            .filter_map(|(year, freq)| freq.top().map(|top| (*year, top)))
            .collect(),
        songs_per_year: songs_per_year
            .into_iter()
            .map(|(year, count)| YearCount { year, count })
            .collect(),
        first_song: first.map(|(_, entry)| added_snapshot(entry)),
        last_song: last.map(|(_, entry)| added_snapshot(entry)),
        avg_artists_per_song,
        unique_artists: unique_artists.len(),
        unique_albums: unique_albums.len(),
        longest_song: longest.map(|(d, track)| duration_snapshot(d, track)),
        shortest_song: shortest.map(|(d, track)| duration_snapshot(d, track)),
    }
}

/// Parses an `added_at` value: RFC 3339, or a bare `YYYY-MM-DD` date.
pub fn parse_added_at(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn added_snapshot(entry: &PlaylistEntry) -> AddedSnapshot {
    let track = entry.track.as_ref();
    AddedSnapshot {
        added_at: entry.added_at.clone().unwrap_or_default(),
        name: track.map(|t| t.name.clone()).unwrap_or_default(),
        artists: track.map(Track::artist_names).unwrap_or_default(),
    }
}

fn duration_snapshot(duration_ms: u64, track: &Track) -> DurationSnapshot {
    DurationSnapshot {
        name: track.name.clone(),
        artists: track.artist_names(),
        duration_ms,
    }
}
