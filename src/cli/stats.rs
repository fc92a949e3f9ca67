use std::{sync::Arc, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    clock::SystemClock,
    config::Settings,
    engine::StatsEngine,
    error, info,
    spotify::SpotifyClient,
    success,
    types::{
        AggregateResult, ArtistTableRow, Outcome, SongTableRow, StatisticsSummary, StatsRequest,
        YearTableRow,
    },
    utils, warning,
};

/// Artists shown in the top-artists table.
const TOP_ARTISTS_SHOWN: usize = 10;

pub async fn stats(inputs: Vec<String>, merge: bool, json: bool) {
    let (playlist_ids, rejected) = utils::extract_playlist_ids(&inputs);
    for input in &rejected {
        warning!("Skipping unrecognized playlist input: {}", input);
    }
    if playlist_ids.is_empty() {
        error!("No valid playlist id or URL given");
    }

    let settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => error!("{}", e),
    };
    let engine = StatsEngine::new(SpotifyClient::new(&settings), Arc::new(SystemClock));

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Fetching {} playlist(s)...", playlist_ids.len()));
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let result = engine
        .aggregate(StatsRequest {
            playlist_ids,
            merge,
        })
        .await;
    pb.finish_and_clear();

    let result = match result {
        Ok(r) => r,
        Err(e) => error!("{}", e),
    };

    if json {
        match serde_json::to_string_pretty(&result) {
            Ok(out) => println!("{}", out),
            Err(e) => error!("Failed to encode result: {}", e),
        }
        return;
    }

    print_result(&result);
}

fn print_result(result: &AggregateResult) {
    for playlist in &result.per_playlist {
        match &playlist.outcome {
            Outcome::Stats { meta, stats } => {
                success!(
                    "{} by {} ({} tracks)",
                    meta.name,
                    meta.owner.as_deref().unwrap_or("unknown"),
                    meta.total_tracks
                );
                if !meta.description.is_empty() {
                    info!("{}", meta.description);
                }
                print_summary(stats);
            }
            Outcome::Error { error } => {
                warning!("Playlist {} failed: {}", playlist.playlist_id, error);
            }
        }
    }

    if let Some(merged) = &result.merged {
        success!("Merged statistics");
        print_summary(merged);
    }
}

fn print_summary(stats: &StatisticsSummary) {
    info!(
        "{} unique artists, {} unique albums, {:.2} artists per song",
        stats.unique_artists, stats.unique_albums, stats.avg_artists_per_song
    );

    let artist_rows: Vec<ArtistTableRow> = stats
        .top_artists
        .iter()
        .take(TOP_ARTISTS_SHOWN)
        .map(|a| ArtistTableRow {
            artist: a.name.clone(),
            songs: a.count,
        })
        .collect();
    if !artist_rows.is_empty() {
        println!("{}", Table::new(artist_rows));
    }

    let year_rows: Vec<YearTableRow> = stats
        .songs_per_year
        .iter()
        .map(|y| YearTableRow {
            year: y.year,
            songs: y.count,
            top_artist: stats
                .top_artist_per_year
                .get(&y.year)
                .map(|a| format!("{} ({})", a.name, a.count))
                .unwrap_or_default(),
        })
        .collect();
    if !year_rows.is_empty() {
        println!("{}", Table::new(year_rows));
    }

    let mut song_rows: Vec<SongTableRow> = Vec::new();
    for (kind, song) in [("first added", &stats.first_song), ("last added", &stats.last_song)] {
        if let Some(s) = song {
            song_rows.push(SongTableRow {
                kind: kind.to_string(),
                name: s.name.clone(),
                artists: utils::join_artists(&s.artists),
                detail: s.added_at.clone(),
            });
        }
    }
    for (kind, song) in [("longest", &stats.longest_song), ("shortest", &stats.shortest_song)] {
        if let Some(s) = song {
            song_rows.push(SongTableRow {
                kind: kind.to_string(),
                name: s.name.clone(),
                artists: utils::join_artists(&s.artists),
                detail: utils::format_duration(s.duration_ms),
            });
        }
    }
    if !song_rows.is_empty() {
        println!("{}", Table::new(song_rows));
    }
}
