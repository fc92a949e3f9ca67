//! Request orchestration.
//!
//! ```text
//! StatsRequest
//!   → validate
//!   → TokenManager (one credential for the whole request)
//!   → run_windowed: [playlist meta + TrackRetriever + compute_stats] per id
//!   → merge_playlists over the successful ids (only if requested)
//!   → AggregateResult
//! ```

use std::{sync::Arc, time::Duration};

use tracing::{debug, warn};

use crate::{
    batch::{self, run_windowed},
    clock::Clock,
    error::{Error, Result, UpstreamError},
    management::{Entries, TokenManager, TrackCache, TrackRetriever},
    spotify::Catalog,
    stats::{compute_stats, merge_playlists},
    types::{
        AggregateResult, Outcome, PlaylistMeta, PlaylistOutcome, PlaylistResponse,
        StatisticsSummary, StatsRequest,
    },
};

pub const EMPTY_REQUEST_MESSAGE: &str = "playlistIds must be a non-empty array";

#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Playlists fetched concurrently per window.
    pub window: usize,
    /// Pause between windows.
    pub pause: Duration,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            window: batch::DEFAULT_WINDOW,
            pause: batch::DEFAULT_PAUSE,
        }
    }
}

/// Owns the catalog client and both caches for the lifetime of the process.
pub struct StatsEngine<C> {
    catalog: C,
    tokens: TokenManager,
    tracks: TrackCache,
    options: EngineOptions,
}

impl<C: Catalog> StatsEngine<C> {
    pub fn new(catalog: C, clock: Arc<dyn Clock>) -> Self {
        Self::with_options(catalog, clock, EngineOptions::default())
    }

    pub fn with_options(catalog: C, clock: Arc<dyn Clock>, options: EngineOptions) -> Self {
        Self {
            catalog,
            tokens: TokenManager::new(Arc::clone(&clock)),
            tracks: TrackCache::new(clock),
            options,
        }
    }

    /// Builds an engine around caches constructed by the caller.
    pub fn from_parts(
        catalog: C,
        tokens: TokenManager,
        tracks: TrackCache,
        options: EngineOptions,
    ) -> Self {
        Self {
            catalog,
            tokens,
            tracks,
            options,
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn track_cache(&self) -> &TrackCache {
        &self.tracks
    }

    /// Serves one stats request.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if `playlist_ids` is empty
    /// - [`Error::Auth`] if no credential could be obtained
    /// - [`Error::Upstream`] if the merge step cannot re-read a track list
    ///
    /// Per-playlist failures are not errors; they are reported in the
    /// matching [`PlaylistOutcome`].
    pub async fn aggregate(&self, request: StatsRequest) -> Result<AggregateResult> {
        if request.playlist_ids.is_empty() {
            return Err(Error::Validation(EMPTY_REQUEST_MESSAGE.to_string()));
        }

        let credential = self.tokens.get_valid_token(&self.catalog).await?;
        let token = credential.access_token.as_str();
        let retriever = TrackRetriever::new(&self.catalog, &self.tracks);

        debug!(
            playlists = request.playlist_ids.len(),
            merge = request.merge,
            "aggregating playlist statistics"
        );
        let per_playlist = {
            let retriever = &retriever;
            run_windowed(
                request.playlist_ids,
                self.options.window,
                self.options.pause,
                move |playlist_id| self.playlist_outcome(retriever, token, playlist_id),
            )
            .await
        };

        let merged = if request.merge {
            let succeeded: Vec<String> = per_playlist
                .iter()
                .filter(|p| p.is_success())
                .map(|p| p.playlist_id.clone())
                .collect();
            Some(merge_playlists(&retriever, token, &succeeded).await?)
        } else {
            None
        };

        Ok(AggregateResult {
            per_playlist,
            merged,
        })
    }

    async fn playlist_outcome(
        &self,
        retriever: &TrackRetriever<'_, C>,
        token: &str,
        playlist_id: String,
    ) -> PlaylistOutcome {
        let outcome = match self.playlist_stats(retriever, token, &playlist_id).await {
            Ok((meta, stats)) => Outcome::Stats {
                meta,
                stats: Box::new(stats),
            },
            Err(err) => {
                warn!(playlist_id = %playlist_id, error = %err, "playlist fetch error");
                Outcome::Error { error: err.payload }
            }
        };

        PlaylistOutcome {
            playlist_id,
            outcome,
        }
    }

    async fn playlist_stats(
        &self,
        retriever: &TrackRetriever<'_, C>,
        token: &str,
        playlist_id: &str,
    ) -> std::result::Result<(PlaylistMeta, StatisticsSummary), UpstreamError> {
        let response = self.catalog.playlist(token, playlist_id).await?;
        let entries = retriever.get_all_tracks(token, playlist_id).await?;
        let stats = compute_stats(&entries);
        Ok((playlist_meta(response, &entries), stats))
    }
}

/// Flattens the metadata response, falling back to the owner id and to the
/// number of fetched entries where the API leaves fields out.
pub fn playlist_meta(response: PlaylistResponse, entries: &Entries) -> PlaylistMeta {
    let owner = response.owner.and_then(|owner| {
        owner
            .display_name
            .filter(|name| !name.is_empty())
            .or(owner.id)
    });

    PlaylistMeta {
        name: response.name,
        description: response.description.unwrap_or_default(),
        owner,
        total_tracks: response
            .tracks
            .and_then(|t| t.total)
            .unwrap_or(entries.len() as u64),
    }
}
