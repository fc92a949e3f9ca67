use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use crate::{clock::Clock, error::UpstreamError, spotify::Catalog, types::PlaylistEntry};

/// How long a fetched track list is served from cache.
pub const TRACK_CACHE_TTL_SECS: i64 = 5 * 60;

/// Upper bound on pages followed for a single playlist.
pub const MAX_PAGES: usize = 1000;

/// Raw playlist entries in upstream order. `None` marks a tombstoned row.
pub type Entries = Arc<Vec<Option<PlaylistEntry>>>;

#[derive(Debug, Clone)]
pub struct CachedTrackSet {
    pub entries: Entries,
    pub fetched_at: DateTime<Utc>,
}

/// TTL cache of playlist entries keyed by playlist id.
///
/// Entries are replaced wholesale and age out on read; nothing is evicted.
pub struct TrackCache {
    clock: Arc<dyn Clock>,
    ttl: Duration,
    sets: Mutex<HashMap<String, CachedTrackSet>>,
}

impl TrackCache {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_ttl(clock, Duration::seconds(TRACK_CACHE_TTL_SECS))
    }

    pub fn with_ttl(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            clock,
            ttl,
            sets: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached entries if they are younger than the TTL.
    pub async fn get(&self, playlist_id: &str) -> Option<Entries> {
        let sets = self.sets.lock().await;
        let cached = sets.get(playlist_id)?;
        if self.clock.now() - cached.fetched_at < self.ttl {
            Some(Arc::clone(&cached.entries))
        } else {
            None
        }
    }

    pub async fn insert(&self, playlist_id: &str, entries: Entries) {
        let set = CachedTrackSet {
            entries,
            fetched_at: self.clock.now(),
        };
        self.sets.lock().await.insert(playlist_id.to_string(), set);
    }

    pub async fn len(&self) -> usize {
        self.sets.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sets.lock().await.is_empty()
    }
}

/// Fetches complete playlist track lists, served from a [`TrackCache`].
pub struct TrackRetriever<'a, C> {
    catalog: &'a C,
    cache: &'a TrackCache,
}

impl<'a, C: Catalog> TrackRetriever<'a, C> {
    pub fn new(catalog: &'a C, cache: &'a TrackCache) -> Self {
        Self { catalog, cache }
    }

    /// Returns every entry of the playlist in upstream order.
    ///
    /// A fresh cache entry is returned without any network call. Otherwise
    /// pages are followed until the API reports no `next` page, and the
    /// concatenated result replaces the cache entry. Any failing page aborts
    /// the whole fetch and leaves the cache untouched.
    ///
    /// # Errors
    ///
    /// The first [`UpstreamError`] hit while paging, or a synthetic one if
    /// the API keeps returning `next` pointers past [`MAX_PAGES`] or repeats
    /// a pointer it already returned.
    pub async fn get_all_tracks(
        &self,
        token: &str,
        playlist_id: &str,
    ) -> Result<Entries, UpstreamError> {
        if let Some(entries) = self.cache.get(playlist_id).await {
            debug!(playlist_id, entries = entries.len(), "track cache hit");
            return Ok(entries);
        }

        let mut items: Vec<Option<PlaylistEntry>> = Vec::new();
        let mut next: Option<String> = None;
        let mut seen: HashSet<String> = HashSet::new();
        let mut pages = 0;

        loop {
            let page = self
                .catalog
                .tracks_page(token, playlist_id, next.as_deref())
                .await?;
            pages += 1;
            items.extend(page.items);

            match page.next {
                None => break,
                Some(url) => {
                    if pages >= MAX_PAGES {
                        return Err(UpstreamError::message(format!(
                            "playlist {playlist_id} exceeded {MAX_PAGES} pages"
                        )));
                    }
                    if !seen.insert(url.clone()) {
                        return Err(UpstreamError::message(format!(
                            "playlist {playlist_id} repeated page pointer {url}"
                        )));
                    }
                    next = Some(url);
                }
            }
        }

        debug!(playlist_id, pages, entries = items.len(), "fetched playlist tracks");
        let entries: Entries = Arc::new(items);
        self.cache.insert(playlist_id, Arc::clone(&entries)).await;
        Ok(entries)
    }
}
