#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::atomic::{AtomicUsize, Ordering},
};

use playstats::{
    error::UpstreamError,
    spotify::Catalog,
    types::{
        AlbumRef, ArtistRef, Owner, PlaylistEntry, PlaylistResponse, TokenResponse, Track,
        TrackPage, TracksTotal,
    },
};
use serde_json::json;

// Helper function to create a playlist entry
pub fn entry(
    name: &str,
    artists: &[&str],
    album: Option<&str>,
    added_at: Option<&str>,
    duration_ms: Option<u64>,
) -> Option<PlaylistEntry> {
    Some(PlaylistEntry {
        added_at: added_at.map(str::to_string),
        track: Some(Track {
            id: Some(format!("{}_id", name)),
            name: name.to_string(),
            artists: artists
                .iter()
                .map(|a| ArtistRef {
                    name: a.to_string(),
                })
                .collect(),
            album: album.map(|a| AlbumRef {
                name: Some(a.to_string()),
            }),
            duration_ms,
        }),
    })
}

// Helper function for the common "song by artists added at" case
pub fn song(name: &str, artists: &[&str], added_at: &str) -> Option<PlaylistEntry> {
    entry(name, artists, Some("Album"), Some(added_at), Some(200_000))
}

pub struct MockPlaylist {
    pub meta: PlaylistResponse,
    pub pages: Vec<Vec<Option<PlaylistEntry>>>,
}

/// In-memory catalog counting every call it receives.
#[derive(Default)]
pub struct MockCatalog {
    pub token_calls: AtomicUsize,
    pub meta_calls: AtomicUsize,
    pub page_calls: AtomicUsize,
    pub token_error: bool,
    pub expires_in: u64,
    playlists: HashMap<String, MockPlaylist>,
    failing_meta: HashSet<String>,
    failing_pages: HashSet<String>,
    looping: HashSet<String>,
    endless: HashSet<String>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self {
            expires_in: 3600,
            ..Default::default()
        }
    }

    /// Adds a playlist whose entries are served `page_size` at a time.
    pub fn with_playlist(
        mut self,
        id: &str,
        name: &str,
        entries: Vec<Option<PlaylistEntry>>,
        page_size: usize,
    ) -> Self {
        let total = entries.len() as u64;
        let pages = if entries.is_empty() {
            vec![Vec::new()]
        } else {
            entries.chunks(page_size).map(|c| c.to_vec()).collect()
        };
        self.playlists.insert(
            id.to_string(),
            MockPlaylist {
                meta: PlaylistResponse {
                    name: name.to_string(),
                    description: Some(format!("{} description", name)),
                    owner: Some(Owner {
                        display_name: Some("owner".to_string()),
                        id: Some("owner_id".to_string()),
                    }),
                    tracks: Some(TracksTotal { total: Some(total) }),
                },
                pages,
            },
        );
        self
    }

    pub fn with_meta(mut self, id: &str, meta: PlaylistResponse) -> Self {
        if let Some(p) = self.playlists.get_mut(id) {
            p.meta = meta;
        }
        self
    }

    pub fn failing_meta(mut self, id: &str) -> Self {
        self.failing_meta.insert(id.to_string());
        self
    }

    pub fn failing_pages(mut self, id: &str) -> Self {
        self.failing_pages.insert(id.to_string());
        self
    }

    pub fn looping(mut self, id: &str) -> Self {
        self.looping.insert(id.to_string());
        self
    }

    /// Every page of `id` is empty and points at a never-seen next page.
    pub fn endless(mut self, id: &str) -> Self {
        self.endless.insert(id.to_string());
        self
    }

    pub fn with_token_error(mut self) -> Self {
        self.token_error = true;
        self
    }

    pub fn token_calls(&self) -> usize {
        self.token_calls.load(Ordering::SeqCst)
    }

    pub fn meta_calls(&self) -> usize {
        self.meta_calls.load(Ordering::SeqCst)
    }

    pub fn page_calls(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }
}

pub fn not_found_payload() -> serde_json::Value {
    json!({"error": {"status": 404, "message": "Invalid playlist Id"}})
}

impl Catalog for MockCatalog {
    async fn request_token(&self) -> Result<TokenResponse, UpstreamError> {
        let n = self.token_calls.fetch_add(1, Ordering::SeqCst);
        if self.token_error {
            return Err(UpstreamError::new(
                Some(400),
                json!({"error": "invalid_client"}),
            ));
        }
        Ok(TokenResponse {
            access_token: format!("token-{}", n + 1),
            expires_in: self.expires_in,
        })
    }

    async fn playlist(
        &self,
        _token: &str,
        playlist_id: &str,
    ) -> Result<PlaylistResponse, UpstreamError> {
        self.meta_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_meta.contains(playlist_id) {
            return Err(UpstreamError::new(Some(404), not_found_payload()));
        }
        self.playlists
            .get(playlist_id)
            .map(|p| p.meta.clone())
            .ok_or_else(|| UpstreamError::new(Some(404), not_found_payload()))
    }

    async fn tracks_page(
        &self,
        _token: &str,
        playlist_id: &str,
        next: Option<&str>,
    ) -> Result<TrackPage, UpstreamError> {
        let calls = self.page_calls.fetch_add(1, Ordering::SeqCst);
        if self.looping.contains(playlist_id) {
            return Ok(TrackPage {
                items: Vec::new(),
                next: Some(format!("loop:{}:{}", playlist_id, calls % 2)),
            });
        }
        if self.endless.contains(playlist_id) {
            return Ok(TrackPage {
                items: Vec::new(),
                next: Some(format!("endless:{}:{}", playlist_id, calls + 1)),
            });
        }
        let index = match next {
            None => 0,
            Some(url) => url
                .rsplit(':')
                .next()
                .and_then(|n| n.parse::<usize>().ok())
                .unwrap_or(0),
        };
        if self.failing_pages.contains(playlist_id) && index > 0 {
            return Err(UpstreamError::message("connection reset by peer"));
        }
        let playlist = self
            .playlists
            .get(playlist_id)
            .ok_or_else(|| UpstreamError::new(Some(404), not_found_payload()))?;

        let items = playlist.pages.get(index).cloned().unwrap_or_default();
        let next = if index + 1 < playlist.pages.len() {
            Some(format!("page:{}:{}", playlist_id, index + 1))
        } else {
            None
        };
        Ok(TrackPage { items, next })
    }
}
