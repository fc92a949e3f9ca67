//! # Spotify Integration Module
//!
//! The catalog API is the only upstream collaborator of the stats engine.
//! Everything the engine needs from it goes through the [`Catalog`] trait:
//!
//! ```text
//! StatsEngine
//!     ├── TokenManager  ── Catalog::request_token   POST /api/token
//!     ├── playlist meta ── Catalog::playlist        GET  /playlists/{id}
//!     └── TrackRetriever ─ Catalog::tracks_page     GET  /playlists/{id}/tracks
//! ```
//!
//! [`SpotifyClient`] is the reqwest-backed implementation. Tests supply
//! in-memory implementations instead.
//!
//! No call is retried here. A non-2xx response becomes an
//! [`UpstreamError`] carrying the response body, so the caller can report
//! exactly what the API said.

pub mod auth;
pub mod playlists;

use std::future::Future;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::{
    config::Settings,
    error::UpstreamError,
    types::{PlaylistResponse, TokenResponse, TrackPage},
};

/// Number of playlist entries requested per page.
pub const PAGE_SIZE: u32 = 100;

/// The three catalog endpoints the engine relies on.
pub trait Catalog: Send + Sync {
    /// Client-credentials exchange.
    fn request_token(&self) -> impl Future<Output = Result<TokenResponse, UpstreamError>> + Send;

    /// Playlist metadata (name, description, owner, reported total).
    fn playlist(
        &self,
        token: &str,
        playlist_id: &str,
    ) -> impl Future<Output = Result<PlaylistResponse, UpstreamError>> + Send;

    /// One page of playlist entries. `next` is the server-supplied pointer of
    /// the previous page, `None` for the first page.
    fn tracks_page(
        &self,
        token: &str,
        playlist_id: &str,
        next: Option<&str>,
    ) -> impl Future<Output = Result<TrackPage, UpstreamError>> + Send;
}

#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl SpotifyClient {
    pub fn new(settings: &Settings) -> Self {
        Self {
            http: Client::new(),
            api_url: settings.api_url.trim_end_matches('/').to_string(),
            token_url: settings.token_url.clone(),
            client_id: settings.client_id.clone(),
            client_secret: settings.client_secret.clone(),
        }
    }
}

impl Catalog for SpotifyClient {
    async fn request_token(&self) -> Result<TokenResponse, UpstreamError> {
        self.client_credentials().await
    }

    async fn playlist(
        &self,
        token: &str,
        playlist_id: &str,
    ) -> Result<PlaylistResponse, UpstreamError> {
        self.get_playlist(token, playlist_id).await
    }

    async fn tracks_page(
        &self,
        token: &str,
        playlist_id: &str,
        next: Option<&str>,
    ) -> Result<TrackPage, UpstreamError> {
        self.get_tracks_page(token, playlist_id, next).await
    }
}

/// Decodes a JSON body, or turns a non-2xx response into an [`UpstreamError`]
/// carrying whatever the API sent back.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, UpstreamError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        if body.is_empty() {
            return Err(UpstreamError::new(
                Some(status.as_u16()),
                serde_json::Value::String(status.to_string()),
            ));
        }
        return Err(UpstreamError::from_body(status.as_u16(), &body));
    }

    Ok(response.json::<T>().await?)
}
