use tracing::debug;

use crate::{
    error::UpstreamError,
    types::{PlaylistResponse, TrackPage},
};

use super::{PAGE_SIZE, SpotifyClient, read_json};

impl SpotifyClient {
    /// Fetches playlist metadata.
    pub async fn get_playlist(
        &self,
        token: &str,
        playlist_id: &str,
    ) -> Result<PlaylistResponse, UpstreamError> {
        let api_url = format!(
            "{uri}/playlists/{id}",
            uri = &self.api_url,
            id = playlist_id
        );

        let response = self.http.get(&api_url).bearer_auth(token).send().await?;
        read_json::<PlaylistResponse>(response).await
    }

    /// Fetches one page of playlist entries.
    ///
    /// Without a `next` pointer the first page is requested with
    /// [`PAGE_SIZE`] entries; otherwise `next` is followed verbatim.
    pub async fn get_tracks_page(
        &self,
        token: &str,
        playlist_id: &str,
        next: Option<&str>,
    ) -> Result<TrackPage, UpstreamError> {
        let api_url = match next {
            Some(url) => url.to_string(),
            None => format!(
                "{uri}/playlists/{id}/tracks?limit={limit}",
                uri = &self.api_url,
                id = playlist_id,
                limit = PAGE_SIZE
            ),
        };

        debug!(playlist_id, url = %api_url, "fetching track page");
        let response = self.http.get(&api_url).bearer_auth(token).send().await?;
        read_json::<TrackPage>(response).await
    }
}
