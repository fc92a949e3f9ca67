use tracing::debug;

use crate::{
    error::UpstreamError,
    management::TrackRetriever,
    spotify::Catalog,
    types::{PlaylistEntry, StatisticsSummary},
};

use super::compute_stats;

/// Recomputes statistics over the union of several playlists.
///
/// Entries are concatenated in `playlist_ids` order, each playlist keeping
/// its own entry order. Only playlists that already succeeded should be
/// passed in; their track lists are expected to come from the cache.
pub async fn merge_playlists<C: Catalog>(
    retriever: &TrackRetriever<'_, C>,
    token: &str,
    playlist_ids: &[String],
) -> Result<StatisticsSummary, UpstreamError> {
    let mut merged: Vec<Option<PlaylistEntry>> = Vec::new();
    for playlist_id in playlist_ids {
        let entries = retriever.get_all_tracks(token, playlist_id).await?;
        merged.extend(entries.iter().cloned());
    }

    debug!(
        playlists = playlist_ids.len(),
        entries = merged.len(),
        "computing merged statistics"
    );
    Ok(compute_stats(&merged))
}
