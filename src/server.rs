use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{
    api,
    engine::StatsEngine,
    error::{Error, Result},
    spotify::Catalog,
};

pub fn router<C: Catalog + 'static>(engine: Arc<StatsEngine<C>>) -> Router {
    Router::new()
        .route("/", get(api::root))
        .route("/health", get(api::health))
        .route("/playlist-stats", post(api::playlist_stats::<C>))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(engine)
}

pub async fn start_api_server<C: Catalog + 'static>(
    engine: Arc<StatsEngine<C>>,
    address: &str,
) -> Result<()> {
    let addr = SocketAddr::from_str(address)
        .map_err(|e| Error::Config(format!("Failed to parse server address {address}: {e}")))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "playstats listening");
    axum::serve(listener, router(engine)).await?;
    Ok(())
}
