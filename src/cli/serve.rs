use std::sync::Arc;

use crate::{
    clock::SystemClock, config::Settings, engine::StatsEngine, error, info, server,
    spotify::SpotifyClient,
};

pub async fn serve(address: Option<String>) {
    let settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => error!("{}", e),
    };
    let address = address.unwrap_or_else(|| settings.server_address.clone());

    let engine = Arc::new(StatsEngine::new(
        SpotifyClient::new(&settings),
        Arc::new(SystemClock),
    ));

    info!("Serving playlist statistics on {}", address);
    if let Err(e) = server::start_api_server(engine, &address).await {
        error!("Server stopped: {}", e);
    }
}
