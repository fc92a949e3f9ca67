use std::sync::Arc;

use crate::{
    clock::SystemClock, config::Settings, error, management::TokenManager, spotify::SpotifyClient,
    success,
};

/// Checks the configured client credentials by performing one exchange.
pub async fn auth() {
    let settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => error!("{}", e),
    };

    let client = SpotifyClient::new(&settings);
    let tokens = TokenManager::new(Arc::new(SystemClock));
    match tokens.get_valid_token(&client).await {
        Ok(credential) => success!(
            "Client credentials accepted. Token valid until {}",
            credential.expires_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        Err(e) => error!("{}", e),
    }
}
