use base64::{Engine, engine::general_purpose::STANDARD};
use tracing::debug;

use crate::{error::UpstreamError, types::TokenResponse};

use super::{SpotifyClient, read_json};

impl SpotifyClient {
    /// Exchanges the configured client id and secret for an app-level access
    /// token (OAuth 2.0 client-credentials grant).
    ///
    /// The secret pair is sent as an HTTP Basic `Authorization` header and the
    /// grant type as a form body. The returned `expires_in` is in seconds.
    pub async fn client_credentials(&self) -> Result<TokenResponse, UpstreamError> {
        let auth = STANDARD.encode(format!("{}:{}", self.client_id, self.client_secret));

        debug!(url = %self.token_url, "requesting client-credentials token");
        let response = self
            .http
            .post(&self.token_url)
            .header(reqwest::header::AUTHORIZATION, format!("Basic {auth}"))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        read_json::<TokenResponse>(response).await
    }
}
