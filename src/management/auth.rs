use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use crate::{
    clock::Clock,
    error::{Error, Result},
    spotify::Catalog,
    types::Credential,
};

/// Safety margin subtracted from the reported token lifetime.
pub const TOKEN_SAFETY_MARGIN_SECS: i64 = 60;

/// Process-wide cache for the client-credentials bearer token.
///
/// The lock is held across a refresh, so concurrent callers that miss the
/// cache wait for one exchange instead of each starting their own.
pub struct TokenManager {
    clock: Arc<dyn Clock>,
    margin: Duration,
    credential: Mutex<Option<Credential>>,
}

impl TokenManager {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_margin(clock, Duration::seconds(TOKEN_SAFETY_MARGIN_SECS))
    }

    pub fn with_margin(clock: Arc<dyn Clock>, margin: Duration) -> Self {
        TokenManager {
            clock,
            margin,
            credential: Mutex::new(None),
        }
    }

    /// Returns the cached credential while it is still valid, otherwise
    /// performs a client-credentials exchange and caches the result.
    ///
    /// # Errors
    ///
    /// [`Error::Auth`] if the exchange fails or yields an empty token.
    pub async fn get_valid_token<C: Catalog>(&self, catalog: &C) -> Result<Credential> {
        let mut cached = self.credential.lock().await;
        if let Some(credential) = cached.as_ref() {
            if !self.is_expired(credential) {
                return Ok(credential.clone());
            }
        }

        debug!("requesting a fresh access token");
        let response = catalog
            .request_token()
            .await
            .map_err(|e| Error::Auth(e.to_string()))?;
        if response.access_token.is_empty() {
            return Err(Error::Auth("empty access token in response".to_string()));
        }

        let now = self.clock.now();
        let expires_at = i64::try_from(response.expires_in)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| now.checked_add_signed(lifetime - self.margin))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let credential = Credential {
            access_token: response.access_token,
            expires_at,
        };
        *cached = Some(credential.clone());
        Ok(credential)
    }

    /// Drops the cached credential so the next call exchanges again.
    pub async fn invalidate(&self) {
        self.credential.lock().await.take();
    }

    fn is_expired(&self, credential: &Credential) -> bool {
        self.clock.now() >= credential.expires_at
    }
}
