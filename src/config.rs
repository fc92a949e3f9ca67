//! Configuration management for playstats.
//!
//! Values come from environment variables, optionally seeded from `.env`
//! files:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the working directory
//! 3. `.env` in the local data directory (`<data_local_dir>/playstats/.env`)
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::error::{Error, Result};

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:4000";

/// Loads `.env` files into the process environment.
///
/// Creates `<data_local_dir>/playstats/` if needed. Missing files are fine:
/// the variables may already be set in the real environment, and `dotenv`
/// never overrides variables that are already present.
pub async fn load_env() -> Result<()> {
    let path = env_file_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    let _ = dotenv::dotenv();
    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| Error::Config(e.to_string()))?;
    }
    Ok(())
}

/// Location of the per-user `.env` file.
pub fn env_file_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("playstats/.env");
    path
}

/// Upstream endpoints, client secrets and listen address.
#[derive(Debug, Clone)]
pub struct Settings {
    pub client_id: String,
    pub client_secret: String,
    pub api_url: String,
    pub token_url: String,
    pub server_address: String,
}

impl Settings {
    /// Reads settings from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `SPOTIFY_API_AUTH_CLIENT_ID` or
    /// `SPOTIFY_API_AUTH_CLIENT_SECRET` is missing or empty.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            client_id: required("SPOTIFY_API_AUTH_CLIENT_ID")?,
            client_secret: required("SPOTIFY_API_AUTH_CLIENT_SECRET")?,
            api_url: optional("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            token_url: optional("SPOTIFY_API_TOKEN_URL")
                .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            server_address: server_address(),
        })
    }
}

/// `SERVER_ADDRESS`, else `0.0.0.0:$PORT`, else [`DEFAULT_SERVER_ADDRESS`].
pub fn server_address() -> String {
    optional("SERVER_ADDRESS")
        .or_else(|| optional("PORT").map(|port| format!("0.0.0.0:{port}")))
        .unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string())
}

fn required(key: &str) -> Result<String> {
    optional(key).ok_or_else(|| Error::Config(format!("{key} must be set")))
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
