//! Error types for playstats.
//!
//! Whole-request failures (`Validation`, `Auth`, `Config`) abort a stats
//! request. `Upstream` failures are isolated to one playlist and end up in
//! that playlist's outcome record instead.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Empty or malformed request input
    #[error("{0}")]
    Validation(String),

    /// Client-credentials exchange failed
    #[error("Unable to get Spotify token: {0}")]
    Auth(String),

    /// Metadata or track paging failed for a single playlist
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    /// Missing or invalid configuration values
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O and socket errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure reported by the catalog API or the transport in front of it.
///
/// `payload` is the upstream error body when it parsed as JSON, otherwise the
/// body text or the transport error message as a JSON string.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamError {
    pub status: Option<u16>,
    pub payload: Value,
}

impl UpstreamError {
    pub fn new(status: Option<u16>, payload: Value) -> Self {
        Self { status, payload }
    }

    pub fn message(msg: impl Into<String>) -> Self {
        Self {
            status: None,
            payload: Value::String(msg.into()),
        }
    }

    /// Builds an error from a non-2xx response body.
    pub fn from_body(status: u16, body: &str) -> Self {
        let payload = serde_json::from_str::<Value>(body)
            .unwrap_or_else(|_| Value::String(body.to_string()));
        Self {
            status: Some(status),
            payload,
        }
    }
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.status, &self.payload) {
            (Some(status), Value::String(s)) => write!(f, "{status}: {s}"),
            (Some(status), payload) => write!(f, "{status}: {payload}"),
            (None, Value::String(s)) => f.write_str(s),
            (None, payload) => write!(f, "{payload}"),
        }
    }
}

impl std::error::Error for UpstreamError {}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        Self {
            status: err.status().map(|s| s.as_u16()),
            payload: Value::String(err.to_string()),
        }
    }
}
