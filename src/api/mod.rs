//! # API Module
//!
//! HTTP endpoints served by `playstats serve`.
//!
//! ## Endpoints
//!
//! - `POST /playlist-stats` ([`playlist_stats`]) - per-playlist statistics and
//!   optional merged statistics. Whole-request failures answer with a non-2xx
//!   status and `{"error": message}`; a playlist that failed upstream is
//!   reported inside `perPlaylist` and the request still answers 200.
//! - `GET /health` ([`health`]) - status and version for monitoring.
//! - `GET /` ([`root`]) - plain liveness string.
//!
//! Handlers are generic over the [`crate::spotify::Catalog`] so the router can
//! be exercised against an in-memory catalog.

mod health;
mod stats;

pub use health::health;
pub use health::root;
pub use stats::INVALID_BODY_MESSAGE;
pub use stats::parse_request;
pub use stats::playlist_stats;
