mod auth;
mod tracks;

pub use auth::TOKEN_SAFETY_MARGIN_SECS;
pub use auth::TokenManager;
pub use tracks::CachedTrackSet;
pub use tracks::Entries;
pub use tracks::MAX_PAGES;
pub use tracks::TRACK_CACHE_TTL_SECS;
pub use tracks::TrackCache;
pub use tracks::TrackRetriever;
