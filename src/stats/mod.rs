//! Playlist statistics.
//!
//! [`compute_stats`] is a pure function of an entry list. [`merge_playlists`]
//! gathers the entries of several playlists and runs it once over the union.

mod compute;
mod merge;

pub use compute::compute_stats;
pub use compute::parse_added_at;
pub use merge::merge_playlists;
