//! # CLI Module
//!
//! User-facing commands of the `playstats` binary.
//!
//! - [`stats`] - fetch one or more playlists (ids or share URLs) and print
//!   their statistics as tables, or as JSON with `--json`; `--merge` adds the
//!   combined statistics of all playlists that succeeded
//! - [`serve`] - run the HTTP service exposing `POST /playlist-stats`
//! - [`auth`] - check the configured client credentials
//!
//! Commands print status lines with the crate's console macros and exit with
//! code 1 on fatal errors. A playlist that fails upstream is reported as a
//! warning and does not stop the others.
//!
//! ```bash
//! playstats auth
//! playstats stats 37i9dQZF1DXcBWIGoYBM5M
//! playstats stats https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M <id> --merge
//! playstats serve --address 127.0.0.1:4000
//! ```

mod auth;
mod serve;
mod stats;

pub use auth::auth;
pub use serve::serve;
pub use stats::stats;
