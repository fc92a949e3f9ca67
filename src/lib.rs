//! Playlist statistics library.
//!
//! Fetches playlists from the Spotify Web API, computes descriptive
//! statistics over their tracks and optionally merges statistics across
//! playlists.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the stats service
//! - `batch` - windowed concurrent execution with inter-window pacing
//! - `cli` - command-line interface implementations
//! - `clock` - injectable time source for the caches
//! - `config` - configuration management and environment variables
//! - `engine` - request orchestration
//! - `error` - error taxonomy
//! - `management` - credential cache and playlist track cache
//! - `server` - HTTP server setup
//! - `spotify` - Spotify Web API client
//! - `stats` - statistics computation and merging
//! - `types` - wire types and the response contract
//! - `utils` - playlist id extraction and formatting helpers
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use playstats::{clock::SystemClock, config, engine::StatsEngine, spotify::SpotifyClient};
//!
//! #[tokio::main]
//! async fn main() -> playstats::error::Result<()> {
//!     config::load_env().await?;
//!     let settings = config::Settings::from_env()?;
//!     let engine = StatsEngine::new(SpotifyClient::new(&settings), Arc::new(SystemClock));
//!     // engine.aggregate(request).await?
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod batch;
pub mod cli;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod stats;
pub mod types;
pub mod utils;

/// Prints an informational message with a blue bullet point.
///
/// Writes one line to stdout with a blue "o" indicator followed by the
/// message. Used for progress and summary lines of the CLI commands.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// info!("Fetching {} playlists", ids.len());
/// info!("{} unique artists", stats.unique_artists);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Writes one line to stdout with a green "✓" indicator. Used as the header
/// line of every playlist that was fetched and summarized.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// success!("{} by {} ({} tracks)", meta.name, owner, meta.total_tracks);
/// success!("Merged statistics");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Writes one line with a red "!" indicator and terminates the process with
/// exit code 1. Only for fatal CLI errors; library code returns
/// [`error::Error`](crate::error::Error) instead.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Behavior
///
/// The line goes to stderr, so `playstats stats --json` keeps stdout
/// parseable when it fails. Code after the macro never runs.
///
/// # Example
///
/// ```
/// error!("No valid playlist id or URL given");
/// error!("Missing required environment variable: {}", key);
/// // Program exits here
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Writes one line to stdout with a yellow "!" indicator for problems that
/// do not stop the command, such as an unrecognized input or a playlist the
/// API refused.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// warning!("Skipping unrecognized playlist input: {}", input);
/// warning!("Playlist {} failed: {}", playlist_id, error);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
