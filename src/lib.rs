//! Chat Export to Playlist Library
//!
//! This library turns the music links people share in a chat export into
//! Spotify playlists. It scans the export for Apple Music and Spotify links,
//! resolves Apple Music links to track or album metadata, finds the matching
//! Spotify items with a tiered fuzzy search and packs the result into one or
//! more playlists that stay within the catalog's size limits.
//!
//! # Modules
//!
//! - `api` - HTTP API endpoints (health, OAuth callback, link processing)
//! - `apple_music` - Apple Music page metadata resolver
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `links` - Link extraction, deduplication and ID parsing
//! - `management` - Local JSON caches (token, links, matches)
//! - `matching` - Name normalization, match verification and tiered search
//! - `playlist` - Chunking of ID sets and playlist assembly
//! - `ports` - Collaborator traits the pipeline depends on
//! - `server` - Local HTTP servers
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Spotify wire types and table rows
//!
//! # Example
//!
//! ```
//! use chatlist::links;
//!
//! let records = links::extract_unique("[01/01/2024, 10:00:00] A: https://open.spotify.com/track/1");
//! assert_eq!(records.len(), 1);
//! ```

pub mod api;
pub mod apple_music;
pub mod cli;
pub mod config;
mod error;
pub mod links;
pub mod management;
pub mod matching;
pub mod playlist;
pub mod ports;
pub mod server;
pub mod spotify;
pub mod types;

pub use error::{Error, Result};

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Searching Spotify for track: {} by {}", track, artist);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only the CLI layer uses this. Library code returns errors instead, since a
/// failing item inside a batch must never take the whole process down.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues: low-confidence matches, a single failed
/// lookup, an album the catalog rejected.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
