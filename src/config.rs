//! Configuration management for chatlist.
//!
//! Values come from environment variables and a `.env` file in the local data
//! directory. The lookup order is:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)
//!
//! Only the Spotify client ID has no default. Everything else falls back to
//! the public Spotify endpoints and local addresses.

use std::{env, path::PathBuf, str::FromStr, time::Duration};

use crate::{Error, Result};

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
pub const DEFAULT_API_ADDRESS: &str = "127.0.0.1:5000";
pub const DEFAULT_MATCH_CONCURRENCY: usize = 4;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PLAYLIST_CAPACITY: usize = 150;

/// Root of everything chatlist keeps on disk.
///
/// - Linux: `~/.local/share/chatlist`
/// - macOS: `~/Library/Application Support/chatlist`
/// - Windows: `%LOCALAPPDATA%/chatlist`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("chatlist");
    path
}

/// Loads `.env` from the local data directory into the process environment.
///
/// Creates the directory if needed. A missing `.env` file is not an error;
/// variables already set in the environment are never overridden.
///
/// # Example
///
/// ```
/// use chatlist::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<()> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path)
            .map_err(|e| Error::InvalidInput(format!("{}: {}", path.display(), e)))?;
    }
    Ok(())
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parsed_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Address of the local OAuth callback server.
pub fn server_addr() -> String {
    var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Address the HTTP API listens on.
pub fn api_addr() -> String {
    var_or("API_ADDRESS", DEFAULT_API_ADDRESS)
}

/// Spotify user that owns created playlists. When unset, the user behind the
/// current token is used.
pub fn spotify_user() -> Option<String> {
    env::var("SPOTIFY_USER_ID")
        .ok()
        .filter(|v| !v.trim().is_empty())
}

pub fn spotify_client_id() -> Result<String> {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(Error::MissingConfig("SPOTIFY_API_AUTH_CLIENT_ID"))
}

pub fn spotify_redirect_uri() -> String {
    var_or(
        "SPOTIFY_API_REDIRECT_URI",
        &format!("http://{}/callback", server_addr()),
    )
}

pub fn spotify_scope() -> String {
    var_or(
        "SPOTIFY_API_AUTH_SCOPE",
        "playlist-modify-public playlist-modify-private",
    )
}

pub fn spotify_apiauth_url() -> String {
    var_or(
        "SPOTIFY_API_AUTH_URL",
        "https://accounts.spotify.com/authorize",
    )
}

pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", "https://api.spotify.com/v1")
}

pub fn spotify_apitoken_url() -> String {
    var_or(
        "SPOTIFY_API_TOKEN_URL",
        "https://accounts.spotify.com/api/token",
    )
}

/// How many links are matched at the same time.
pub fn match_concurrency() -> usize {
    parsed_or("MATCH_CONCURRENCY", DEFAULT_MATCH_CONCURRENCY).max(1)
}

/// Upper bound for any single outbound request.
pub fn request_timeout() -> Duration {
    Duration::from_secs(parsed_or(
        "REQUEST_TIMEOUT_SECS",
        DEFAULT_REQUEST_TIMEOUT_SECS,
    ))
}

/// Weighted items per playlist (a track counts 1, an album 10).
pub fn playlist_capacity() -> usize {
    parsed_or("PLAYLIST_CAPACITY", DEFAULT_PLAYLIST_CAPACITY)
}
