//! HTTP API endpoints.
//!
//! - `GET /health` - liveness and version
//! - `GET /callback` - OAuth redirect target for `chatlist auth`
//! - `POST /api/extract-links` - unique Apple Music and Spotify links in a
//!   chat export
//! - `POST /api/process-music-links` - per-link metadata and Spotify
//!   equivalents for a chat export
//! - `POST /api/create-playlist-from-links` - playlists from a list of links
//!
//! Errors are returned as `{"error": "...", "success": false}` with status
//! 400 for malformed or incomplete requests and 500 otherwise.

mod callback;
mod health;
mod links;

pub use callback::callback;
pub use health::health;
pub use links::{
    ApiError, AppState, ContentRequest, CreatePlaylistFromLinksRequest,
    CreatePlaylistFromLinksResponse, DEFAULT_PLAYLIST_DESCRIPTION, DEFAULT_PLAYLIST_NAME,
    ExtractLinksResponse, ProcessLinksResponse, create_playlist_from_links, extract_links,
    process_music_links,
};
