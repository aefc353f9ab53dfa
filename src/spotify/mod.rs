//! # Spotify Integration Module
//!
//! The Spotify Web API side of chatlist.
//!
//! - [`auth`] - OAuth 2.0 PKCE login: verifier/challenge generation, the
//!   browser round trip through the local callback server, code exchange
//!   and token refresh.
//! - [`client`] - [`SpotifyClient`], the reqwest implementation of
//!   [`CatalogSearch`](crate::ports::CatalogSearch) and
//!   [`PlaylistService`](crate::ports::PlaylistService).
//!
//! ## Endpoints
//!
//! - `GET /search` - track, album and artist search
//! - `GET /albums/{id}/tracks` - album contents (paginated)
//! - `GET /artists/{id}/albums` - an artist's releases
//! - `GET /me` - owner of new playlists when `SPOTIFY_USER_ID` is unset
//! - `POST /users/{user_id}/playlists` - create a playlist
//! - `POST /playlists/{playlist_id}/tracks` - add up to 100 items per call
//!
//! ## Rate limiting
//!
//! Every call goes through one retry loop: `502 Bad Gateway` is retried
//! after a fixed delay, `429 Too Many Requests` after the `Retry-After`
//! interval when that is at most two minutes. A call is tried at most three
//! times. Tokens are refreshed four minutes before they expire.

pub mod auth;
pub mod client;

pub use client::SpotifyClient;
