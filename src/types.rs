//! Spotify Web API wire types and table rows for CLI output.
//!
//! The API types mirror only the fields chatlist reads; everything else in
//! the responses is ignored by serde.

use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::{
    links::LinkRecord,
    matching::{LinkMatch, MatchOutcome},
    ports::CatalogItem,
};

/// OAuth token as stored in the local cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// Raw token endpoint reply. `refresh_token` is omitted on some refreshes.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

/// State shared between the auth flow and the callback handler.
#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// `GET /search`; only the container matching the requested type is set.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub tracks: Option<Paging<Track>>,
    pub albums: Option<Paging<Album>>,
    pub artists: Option<Paging<Artist>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentUser {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}

impl From<&Artist> for CatalogItem {
    fn from(artist: &Artist) -> Self {
        CatalogItem {
            id: artist.id.clone(),
            name: artist.name.clone(),
            artists: vec![artist.name.clone()],
            url: artist.external_urls.spotify.clone(),
        }
    }
}

impl From<&Album> for CatalogItem {
    fn from(album: &Album) -> Self {
        CatalogItem {
            id: album.id.clone(),
            name: album.name.clone(),
            artists: album.artists.iter().map(|a| a.name.clone()).collect(),
            url: album.external_urls.spotify.clone(),
        }
    }
}

impl From<&Track> for CatalogItem {
    fn from(track: &Track) -> Self {
        CatalogItem {
            id: track.id.clone(),
            name: track.name.clone(),
            artists: track.artists.iter().map(|a| a.name.clone()).collect(),
            url: track.external_urls.spotify.clone(),
        }
    }
}

#[derive(Tabled)]
pub struct LinkTableRow {
    pub date: String,
    pub service: String,
    pub url: String,
}

impl From<&LinkRecord> for LinkTableRow {
    fn from(record: &LinkRecord) -> Self {
        Self {
            date: record.date.format("%Y-%m-%d").to_string(),
            service: record.service.to_string(),
            url: record.url.clone(),
        }
    }
}

#[derive(Tabled)]
pub struct MatchTableRow {
    pub title: String,
    pub artist: String,
    pub status: String,
    pub spotify: String,
}

impl From<&LinkMatch> for MatchTableRow {
    fn from(m: &LinkMatch) -> Self {
        let spotify = match &m.outcome {
            MatchOutcome::Matched(result) => result.url.clone(),
            MatchOutcome::Failed { error } => error.clone(),
            _ => String::new(),
        };

        Self {
            title: m.info.title.clone().unwrap_or_else(|| "-".to_string()),
            artist: m.info.artist.clone().unwrap_or_else(|| "-".to_string()),
            status: m.outcome.label().to_string(),
            spotify,
        }
    }
}
