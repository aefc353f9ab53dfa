use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::Result;

/// What a metadata lookup learned about a shared link.
///
/// Any field may be missing when the page had no structured data; that is a
/// valid answer, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackInfo {
    pub source_url: String,
    pub is_album: bool,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
}

impl TrackInfo {
    /// An empty lookup result for `url`, typed from the link's shape alone.
    pub fn from_url(url: &str) -> Self {
        Self {
            source_url: url.to_string(),
            is_album: !url.contains("i="),
            ..Default::default()
        }
    }
}

/// Which collection a catalog search runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchKind {
    Track,
    Album,
    Artist,
}

impl SearchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchKind::Track => "track",
            SearchKind::Album => "album",
            SearchKind::Artist => "artist",
        }
    }
}

/// Decoupled representation of a catalog search hit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
    pub url: String,
}

impl CatalogItem {
    pub fn primary_artist(&self) -> &str {
        self.artists.first().map(String::as_str).unwrap_or_default()
    }
}

/// A playlist created from one chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedPlaylist {
    pub id: String,
    pub name: String,
    pub url: String,
    /// Album IDs the catalog refused; the rest of the chunk was still added.
    pub rejected_album_ids: Vec<String>,
}

/// Link → metadata lookup.
#[async_trait::async_trait]
pub trait MetadataResolver: Send + Sync {
    /// Errors only on transport failure; "no data" is an empty [`TrackInfo`].
    async fn resolve(&self, url: &str) -> Result<TrackInfo>;
}

/// Port trait wrapping the catalog capabilities the matcher uses.
///
/// Implementations live in `spotify::client` (production) or test fakes.
#[async_trait::async_trait]
pub trait CatalogSearch: Send + Sync {
    async fn search(&self, query: &str, kind: SearchKind, limit: u32) -> Result<Vec<CatalogItem>>;
    async fn album_tracks(&self, album_id: &str) -> Result<Vec<CatalogItem>>;
    async fn artist_albums(&self, artist_id: &str, limit: u32) -> Result<Vec<CatalogItem>>;

    /// Time one call may take when a single attempt is allowed
    /// `attempt_timeout`. Implementations that retry internally widen it.
    fn retry_budget(&self, attempt_timeout: Duration) -> Duration {
        attempt_timeout
    }
}

/// Creates one playlist from an already chunked, deduplicated set of IDs.
#[async_trait::async_trait]
pub trait PlaylistService: Send + Sync {
    async fn create_playlist(
        &self,
        name: &str,
        description: &str,
        track_ids: &[String],
        album_ids: &[String],
    ) -> Result<CreatedPlaylist>;
}
