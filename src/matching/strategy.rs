use serde::{Deserialize, Serialize};

use super::verify::Verifier;
use crate::{
    info,
    links::ItemKind,
    ports::{CatalogItem, CatalogSearch, SearchKind, TrackInfo},
    warning,
};

const TRACK_STRICT_LIMIT: u32 = 5;
const TRACK_FALLBACK_LIMIT: u32 = 3;
const ALBUM_LIMIT: u32 = 3;
const ARTIST_LIMIT: u32 = 1;
const ARTIST_ALBUMS_LIMIT: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Low,
}

/// A catalog item accepted as the equivalent of a shared link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub catalog_id: String,
    pub display_name: String,
    pub artist: String,
    pub url: String,
    pub is_album: bool,
    pub confidence: Confidence,
    /// First track of a matched album.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_track_id: Option<String>,
}

impl MatchResult {
    fn track(item: &CatalogItem, confidence: Confidence) -> Self {
        Self {
            catalog_id: item.id.clone(),
            display_name: item.name.clone(),
            artist: item.primary_artist().to_string(),
            url: item.url.clone(),
            is_album: false,
            confidence,
            first_track_id: None,
        }
    }

    fn album(item: &CatalogItem, first_track: &CatalogItem, confidence: Confidence) -> Self {
        Self {
            catalog_id: item.id.clone(),
            display_name: item.name.clone(),
            artist: item.primary_artist().to_string(),
            url: item.url.clone(),
            is_album: true,
            confidence,
            first_track_id: Some(first_track.id.clone()),
        }
    }

    pub fn kind(&self) -> ItemKind {
        if self.is_album {
            ItemKind::Album
        } else {
            ItemKind::Track
        }
    }

    pub fn is_low_confidence(&self) -> bool {
        self.confidence == Confidence::Low
    }
}

/// Terminal state of a single item's search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MatchOutcome {
    Matched(MatchResult),
    NotFound,
    /// Name or artist missing; no search was made.
    InsufficientInfo,
    Failed { error: String },
}

impl MatchOutcome {
    pub fn matched(&self) -> Option<&MatchResult> {
        match self {
            MatchOutcome::Matched(result) => Some(result),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchOutcome::Matched(result) if result.is_low_confidence() => "low confidence",
            MatchOutcome::Matched(_) => "high confidence",
            MatchOutcome::NotFound => "not found",
            MatchOutcome::InsufficientInfo => "insufficient info",
            MatchOutcome::Failed { .. } => "failed",
        }
    }
}

/// Tiered catalog search for one kind of source item.
///
/// Each variant issues progressively looser queries and stops at the first
/// acceptable candidate. Anything accepted below the strictest tier is
/// tagged [`Confidence::Low`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStrategy {
    Track,
    Album,
}

impl SearchStrategy {
    pub fn for_info(info: &TrackInfo) -> Self {
        if info.is_album {
            SearchStrategy::Album
        } else {
            SearchStrategy::Track
        }
    }

    /// The (name, artist) pair the tiers search with, if both are present.
    pub fn query_fields<'a>(&self, info: &'a TrackInfo) -> Option<(&'a str, &'a str)> {
        let name = match self {
            SearchStrategy::Track => info.title.as_deref(),
            SearchStrategy::Album => info.title.as_deref().or(info.album.as_deref()),
        };
        let name = name.map(str::trim).filter(|n| !n.is_empty())?;
        let artist = info.artist.as_deref().map(str::trim).filter(|a| !a.is_empty())?;
        Some((name, artist))
    }

    /// Runs the tiers for `info`. Catalog errors end the item as
    /// [`MatchOutcome::Failed`]; they never escape.
    pub async fn run(
        &self,
        catalog: &dyn CatalogSearch,
        verifier: &Verifier,
        info: &TrackInfo,
    ) -> MatchOutcome {
        let Some((name, artist)) = self.query_fields(info) else {
            warning!(
                "Insufficient info to search Spotify effectively for: {}",
                info.source_url
            );
            return MatchOutcome::InsufficientInfo;
        };

        let result = match self {
            SearchStrategy::Track => {
                find_track(catalog, verifier, name, artist, info.album.as_deref()).await
            }
            SearchStrategy::Album => find_album(catalog, verifier, name, artist).await,
        };

        match result {
            Ok(Some(found)) => MatchOutcome::Matched(found),
            Ok(None) => {
                warning!("No Spotify {} found for {}", self.noun(), info.source_url);
                MatchOutcome::NotFound
            }
            Err(e) => {
                warning!("Error searching Spotify for {}: {}", info.source_url, e);
                MatchOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    fn noun(&self) -> &'static str {
        match self {
            SearchStrategy::Track => "track",
            SearchStrategy::Album => "album",
        }
    }
}

async fn find_track(
    catalog: &dyn CatalogSearch,
    verifier: &Verifier,
    name: &str,
    artist: &str,
    album: Option<&str>,
) -> crate::Result<Option<MatchResult>> {
    info!("Searching Spotify for track: {} by {}", name, artist);
    let results = catalog
        .search(
            &format!("track:{name} artist:{artist}"),
            SearchKind::Track,
            TRACK_STRICT_LIMIT,
        )
        .await?;

    if let Some(hit) = results.iter().find(|c| {
        verifier.track_matches(name, &c.name) && verifier.artist_matches(artist, c.primary_artist())
    }) {
        return Ok(Some(MatchResult::track(hit, Confidence::High)));
    }

    if let Some(hit) = results
        .iter()
        .find(|c| verifier.artist_matches(artist, c.primary_artist()))
    {
        warning!(
            "Low confidence match: {} by {} (artist only)",
            hit.name,
            hit.primary_artist()
        );
        return Ok(Some(MatchResult::track(hit, Confidence::Low)));
    }

    if let Some(hit) = results.first() {
        warning!(
            "Low confidence match: {} by {} - neither track nor artist match well",
            hit.name,
            hit.primary_artist()
        );
        return Ok(Some(MatchResult::track(hit, Confidence::Low)));
    }

    info!("Trying search with just track name: {}", name);
    let results = catalog
        .search(&format!("track:{name}"), SearchKind::Track, TRACK_FALLBACK_LIMIT)
        .await?;
    if let Some(hit) = results.first() {
        warning!(
            "Found with track-only search: {} by {}",
            hit.name,
            hit.primary_artist()
        );
        return Ok(Some(MatchResult::track(hit, Confidence::Low)));
    }

    let query = format!("{name} {artist}");
    info!("Trying freeform search: {}", query);
    let results = catalog
        .search(&query, SearchKind::Track, TRACK_FALLBACK_LIMIT)
        .await?;
    if let Some(hit) = results
        .first()
        .filter(|c| verifier.artist_matches(artist, c.primary_artist()))
    {
        warning!(
            "Found with freeform search: {} by {}",
            hit.name,
            hit.primary_artist()
        );
        return Ok(Some(MatchResult::track(hit, Confidence::Low)));
    }

    if let Some(album) = album.map(str::trim).filter(|a| !a.is_empty()) {
        info!("Trying search with album: {} {}", name, album);
        let results = catalog
            .search(
                &format!("{name} album:{album}"),
                SearchKind::Track,
                TRACK_FALLBACK_LIMIT,
            )
            .await?;
        if let Some(hit) = results
            .first()
            .filter(|c| verifier.artist_matches(artist, c.primary_artist()))
        {
            warning!(
                "Found with album search: {} by {}",
                hit.name,
                hit.primary_artist()
            );
            return Ok(Some(MatchResult::track(hit, Confidence::Low)));
        }
    }

    info!("No match found, trying more lenient search for: {}", name);
    let results = catalog
        .search(name, SearchKind::Track, TRACK_FALLBACK_LIMIT)
        .await?;
    if let Some(hit) = results.first() {
        warning!(
            "Found with lenient search: {} by {}",
            hit.name,
            hit.primary_artist()
        );
        return Ok(Some(MatchResult::track(hit, Confidence::Low)));
    }

    Ok(None)
}

async fn find_album(
    catalog: &dyn CatalogSearch,
    verifier: &Verifier,
    name: &str,
    artist: &str,
) -> crate::Result<Option<MatchResult>> {
    info!("Searching Spotify for album: {} by {}", name, artist);
    let results = catalog
        .search(
            &format!("album:{name} artist:{artist}"),
            SearchKind::Album,
            ALBUM_LIMIT,
        )
        .await?;

    if let Some(album) = results.first() {
        let confidence = if verifier.artist_matches(artist, album.primary_artist()) {
            Confidence::High
        } else {
            warning!(
                "Artist mismatch: {} vs {}",
                album.primary_artist(),
                artist
            );
            Confidence::Low
        };
        if let Some(found) = album_result(catalog, album, confidence).await {
            return Ok(Some(found));
        }
    }

    let query = format!("{name} {artist}");
    info!("Trying freeform album search: {}", query);
    let results = catalog.search(&query, SearchKind::Album, ALBUM_LIMIT).await?;
    if let Some(album) = results.first() {
        warning!(
            "Found with freeform search: Album '{}' by {}",
            album.name,
            album.primary_artist()
        );
        if let Some(found) = album_result(catalog, album, Confidence::Low).await {
            return Ok(Some(found));
        }
    }

    info!("Trying artist-only search for albums by: {}", artist);
    match first_album_by_artist(catalog, artist).await {
        Ok(Some(album)) => {
            warning!(
                "Found album by artist search: '{}' by {}",
                album.name,
                album.primary_artist()
            );
            if let Some(found) = album_result(catalog, &album, Confidence::Low).await {
                return Ok(Some(found));
            }
        }
        Ok(None) => {}
        Err(e) => warning!("Error in artist search: {}", e),
    }

    Ok(None)
}

async fn first_album_by_artist(
    catalog: &dyn CatalogSearch,
    artist: &str,
) -> crate::Result<Option<CatalogItem>> {
    let artists = catalog
        .search(&format!("artist:{artist}"), SearchKind::Artist, ARTIST_LIMIT)
        .await?;
    let Some(found) = artists.first() else {
        return Ok(None);
    };

    let albums = catalog.artist_albums(&found.id, ARTIST_ALBUMS_LIMIT).await?;
    Ok(albums.into_iter().next())
}

/// Album matches carry their first track; an album without one is dropped.
async fn album_result(
    catalog: &dyn CatalogSearch,
    album: &CatalogItem,
    confidence: Confidence,
) -> Option<MatchResult> {
    match catalog.album_tracks(&album.id).await {
        Ok(tracks) => match tracks.first() {
            Some(first) => Some(MatchResult::album(album, first, confidence)),
            None => {
                warning!("Album '{}' has no tracks, skipping", album.name);
                None
            }
        },
        Err(e) => {
            warning!("Error creating album result for '{}': {}", album.name, e);
            None
        }
    }
}
