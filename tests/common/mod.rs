#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use chatlist::{
    Error, Result,
    ports::{
        CatalogItem, CatalogSearch, CreatedPlaylist, MetadataResolver, PlaylistService,
        SearchKind, TrackInfo,
    },
};

// Helper function to create a catalog item
pub fn item(id: &str, name: &str, artist: &str) -> CatalogItem {
    CatalogItem {
        id: id.to_string(),
        name: name.to_string(),
        artists: vec![artist.to_string()],
        url: format!("https://open.spotify.com/x/{}", id),
    }
}

pub fn song(url: &str, title: &str, artist: &str) -> TrackInfo {
    TrackInfo {
        source_url: url.to_string(),
        is_album: false,
        title: Some(title.to_string()),
        artist: Some(artist.to_string()),
        album: None,
    }
}

pub fn album(url: &str, title: &str, artist: &str) -> TrackInfo {
    TrackInfo {
        source_url: url.to_string(),
        is_album: true,
        title: Some(title.to_string()),
        artist: Some(artist.to_string()),
        album: None,
    }
}

/// Catalog answering from canned results and recording every call.
#[derive(Default)]
pub struct FakeCatalog {
    pub results: HashMap<String, Vec<CatalogItem>>,
    pub album_tracks: HashMap<String, Vec<CatalogItem>>,
    pub artist_albums: HashMap<String, Vec<CatalogItem>>,
    pub failing_queries: Vec<String>,
    pub delay: Option<Duration>,
    pub retry_pause: Option<Duration>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, query: &str, items: Vec<CatalogItem>) -> Self {
        self.results.insert(query.to_string(), items);
        self
    }

    pub fn with_album_tracks(mut self, album_id: &str, items: Vec<CatalogItem>) -> Self {
        self.album_tracks.insert(album_id.to_string(), items);
        self
    }

    pub fn with_artist_albums(mut self, artist_id: &str, items: Vec<CatalogItem>) -> Self {
        self.artist_albums.insert(artist_id.to_string(), items);
        self
    }

    pub fn failing(mut self, query: &str) -> Self {
        self.failing_queries.push(query.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every search first waits `pause` as if a rate-limited attempt was
    /// retried, then answers. The retry budget covers two such pauses.
    pub fn with_retry_pause(mut self, pause: Duration) -> Self {
        self.retry_pause = Some(pause);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait::async_trait]
impl CatalogSearch for FakeCatalog {
    async fn search(&self, query: &str, kind: SearchKind, limit: u32) -> Result<Vec<CatalogItem>> {
        self.record(format!("search {} {} {}", kind.as_str(), limit, query));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(pause) = self.retry_pause {
            tokio::time::sleep(pause).await;
        }
        if self.failing_queries.iter().any(|q| q == query) {
            return Err(Error::InvalidInput(format!("search failed: {}", query)));
        }
        let mut items = self.results.get(query).cloned().unwrap_or_default();
        items.truncate(limit as usize);
        Ok(items)
    }

    async fn album_tracks(&self, album_id: &str) -> Result<Vec<CatalogItem>> {
        self.record(format!("album_tracks {}", album_id));
        Ok(self.album_tracks.get(album_id).cloned().unwrap_or_default())
    }

    async fn artist_albums(&self, artist_id: &str, limit: u32) -> Result<Vec<CatalogItem>> {
        self.record(format!("artist_albums {} {}", artist_id, limit));
        let mut items = self.artist_albums.get(artist_id).cloned().unwrap_or_default();
        items.truncate(limit as usize);
        Ok(items)
    }

    fn retry_budget(&self, attempt_timeout: Duration) -> Duration {
        match self.retry_pause {
            Some(pause) => attempt_timeout + pause * 2,
            None => attempt_timeout,
        }
    }
}

/// Resolver answering from a map; unknown URLs fail like a transport error.
#[derive(Default)]
pub struct FakeResolver {
    pub pages: HashMap<String, TrackInfo>,
    pub delays: HashMap<String, Duration>,
    pub calls: AtomicUsize,
}

impl FakeResolver {
    pub fn new(infos: Vec<TrackInfo>) -> Self {
        Self {
            pages: infos
                .into_iter()
                .map(|info| (info.source_url.clone(), info))
                .collect(),
            ..Default::default()
        }
    }

    pub fn with_delay(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self
    }
}

#[async_trait::async_trait]
impl MetadataResolver for FakeResolver {
    async fn resolve(&self, url: &str) -> Result<TrackInfo> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| Error::InvalidInput(format!("unreachable: {}", url)))
    }
}

/// Playlist service remembering every chunk it was asked to create.
#[derive(Default)]
pub struct FakePlaylists {
    pub rejected_albums: Vec<String>,
    pub created: Mutex<Vec<(String, Vec<String>, Vec<String>)>>,
}

impl FakePlaylists {
    pub fn rejecting(albums: &[&str]) -> Self {
        Self {
            rejected_albums: albums.iter().map(|a| a.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn created(&self) -> Vec<(String, Vec<String>, Vec<String>)> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl PlaylistService for FakePlaylists {
    async fn create_playlist(
        &self,
        name: &str,
        _description: &str,
        track_ids: &[String],
        album_ids: &[String],
    ) -> Result<CreatedPlaylist> {
        let mut created = self.created.lock().unwrap();
        created.push((name.to_string(), track_ids.to_vec(), album_ids.to_vec()));
        let id = format!("pl{}", created.len());

        Ok(CreatedPlaylist {
            url: format!("https://open.spotify.com/playlist/{}", id),
            id,
            name: name.to_string(),
            rejected_album_ids: album_ids
                .iter()
                .filter(|a| self.rejected_albums.contains(a))
                .cloned()
                .collect(),
        })
    }
}
