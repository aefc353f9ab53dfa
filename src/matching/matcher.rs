use std::{future::Future, sync::Arc, time::Duration};

use futures::{StreamExt, stream};
use serde::{Deserialize, Serialize};

use super::{
    strategy::{Confidence, MatchOutcome, SearchStrategy},
    verify::Verifier,
};
use crate::{
    Error, Result,
    links::{self, Service},
    ports::{CatalogItem, CatalogSearch, MetadataResolver, SearchKind, TrackInfo},
};

pub const DEFAULT_CONCURRENCY: usize = 4;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Outcome of matching one Apple Music link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkMatch {
    pub source_url: String,
    pub info: TrackInfo,
    pub outcome: MatchOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkStatus {
    Matched,
    NotFound,
    InsufficientInfo,
    Failed,
    /// Already a Spotify link; nothing to search for.
    Passthrough,
    Unsupported,
}

/// Per-link report for a mixed list of links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedLink {
    pub original_link: String,
    pub platform: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub apple_music_link: Option<String>,
    pub spotify_link: Option<String>,
    pub confidence: Option<Confidence>,
    pub status: LinkStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProcessedLink {
    fn passthrough(link: &str) -> Self {
        Self {
            original_link: link.to_string(),
            platform: Service::Spotify.label().to_string(),
            kind: links::spotify_ref(link).map(|(kind, _)| kind.label().to_string()),
            title: None,
            artist: None,
            album: None,
            apple_music_link: None,
            spotify_link: Some(link.to_string()),
            confidence: None,
            status: LinkStatus::Passthrough,
            error: None,
        }
    }

    fn unsupported(link: &str) -> Self {
        Self {
            original_link: link.to_string(),
            platform: Service::Other.label().to_string(),
            kind: None,
            title: None,
            artist: None,
            album: None,
            apple_music_link: None,
            spotify_link: None,
            confidence: None,
            status: LinkStatus::Unsupported,
            error: None,
        }
    }
}

impl From<LinkMatch> for ProcessedLink {
    fn from(m: LinkMatch) -> Self {
        let (status, spotify_link, confidence, error) = match m.outcome {
            MatchOutcome::Matched(result) => (
                LinkStatus::Matched,
                Some(result.url),
                Some(result.confidence),
                None,
            ),
            MatchOutcome::NotFound => (LinkStatus::NotFound, None, None, None),
            MatchOutcome::InsufficientInfo => (LinkStatus::InsufficientInfo, None, None, None),
            MatchOutcome::Failed { error } => (LinkStatus::Failed, None, None, Some(error)),
        };

        Self {
            original_link: m.source_url.clone(),
            platform: Service::AppleMusic.label().to_string(),
            kind: Some(if m.info.is_album { "album" } else { "song" }.to_string()),
            title: m.info.title,
            artist: m.info.artist,
            album: m.info.album,
            apple_music_link: Some(m.source_url),
            spotify_link,
            confidence,
            status,
            error,
        }
    }
}

/// Resolves Apple Music links and finds their catalog equivalents.
///
/// Items run independently: at most `concurrency` at a time, each external
/// call bounded by `timeout` (widened by the catalog's retry budget),
/// results in input order. A failing item is
/// reported on its own and never stops the batch.
pub struct Matcher {
    catalog: Arc<dyn CatalogSearch>,
    resolver: Arc<dyn MetadataResolver>,
    verifier: Verifier,
    concurrency: usize,
    timeout: Duration,
}

impl Matcher {
    pub fn new(catalog: Arc<dyn CatalogSearch>, resolver: Arc<dyn MetadataResolver>) -> Self {
        Self {
            catalog,
            resolver,
            verifier: Verifier::default(),
            concurrency: DEFAULT_CONCURRENCY,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_verifier(mut self, verifier: Verifier) -> Self {
        self.verifier = verifier;
        self
    }

    pub async fn match_link(&self, url: &str) -> LinkMatch {
        let info = match bounded(self.timeout, self.resolver.resolve(url)).await {
            Ok(info) => info,
            Err(e) => {
                crate::warning!("Error fetching Apple Music track info for {}: {}", url, e);
                return LinkMatch {
                    source_url: url.to_string(),
                    info: TrackInfo::from_url(url),
                    outcome: MatchOutcome::Failed {
                        error: e.to_string(),
                    },
                };
            }
        };

        let catalog = TimedCatalog {
            inner: self.catalog.as_ref(),
            budget: self.catalog.retry_budget(self.timeout),
        };
        let outcome = SearchStrategy::for_info(&info)
            .run(&catalog, &self.verifier, &info)
            .await;

        LinkMatch {
            source_url: url.to_string(),
            info,
            outcome,
        }
    }

    pub async fn match_links<S: AsRef<str>>(&self, urls: &[S]) -> Vec<LinkMatch> {
        self.match_links_with(urls, |_| {}).await
    }

    /// [`Matcher::match_links`] calling `on_each` as every item finishes.
    pub async fn match_links_with<S, F>(&self, urls: &[S], on_each: F) -> Vec<LinkMatch>
    where
        S: AsRef<str>,
        F: Fn(&LinkMatch),
    {
        let urls: Vec<String> = urls.iter().map(|url| url.as_ref().to_owned()).collect();

        stream::iter(urls)
            .map(|url| async move { self.match_link(&url).await })
            .buffered(self.concurrency)
            .map(|m| {
                on_each(&m);
                m
            })
            .collect()
            .await
    }

    /// One report per input link, in input order. Apple Music links are
    /// matched, Spotify links pass through, anything else is unsupported.
    pub async fn process_links<S: AsRef<str>>(&self, urls: &[S]) -> Vec<ProcessedLink> {
        let classified = links::classify(urls);
        let mut matches = self.match_links(&classified.apple_music).await.into_iter();

        urls.iter()
            .map(|url| {
                let url = url.as_ref();
                match Service::from_url(url) {
                    Service::AppleMusic => matches
                        .next()
                        .map(ProcessedLink::from)
                        .unwrap_or_else(|| ProcessedLink::unsupported(url)),
                    Service::Spotify => ProcessedLink::passthrough(url),
                    Service::Other => ProcessedLink::unsupported(url),
                }
            })
            .collect()
    }
}

async fn bounded<T>(limit: Duration, call: impl Future<Output = Result<T>>) -> Result<T> {
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| Error::Timeout(limit.as_secs()))?
}

/// Bounds every catalog request of one item, retries included.
struct TimedCatalog<'a> {
    inner: &'a dyn CatalogSearch,
    budget: Duration,
}

#[async_trait::async_trait]
impl CatalogSearch for TimedCatalog<'_> {
    async fn search(&self, query: &str, kind: SearchKind, limit: u32) -> Result<Vec<CatalogItem>> {
        bounded(self.budget, self.inner.search(query, kind, limit)).await
    }

    async fn album_tracks(&self, album_id: &str) -> Result<Vec<CatalogItem>> {
        bounded(self.budget, self.inner.album_tracks(album_id)).await
    }

    async fn artist_albums(&self, artist_id: &str, limit: u32) -> Result<Vec<CatalogItem>> {
        bounded(self.budget, self.inner.artist_albums(artist_id, limit)).await
    }
}
