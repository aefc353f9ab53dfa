use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio::{sync::Mutex, time::sleep};

use crate::{
    Error, Result, config, info,
    management::TokenManager,
    ports::{CatalogItem, CatalogSearch, CreatedPlaylist, PlaylistService, SearchKind},
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, Album, CreatePlaylistRequest,
        CreatePlaylistResponse, CurrentUser, Paging, SearchResponse, Track,
    },
    warning,
};

const MAX_ATTEMPTS: u32 = 3;
const BAD_GATEWAY_DELAY: Duration = Duration::from_secs(10);
const MAX_RETRY_AFTER: u64 = 120;
/// Items per "add to playlist" request.
const BATCH_SIZE: usize = 100;
const ALBUM_TRACKS_PAGE: u32 = 50;

/// Spotify Web API client backing both catalog search and playlist creation.
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    tokens: Mutex<TokenManager>,
    user_id: Mutex<Option<String>>,
}

impl SpotifyClient {
    pub fn new(tokens: TokenManager) -> Result<Self> {
        let http = Client::builder()
            .timeout(config::request_timeout())
            .build()?;

        Ok(Self {
            http,
            api_url: config::spotify_apiurl(),
            tokens: Mutex::new(tokens),
            user_id: Mutex::new(config::spotify_user()),
        })
    }

    /// Client for the cached token; fails when `chatlist auth` was never run.
    pub async fn load() -> Result<Self> {
        let tokens = TokenManager::load().await.map_err(|e| {
            Error::Auth(format!(
                "failed to load token, please run chatlist auth ({})",
                e
            ))
        })?;
        Self::new(tokens)
    }

    /// Sends the request built by `build`, retrying 502 and 429 replies.
    ///
    /// A 429 is retried only when `Retry-After` is at most two minutes.
    /// Any other non-success status becomes [`Error::Status`].
    async fn send<F>(&self, build: F) -> Result<Response>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let mut attempt = 1;
        loop {
            let token = self.tokens.lock().await.get_valid_token().await?;
            let response = build(&self.http).bearer_auth(token).send().await?;
            let status = response.status();

            if status.is_success() {
                return Ok(response);
            }

            if attempt < MAX_ATTEMPTS {
                match status {
                    StatusCode::BAD_GATEWAY => {
                        sleep(BAD_GATEWAY_DELAY).await;
                        attempt += 1;
                        continue;
                    }
                    StatusCode::TOO_MANY_REQUESTS => {
                        let retry_after = retry_after_secs(&response);
                        if retry_after <= MAX_RETRY_AFTER {
                            sleep(Duration::from_secs(retry_after)).await;
                            attempt += 1;
                            continue;
                        }
                        warning!(
                            "Retry after has reached an abnormal high of {} seconds. Try again later.",
                            retry_after
                        );
                    }
                    _ => {}
                }
            }

            let body = response.text().await.unwrap_or_default();
            return Err(Error::Status { status, body });
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> Result<T> {
        let response = self.send(|http| http.get(url).query(query)).await?;
        Ok(response.json::<T>().await?)
    }

    async fn current_user_id(&self) -> Result<String> {
        let mut user_id = self.user_id.lock().await;
        if let Some(id) = user_id.as_ref() {
            return Ok(id.clone());
        }

        let me: CurrentUser = self
            .get_json(&format!("{}/me", self.api_url), &[])
            .await?;
        *user_id = Some(me.id.clone());
        Ok(me.id)
    }

    /// All tracks of an album, following pagination.
    async fn album_track_list(&self, album_id: &str) -> Result<Vec<Track>> {
        let mut tracks = Vec::new();
        let mut page: Paging<Track> = self
            .get_json(
                &format!("{}/albums/{}/tracks", self.api_url, album_id),
                &[("limit", ALBUM_TRACKS_PAGE.to_string())],
            )
            .await?;

        loop {
            tracks.append(&mut page.items);
            match page.next.take() {
                Some(next) => page = self.get_json(&next, &[]).await?,
                None => break,
            }
        }

        Ok(tracks)
    }

    async fn add_items(&self, playlist_id: &str, uris: &[String], what: &str) {
        let url = format!("{}/playlists/{}/tracks", self.api_url, playlist_id);

        for (i, batch) in uris.chunks(BATCH_SIZE).enumerate() {
            let body = AddTrackToPlaylistRequest {
                uris: batch.to_vec(),
            };
            let result = self.send(|http| http.post(&url).json(&body)).await;

            match result {
                Ok(response) => {
                    if let Err(e) = response.json::<AddTrackToPlaylistResponse>().await {
                        warning!("Unexpected reply while adding {}: {}", what, e);
                    }
                    info!("Added {} {} to playlist (batch {})", batch.len(), what, i + 1);
                }
                Err(e) => warning!("Error adding {} to playlist: {}", what, e),
            }
        }
    }
}

/// Longest a [`SpotifyClient::send`] call can run: every attempt times out
/// and every retry waits the longest allowed pause.
pub fn retry_budget(attempt_timeout: Duration) -> Duration {
    let pause = BAD_GATEWAY_DELAY.max(Duration::from_secs(MAX_RETRY_AFTER));
    attempt_timeout * MAX_ATTEMPTS + pause * (MAX_ATTEMPTS - 1)
}

fn retry_after_secs(response: &Response) -> u64 {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(0)
}

#[async_trait::async_trait]
impl CatalogSearch for SpotifyClient {
    async fn search(&self, query: &str, kind: SearchKind, limit: u32) -> Result<Vec<CatalogItem>> {
        let response: SearchResponse = self
            .get_json(
                &format!("{}/search", self.api_url),
                &[
                    ("q", query.to_string()),
                    ("type", kind.as_str().to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;

        let items = match kind {
            SearchKind::Track => response
                .tracks
                .map(|p| p.items.iter().map(CatalogItem::from).collect()),
            SearchKind::Album => response
                .albums
                .map(|p| p.items.iter().map(CatalogItem::from).collect()),
            SearchKind::Artist => response
                .artists
                .map(|p| p.items.iter().map(CatalogItem::from).collect()),
        };

        Ok(items.unwrap_or_default())
    }

    async fn album_tracks(&self, album_id: &str) -> Result<Vec<CatalogItem>> {
        let tracks = self.album_track_list(album_id).await?;
        Ok(tracks.iter().map(CatalogItem::from).collect())
    }

    async fn artist_albums(&self, artist_id: &str, limit: u32) -> Result<Vec<CatalogItem>> {
        let page: Paging<Album> = self
            .get_json(
                &format!("{}/artists/{}/albums", self.api_url, artist_id),
                &[("limit", limit.to_string())],
            )
            .await?;
        Ok(page.items.iter().map(CatalogItem::from).collect())
    }

    fn retry_budget(&self, attempt_timeout: Duration) -> Duration {
        retry_budget(attempt_timeout)
    }
}

#[async_trait::async_trait]
impl PlaylistService for SpotifyClient {
    async fn create_playlist(
        &self,
        name: &str,
        description: &str,
        track_ids: &[String],
        album_ids: &[String],
    ) -> Result<CreatedPlaylist> {
        let user_id = self.current_user_id().await?;
        let request = CreatePlaylistRequest {
            name: name.to_string(),
            description: description.to_string(),
            public: true,
            collaborative: false,
        };

        let url = format!("{}/users/{}/playlists", self.api_url, user_id);
        let response = self.send(|http| http.post(&url).json(&request)).await?;
        let playlist = response.json::<CreatePlaylistResponse>().await?;
        info!("Created playlist: {} (ID: {})", playlist.name, playlist.id);

        let track_uris: Vec<String> = track_ids
            .iter()
            .map(|id| format!("spotify:track:{}", id))
            .collect();
        self.add_items(&playlist.id, &track_uris, "tracks").await;

        let mut album_uris = Vec::new();
        let mut rejected_album_ids = Vec::new();
        for album_id in album_ids {
            match self.album_track_list(album_id).await {
                Ok(tracks) => {
                    info!("Found {} tracks in album {}", tracks.len(), album_id);
                    album_uris.extend(tracks.into_iter().map(|t| t.uri));
                }
                Err(e) if e.is_not_found() => {
                    warning!("Album {} does not exist in the catalog", album_id);
                    rejected_album_ids.push(album_id.clone());
                }
                Err(e) => warning!("Error getting tracks from album {}: {}", album_id, e),
            }
        }
        self.add_items(&playlist.id, &album_uris, "album tracks").await;

        let url = if playlist.external_urls.spotify.is_empty() {
            format!("https://open.spotify.com/playlist/{}", playlist.id)
        } else {
            playlist.external_urls.spotify
        };

        Ok(CreatedPlaylist {
            id: playlist.id,
            name: playlist.name,
            url,
            rejected_album_ids,
        })
    }
}
