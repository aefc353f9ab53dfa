use std::sync::Arc;

use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    Error,
    links::{self, Service},
    matching::{Matcher, ProcessedLink},
    playlist::{self, AssemblyStats},
    ports::{CreatedPlaylist, PlaylistService},
    warning,
};

pub const DEFAULT_PLAYLIST_NAME: &str = "API Created Playlist";
pub const DEFAULT_PLAYLIST_DESCRIPTION: &str = "Playlist created through API";

/// Collaborators shared by the link handlers.
#[derive(Clone)]
pub struct AppState {
    pub matcher: Arc<Matcher>,
    pub playlists: Arc<dyn PlaylistService>,
    pub capacity: usize,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(Error),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError::Internal(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Internal(err) => {
                warning!("Request failed: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        (status, Json(json!({ "error": message, "success": false }))).into_response()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ContentRequest {
    #[serde(default)]
    pub content: Option<String>,
}

impl ContentRequest {
    fn into_content(self) -> Result<String, ApiError> {
        self.content
            .ok_or_else(|| ApiError::BadRequest("No content provided".to_string()))
    }
}

#[derive(Debug, Serialize)]
pub struct ExtractLinksResponse {
    pub apple_music: Vec<String>,
    pub spotify: Vec<String>,
    pub total: usize,
}

pub async fn extract_links(
    body: Result<Json<ContentRequest>, JsonRejection>,
) -> Result<Json<ExtractLinksResponse>, ApiError> {
    let Json(request) = body?;
    let content = request.into_content()?;

    let mut apple_music = Vec::new();
    let mut spotify = Vec::new();
    for record in links::extract_unique(&content) {
        match record.service {
            Service::AppleMusic => apple_music.push(record.url),
            Service::Spotify => spotify.push(record.url),
            Service::Other => {}
        }
    }

    let total = apple_music.len() + spotify.len();
    Ok(Json(ExtractLinksResponse {
        apple_music,
        spotify,
        total,
    }))
}

#[derive(Debug, Serialize)]
pub struct ProcessLinksResponse {
    pub results: Vec<ProcessedLink>,
    pub total: usize,
}

pub async fn process_music_links(
    State(state): State<AppState>,
    body: Result<Json<ContentRequest>, JsonRejection>,
) -> Result<Json<ProcessLinksResponse>, ApiError> {
    let Json(request) = body?;
    let content = request.into_content()?;

    let urls: Vec<String> = links::extract_unique(&content)
        .into_iter()
        .map(|r| r.url)
        .collect();
    let results = state.matcher.process_links(&urls).await;

    Ok(Json(ProcessLinksResponse {
        total: results.len(),
        results,
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct CreatePlaylistFromLinksRequest {
    #[serde(default)]
    pub links: Option<Vec<String>>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub capacity: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct CreatePlaylistFromLinksResponse {
    pub playlists: Vec<CreatedPlaylist>,
    pub playlist_id: Option<String>,
    pub playlist_url: Option<String>,
    pub rejected_album_ids: Vec<String>,
    pub stats: AssemblyStats,
    pub success: bool,
}

pub async fn create_playlist_from_links(
    State(state): State<AppState>,
    body: Result<Json<CreatePlaylistFromLinksRequest>, JsonRejection>,
) -> Result<Json<CreatePlaylistFromLinksResponse>, ApiError> {
    let Json(request) = body?;
    let links = request
        .links
        .ok_or_else(|| ApiError::BadRequest("No links provided".to_string()))?;
    let name = request
        .name
        .unwrap_or_else(|| DEFAULT_PLAYLIST_NAME.to_string());
    let description = request
        .description
        .unwrap_or_else(|| DEFAULT_PLAYLIST_DESCRIPTION.to_string());
    let capacity = request.capacity.unwrap_or(state.capacity);

    let report = playlist::assemble(
        &links,
        &name,
        &description,
        capacity,
        &state.matcher,
        state.playlists.as_ref(),
    )
    .await?;

    let first = report.playlists.first();
    Ok(Json(CreatePlaylistFromLinksResponse {
        playlist_id: first.map(|p| p.id.clone()),
        playlist_url: first.map(|p| p.url.clone()),
        playlists: report.playlists,
        rejected_album_ids: report.rejected_album_ids,
        stats: report.stats,
        success: true,
    }))
}
