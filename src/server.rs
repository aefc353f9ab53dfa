use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Extension, Router,
    routing::{get, post},
};
use tokio::sync::Mutex;

use crate::{
    Error, Result,
    api::{self, AppState},
    config, info,
    types::PkceToken,
};

/// Routes of the link API.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/api/extract-links", post(api::extract_links))
        .route("/api/process-music-links", post(api::process_music_links))
        .route(
            "/api/create-playlist-from-links",
            post(api::create_playlist_from_links),
        )
        .with_state(state)
}

/// Serves the link API on `API_ADDRESS` until the process stops.
pub async fn serve(state: AppState) -> Result<()> {
    let addr = parse_addr(&config::api_addr())?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Temporary server receiving the OAuth redirect on `SERVER_ADDRESS`.
pub async fn start_callback_server(state: Arc<Mutex<Option<PkceToken>>>) -> Result<()> {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)));

    let addr = parse_addr(&config::server_addr())?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn parse_addr(addr: &str) -> Result<SocketAddr> {
    SocketAddr::from_str(addr)
        .map_err(|e| Error::InvalidInput(format!("bad server address {}: {}", addr, e)))
}
