use std::sync::Arc;

use crate::{api::AppState, config, error, server};

pub async fn serve() {
    let client = super::spotify_client().await;
    let state = AppState {
        matcher: Arc::new(super::build_matcher(client.clone())),
        playlists: client,
        capacity: config::playlist_capacity(),
    };

    if let Err(e) = server::serve(state).await {
        error!("Server stopped: {}", e);
    }
}
