//! Command implementations behind the `chatlist` binary.
//!
//! Each command prints its progress with the crate's console macros and
//! exits through [`error!`](crate::error) on failures it cannot recover
//! from. Per-link problems are reported and skipped.

use std::{sync::Arc, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    apple_music::AppleMusicResolver, config, error, matching::Matcher, spotify::SpotifyClient,
};

mod auth;
mod extract;
mod matches;
mod playlist;
mod serve;

pub use auth::auth;
pub use extract::extract;
pub use matches::match_links;
pub use playlist::{DEFAULT_PLAYLIST_DESCRIPTION, DEFAULT_PLAYLIST_NAME, PlaylistArgs, playlist};
pub use serve::serve;

pub(crate) async fn spotify_client() -> Arc<SpotifyClient> {
    match SpotifyClient::load().await {
        Ok(client) => Arc::new(client),
        Err(e) => error!("{}", e),
    }
}

pub(crate) fn build_matcher(client: Arc<SpotifyClient>) -> Matcher {
    let resolver = match AppleMusicResolver::new() {
        Ok(resolver) => resolver,
        Err(e) => error!("Cannot set up Apple Music client: {}", e),
    };

    Matcher::new(client, Arc::new(resolver))
        .with_concurrency(config::match_concurrency())
        .with_timeout(config::request_timeout())
}

pub(crate) fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

pub(crate) fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) =
        ProgressStyle::with_template("{spinner:.blue} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("=> ").tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
