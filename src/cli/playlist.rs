use crate::{
    error, info, links,
    management::MatchManager,
    matching::LinkMatch,
    playlist::{self, PlaylistPlan},
    success, warning,
};

pub const DEFAULT_PLAYLIST_NAME: &str = "My Collection Playlist";
pub const DEFAULT_PLAYLIST_DESCRIPTION: &str = "Playlist created from my music collection";

#[derive(Debug, Clone)]
pub struct PlaylistArgs {
    pub name: String,
    pub description: String,
    pub capacity: usize,
    pub dry_run: bool,
    pub prune_rejected: bool,
}

pub async fn playlist(args: PlaylistArgs) {
    let urls = super::matches::load_links(None).await;
    let apple_music = links::classify(&urls).apple_music;

    let mut cached: Vec<LinkMatch> = match MatchManager::load().await {
        Ok(mgr) => mgr.get_matches().to_vec(),
        Err(_) => Vec::new(),
    };
    cached.retain(|m| apple_music.contains(&m.source_url));

    let missing: Vec<String> = apple_music
        .iter()
        .filter(|url| !cached.iter().any(|m| &m.source_url == *url))
        .cloned()
        .collect();

    let client = if missing.is_empty() && args.dry_run {
        None
    } else {
        Some(super::spotify_client().await)
    };

    if let (false, Some(client)) = (missing.is_empty(), &client) {
        info!("Matching {} Apple Music links not matched yet", missing.len());
        let matcher = super::build_matcher(client.clone());
        let pb = super::progress_bar(missing.len());
        let fresh = matcher
            .match_links_with(&missing, |m| {
                pb.set_message(m.outcome.label());
                pb.inc(1);
            })
            .await;
        pb.finish_and_clear();
        super::matches::report(&fresh);
        cached.extend(fresh);

        if let Err(e) = MatchManager::new(cached.clone()).persist().await {
            warning!("Failed to save matches to cache: {}", e);
        }
    }

    let plan = playlist::plan_from_matches(&urls, &cached, args.capacity);
    print_plan(&plan);

    let Some(client) = client.filter(|_| !args.dry_run) else {
        return;
    };

    let pb = super::spinner("Creating playlists...");
    let report = playlist::create(&plan, &args.name, &args.description, client.as_ref()).await;
    pb.finish_and_clear();

    let report = match report {
        Ok(report) => report,
        Err(e) => error!("Failed to create playlist: {}", e),
    };

    for created in &report.playlists {
        success!("{}: {}", created.name, created.url);
    }

    if report.rejected_album_ids.is_empty() {
        return;
    }

    warning!(
        "Found {} invalid album IDs:",
        report.rejected_album_ids.len()
    );
    for album_id in &report.rejected_album_ids {
        warning!("- {}", album_id);
    }

    if args.prune_rejected {
        let mut mgr = MatchManager::new(cached);
        let removed = mgr.remove_albums(&report.rejected_album_ids);
        match mgr.persist().await {
            Ok(()) => info!("Removed {} rejected albums from the match cache", removed),
            Err(e) => warning!("Failed to save matches to cache: {}", e),
        }
    }
}

fn print_plan(plan: &PlaylistPlan) {
    let stats = &plan.stats;
    info!(
        "{} links: {} Spotify, {} Apple Music ({} matched), {} other",
        stats.total_links,
        stats.spotify_links,
        stats.apple_music_links,
        stats.matched_apple_music,
        stats.other_links
    );

    for (kind, count) in playlist::kind_counts(&plan.ids) {
        if count > 0 {
            info!("{}s: {}", kind.label(), count);
        }
    }

    let total = plan.chunks.len();
    for (i, part) in plan.chunks.iter().enumerate() {
        info!(
            "Part {}/{}: {} tracks, {} albums",
            i + 1,
            total,
            part.tracks.len(),
            part.albums.len()
        );
    }
}
