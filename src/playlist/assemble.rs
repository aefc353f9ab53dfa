use serde::{Deserialize, Serialize};

use super::chunker::{PlaylistChunk, chunk};
use crate::{
    Error, Result,
    links::{self, IdSet, ItemKind},
    matching::{LinkMatch, Matcher},
    ports::{CreatedPlaylist, PlaylistService},
    success, warning,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyStats {
    pub total_links: usize,
    pub spotify_links: usize,
    pub apple_music_links: usize,
    pub other_links: usize,
    pub matched_apple_music: usize,
    pub total_tracks: usize,
    pub total_albums: usize,
}

/// Everything decided before any playlist is created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistPlan {
    pub ids: IdSet,
    pub chunks: Vec<PlaylistChunk>,
    pub stats: AssemblyStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyReport {
    pub playlists: Vec<CreatedPlaylist>,
    pub rejected_album_ids: Vec<String>,
    pub stats: AssemblyStats,
}

/// IDs of every matched item, tracks and albums in match order.
pub fn collect_ids(matches: &[LinkMatch]) -> IdSet {
    let mut ids = IdSet::new();
    for result in matches.iter().filter_map(|m| m.outcome.matched()) {
        ids.add(result.kind(), result.catalog_id.clone());
    }
    ids
}

/// Builds the plan from `links` and the matches already made for their
/// Apple Music links. Spotify IDs come first, matched IDs after them.
pub fn plan_from_matches<S: AsRef<str>>(
    links: &[S],
    matches: &[LinkMatch],
    capacity: usize,
) -> PlaylistPlan {
    let classified = links::classify(links);
    let matched = collect_ids(matches);
    let ids = links::spotify_ids(&classified.spotify).union(matched.clone());

    let stats = AssemblyStats {
        total_links: classified.total(),
        spotify_links: classified.spotify.len(),
        apple_music_links: classified.apple_music.len(),
        other_links: classified.other.len(),
        matched_apple_music: matched.tracks.len() + matched.albums.len(),
        total_tracks: ids.tracks.len(),
        total_albums: ids.albums.len(),
    };

    PlaylistPlan {
        chunks: chunk(&ids, capacity),
        ids,
        stats,
    }
}

/// Matches the Apple Music links in `links`, then plans.
pub async fn plan<S: AsRef<str>>(links: &[S], capacity: usize, matcher: &Matcher) -> PlaylistPlan {
    let classified = links::classify(links);
    let matches = matcher.match_links(&classified.apple_music).await;
    plan_from_matches(links, &matches, capacity)
}

/// Creates one playlist per chunk of `plan`.
///
/// Several chunks are named `"<name> (Part i/n)"`. Albums the catalog
/// refuses are collected in the report; they do not fail their chunk.
pub async fn create(
    plan: &PlaylistPlan,
    name: &str,
    description: &str,
    service: &dyn PlaylistService,
) -> Result<AssemblyReport> {
    if plan.chunks.is_empty() {
        return Err(Error::InvalidInput(
            "no tracks or albums to add to a playlist".to_string(),
        ));
    }

    let total = plan.chunks.len();
    let mut report = AssemblyReport {
        stats: plan.stats.clone(),
        ..Default::default()
    };

    for (i, part) in plan.chunks.iter().enumerate() {
        let part_name = if total > 1 {
            format!("{} (Part {}/{})", name, i + 1, total)
        } else {
            name.to_string()
        };

        let created = service
            .create_playlist(&part_name, description, &part.tracks, &part.albums)
            .await?;

        if !created.rejected_album_ids.is_empty() {
            warning!(
                "{} album(s) rejected for {}",
                created.rejected_album_ids.len(),
                part_name
            );
        }
        success!("Created playlist: {} ({})", created.name, created.url);

        report
            .rejected_album_ids
            .extend(created.rejected_album_ids.iter().cloned());
        report.playlists.push(created);
    }

    Ok(report)
}

/// Links in, playlists out: match, union, chunk and create.
pub async fn assemble<S: AsRef<str>>(
    links: &[S],
    name: &str,
    description: &str,
    capacity: usize,
    matcher: &Matcher,
    service: &dyn PlaylistService,
) -> Result<AssemblyReport> {
    let plan = plan(links, capacity, matcher).await;
    create(&plan, name, description, service).await
}

/// Item kinds of a plan, for reporting.
pub fn kind_counts(ids: &IdSet) -> [(ItemKind, usize); 3] {
    [
        (ItemKind::Track, ids.tracks.len()),
        (ItemKind::Album, ids.albums.len()),
        (ItemKind::Playlist, ids.playlists.len()),
    ]
}
