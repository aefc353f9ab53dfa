use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use super::Service;

static APPLE_TRACK_PARAM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:^|&)i=(\d+)").unwrap());

static APPLE_PLAYLIST: Lazy<Regex> = Lazy::new(|| Regex::new(r"pl\.[a-zA-Z0-9-]+").unwrap());

/// Deduplicated catalog identifiers grouped by kind.
///
/// Each category keeps insertion order and never holds the same ID twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdSet {
    pub tracks: Vec<String>,
    pub albums: Vec<String>,
    pub playlists: Vec<String>,
}

impl IdSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_track(&mut self, id: impl Into<String>) -> bool {
        push_unique(&mut self.tracks, id.into())
    }

    pub fn add_album(&mut self, id: impl Into<String>) -> bool {
        push_unique(&mut self.albums, id.into())
    }

    pub fn add_playlist(&mut self, id: impl Into<String>) -> bool {
        push_unique(&mut self.playlists, id.into())
    }

    pub fn add(&mut self, kind: ItemKind, id: impl Into<String>) -> bool {
        match kind {
            ItemKind::Track => self.add_track(id),
            ItemKind::Album => self.add_album(id),
            ItemKind::Playlist => self.add_playlist(id),
        }
    }

    /// Set union per category; IDs from `self` keep their positions.
    pub fn union(mut self, other: IdSet) -> IdSet {
        self.tracks.extend(other.tracks);
        self.albums.extend(other.albums);
        self.playlists.extend(other.playlists);
        self.dedup();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty() && self.albums.is_empty() && self.playlists.is_empty()
    }

    /// Drops repeated IDs, keeping the first occurrence of each.
    pub fn dedup(&mut self) {
        for ids in [&mut self.tracks, &mut self.albums, &mut self.playlists] {
            let mut seen = HashSet::new();
            ids.retain(|id| seen.insert(id.clone()));
        }
    }

    pub fn remove_albums(&mut self, rejected: &[String]) {
        self.albums.retain(|id| !rejected.contains(id));
    }
}

fn push_unique(ids: &mut Vec<String>, id: String) -> bool {
    if ids.contains(&id) {
        return false;
    }
    ids.push(id);
    true
}

/// Kind of catalog item a link refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Track,
    Album,
    Playlist,
}

impl ItemKind {
    fn from_path(segment: &str) -> Option<Self> {
        match segment {
            "track" => Some(ItemKind::Track),
            "album" => Some(ItemKind::Album),
            "playlist" => Some(ItemKind::Playlist),
            _ => None,
        }
    }

    /// The label the API reports: tracks are "song".
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Track => "song",
            ItemKind::Album => "album",
            ItemKind::Playlist => "playlist",
        }
    }
}

/// Links split by service, each list in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedLinks {
    pub apple_music: Vec<String>,
    pub spotify: Vec<String>,
    pub other: Vec<String>,
}

impl ClassifiedLinks {
    pub fn total(&self) -> usize {
        self.apple_music.len() + self.spotify.len() + self.other.len()
    }
}

pub fn classify<S: AsRef<str>>(links: &[S]) -> ClassifiedLinks {
    let mut classified = ClassifiedLinks::default();
    for link in links {
        let link = link.as_ref();
        match Service::from_url(link) {
            Service::AppleMusic => classified.apple_music.push(link.to_string()),
            Service::Spotify => classified.spotify.push(link.to_string()),
            Service::Other => classified.other.push(link.to_string()),
        }
    }
    classified
}

/// Parses the single ID an Apple Music link carries.
///
/// `i=<digits>` in the query wins (track), then a `pl.` token (playlist),
/// then the first all-digit path segment (album).
pub fn apple_music_ref(link: &str) -> Option<(ItemKind, String)> {
    let parsed = Url::parse(link).ok();
    let query = match &parsed {
        Some(url) => url.query().unwrap_or_default().to_string(),
        None => link.split_once('?').map(|(_, q)| q.to_string()).unwrap_or_default(),
    };

    if let Some(caps) = APPLE_TRACK_PARAM.captures(&query) {
        return Some((ItemKind::Track, caps[1].to_string()));
    }

    let path = match &parsed {
        Some(url) => url.path().to_string(),
        None => link.split('?').next().unwrap_or_default().to_string(),
    };

    if let Some(found) = APPLE_PLAYLIST.find(&path) {
        return Some((ItemKind::Playlist, found.as_str().to_string()));
    }

    path.split('/')
        .find(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
        .map(|part| (ItemKind::Album, part.to_string()))
}

/// Parses a `https://open.spotify.com/<type>/<id>` link.
pub fn spotify_ref(link: &str) -> Option<(ItemKind, String)> {
    let url = Url::parse(link).ok()?;
    let mut segments = url.path_segments()?;
    let kind = ItemKind::from_path(segments.next()?)?;
    let id = segments.next()?.split('?').next()?;
    if id.is_empty() {
        return None;
    }
    Some((kind, id.to_string()))
}

pub fn apple_music_ids<S: AsRef<str>>(links: &[S]) -> IdSet {
    collect_ids(links, apple_music_ref)
}

pub fn spotify_ids<S: AsRef<str>>(links: &[S]) -> IdSet {
    collect_ids(links, spotify_ref)
}

fn collect_ids<S, F>(links: &[S], parse: F) -> IdSet
where
    S: AsRef<str>,
    F: Fn(&str) -> Option<(ItemKind, String)>,
{
    let mut ids = IdSet::new();
    for (kind, id) in links.iter().filter_map(|link| parse(link.as_ref())) {
        ids.add(kind, id);
    }
    ids
}
