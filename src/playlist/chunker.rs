use serde::{Deserialize, Serialize};

use crate::links::IdSet;

/// Estimated track count of one album. A heuristic, not a lookup.
pub const ALBUM_WEIGHT: usize = 10;

/// One playlist's worth of IDs.
///
/// `tracks.len() + ALBUM_WEIGHT * albums.len()` stays within the capacity it
/// was cut for, except when a single album alone outweighs it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistChunk {
    pub tracks: Vec<String>,
    pub albums: Vec<String>,
    /// Carried unchanged into every chunk; never counted against capacity.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub playlists: Vec<String>,
}

impl PlaylistChunk {
    pub fn weight(&self) -> usize {
        self.tracks.len() + ALBUM_WEIGHT * self.albums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty() && self.albums.is_empty()
    }
}

/// Partitions `ids` into capacity-bounded chunks.
///
/// Tracks are packed first, then albums, both in set order. Every emitted
/// chunk holds at least one track or album; a set without either yields no
/// chunks. A capacity of 0 is treated as 1.
pub fn chunk(ids: &IdSet, capacity: usize) -> Vec<PlaylistChunk> {
    let capacity = capacity.max(1);
    let mut chunks = Vec::new();
    let mut current = PlaylistChunk::default();
    let mut weight = 0;

    for track in &ids.tracks {
        if weight >= capacity {
            chunks.push(std::mem::take(&mut current));
            weight = 0;
        }
        current.tracks.push(track.clone());
        weight += 1;
    }

    for album in &ids.albums {
        if weight + ALBUM_WEIGHT > capacity && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            weight = 0;
        }
        current.albums.push(album.clone());
        weight += ALBUM_WEIGHT;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    for c in &mut chunks {
        c.playlists = ids.playlists.clone();
    }

    chunks
}
