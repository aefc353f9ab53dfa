//! # Playlist Module
//!
//! Turns matched IDs into playlists that respect the catalog's size limits.
//!
//! The [`chunk`] function packs an [`IdSet`](crate::links::IdSet) into
//! [`PlaylistChunk`]s: every track weighs 1 and every album weighs
//! [`ALBUM_WEIGHT`], and a chunk is closed once its weight reaches the
//! capacity. [`assemble`] runs the whole flow for a list of links and
//! creates one playlist per chunk through a
//! [`PlaylistService`](crate::ports::PlaylistService).

mod assemble;
mod chunker;

pub use assemble::{
    AssemblyReport, AssemblyStats, PlaylistPlan, assemble, collect_ids, create, kind_counts, plan,
    plan_from_matches,
};
pub use chunker::{ALBUM_WEIGHT, PlaylistChunk, chunk};
