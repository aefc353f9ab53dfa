//! # Links Module
//!
//! Everything between a raw chat export and typed catalog identifiers.
//!
//! - [`extractor`] scans free-form chat text for Apple Music and Spotify
//!   URLs, tags each with the date of the message it was posted in and
//!   collapses repeats so every URL is kept once, with its earliest date.
//! - [`ids`] sorts links by service and parses the track, album or playlist
//!   ID out of each URL into an [`IdSet`].
//!
//! ## Date context
//!
//! WhatsApp-style exports prefix every message with `[DD/MM/YYYY, HH:MM:SS]`.
//! The scan carries the last valid date forward line by line, so links in
//! continuation lines of a multi-line message get the message's date. Links
//! seen before the first date marker have no date context and are dropped.

pub mod extractor;
pub mod ids;

pub use extractor::{
    ExtractionSummary, LinkRecord, Service, clean_trailing_punctuation, deduplicate, extract,
    extract_unique,
};
pub use ids::{
    ClassifiedLinks, IdSet, ItemKind, apple_music_ids, apple_music_ref, classify, spotify_ids,
    spotify_ref,
};
