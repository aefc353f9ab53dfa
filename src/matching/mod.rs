//! # Matching Module
//!
//! Finds the Spotify equivalent of an Apple Music track or album.
//!
//! - [`normalize`] reduces names to a canonical form (lowercase, no
//!   featuring credits, no version qualifiers, no punctuation).
//! - [`verify`] decides whether a candidate's artist or track name is an
//!   acceptable match for the source.
//! - [`strategy`] runs the tiered catalog search for one item.
//! - [`Matcher`] drives a batch: metadata lookup, search, bounded
//!   concurrency and per-call timeouts, with results in input order.

mod matcher;
pub mod normalize;
pub mod strategy;
pub mod verify;

pub use matcher::{
    DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT, LinkMatch, LinkStatus, Matcher, ProcessedLink,
};
pub use normalize::{normalize, normalize_opt};
pub use strategy::{Confidence, MatchOutcome, MatchResult, SearchStrategy};
pub use verify::{Verifier, WORD_OVERLAP_THRESHOLD, artist_matches, track_matches, word_overlap};
