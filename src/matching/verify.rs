use std::collections::HashSet;

use super::normalize::normalize;

/// Share of common words (over the larger word set) above which two track
/// names count as the same.
pub const WORD_OVERLAP_THRESHOLD: f64 = 0.70;

fn contains_either(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

/// Whether a candidate's artist is an acceptable match for the source artist.
///
/// Exact or substring match after normalization, or, for collaborations,
/// any `&`-separated source name matching any candidate name in either
/// direction regardless of order.
pub fn artist_matches(source: &str, candidate: &str) -> bool {
    let source_norm = normalize(source);
    let candidate_norm = normalize(candidate);

    if source_norm.is_empty() || candidate_norm.is_empty() {
        return false;
    }

    if source_norm == candidate_norm || contains_either(&source_norm, &candidate_norm) {
        return true;
    }

    // `&` is gone after normalization, so split the raw names first
    let source_names = collaborators(source);
    let candidate_names = collaborators(candidate);

    source_names.iter().any(|s| {
        candidate_names
            .iter()
            .any(|c| contains_either(s, c))
    })
}

fn collaborators(artist: &str) -> Vec<String> {
    artist
        .split('&')
        .map(|name| normalize(name.trim()))
        .filter(|name| !name.is_empty())
        .collect()
}

/// Whether a candidate's track name is an acceptable match for the source.
///
/// Exact or substring match after normalization, otherwise at least
/// [`WORD_OVERLAP_THRESHOLD`] of the words shared.
pub fn track_matches(source: &str, candidate: &str) -> bool {
    let source_norm = normalize(source);
    let candidate_norm = normalize(candidate);

    if source_norm.is_empty() || candidate_norm.is_empty() {
        return false;
    }

    if source_norm == candidate_norm || contains_either(&source_norm, &candidate_norm) {
        return true;
    }

    word_overlap(&source_norm, &candidate_norm) >= WORD_OVERLAP_THRESHOLD
}

/// Shared words divided by the size of the larger word set.
pub fn word_overlap(a: &str, b: &str) -> f64 {
    let a_words: HashSet<&str> = a.split_whitespace().collect();
    let b_words: HashSet<&str> = b.split_whitespace().collect();

    let larger = a_words.len().max(b_words.len());
    if larger == 0 {
        return 0.0;
    }

    a_words.intersection(&b_words).count() as f64 / larger as f64
}

/// The match rules a search strategy applies to candidates.
///
/// Defaults to [`artist_matches`] and [`track_matches`]; tests and callers
/// can swap in stricter or looser rules.
#[derive(Debug, Clone, Copy)]
pub struct Verifier {
    pub artist: fn(&str, &str) -> bool,
    pub track: fn(&str, &str) -> bool,
}

impl Default for Verifier {
    fn default() -> Self {
        Self {
            artist: artist_matches,
            track: track_matches,
        }
    }
}

impl Verifier {
    pub fn artist_matches(&self, source: &str, candidate: &str) -> bool {
        (self.artist)(source, candidate)
    }

    pub fn track_matches(&self, source: &str, candidate: &str) -> bool {
        (self.track)(source, candidate)
    }
}
