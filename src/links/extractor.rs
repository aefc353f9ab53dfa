use std::{collections::HashMap, fmt};

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static DATE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(\d{2}/\d{2}/\d{4})[^\]]*\]").unwrap());

static APPLE_MUSIC_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https://music\.apple\.com/\S+").unwrap());

static SPOTIFY_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https://open\.spotify\.com/\S+").unwrap());

const TRAILING_PUNCTUATION: [char; 6] = ['"', '\'', ')', ']', '>', ','];

const DATE_FORMAT: &str = "%d/%m/%Y";

/// Music service a link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Service {
    AppleMusic,
    Spotify,
    Other,
}

impl Service {
    /// Classifies a URL by host substring.
    pub fn from_url(url: &str) -> Self {
        if url.contains("music.apple.com") {
            Service::AppleMusic
        } else if url.contains("open.spotify.com") {
            Service::Spotify
        } else {
            Service::Other
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Service::AppleMusic => "Apple Music",
            Service::Spotify => "Spotify",
            Service::Other => "Other",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A shared link together with the date of the chat message it appeared in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub url: String,
    pub service: Service,
    pub date: NaiveDate,
}

/// Counts reported after an extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionSummary {
    pub raw: usize,
    pub unique: usize,
    pub apple_music: usize,
    pub spotify: usize,
    pub duplicates_removed: usize,
}

impl ExtractionSummary {
    pub fn new(raw: usize, unique: &[LinkRecord]) -> Self {
        let count = |service: Service| unique.iter().filter(|r| r.service == service).count();
        Self {
            raw,
            unique: unique.len(),
            apple_music: count(Service::AppleMusic),
            spotify: count(Service::Spotify),
            duplicates_removed: raw.saturating_sub(unique.len()),
        }
    }
}

#[derive(Default)]
struct ScanState {
    current_date: Option<NaiveDate>,
    records: Vec<LinkRecord>,
}

/// Strips closing quotes, brackets and commas from the end of a matched URL
/// until none are left.
pub fn clean_trailing_punctuation(url: &str) -> &str {
    url.trim_end_matches(TRAILING_PUNCTUATION.as_slice())
}

/// Scans chat text line by line and returns every Apple Music and Spotify
/// link together with the most recent date marker seen so far.
///
/// A `[DD/MM/YYYY, ...]` marker anywhere on a line sets the date for that
/// line and every following line until the next valid marker. A marker whose
/// date does not parse leaves the previous date in place. Links that appear
/// before any date marker are dropped. Within a line, Apple Music links come
/// before Spotify links.
pub fn extract(text: &str) -> Vec<LinkRecord> {
    text.lines()
        .fold(ScanState::default(), scan_line)
        .records
}

fn scan_line(mut state: ScanState, line: &str) -> ScanState {
    if let Some(date) = DATE_MARKER
        .captures(line)
        .and_then(|caps| NaiveDate::parse_from_str(&caps[1], DATE_FORMAT).ok())
    {
        state.current_date = Some(date);
    }

    let Some(date) = state.current_date else {
        return state;
    };

    for (pattern, service) in [
        (&*APPLE_MUSIC_URL, Service::AppleMusic),
        (&*SPOTIFY_URL, Service::Spotify),
    ] {
        for found in pattern.find_iter(line) {
            let url = clean_trailing_punctuation(found.as_str());
            if url.is_empty() {
                continue;
            }
            state.records.push(LinkRecord {
                url: url.to_string(),
                service,
                date,
            });
        }
    }

    state
}

/// Keeps one record per URL: the one with the earliest date, the first seen
/// on a tie. Output follows the order in which each URL first appeared.
pub fn deduplicate(records: Vec<LinkRecord>) -> Vec<LinkRecord> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<LinkRecord> = Vec::new();

    for record in records {
        match positions.get(&record.url) {
            Some(&idx) => {
                if record.date < unique[idx].date {
                    unique[idx] = record;
                }
            }
            None => {
                positions.insert(record.url.clone(), unique.len());
                unique.push(record);
            }
        }
    }

    unique
}

/// [`extract`] followed by [`deduplicate`].
pub fn extract_unique(text: &str) -> Vec<LinkRecord> {
    deduplicate(extract(text))
}
