use once_cell::sync::Lazy;
use regex::Regex;

/// "(feat. X)", "[feat X]", "(featuring X)"
static FEATURING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*[\(\[]feat(?:uring)?\b\.?[^\)\]]*[\)\]]").unwrap()
});

/// "ft. X" through the end of the string.
static FT_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\s*\bft\b\.?.*$").unwrap());

/// "(Radio Edit)", "[2011 Remaster]", "(Club Remix)", "(Album Version)"
static VERSION_QUALIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*[\(\[][^\)\]]*(?:remix|version|edit|remaster)[^\)\]]*[\)\]]").unwrap()
});

static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").unwrap());

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Canonical form of a track, artist or album name for comparison.
///
/// Lowercases, drops featuring credits and version qualifiers, turns
/// punctuation into spaces and collapses whitespace. Total: empty input
/// yields an empty string, and the output is a fixed point.
pub fn normalize(name: &str) -> String {
    let mut current = clean(name);

    // a removed credit or qualifier can join its neighbours into a new "ft"
    loop {
        let next = clean(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }

    let name = name.to_lowercase();
    let name = FEATURING.replace_all(&name, "");
    let name = FT_SUFFIX.replace(&name, "");
    let name = VERSION_QUALIFIER.replace_all(&name, "");
    let name = PUNCTUATION.replace_all(&name, " ");
    let name = WHITESPACE.replace_all(&name, " ");

    name.trim().to_string()
}

/// [`normalize`] for optional fields.
pub fn normalize_opt(name: Option<&str>) -> String {
    name.map(normalize).unwrap_or_default()
}
