//! # Apple Music Module
//!
//! Resolves an Apple Music link to the track or album it points at by
//! reading the structured data Apple embeds in every public page: the
//! `application/ld+json` block first, the OpenGraph `og:type` / `og:title`
//! tags as fallback. The page is parsed with `scraper`; no JavaScript is
//! executed.
//!
//! The link's shape gives the initial answer: `?i=<id>` marks a song,
//! anything else an album. The page data overrides it when present.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::{Client, header};
use scraper::{Html, Selector};
use serde_json::Value;

use crate::{
    Error, Result, config,
    ports::{MetadataResolver, TrackInfo},
};

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

static LD_JSON: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"script[type="application/ld+json"]"#).unwrap());

static OG_TYPE: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"meta[property="og:type"], meta[name="og:type"]"#).unwrap()
});

static OG_TITLE: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"meta[property="og:title"], meta[name="og:title"]"#).unwrap()
});

/// "<title> by <artist> on Apple Music", localized.
const TITLE_SEPARATORS: [&str; 2] = [" by ", " מאת "];
const TITLE_SUFFIXES: [&str; 2] = [" on Apple Music", " ב‑"];

/// Fetches Apple Music pages over HTTPS.
pub struct AppleMusicResolver {
    http: Client,
}

impl AppleMusicResolver {
    pub fn new() -> Result<Self> {
        let http = Client::builder()
            .timeout(config::request_timeout())
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl MetadataResolver for AppleMusicResolver {
    async fn resolve(&self, url: &str) -> Result<TrackInfo> {
        let response = self
            .http
            .get(url)
            .header(header::ACCEPT, "text/html")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Status { status, body });
        }

        let html = response.text().await?;
        Ok(parse_page(url, &html))
    }
}

/// Reads whatever the page tells about `url`. Never fails; missing data
/// leaves fields unset.
pub fn parse_page(url: &str, html: &str) -> TrackInfo {
    let document = Html::parse_document(html);
    let mut info = TrackInfo::from_url(url);

    if let Some(og_type) = meta_content(&document, &OG_TYPE) {
        if og_type.contains("music.song") {
            info.is_album = false;
        } else if og_type.contains("music.album") {
            info.is_album = true;
        }
    }

    if let Some(data) = structured_data(&document) {
        apply_structured_data(&mut info, &data);
    }

    if info.title.is_none() || info.artist.is_none() {
        if let Some((title, artist)) =
            meta_content(&document, &OG_TITLE).and_then(|t| split_title(&t))
        {
            info.title.get_or_insert(title);
            info.artist.get_or_insert(artist);
        }
    }

    info
}

fn structured_data(document: &Html) -> Option<Value> {
    document
        .select(&LD_JSON)
        .filter_map(|script| {
            let text = script.text().collect::<String>();
            serde_json::from_str::<Value>(text.trim()).ok()
        })
        .flat_map(|value| match value {
            Value::Array(items) => items,
            other => vec![other],
        })
        .find(|value| {
            matches!(
                value.get("@type").and_then(Value::as_str),
                Some("MusicRecording") | Some("MusicAlbum")
            )
        })
}

fn apply_structured_data(info: &mut TrackInfo, data: &Value) {
    match data.get("@type").and_then(Value::as_str) {
        Some("MusicRecording") => info.is_album = false,
        Some("MusicAlbum") => info.is_album = true,
        _ => {}
    }

    if let Some(name) = non_empty(data.get("name")) {
        info.title = Some(name);
    }

    let audio = data.get("audio");
    let by_artist = audio
        .and_then(|a| a.get("byArtist"))
        .or_else(|| data.get("byArtist"));
    if let Some(artist) = by_artist.and_then(artist_name) {
        info.artist = Some(artist);
    }

    let in_album = audio
        .and_then(|a| a.get("inAlbum"))
        .or_else(|| data.get("inAlbum"));
    if let Some(album) = in_album.and_then(|a| non_empty(a.get("name"))) {
        info.album = Some(album);
    }
}

/// `byArtist` comes as an object, a list of objects or a bare string.
fn artist_name(value: &Value) -> Option<String> {
    match value {
        Value::Array(items) => items.first().and_then(artist_name),
        Value::Object(_) => non_empty(value.get("name")),
        Value::String(_) => non_empty(Some(value)),
        _ => None,
    }
}

fn non_empty(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// `content` of the first tag matching `selector`, entities decoded.
fn meta_content(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .find_map(|tag| tag.value().attr("content"))
        .map(|content| content.trim().to_string())
}

fn split_title(title: &str) -> Option<(String, String)> {
    TITLE_SEPARATORS.iter().find_map(|sep| {
        let (track, rest) = title.split_once(sep)?;
        let artist = TITLE_SUFFIXES
            .iter()
            .find_map(|suffix| rest.split_once(suffix).map(|(a, _)| a))
            .unwrap_or(rest);

        let (track, artist) = (track.trim(), artist.trim());
        if track.is_empty() || artist.is_empty() {
            return None;
        }
        Some((track.to_string(), artist.to_string()))
    })
}
