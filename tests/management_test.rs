use std::path::PathBuf;

use chatlist::{
    links::{LinkRecord, Service},
    management::{LinkManager, MatchManager},
    matching::{Confidence, LinkMatch, MatchOutcome, MatchResult},
    ports::TrackInfo,
};
use chrono::NaiveDate;

// Helper function to create a unique cache file path
fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("chatlist-test-{}", std::process::id()))
        .join(name)
}

// Helper function to create a matched link
fn create_test_match(url: &str, id: &str, is_album: bool) -> LinkMatch {
    LinkMatch {
        source_url: url.to_string(),
        info: TrackInfo::from_url(url),
        outcome: MatchOutcome::Matched(MatchResult {
            catalog_id: id.to_string(),
            display_name: "Name".to_string(),
            artist: "Artist".to_string(),
            url: format!("https://open.spotify.com/x/{}", id),
            is_album,
            confidence: Confidence::High,
            first_track_id: is_album.then(|| format!("{}-1", id)),
        }),
    }
}

#[tokio::test]
async fn test_links_survive_persist_and_load() {
    let path = temp_path("links.json");
    let links = vec![
        LinkRecord {
            url: "https://open.spotify.com/track/a".to_string(),
            service: Service::Spotify,
            date: NaiveDate::from_ymd_opt(2024, 3, 12).unwrap(),
        },
        LinkRecord {
            url: "https://music.apple.com/us/album/x/1".to_string(),
            service: Service::AppleMusic,
            date: NaiveDate::from_ymd_opt(2024, 3, 13).unwrap(),
        },
    ];

    LinkManager::new(links.clone())
        .with_path(&path)
        .persist()
        .await
        .unwrap();
    let loaded = LinkManager::load_from(&path).await.unwrap();

    assert_eq!(loaded.get_links(), links.as_slice());
    assert_eq!(
        loaded.urls(),
        vec![
            "https://open.spotify.com/track/a",
            "https://music.apple.com/us/album/x/1"
        ]
    );
}

#[tokio::test]
async fn test_missing_cache_is_an_error() {
    let result = LinkManager::load_from(temp_path("does-not-exist.json")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_matches_survive_persist_and_load() {
    let path = temp_path("matches.json");
    let matches = vec![
        create_test_match("https://music.apple.com/us/album/a/1?i=2", "t1", false),
        create_test_match("https://music.apple.com/us/album/b/3", "a1", true),
        LinkMatch {
            source_url: "https://music.apple.com/us/album/c/4".to_string(),
            info: TrackInfo::from_url("https://music.apple.com/us/album/c/4"),
            outcome: MatchOutcome::Failed {
                error: "request timed out after 30 seconds".to_string(),
            },
        },
    ];

    MatchManager::new(matches.clone())
        .with_path(&path)
        .persist()
        .await
        .unwrap();
    let loaded = MatchManager::load_from(&path).await.unwrap();

    assert_eq!(loaded.get_matches(), matches.as_slice());
}

#[test]
fn test_remove_albums_only_touches_rejected_albums() {
    let mut manager = MatchManager::new(vec![
        create_test_match("https://music.apple.com/us/album/a/1?i=2", "x", false),
        create_test_match("https://music.apple.com/us/album/b/3", "x", true),
        create_test_match("https://music.apple.com/us/album/c/4", "y", true),
    ]);

    let removed = manager.remove_albums(&["x".to_string()]);

    assert_eq!(removed, 1);
    let outcomes: Vec<&MatchOutcome> = manager.get_matches().iter().map(|m| &m.outcome).collect();
    assert!(outcomes[0].matched().is_some());
    assert_eq!(outcomes[1], &MatchOutcome::NotFound);
    assert!(outcomes[2].matched().is_some());
}
