mod common;

use std::{sync::Arc, time::Duration};

use chatlist::{
    Error,
    matching::{Confidence, LinkStatus, MatchOutcome, Matcher, Verifier},
    playlist,
    spotify::client::retry_budget,
};
use common::{FakeCatalog, FakePlaylists, FakeResolver, album, item, song};

const SONG_A: &str = "https://music.apple.com/us/album/a/1?i=11";
const SONG_B: &str = "https://music.apple.com/us/album/b/2?i=22";
const ALBUM_C: &str = "https://music.apple.com/us/album/c/3";
const SPOTIFY_TRACK: &str = "https://open.spotify.com/track/sp1";
const SPOTIFY_ALBUM: &str = "https://open.spotify.com/album/spa";

fn catalog() -> FakeCatalog {
    FakeCatalog::new()
        .on(
            "track:Song A artist:Artist A",
            vec![item("ta", "Song A", "Artist A")],
        )
        .on(
            "track:Song B artist:Artist B",
            vec![item("tb", "Song B", "Artist B")],
        )
        .on(
            "album:Album C artist:Artist C",
            vec![item("ac", "Album C", "Artist C")],
        )
        .with_album_tracks("ac", vec![item("tc1", "Intro", "Artist C")])
}

fn resolver() -> FakeResolver {
    FakeResolver::new(vec![
        song(SONG_A, "Song A", "Artist A"),
        song(SONG_B, "Song B", "Artist B"),
        album(ALBUM_C, "Album C", "Artist C"),
    ])
}

fn matcher(catalog: FakeCatalog, resolver: FakeResolver) -> Matcher {
    Matcher::new(Arc::new(catalog), Arc::new(resolver)).with_concurrency(3)
}

#[tokio::test]
async fn test_results_follow_input_order() {
    // the first item finishes last
    let resolver = resolver().with_delay(SONG_A, Duration::from_millis(50));
    let matcher = matcher(catalog(), resolver);

    let matches = matcher.match_links(&[SONG_A, SONG_B, ALBUM_C]).await;

    let urls: Vec<&str> = matches.iter().map(|m| m.source_url.as_str()).collect();
    assert_eq!(urls, vec![SONG_A, SONG_B, ALBUM_C]);
    assert_eq!(matches[0].outcome.matched().unwrap().catalog_id, "ta");
    assert_eq!(matches[2].outcome.matched().unwrap().catalog_id, "ac");
}

#[tokio::test]
async fn test_failing_lookup_does_not_stop_batch() {
    let matcher = matcher(catalog(), resolver());
    let unknown = "https://music.apple.com/us/album/z/9?i=99";

    let matches = matcher.match_links(&[unknown, SONG_B]).await;

    assert_eq!(matches.len(), 2);
    assert!(matches!(matches[0].outcome, MatchOutcome::Failed { .. }));
    assert!(!matches[0].info.is_album);
    assert_eq!(matches[1].outcome.matched().unwrap().catalog_id, "tb");
}

#[tokio::test]
async fn test_slow_lookup_times_out() {
    let resolver = resolver().with_delay(SONG_A, Duration::from_secs(5));
    let matcher = matcher(catalog(), resolver).with_timeout(Duration::from_millis(20));

    let matches = matcher.match_links(&[SONG_A]).await;

    match &matches[0].outcome {
        MatchOutcome::Failed { error } => {
            assert_eq!(error, &Error::Timeout(0).to_string())
        }
        other => panic!("expected timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_slow_search_times_out() {
    let catalog = catalog().with_delay(Duration::from_secs(5));
    let matcher = matcher(catalog, resolver()).with_timeout(Duration::from_millis(20));

    let matches = matcher.match_links(&[SONG_B]).await;

    assert!(matches!(matches[0].outcome, MatchOutcome::Failed { .. }));
}

#[tokio::test]
async fn test_retried_search_gets_its_full_budget() {
    // one paused attempt alone outlasts the per-attempt timeout
    let catalog = catalog().with_retry_pause(Duration::from_millis(80));
    let matcher = matcher(catalog, resolver()).with_timeout(Duration::from_millis(40));

    let matches = matcher.match_links(&[SONG_B]).await;

    assert_eq!(matches[0].outcome.matched().unwrap().catalog_id, "tb");
}

#[test]
fn test_spotify_retry_budget_covers_every_attempt() {
    let budget = retry_budget(Duration::from_secs(30));

    // three attempts plus two waits of up to two minutes
    assert_eq!(budget, Duration::from_secs(3 * 30 + 2 * 120));
}

#[tokio::test]
async fn test_custom_verifier_is_used() {
    let strict = Verifier {
        artist: |_, _| false,
        ..Verifier::default()
    };
    let matcher = matcher(catalog(), resolver()).with_verifier(strict);

    let matches = matcher.match_links(&[SONG_A]).await;

    let result = matches[0].outcome.matched().unwrap();
    assert_eq!(result.catalog_id, "ta");
    assert_eq!(result.confidence, Confidence::Low);
}

#[tokio::test]
async fn test_on_each_sees_every_item() {
    let matcher = matcher(catalog(), resolver());
    let seen = std::sync::Mutex::new(Vec::new());

    matcher
        .match_links_with(&[SONG_A, ALBUM_C], |m| {
            seen.lock().unwrap().push(m.source_url.clone())
        })
        .await;

    assert_eq!(*seen.lock().unwrap(), vec![SONG_A, ALBUM_C]);
}

#[tokio::test]
async fn test_process_links_reports_every_link() {
    let matcher = matcher(catalog(), resolver());
    let links = [SPOTIFY_TRACK, SONG_A, "https://example.com/x", ALBUM_C];

    let results = matcher.process_links(&links).await;

    assert_eq!(results.len(), 4);
    assert_eq!(results[0].status, LinkStatus::Passthrough);
    assert_eq!(results[0].kind.as_deref(), Some("song"));
    assert_eq!(results[0].spotify_link.as_deref(), Some(SPOTIFY_TRACK));

    assert_eq!(results[1].status, LinkStatus::Matched);
    assert_eq!(results[1].platform, "Apple Music");
    assert_eq!(results[1].title.as_deref(), Some("Song A"));
    assert_eq!(results[1].apple_music_link.as_deref(), Some(SONG_A));
    assert_eq!(
        results[1].spotify_link.as_deref(),
        Some("https://open.spotify.com/x/ta")
    );

    assert_eq!(results[2].status, LinkStatus::Unsupported);
    assert_eq!(results[3].kind.as_deref(), Some("album"));
}

#[tokio::test]
async fn test_processed_link_json_shape() {
    let matcher = matcher(catalog(), resolver());

    let results = matcher.process_links(&[SONG_A]).await;
    let json = serde_json::to_value(&results[0]).unwrap();

    assert_eq!(json["type"], "song");
    assert_eq!(json["status"], "matched");
    assert_eq!(json["confidence"], "high");
    assert!(json.get("error").is_none());
}

#[tokio::test]
async fn test_collect_ids_uses_matched_items_only() {
    let matcher = matcher(catalog(), resolver());
    let unknown = "https://music.apple.com/us/album/z/9?i=99";

    let matches = matcher.match_links(&[SONG_A, unknown, ALBUM_C]).await;
    let ids = playlist::collect_ids(&matches);

    assert_eq!(ids.tracks, vec!["ta"]);
    assert_eq!(ids.albums, vec!["ac"]);
}

#[tokio::test]
async fn test_assemble_single_playlist() {
    let matcher = matcher(catalog(), resolver());
    let service = FakePlaylists::default();
    let links = [SPOTIFY_TRACK, SONG_A, ALBUM_C, SPOTIFY_ALBUM, "https://example.com/x"];

    let report = playlist::assemble(&links, "Chat", "From chat", 150, &matcher, &service)
        .await
        .unwrap();

    let created = service.created();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].0, "Chat");
    assert_eq!(created[0].1, vec!["sp1", "ta"]);
    assert_eq!(created[0].2, vec!["spa", "ac"]);

    assert_eq!(report.playlists.len(), 1);
    assert_eq!(report.stats.total_links, 5);
    assert_eq!(report.stats.spotify_links, 2);
    assert_eq!(report.stats.apple_music_links, 2);
    assert_eq!(report.stats.other_links, 1);
    assert_eq!(report.stats.matched_apple_music, 2);
    assert_eq!(report.stats.total_tracks, 2);
    assert_eq!(report.stats.total_albums, 2);
}

#[tokio::test]
async fn test_assemble_names_parts_and_collects_rejections() {
    let matcher = matcher(catalog(), resolver());
    let service = FakePlaylists::rejecting(&["spa"]);
    let links = [SPOTIFY_TRACK, SONG_A, SONG_B, SPOTIFY_ALBUM];

    let report = playlist::assemble(&links, "Chat", "", 3, &matcher, &service)
        .await
        .unwrap();

    let names: Vec<String> = service.created().into_iter().map(|c| c.0).collect();
    assert_eq!(names, vec!["Chat (Part 1/2)", "Chat (Part 2/2)"]);
    assert_eq!(report.rejected_album_ids, vec!["spa"]);
}

#[tokio::test]
async fn test_assemble_without_items_is_an_error() {
    let matcher = matcher(catalog(), resolver());
    let service = FakePlaylists::default();

    let result =
        playlist::assemble(&["https://example.com/x"], "Chat", "", 150, &matcher, &service).await;

    assert!(matches!(result, Err(Error::InvalidInput(_))));
    assert!(service.created().is_empty());
}
