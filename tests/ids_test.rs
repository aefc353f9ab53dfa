use chatlist::links::*;

#[test]
fn test_classify_by_host() {
    let links = [
        "https://music.apple.com/us/album/x/1",
        "https://open.spotify.com/track/2",
        "https://example.com/3",
        "https://open.spotify.com/album/4",
    ];
    let classified = classify(&links);

    assert_eq!(classified.apple_music, vec!["https://music.apple.com/us/album/x/1"]);
    assert_eq!(
        classified.spotify,
        vec!["https://open.spotify.com/track/2", "https://open.spotify.com/album/4"]
    );
    assert_eq!(classified.other, vec!["https://example.com/3"]);
    assert_eq!(classified.total(), 4);
}

#[test]
fn test_apple_music_track_from_query() {
    assert_eq!(
        apple_music_ref("https://music.apple.com/il/album/centerfold/1452302453?i=1452302709"),
        Some((ItemKind::Track, "1452302709".to_string()))
    );
}

#[test]
fn test_apple_music_playlist() {
    assert_eq!(
        apple_music_ref("https://music.apple.com/us/playlist/chill/pl.u-abc-123"),
        Some((ItemKind::Playlist, "pl.u-abc-123".to_string()))
    );
}

#[test]
fn test_apple_music_album_from_path() {
    assert_eq!(
        apple_music_ref("https://music.apple.com/us/album/discovery/697194953"),
        Some((ItemKind::Album, "697194953".to_string()))
    );
    assert_eq!(apple_music_ref("https://music.apple.com/us/browse"), None);
}

#[test]
fn test_spotify_ref() {
    assert_eq!(
        spotify_ref("https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC?si=abc"),
        Some((ItemKind::Track, "4uLU6hMCjMI75M1A2tKUQC".to_string()))
    );
    assert_eq!(
        spotify_ref("https://open.spotify.com/album/2noRn2Aes5aoNVsU6iWThc"),
        Some((ItemKind::Album, "2noRn2Aes5aoNVsU6iWThc".to_string()))
    );
    assert_eq!(
        spotify_ref("https://open.spotify.com/playlist/37i9dQZF1DX"),
        Some((ItemKind::Playlist, "37i9dQZF1DX".to_string()))
    );
    assert_eq!(spotify_ref("https://open.spotify.com/artist/1"), None);
    assert_eq!(spotify_ref("https://open.spotify.com/track/"), None);
}

#[test]
fn test_spotify_ids_are_deduplicated_in_order() {
    let links = [
        "https://open.spotify.com/track/b",
        "https://open.spotify.com/track/a?si=1",
        "https://open.spotify.com/track/b?si=2",
        "https://open.spotify.com/album/x",
        "https://open.spotify.com/playlist/p",
    ];
    let ids = spotify_ids(&links);

    assert_eq!(ids.tracks, vec!["b", "a"]);
    assert_eq!(ids.albums, vec!["x"]);
    assert_eq!(ids.playlists, vec!["p"]);
}

#[test]
fn test_apple_music_ids() {
    let links = [
        "https://music.apple.com/us/album/x/10?i=11",
        "https://music.apple.com/us/album/x/10",
        "https://music.apple.com/us/album/x/10?i=11",
    ];
    let ids = apple_music_ids(&links);

    assert_eq!(ids.tracks, vec!["11"]);
    assert_eq!(ids.albums, vec!["10"]);
    assert!(ids.playlists.is_empty());
}

#[test]
fn test_id_set_union_keeps_first_positions() {
    let mut a = IdSet::new();
    a.add_track("1");
    a.add_track("2");
    a.add_album("x");
    let mut b = IdSet::new();
    b.add_track("2");
    b.add_track("3");
    b.add_album("x");
    b.add_album("y");

    let merged = a.union(b);

    assert_eq!(merged.tracks, vec!["1", "2", "3"]);
    assert_eq!(merged.albums, vec!["x", "y"]);
}

#[test]
fn test_id_set_add_reports_duplicates() {
    let mut ids = IdSet::new();
    assert!(ids.add(ItemKind::Album, "a"));
    assert!(!ids.add(ItemKind::Album, "a"));
    ids.remove_albums(&["a".to_string()]);
    assert!(ids.is_empty());
}
