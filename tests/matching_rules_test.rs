use chatlist::matching::*;

#[test]
fn test_normalize_basic() {
    assert_eq!(normalize("Daft   Punk"), "daft punk");
    assert_eq!(normalize("  Hello, World!  "), "hello world");
    assert_eq!(normalize(""), "");
    assert_eq!(normalize_opt(None), "");
}

#[test]
fn test_normalize_strips_featuring() {
    assert_eq!(normalize("Get Lucky (feat. Pharrell Williams)"), "get lucky");
    assert_eq!(normalize("Song [feat Someone]"), "song");
    assert_eq!(normalize("Song (featuring Someone Else)"), "song");
    assert_eq!(normalize("Song ft. Someone"), "song");
}

#[test]
fn test_normalize_keeps_words_containing_ft() {
    assert_eq!(normalize("Soft Cell"), "soft cell");
    assert_eq!(normalize("Left Behind"), "left behind");
}

#[test]
fn test_normalize_strips_version_qualifiers() {
    assert_eq!(normalize("Get Lucky (Radio Edit)"), "get lucky");
    assert_eq!(normalize("Around the World [2011 Remaster]"), "around the world");
    assert_eq!(normalize("Song (Club REMIX)"), "song");
    assert_eq!(normalize("Song (Album Version)"), "song");
    assert_eq!(normalize("Song (Live)"), "song live");
}

#[test]
fn test_normalize_is_idempotent() {
    let samples = [
        "Get Lucky (feat. Pharrell Williams) [Radio Edit]",
        "AC/DC",
        "Beyoncé & JAY-Z",
        "Song ft. X (Remix)",
        "  (( ]] ",
        "Mr. Brightside",
        "Don't Stop Me Now - Remastered 2011",
        "ft",
        "f(edit)t",
        "f(feat. x)t",
        "so(remix)ft cell",
        "",
    ];

    for s in samples {
        let once = normalize(s);
        assert_eq!(normalize(&once), once, "not idempotent for {:?}", s);
    }
}

#[test]
fn test_normalize_removes_joined_ft() {
    assert_eq!(normalize("f(edit)t"), "");
    assert_eq!(normalize("f(feat. x)t"), "");
    assert_eq!(normalize("Song f(Radio Edit)t Guest"), "song");
}

#[test]
fn test_artist_matches() {
    assert!(artist_matches("Daft Punk", "daft   punk"));
    assert!(artist_matches("Daft Punk", "Daft Punk & Pharrell"));
    assert!(artist_matches("A & B", "B & A"));
    assert!(artist_matches("Simon & Garfunkel", "Garfunkel"));
    assert!(!artist_matches("Daft Punk", "Justice"));
    assert!(!artist_matches("", "Justice"));
    assert!(!artist_matches("!!!", "Justice"));
}

#[test]
fn test_track_matches() {
    assert!(track_matches("Get Lucky", "Get Lucky (Radio Edit)"));
    assert!(track_matches("Get Lucky", "get lucky"));
    assert!(track_matches("One More Time", "One More Time - Short Radio"));
    assert!(!track_matches("Get Lucky", "Harder Better Faster Stronger"));
    assert!(!track_matches("", "Get Lucky"));
}

#[test]
fn test_track_matches_by_word_overlap() {
    // 3 of 4 shared words: 0.75
    assert!(track_matches("the quick brown fox", "quick brown fox jumps"));
    // 2 of 4 shared words: 0.5
    assert!(!track_matches("red blue green pink", "red blue black white"));
}

#[test]
fn test_word_overlap_uses_larger_set() {
    assert_eq!(word_overlap("a b", "a b c d"), 0.5);
    assert_eq!(word_overlap("", ""), 0.0);
    assert!(WORD_OVERLAP_THRESHOLD > 0.69 && WORD_OVERLAP_THRESHOLD < 0.71);
}

#[test]
fn test_verifier_defaults_and_overrides() {
    let verifier = Verifier::default();
    assert!(verifier.artist_matches("Daft Punk", "daft punk"));
    assert!(verifier.track_matches("Get Lucky", "Get Lucky"));

    fn never(_: &str, _: &str) -> bool {
        false
    }
    let strict = Verifier {
        artist: never,
        ..Verifier::default()
    };
    assert!(!strict.artist_matches("Daft Punk", "Daft Punk"));
}
