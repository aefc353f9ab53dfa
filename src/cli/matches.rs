use std::path::PathBuf;

use tabled::Table;

use crate::{
    error, info,
    links::{self, Service},
    management::{LinkManager, MatchManager},
    matching::{LinkMatch, MatchOutcome},
    success,
    types::MatchTableRow,
    warning,
};

/// Links of `file`, or of the last `extract` run when no file is given.
pub(crate) async fn load_links(file: Option<PathBuf>) -> Vec<String> {
    match file {
        Some(file) => match async_fs::read_to_string(&file).await {
            Ok(text) => links::extract_unique(&text)
                .into_iter()
                .map(|r| r.url)
                .collect(),
            Err(e) => error!("Cannot read {}: {}", file.display(), e),
        },
        None => match LinkManager::load().await {
            Ok(mgr) => mgr.urls(),
            Err(e) => error!(
                "Failed to load links. Please run chatlist extract <FILE>\n Error: {}",
                e
            ),
        },
    }
}

pub async fn match_links(file: Option<PathBuf>, table: bool) {
    let urls = load_links(file).await;
    let apple_music: Vec<String> = urls
        .into_iter()
        .filter(|url| Service::from_url(url) == Service::AppleMusic)
        .collect();

    if apple_music.is_empty() {
        warning!("No Apple Music links to match.");
        return;
    }

    info!("Matching {} Apple Music links", apple_music.len());
    let matcher = super::build_matcher(super::spotify_client().await);

    let pb = super::progress_bar(apple_music.len());
    let matches = matcher
        .match_links_with(&apple_music, |m| {
            pb.set_message(m.outcome.label());
            pb.inc(1);
        })
        .await;
    pb.finish_and_clear();

    report(&matches);

    if table {
        let rows: Vec<MatchTableRow> = matches.iter().map(MatchTableRow::from).collect();
        println!("{}", Table::new(rows));
    }

    if let Err(e) = MatchManager::new(matches).persist().await {
        error!("Failed to save matches to cache: {}", e);
    }
}

pub(crate) fn report(matches: &[LinkMatch]) {
    let mut high = 0;
    let mut low = 0;
    let mut not_found = 0;
    let mut insufficient = 0;
    let mut failed = 0;

    for m in matches {
        match &m.outcome {
            MatchOutcome::Matched(r) if r.is_low_confidence() => low += 1,
            MatchOutcome::Matched(_) => high += 1,
            MatchOutcome::NotFound => not_found += 1,
            MatchOutcome::InsufficientInfo => insufficient += 1,
            MatchOutcome::Failed { .. } => failed += 1,
        }
    }

    success!(
        "Matched {} of {} links ({} low confidence)",
        high + low,
        matches.len(),
        low
    );
    if not_found + insufficient + failed > 0 {
        warning!(
            "Not found: {}, insufficient info: {}, failed: {}",
            not_found,
            insufficient,
            failed
        );
    }
}
