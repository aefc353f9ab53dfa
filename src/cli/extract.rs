use std::path::PathBuf;

use tabled::Table;

use crate::{
    error, info,
    links::{self, ExtractionSummary},
    management::LinkManager,
    success,
    types::LinkTableRow,
    warning,
};

pub async fn extract(file: PathBuf, table: bool) {
    let text = match async_fs::read_to_string(&file).await {
        Ok(text) => text,
        Err(e) => error!("Cannot read {}: {}", file.display(), e),
    };

    let all = links::extract(&text);
    let raw = all.len();
    let unique = links::deduplicate(all);
    let summary = ExtractionSummary::new(raw, &unique);

    info!(
        "Found {} links ({} duplicates removed)",
        summary.raw, summary.duplicates_removed
    );
    info!("Apple Music: {}", summary.apple_music);
    info!("Spotify: {}", summary.spotify);

    if unique.is_empty() {
        warning!("No music links with a date found in {}", file.display());
    }

    if table {
        let rows: Vec<LinkTableRow> = unique.iter().map(LinkTableRow::from).collect();
        println!("{}", Table::new(rows));
    }

    if let Err(e) = LinkManager::new(unique).persist().await {
        error!("Failed to save links to cache: {}", e);
    }
    success!("Saved {} unique links.", summary.unique);
}
