use std::path::PathBuf;

use crate::{
    Result, config,
    matching::{LinkMatch, MatchOutcome},
};

/// Results of the last match run, stored as JSON.
pub struct MatchManager {
    path: PathBuf,
    matches: Vec<LinkMatch>,
}

impl MatchManager {
    pub fn new(matches: Vec<LinkMatch>) -> Self {
        Self {
            path: Self::cache_path(),
            matches,
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    pub async fn load() -> Result<Self> {
        Self::load_from(Self::cache_path()).await
    }

    pub async fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = async_fs::read_to_string(&path).await?;
        let matches: Vec<LinkMatch> = serde_json::from_str(&content)?;
        Ok(Self { path, matches })
    }

    pub async fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.matches)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    pub fn get_matches(&self) -> &[LinkMatch] {
        &self.matches
    }

    /// Turns album matches whose catalog ID is in `rejected` into
    /// [`MatchOutcome::NotFound`]. Returns how many were removed.
    pub fn remove_albums(&mut self, rejected: &[String]) -> usize {
        let mut removed = 0;
        for m in &mut self.matches {
            let is_rejected = m
                .outcome
                .matched()
                .is_some_and(|r| r.is_album && rejected.contains(&r.catalog_id));
            if is_rejected {
                m.outcome = MatchOutcome::NotFound;
                removed += 1;
            }
        }
        removed
    }

    fn cache_path() -> PathBuf {
        config::data_dir().join("cache/matches.json")
    }
}
