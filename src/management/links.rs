use std::path::PathBuf;

use crate::{Result, config, links::LinkRecord};

/// Extracted links, stored as JSON between runs.
pub struct LinkManager {
    path: PathBuf,
    links: Vec<LinkRecord>,
}

impl LinkManager {
    pub fn new(links: Vec<LinkRecord>) -> Self {
        Self {
            path: Self::cache_path(),
            links,
        }
    }

    /// Uses `path` instead of the default cache location.
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
        let links: Vec<LinkRecord> = serde_json::from_str(&content)?;
        Ok(Self { path, links })
    }

    pub async fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.links)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    pub fn get_links(&self) -> &[LinkRecord] {
        &self.links
    }

    pub fn urls(&self) -> Vec<String> {
        self.links.iter().map(|l| l.url.clone()).collect()
    }

    fn cache_path() -> PathBuf {
        config::data_dir().join("cache/links.json")
    }
}
