use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const ARTICLES_FILE: &str = "articles.json";
pub const UPDATE_FILE: &str = "latest_update.json";
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub data_dir: PathBuf,
    pub cache_ttl: Duration,
}

impl DashboardConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn articles_path(&self) -> PathBuf {
        self.data_dir.join(ARTICLES_FILE)
    }

    pub fn update_path(&self) -> PathBuf {
        self.data_dir.join(UPDATE_FILE)
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}
