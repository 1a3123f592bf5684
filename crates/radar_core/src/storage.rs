use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::io;
use std::path::{Path, PathBuf};
use crate::config::DashboardConfig;
use crate::types::{ArticleCollection, UpdateStatus};
use crate::{Error, Result};

/// Where the dashboard documents come from.
///
/// Implementations return `Ok(None)` when a document does not exist and an
/// error when it exists but cannot be read or does not match its shape.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Read the article collection
    async fn read_articles(&self) -> Result<Option<ArticleCollection>>;

    /// Read the update status record
    async fn read_update_status(&self) -> Result<Option<UpdateStatus>>;

    /// Location of the article collection, for display
    fn articles_location(&self) -> String;

    /// Location of the update status record, for display
    fn update_location(&self) -> String;
}

/// Reads both documents as JSON files from a data directory.
#[derive(Debug, Clone)]
pub struct JsonDirectory {
    articles_path: PathBuf,
    update_path: PathBuf,
}

impl JsonDirectory {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            articles_path: config.articles_path(),
            update_path: config.update_path(),
        }
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    // syntax errors and shape errors are reported separately
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| Error::Schema(format!("{}: {}", path.display(), e)))
}

#[async_trait]
impl DocumentSource for JsonDirectory {
    async fn read_articles(&self) -> Result<Option<ArticleCollection>> {
        read_json(&self.articles_path).await
    }

    async fn read_update_status(&self) -> Result<Option<UpdateStatus>> {
        read_json(&self.update_path).await
    }

    fn articles_location(&self) -> String {
        self.articles_path.display().to_string()
    }

    fn update_location(&self) -> String {
        self.update_path.display().to_string()
    }
}
