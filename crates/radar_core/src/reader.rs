use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use crate::cache::TtlCache;
use crate::config::DashboardConfig;
use crate::sample::sample_articles;
use crate::storage::{DocumentSource, JsonDirectory};
use crate::types::{ArticleCollection, UpdateStatus};

pub const SAMPLE_STATUS: &str = "sample data";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    File,
    Fallback,
}

/// A loaded document, where it came from, and what went wrong if anything.
#[derive(Debug, Clone, Serialize)]
pub struct Loaded<T> {
    pub value: T,
    pub origin: Origin,
    pub diagnostic: Option<String>,
}

impl<T> Loaded<T> {
    fn file(value: T) -> Self {
        Self {
            value,
            origin: Origin::File,
            diagnostic: None,
        }
    }

    fn fallback(value: T, diagnostic: Option<String>) -> Self {
        Self {
            value,
            origin: Origin::Fallback,
            diagnostic,
        }
    }
}

/// Reads the article collection, falling back to the sample collection.
pub async fn read_articles(source: &dyn DocumentSource) -> Loaded<ArticleCollection> {
    match source.read_articles().await {
        Ok(Some(collection)) => {
            debug!("Loaded {} articles from {}", collection.articles.len(), source.articles_location());
            Loaded::file(collection)
        }
        Ok(None) => {
            info!("No article file at {}, using sample data", source.articles_location());
            Loaded::fallback(sample_articles(), None)
        }
        Err(e) => {
            warn!("Failed to load articles from {}: {}", source.articles_location(), e);
            Loaded::fallback(
                sample_articles(),
                Some(format!("Failed to load articles: {}", e)),
            )
        }
    }
}

/// Reads the update status record, falling back to a record stamped now.
pub async fn read_update_status(source: &dyn DocumentSource) -> Loaded<UpdateStatus> {
    match source.read_update_status().await {
        Ok(Some(status)) => Loaded::file(status),
        Ok(None) => {
            info!("No update file at {}, using sample status", source.update_location());
            Loaded::fallback(UpdateStatus::fallback(Utc::now(), SAMPLE_STATUS), None)
        }
        Err(e) => {
            warn!("Failed to load update status from {}: {}", source.update_location(), e);
            Loaded::fallback(
                UpdateStatus::fallback(Utc::now(), format!("error: {}", e)),
                Some(format!("Failed to load update status: {}", e)),
            )
        }
    }
}

/// Cached access to the dashboard documents. Never fails; see [`read_articles`].
pub struct DataStoreReader {
    source: Arc<dyn DocumentSource>,
    articles: TtlCache<Loaded<ArticleCollection>>,
    status: TtlCache<Loaded<UpdateStatus>>,
}

impl DataStoreReader {
    pub fn new(source: Arc<dyn DocumentSource>, ttl: Duration) -> Self {
        Self {
            source,
            articles: TtlCache::new(ttl),
            status: TtlCache::new(ttl),
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(Arc::new(JsonDirectory::new(config)), config.cache_ttl)
    }

    pub fn source(&self) -> &dyn DocumentSource {
        self.source.as_ref()
    }

    pub fn cache_ttl(&self) -> Duration {
        self.articles.ttl()
    }

    pub async fn load_articles(&self) -> Loaded<ArticleCollection> {
        let source = self.source.clone();
        self.articles
            .get_or_load(|| async move { read_articles(source.as_ref()).await })
            .await
    }

    pub async fn load_update_status(&self) -> Loaded<UpdateStatus> {
        let source = self.source.clone();
        self.status
            .get_or_load(|| async move { read_update_status(source.as_ref()).await })
            .await
    }

    /// Drops both cached documents so the next access reads the files again.
    pub async fn invalidate(&self) {
        info!("Invalidating cached dashboard data");
        self.articles.invalidate().await;
        self.status.invalidate().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Article, Comments};
    use serde_json::json;
    use tempfile::TempDir;

    fn reader(dir: &TempDir) -> DataStoreReader {
        DataStoreReader::from_config(&DashboardConfig::new(dir.path()))
    }

    fn collection_json() -> serde_json::Value {
        json!({
            "articles": [{
                "id": "n-1",
                "title": "Collected",
                "source": "Wire",
                "date": "2025-08-14 07:00",
                "summary": "s",
                "originalUrl": "https://example.com/n-1",
                "similarArticles": [{"source": "Other", "count": 4}],
                "comments": {
                    "total": 9,
                    "positive": 1,
                    "negative": 1,
                    "neutral": 1,
                    "top_reactions": []
                },
                "aiInsight": "i",
                "keywords": ["k"],
                "keyword_counts": [1]
            }]
        })
    }

    #[tokio::test]
    async fn test_valid_collection_is_unchanged() {
        let dir = TempDir::new().unwrap();
        let value = collection_json();
        std::fs::write(dir.path().join("articles.json"), value.to_string()).unwrap();

        let loaded = reader(&dir).load_articles().await;
        assert_eq!(loaded.origin, Origin::File);
        assert!(loaded.diagnostic.is_none());
        assert_eq!(serde_json::to_value(&loaded.value).unwrap(), value);
    }

    #[tokio::test]
    async fn test_missing_collection_is_sample() {
        let dir = TempDir::new().unwrap();
        let loaded = reader(&dir).load_articles().await;
        assert_eq!(loaded.origin, Origin::Fallback);
        assert!(loaded.diagnostic.is_none());
        assert_eq!(loaded.value, sample_articles());
    }

    #[tokio::test]
    async fn test_malformed_collection_is_sample_with_diagnostic() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("articles.json"), "[1, 2").unwrap();
        let loaded = reader(&dir).load_articles().await;
        assert_eq!(loaded.value, sample_articles());
        assert!(loaded.diagnostic.unwrap().starts_with("Failed to load articles"));
    }

    #[tokio::test]
    async fn test_mismatched_collection_is_sample() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("articles.json"),
            r#"{"articles": [{"id": "only-an-id"}]}"#,
        )
        .unwrap();
        let loaded = reader(&dir).load_articles().await;
        assert_eq!(loaded.origin, Origin::Fallback);
        assert_eq!(loaded.value, sample_articles());
        assert!(loaded.diagnostic.is_some());
    }

    #[tokio::test]
    async fn test_status_fallbacks() {
        let dir = TempDir::new().unwrap();
        let missing = reader(&dir).load_update_status().await;
        assert_eq!(missing.value.status, SAMPLE_STATUS);
        assert_eq!(missing.value.total_articles_today, 0);
        assert!(crate::freshness::parse_timestamp(&missing.value.last_update).is_ok());

        std::fs::write(dir.path().join("latest_update.json"), "nope").unwrap();
        let broken = reader(&dir).load_update_status().await;
        assert!(broken.value.status.starts_with("error: "));
        assert!(broken.diagnostic.is_some());
    }

    #[tokio::test]
    async fn test_status_from_file() {
        let dir = TempDir::new().unwrap();
        let value = json!({
            "last_update": "2025-08-14T07:00:00Z",
            "total_articles_today": 12,
            "status": "running"
        });
        std::fs::write(dir.path().join("latest_update.json"), value.to_string()).unwrap();
        let loaded = reader(&dir).load_update_status().await;
        assert_eq!(loaded.origin, Origin::File);
        assert_eq!(serde_json::to_value(&loaded.value).unwrap(), value);
    }

    #[tokio::test]
    async fn test_cached_until_invalidated() {
        let dir = TempDir::new().unwrap();
        let reader = reader(&dir);
        assert_eq!(reader.load_articles().await.origin, Origin::Fallback);

        std::fs::write(dir.path().join("articles.json"), collection_json().to_string()).unwrap();
        // still within the TTL
        assert_eq!(reader.load_articles().await.origin, Origin::Fallback);

        reader.invalidate().await;
        assert_eq!(reader.load_articles().await.origin, Origin::File);
    }

    struct FailingSource;

    #[async_trait::async_trait]
    impl DocumentSource for FailingSource {
        async fn read_articles(&self) -> crate::Result<Option<ArticleCollection>> {
            Err(crate::Error::Schema("broken".to_string()))
        }

        async fn read_update_status(&self) -> crate::Result<Option<UpdateStatus>> {
            Err(crate::Error::Io(std::io::Error::other("disk on fire")))
        }

        fn articles_location(&self) -> String {
            "memory://articles".to_string()
        }

        fn update_location(&self) -> String {
            "memory://status".to_string()
        }
    }

    #[tokio::test]
    async fn test_errors_never_escape() {
        let reader = DataStoreReader::new(Arc::new(FailingSource), Duration::from_secs(60));
        let articles = reader.load_articles().await;
        assert_eq!(articles.value.articles.len(), 2);
        let status = reader.load_update_status().await;
        assert!(status.value.status.contains("disk on fire"));
        assert_eq!(reader.source().articles_location(), "memory://articles");
        assert_eq!(reader.cache_ttl(), Duration::from_secs(60));
    }

    #[test]
    fn test_loaded_serializes_origin() {
        let loaded = Loaded::file(Article {
            id: "x".to_string(),
            title: String::new(),
            source: String::new(),
            date: String::new(),
            summary: String::new(),
            original_url: String::new(),
            similar_articles: vec![],
            comments: Comments {
                total: 0,
                positive: 0,
                negative: 0,
                neutral: 0,
                top_reactions: vec![],
            },
            ai_insight: String::new(),
            keywords: None,
            keyword_counts: None,
        });
        assert_eq!(serde_json::to_value(&loaded).unwrap()["origin"], "file");
    }
}
