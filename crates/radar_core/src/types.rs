use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Keyword series shown when an article carries no keyword data of its own.
pub const DEFAULT_KEYWORDS: [(&str, u64); 5] = [
    ("SKT", 15),
    ("AI", 12),
    ("보안", 8),
    ("통신사", 6),
    ("디지털전환", 4),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub source: String,
    /// Free-text timestamp as written by the collector. Never parsed.
    pub date: String,
    pub summary: String,
    pub original_url: String,
    pub similar_articles: Vec<SimilarArticle>,
    pub comments: Comments,
    pub ai_insight: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(default, rename = "keyword_counts", skip_serializing_if = "Option::is_none")]
    pub keyword_counts: Option<Vec<u64>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarArticle {
    pub source: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comments {
    /// Reported by the collector; not necessarily the sum of the parts.
    pub total: u64,
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
    pub top_reactions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentShare {
    pub label: &'static str,
    pub count: u64,
    pub percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleCollection {
    #[serde(default)]
    pub articles: Vec<Article>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStatus {
    pub last_update: String,
    #[serde(default)]
    pub total_articles_today: u64,
    #[serde(default)]
    pub status: String,
}

impl Article {
    pub fn similar_total(&self) -> u64 {
        self.similar_articles.iter().map(|s| s.count).sum()
    }

    /// Keyword/count pairs, falling back to [`DEFAULT_KEYWORDS`] when either
    /// side is missing. Mismatched lengths are cut to the shorter side.
    pub fn keyword_series(&self) -> Vec<(String, u64)> {
        match (&self.keywords, &self.keyword_counts) {
            (Some(keywords), Some(counts)) => keywords
                .iter()
                .cloned()
                .zip(counts.iter().copied())
                .collect(),
            _ => DEFAULT_KEYWORDS
                .iter()
                .map(|(k, c)| (k.to_string(), *c))
                .collect(),
        }
    }
}

impl Comments {
    /// Share of each sentiment over positive + negative + neutral.
    pub fn sentiment_shares(&self) -> [SentimentShare; 3] {
        let sum = self.positive + self.negative + self.neutral;
        let share = |label, count: u64| SentimentShare {
            label,
            count,
            percent: if sum == 0 {
                0.0
            } else {
                count as f64 * 100.0 / sum as f64
            },
        };
        [
            share("Positive", self.positive),
            share("Negative", self.negative),
            share("Neutral", self.neutral),
        ]
    }
}

impl ArticleCollection {
    pub fn find(&self, id: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.id == id)
    }
}

impl UpdateStatus {
    /// Status record used when the real one cannot be read.
    pub fn fallback(now: DateTime<Utc>, status: impl Into<String>) -> Self {
        Self {
            last_update: now.to_rfc3339_opts(SecondsFormat::Secs, true),
            total_articles_today: 0,
            status: status.into(),
        }
    }
}
