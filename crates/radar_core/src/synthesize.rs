use chrono::{DateTime, Local};
use serde::Deserialize;
use crate::types::{Article, Comments, SimilarArticle};

pub const PLACEHOLDER_OUTLET: &str = "other outlets";
pub const PLACEHOLDER_REACTIONS: [&str; 3] = [
    "Live news analysis in progress",
    "Detailed analysis will be updated shortly",
    "Please check the original article",
];
pub const PLACEHOLDER_KEYWORDS: [(&str, u64); 3] = [("James", 5), ("live", 3), ("news", 2)];

/// Article fields carried in the page query string, e.g. from a notification link.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleParams {
    /// Requested article id
    pub article: Option<String>,
    pub title: Option<String>,
    pub source: Option<String>,
    pub url: Option<String>,
    pub date: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl ArticleParams {
    pub fn requested_id(&self) -> Option<&str> {
        present(&self.article)
    }
}

/// Builds a transient article from query parameters.
///
/// Returns `None` unless the id, title, source and url are all given.
pub fn synthesize(params: &ArticleParams, now: DateTime<Local>) -> Option<Article> {
    let id = present(&params.article)?;
    let title = present(&params.title)?;
    let source = present(&params.source)?;
    let url = present(&params.url)?;
    let date = present(&params.date)
        .map(str::to_string)
        .unwrap_or_else(|| now.format("%Y-%m-%d %H:%M").to_string());

    Some(Article {
        id: id.to_string(),
        title: title.to_string(),
        source: source.to_string(),
        date,
        summary: format!(
            "AI analysis of '{}' is in progress. Open the original article for the full story.",
            title
        ),
        original_url: url.to_string(),
        similar_articles: vec![SimilarArticle {
            source: PLACEHOLDER_OUTLET.to_string(),
            count: 1,
        }],
        comments: Comments {
            total: 150,
            positive: 65,
            negative: 25,
            neutral: 60,
            top_reactions: PLACEHOLDER_REACTIONS.iter().map(|r| r.to_string()).collect(),
        },
        ai_insight: format!(
            "Live news from '{}'. A tracked keyword was detected and a notification was sent. Detailed analysis will follow shortly.",
            source
        ),
        keywords: Some(PLACEHOLDER_KEYWORDS.iter().map(|(k, _)| k.to_string()).collect()),
        keyword_counts: Some(PLACEHOLDER_KEYWORDS.iter().map(|(_, c)| *c).collect()),
    })
}
