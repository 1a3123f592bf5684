use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use tracing::info;
use crate::freshness::{assess, StatusReport};
use crate::reader::Loaded;
use crate::select::select_index;
use crate::synthesize::{synthesize, ArticleParams};
use crate::types::{Article, ArticleCollection, UpdateStatus};

const LIST_TITLE_CHARS: usize = 40;
const BANNER_TITLE_CHARS: usize = 50;

/// Everything one render of the dashboard needs.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    /// Articles in display order, a synthesized article first.
    pub articles: Vec<Article>,
    pub selected: Option<usize>,
    pub synthesized: bool,
    pub status: UpdateStatus,
    pub report: StatusReport,
    pub diagnostics: Vec<String>,
    pub generated_at: DateTime<Local>,
}

impl DashboardView {
    pub fn build(
        articles: Loaded<ArticleCollection>,
        status: Loaded<UpdateStatus>,
        params: &ArticleParams,
        now: DateTime<Local>,
    ) -> Self {
        let mut diagnostics: Vec<String> = [articles.diagnostic, status.diagnostic]
            .into_iter()
            .flatten()
            .collect();

        let mut list = articles.value.articles;
        let synthetic = synthesize(params, now);
        let synthesized = synthetic.is_some();
        if let Some(article) = synthetic {
            info!("Showing live article {} from query parameters", article.id);
            list.insert(0, article);
        }

        let selected = select_index(&list, params.requested_id(), synthesized);
        let report = assess(&status.value, now.with_timezone(&Utc));
        if let Some(diagnostic) = &report.diagnostic {
            diagnostics.push(diagnostic.clone());
        }

        Self {
            articles: list,
            selected,
            synthesized,
            status: status.value,
            report,
            diagnostics,
            generated_at: now,
        }
    }

    pub fn selected_article(&self) -> Option<&Article> {
        self.selected.and_then(|i| self.articles.get(i))
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_article().map(|a| a.id.as_str())
    }

    pub fn article_count(&self) -> usize {
        self.articles.len()
    }

    pub fn total_articles_today(&self) -> u64 {
        self.status.total_articles_today
    }

    /// Notice shown when the selection came from query parameters.
    pub fn banner(&self) -> Option<String> {
        if !self.synthesized {
            return None;
        }
        self.articles
            .first()
            .map(|a| format!("Live news analysis: {}...", truncate_chars(&a.title, BANNER_TITLE_CHARS)))
    }
}

/// Picker label for an article.
pub fn list_label(article: &Article) -> String {
    format!("{} • {}...", article.source, truncate_chars(&article.title, LIST_TITLE_CHARS))
}

pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::freshness::Freshness;
    use crate::reader::Origin;
    use crate::sample::sample_articles;
    use chrono::TimeZone;

    fn loaded<T>(value: T) -> Loaded<T> {
        Loaded {
            value,
            origin: Origin::Fallback,
            diagnostic: None,
        }
    }

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 8, 13, 12, 0, 0).unwrap()
    }

    fn status(last_update: &str) -> UpdateStatus {
        UpdateStatus {
            last_update: last_update.to_string(),
            total_articles_today: 7,
            status: "ok".to_string(),
        }
    }

    fn fresh_status() -> UpdateStatus {
        status(&now().with_timezone(&Utc).to_rfc3339())
    }

    #[test]
    fn test_sample_dashboard() {
        let view = DashboardView::build(
            loaded(sample_articles()),
            loaded(fresh_status()),
            &ArticleParams::default(),
            now(),
        );
        assert_eq!(view.article_count(), 2);
        assert!(!view.synthesized);
        assert!(view.banner().is_none());
        assert_eq!(view.report.freshness, Freshness::Live);
        assert_eq!(view.total_articles_today(), 7);

        let selected = view.selected_article().unwrap();
        assert_eq!(selected.id, "20250813-001");
        let shares = selected.comments.sentiment_shares();
        assert_eq!(
            shares.iter().map(|s| s.count).collect::<Vec<_>>(),
            vec![45, 35, 167]
        );
        assert_eq!(selected.comments.total, 247);
    }

    #[test]
    fn test_query_article_is_prepended_and_selected() {
        let params = ArticleParams {
            article: Some("X001".to_string()),
            title: Some("Hello".to_string()),
            source: Some("Outlet".to_string()),
            url: Some("http://x".to_string()),
            date: None,
        };
        let view = DashboardView::build(loaded(sample_articles()), loaded(fresh_status()), &params, now());
        assert_eq!(view.article_count(), 3);
        assert_eq!(view.selected, Some(0));
        assert_eq!(view.selected_id(), Some("X001"));

        let selected = view.selected_article().unwrap();
        assert_eq!(selected.title, "Hello");
        assert_eq!(selected.comments.total, 150);
        assert_eq!(view.banner().unwrap(), "Live news analysis: Hello...");
    }

    #[test]
    fn test_query_article_overrides_existing_id() {
        let params = ArticleParams {
            article: Some("20250813-002".to_string()),
            title: Some("Override".to_string()),
            source: Some("Outlet".to_string()),
            url: Some("http://x".to_string()),
            date: None,
        };
        let view = DashboardView::build(loaded(sample_articles()), loaded(fresh_status()), &params, now());
        assert_eq!(view.selected_article().unwrap().title, "Override");
    }

    #[test]
    fn test_incomplete_query_uses_requested_id() {
        let params = ArticleParams {
            article: Some("20250813-002".to_string()),
            title: Some("Hello".to_string()),
            ..Default::default()
        };
        let view = DashboardView::build(loaded(sample_articles()), loaded(fresh_status()), &params, now());
        assert!(!view.synthesized);
        assert_eq!(view.article_count(), 2);
        assert_eq!(view.selected_id(), Some("20250813-002"));
    }

    #[test]
    fn test_empty_collection() {
        let view = DashboardView::build(
            loaded(ArticleCollection::default()),
            loaded(fresh_status()),
            &ArticleParams::default(),
            now(),
        );
        assert!(view.selected_article().is_none());
        assert_eq!(view.article_count(), 0);
    }

    #[test]
    fn test_diagnostics_are_collected() {
        let mut articles = loaded(sample_articles());
        articles.diagnostic = Some("Failed to load articles: boom".to_string());
        let view = DashboardView::build(
            articles,
            loaded(status("garbage")),
            &ArticleParams::default(),
            now(),
        );
        assert_eq!(view.diagnostics.len(), 2);
        assert_eq!(view.report.freshness, Freshness::Offline);
    }

    #[test]
    fn test_labels_truncate_on_chars() {
        let sample = sample_articles();
        let label = list_label(&sample.articles[0]);
        assert!(label.starts_with("디지털데일리 • 유영상 SKT"));
        assert!(label.ends_with("..."));
        assert_eq!(truncate_chars("가나다", 2), "가나");
        assert_eq!(truncate_chars("short", 40), "short");
    }
}
