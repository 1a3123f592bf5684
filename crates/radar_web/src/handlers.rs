use axum::{
    extract::{Path, RawQuery, State},
    http::StatusCode,
    response::{Html, Redirect},
    Json,
};
use chrono::{Local, NaiveDate, Utc};
use serde::Serialize;
use std::sync::Arc;
use url::form_urlencoded;
use radar_core::freshness::assess;
use radar_core::{Article, ArticleCollection, ArticleParams, DashboardView, Freshness, Origin, UpdateStatus};
use crate::render::{self, PageContext};
use crate::{ApiError, AppState};

#[derive(Debug, Default)]
pub struct DashboardQuery {
    pub params: ArticleParams,
    /// Date filter. Echoed back into the page, never used to filter.
    pub day: Option<String>,
}

impl DashboardQuery {
    /// Reads the page query string. Unknown keys are ignored and a repeated
    /// key keeps its last value.
    pub fn parse(raw: Option<&str>) -> Self {
        let mut query = Self::default();
        for (key, value) in form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
            let slot = match key.as_ref() {
                "article" => &mut query.params.article,
                "title" => &mut query.params.title,
                "source" => &mut query.params.source,
                "url" => &mut query.params.url,
                "date" => &mut query.params.date,
                "day" => &mut query.day,
                _ => continue,
            };
            *slot = Some(value.into_owned());
        }
        query
    }
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    #[serde(flatten)]
    pub status: UpdateStatus,
    pub freshness: Freshness,
    pub origin: Origin,
    pub diagnostic: Option<String>,
}

pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    RawQuery(raw_query): RawQuery,
) -> Html<String> {
    let query = DashboardQuery::parse(raw_query.as_deref());
    let articles = state.reader.load_articles().await;
    let status = state.reader.load_update_status().await;
    let now = Local::now();

    let day = query
        .day
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .unwrap_or_else(|| now.date_naive());

    let view = DashboardView::build(articles, status, &query.params, now);
    let ctx = PageContext {
        day,
        raw_query: raw_query.as_deref(),
        articles_location: state.reader.source().articles_location(),
        update_location: state.reader.source().update_location(),
        cache_ttl: state.reader.cache_ttl(),
    };
    Html(render::dashboard_page(&view, &ctx))
}

pub async fn refresh(
    State(state): State<Arc<AppState>>,
    RawQuery(raw_query): RawQuery,
) -> Redirect {
    state.reader.invalidate().await;
    match raw_query.filter(|q| !q.is_empty()) {
        Some(query) => Redirect::to(&format!("/?{}", query)),
        None => Redirect::to("/"),
    }
}

pub async fn list_articles(
    State(state): State<Arc<AppState>>,
) -> Json<ArticleCollection> {
    Json(state.reader.load_articles().await.value)
}

pub async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Article>, ApiError> {
    let collection = state.reader.load_articles().await.value;
    collection
        .find(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::ArticleNotFound(id))
}

pub async fn get_status(
    State(state): State<Arc<AppState>>,
) -> Json<StatusResponse> {
    let loaded = state.reader.load_update_status().await;
    let report = assess(&loaded.value, Utc::now());
    Json(StatusResponse {
        freshness: report.freshness,
        origin: loaded.origin,
        diagnostic: loaded.diagnostic.or(report.diagnostic),
        status: loaded.value,
    })
}

pub async fn refresh_api(
    State(state): State<Arc<AppState>>,
) -> StatusCode {
    state.reader.invalidate().await;
    StatusCode::NO_CONTENT
}
