use std::fmt::Write;
use std::time::Duration;
use chrono::{Local, NaiveDate};
use radar_core::dashboard::list_label;
use radar_core::{Article, DashboardView, Freshness};
use url::form_urlencoded;
use url::Url;

const STYLE: &str = r#"<style>
body { font-family: sans-serif; background: #fafafa; color: #1a1a1a; margin: 0; display: flex; }
aside { width: 20rem; padding: 1.5rem; background: #fff; border-right: 1px solid #e0e4e7; min-height: 100vh; }
main { flex: 1; padding: 1.5rem 2rem; }
.columns { display: flex; gap: 2rem; }
.columns > div:first-child { flex: 2; }
.columns > div:last-child { flex: 1; }
.card, .metric { background: #fff; border: 1px solid #e0e4e7; border-radius: 8px; padding: 1rem; margin: 0.5rem 0; }
.metric { text-align: center; }
.metric .value { font-size: 1.5rem; font-weight: 700; margin: 0; }
.metric .label, .meta { color: #6b7280; font-size: 0.875rem; margin: 0; }
.insight { background: #1e293b; color: #f1f5f9; padding: 1.5rem; border-radius: 8px; }
.reaction { background: #f8fafc; padding: 0.75rem; margin: 0.5rem 0; border-left: 3px solid #3b82f6; }
.bar { background: #64748b; height: 0.75rem; border-radius: 3px; }
.notice { padding: 0.75rem; border-radius: 6px; margin: 0.5rem 0; }
.notice.error { background: #fee2e2; color: #991b1b; }
.notice.info { background: #dbeafe; color: #1e40af; }
.live { color: #10b981; } .delayed { color: #f59e0b; } .offline { color: #ef4444; }
.picker a { display: block; padding: 0.4rem; color: #374151; text-decoration: none; }
.picker a.selected { background: #e0e7ff; font-weight: 600; }
table { width: 100%; border-collapse: collapse; } td { padding: 0.2rem; font-size: 0.875rem; }
</style>"#;

/// Request-level values that are not part of the view model.
pub struct PageContext<'a> {
    pub day: NaiveDate,
    pub raw_query: Option<&'a str>,
    pub articles_location: String,
    pub update_location: String,
    pub cache_ttl: Duration,
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Only http(s) links are rendered as links.
pub fn safe_href(raw: &str) -> Option<String> {
    Url::parse(raw)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
        .map(|url| url.to_string())
}

/// Query pairs that reproduce `article` on the next request. A synthesized
/// article carries every field it was built from.
fn article_pairs(view: &DashboardView, idx: usize, article: &Article) -> Vec<(&'static str, String)> {
    let mut pairs = vec![("article", article.id.clone())];
    if view.synthesized && idx == 0 {
        pairs.push(("title", article.title.clone()));
        pairs.push(("source", article.source.clone()));
        pairs.push(("url", article.original_url.clone()));
        pairs.push(("date", article.date.clone()));
    }
    pairs
}

fn selected_pairs(view: &DashboardView) -> Vec<(&'static str, String)> {
    match (view.selected, view.selected_article()) {
        (Some(idx), Some(article)) => article_pairs(view, idx, article),
        _ => Vec::new(),
    }
}

fn picker_query(pairs: &[(&'static str, String)], day: NaiveDate) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        query.append_pair(key, value);
    }
    query
        .append_pair("day", &day.format("%Y-%m-%d").to_string())
        .finish()
}

fn freshness_class(freshness: Freshness) -> &'static str {
    match freshness {
        Freshness::Live => "live",
        Freshness::Delayed => "delayed",
        Freshness::Offline => "offline",
    }
}

fn metric(out: &mut String, value: impl std::fmt::Display, label: &str) {
    let _ = write!(
        out,
        r#"<div class="metric"><p class="value">{}</p><p class="label">{}</p></div>"#,
        value,
        escape(label)
    );
}

/// Horizontal bar rows scaled against the largest value.
fn bars(out: &mut String, rows: &[(String, u64)]) {
    let max = rows.iter().map(|(_, v)| *v).max().unwrap_or(0).max(1);
    out.push_str("<table>");
    for (label, value) in rows {
        let width = *value as f64 * 100.0 / max as f64;
        let _ = write!(
            out,
            r#"<tr><td>{}</td><td style="width:60%"><div class="bar" style="width:{:.1}%"></div></td><td>{}</td></tr>"#,
            escape(label),
            width,
            value
        );
    }
    out.push_str("</table>");
}

fn sidebar(out: &mut String, view: &DashboardView, ctx: &PageContext) {
    out.push_str("<aside><h2>Articles</h2>");

    let updated = view
        .report
        .last_update
        .map(|t| t.with_timezone(&Local).format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string());
    let _ = write!(
        out,
        r#"<div class="card"><div class="{}"><strong>● {}</strong></div><div class="meta">updated {} · {}</div></div>"#,
        freshness_class(view.report.freshness),
        view.report.freshness.label(),
        updated,
        escape(&view.status.status)
    );

    out.push_str(r#"<h3>Date filter</h3><form method="get" action="/">"#);
    for (key, value) in selected_pairs(view) {
        let _ = write!(
            out,
            r#"<input type="hidden" name="{}" value="{}">"#,
            key,
            escape(&value)
        );
    }
    let _ = write!(
        out,
        r#"<input type="date" name="day" value="{}" onchange="this.form.submit()"></form>"#,
        ctx.day.format("%Y-%m-%d")
    );

    metric(out, view.article_count(), "Today's articles");
    metric(out, view.total_articles_today(), "Processed in total");

    out.push_str(r#"<h3>Recent articles</h3>"#);
    if view.articles.is_empty() {
        out.push_str(r#"<div class="notice info">No articles yet. Check the collector output.</div>"#);
    } else {
        out.push_str(r#"<nav class="picker">"#);
        for (idx, article) in view.articles.iter().enumerate() {
            let class = if Some(idx) == view.selected { "selected" } else { "" };
            let _ = write!(
                out,
                r#"<a class="{}" href="/?{}">{}</a>"#,
                class,
                escape(&picker_query(&article_pairs(view, idx, article), ctx.day)),
                escape(&list_label(article))
            );
        }
        out.push_str("</nav>");
    }
    out.push_str("</aside>");
}

fn article_sections(out: &mut String, article: &Article) {
    out.push_str(r#"<div class="columns"><div>"#);

    out.push_str("<h3>Article</h3>");
    let link = match safe_href(&article.original_url) {
        Some(href) => format!(r#"<a href="{}" target="_blank" rel="noopener">Read original →</a>"#, escape(&href)),
        None => escape(&article.original_url),
    };
    let _ = write!(
        out,
        r#"<div class="card"><h2>{}</h2><p class="meta">Source: {} • {}</p><p class="meta">{}</p></div>"#,
        escape(&article.title),
        escape(&article.source),
        escape(&article.date),
        link
    );

    out.push_str("<h3>AI summary</h3>");
    let _ = write!(out, r#"<div class="card">{}</div>"#, escape(&article.summary));

    out.push_str("<h3>Comment sentiment</h3>");
    let shares = article.comments.sentiment_shares();
    out.push_str("<table>");
    for share in &shares {
        let _ = write!(
            out,
            r#"<tr><td>{}</td><td style="width:60%"><div class="bar" style="width:{:.1}%"></div></td><td>{} ({:.1}%)</td></tr>"#,
            share.label, share.percent, share.count, share.percent
        );
    }
    out.push_str("</table>");

    out.push_str("<p><strong>Top reactions</strong></p>");
    for reaction in &article.comments.top_reactions {
        let _ = write!(out, r#"<div class="reaction">{}</div>"#, escape(reaction));
    }

    out.push_str("</div><div>");

    out.push_str("<h3>Coverage</h3>");
    metric(out, article.similar_total(), "Similar articles");
    metric(out, article.comments.total, "Total comments");
    let outlets: Vec<(String, u64)> = article
        .similar_articles
        .iter()
        .map(|s| (s.source.clone(), s.count))
        .collect();
    bars(out, &outlets);

    out.push_str("<h3>AI insight</h3>");
    let _ = write!(
        out,
        r#"<div class="insight"><h4>Analysis</h4><p>{}</p></div>"#,
        escape(&article.ai_insight)
    );

    out.push_str("<h3>Keywords</h3>");
    bars(out, &article.keyword_series());

    out.push_str("</div></div>");
}

fn developer_panel(out: &mut String, view: &DashboardView, ctx: &PageContext) {
    let details = serde_json::json!({
        "articles_file": ctx.articles_location,
        "update_file": ctx.update_location,
        "cache_ttl_secs": ctx.cache_ttl.as_secs(),
        "article_count": view.article_count(),
        "last_update": view.status.last_update,
        "selected_article_id": view.selected_id(),
    });
    let pretty = serde_json::to_string_pretty(&details).unwrap_or_default();
    let _ = write!(
        out,
        "<details><summary>Developer settings</summary><pre>{}</pre></details>",
        escape(&pretty)
    );
}

pub fn dashboard_page(view: &DashboardView, ctx: &PageContext) -> String {
    let mut out = String::with_capacity(16 * 1024);
    out.push_str(r#"<!DOCTYPE html><html lang="ko"><head><meta charset="utf-8"><title>JamesRadarBot News Dashboard</title>"#);
    out.push_str(STYLE);
    out.push_str("</head><body>");

    sidebar(&mut out, view, ctx);

    out.push_str("<main>");
    out.push_str(r#"<div class="card"><h1>JamesRadarBot</h1><p class="meta">Live news monitoring &amp; analysis dashboard</p></div>"#);

    let action = match ctx.raw_query.filter(|q| !q.is_empty()) {
        Some(query) => format!("/refresh?{}", query),
        None => "/refresh".to_string(),
    };
    let _ = write!(
        out,
        r#"<form method="post" action="{}"><button type="submit" title="Load the latest news data">⟳ Refresh data</button></form>"#,
        escape(&action)
    );

    for diagnostic in &view.diagnostics {
        let _ = write!(out, r#"<div class="notice error">{}</div>"#, escape(diagnostic));
    }
    if let Some(banner) = view.banner() {
        let _ = write!(out, r#"<div class="notice info">{}</div>"#, escape(&banner));
    }

    if let Some(article) = view.selected_article() {
        article_sections(&mut out, article);
    }

    let _ = write!(
        out,
        r#"<hr><p class="meta" style="text-align:center">Last rendered: {} • JamesRadarBot 24/7 monitoring</p>"#,
        view.generated_at.format("%Y.%m.%d %H:%M")
    );
    developer_panel(&mut out, view, ctx);
    out.push_str("</main></body></html>");
    out
}
