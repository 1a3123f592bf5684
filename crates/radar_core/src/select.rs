use crate::types::Article;

/// Index of the article to show.
///
/// A synthesized article always sits at index 0 and wins. Otherwise the first
/// article whose id matches `requested_id`, falling back to the first article.
pub fn select_index(articles: &[Article], requested_id: Option<&str>, synthesized: bool) -> Option<usize> {
    if articles.is_empty() {
        return None;
    }
    if synthesized {
        return Some(0);
    }
    requested_id
        .and_then(|id| articles.iter().position(|a| a.id == id))
        .or(Some(0))
}

pub fn select<'a>(articles: &'a [Article], requested_id: Option<&str>, synthesized: bool) -> Option<&'a Article> {
    select_index(articles, requested_id, synthesized).and_then(|i| articles.get(i))
}
