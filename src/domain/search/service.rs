use super::{match_suggestions, SearchError, SearchIndexCache, Suggestion};
use crate::domain::directory::Locale;
use async_trait::async_trait;
use std::sync::Arc;

pub struct SearchService {
    cache: Arc<SearchIndexCache>,
}

impl SearchService {
    pub fn new(cache: Arc<SearchIndexCache>) -> Self {
        Self { cache }
    }
}

#[async_trait]
pub trait SearchServiceApi: Send + Sync {
    /// Suggestions for a partially typed query.
    /// Blank queries return immediately without touching the index.
    async fn suggest(&self, query: &str, locale: Locale) -> Result<Vec<Suggestion>, SearchError>;
}

#[async_trait]
impl SearchServiceApi for SearchService {
    async fn suggest(&self, query: &str, locale: Locale) -> Result<Vec<Suggestion>, SearchError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let snapshot = self.cache.get_snapshot(locale).await?;
        let suggestions = match_suggestions(query, &snapshot, locale);

        tracing::debug!(
            query = %query,
            locale = %locale,
            suggestion_count = suggestions.len(),
            "Search suggestions computed"
        );

        Ok(suggestions)
    }
}
