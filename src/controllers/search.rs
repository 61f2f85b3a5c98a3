use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::LocaleQuery;
use crate::{
    domain::search::{SearchService, SearchServiceApi, Suggestion},
    error::AppResult,
};

#[derive(Debug, Deserialize)]
pub struct SuggestionQuery {
    #[serde(default)]
    pub q: String,
    pub locale: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<Suggestion>,
}

pub struct SearchController {
    search_service: Arc<SearchService>,
}

impl SearchController {
    pub fn new(search_service: Arc<SearchService>) -> Self {
        Self { search_service }
    }

    /// GET /api/search/suggestions?q=...&locale=...
    pub async fn suggestions(
        State(controller): State<Arc<SearchController>>,
        Query(query): Query<SuggestionQuery>,
    ) -> AppResult<Json<SuggestionsResponse>> {
        let locale = LocaleQuery {
            locale: query.locale,
        }
        .resolve()?;

        let suggestions = controller.search_service.suggest(&query.q, locale).await?;
        Ok(Json(SuggestionsResponse { suggestions }))
    }
}
