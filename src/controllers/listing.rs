use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{directory::BusinessResponse, LocaleQuery};
use crate::{
    domain::listing::{filter_by_display_name, ListingService, ListingServiceApi},
    error::AppResult,
};

#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    pub cursor: Option<String>,
    pub locale: Option<String>,
    /// Narrows the returned page by display name; paging is unaffected
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListingResponse {
    pub businesses: Vec<BusinessResponse>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

pub struct ListingController {
    listing_service: Arc<ListingService>,
}

impl ListingController {
    pub fn new(listing_service: Arc<ListingService>) -> Self {
        Self { listing_service }
    }

    /// GET /api/categories/{categoryId}/subcategories/{subcategoryId}/businesses
    ///
    /// Without `cursor` returns the first page; with it, the page that follows.
    /// `next_cursor` and `has_more` describe the unfiltered listing even when `q` is set.
    pub async fn list_businesses(
        State(controller): State<Arc<ListingController>>,
        Path((category_id, subcategory_id)): Path<(String, String)>,
        Query(query): Query<ListingQuery>,
    ) -> AppResult<Json<ListingResponse>> {
        let locale = LocaleQuery {
            locale: query.locale,
        }
        .resolve()?;

        let page = match query.cursor.as_deref() {
            Some(cursor) => {
                controller
                    .listing_service
                    .fetch_next_page(&category_id, &subcategory_id, cursor)
                    .await?
            }
            None => {
                controller
                    .listing_service
                    .fetch_first_page(&category_id, &subcategory_id)
                    .await?
            }
        };

        let term = query.q.as_deref().unwrap_or_default();
        let businesses = filter_by_display_name(&page.businesses, term, locale)
            .into_iter()
            .map(|business| BusinessResponse::localized(business.clone(), locale))
            .collect();

        Ok(Json(ListingResponse {
            has_more: page.next_cursor.is_some(),
            next_cursor: page.next_cursor,
            businesses,
        }))
    }
}
