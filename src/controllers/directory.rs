use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use super::LocaleQuery;
use crate::{
    domain::directory::{
        Business, CategorySummary, DirectoryService, DirectoryServiceApi, Locale, Subcategory,
    },
    error::{AppError, AppResult},
};

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<CategorySummary>,
}

#[derive(Debug, Serialize)]
pub struct SubcategoriesResponse {
    pub subcategories: Vec<Subcategory>,
}

/// Business record plus the name and description to show for the requested locale
#[derive(Debug, Serialize)]
pub struct BusinessResponse {
    #[serde(flatten)]
    pub business: Business,
    pub display_name: String,
    pub display_description: String,
}

impl BusinessResponse {
    pub fn localized(business: Business, locale: Locale) -> Self {
        Self {
            display_name: business.display_name(locale).to_string(),
            display_description: business.display_description(locale).to_string(),
            business,
        }
    }
}

pub struct DirectoryController {
    directory_service: Arc<DirectoryService>,
}

impl DirectoryController {
    pub fn new(directory_service: Arc<DirectoryService>) -> Self {
        Self { directory_service }
    }

    /// GET /api/categories - Categories with derived counts
    pub async fn list_categories(
        State(controller): State<Arc<DirectoryController>>,
    ) -> AppResult<Json<CategoriesResponse>> {
        let categories = controller.directory_service.category_summaries().await?;
        Ok(Json(CategoriesResponse { categories }))
    }

    /// GET /api/categories/{categoryId}/subcategories
    pub async fn list_subcategories(
        State(controller): State<Arc<DirectoryController>>,
        Path(category_id): Path<String>,
    ) -> AppResult<Json<SubcategoriesResponse>> {
        let subcategories = controller
            .directory_service
            .subcategories(&category_id)
            .await?;
        Ok(Json(SubcategoriesResponse { subcategories }))
    }

    /// GET /api/businesses/{businessId} - Localized business detail
    pub async fn get_business(
        State(controller): State<Arc<DirectoryController>>,
        Path(business_id): Path<String>,
        Query(query): Query<LocaleQuery>,
    ) -> AppResult<Json<BusinessResponse>> {
        let locale = query.resolve()?;
        let business = controller
            .directory_service
            .business(&business_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("business {}", business_id)))?;

        Ok(Json(BusinessResponse::localized(business, locale)))
    }
}
