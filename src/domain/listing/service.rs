use super::ListingError;
use crate::domain::directory::{BusinessPage, DirectoryRepository};
use async_trait::async_trait;
use std::sync::Arc;

/// Businesses requested per page unless configured otherwise
pub const DEFAULT_PAGE_SIZE: usize = 50;
/// Airtable refuses page sizes above 100
pub const MAX_PAGE_SIZE: usize = 100;

pub struct ListingService {
    repository: Arc<dyn DirectoryRepository>,
}

impl ListingService {
    pub fn new(repository: Arc<dyn DirectoryRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
pub trait ListingServiceApi: Send + Sync {
    /// First page of businesses in both the category and the subcategory
    async fn fetch_first_page(
        &self,
        category_id: &str,
        subcategory_id: &str,
    ) -> Result<BusinessPage, ListingError>;

    /// Continue a listing from the cursor returned by the previous page
    async fn fetch_next_page(
        &self,
        category_id: &str,
        subcategory_id: &str,
        cursor: &str,
    ) -> Result<BusinessPage, ListingError>;
}

#[async_trait]
impl ListingServiceApi for ListingService {
    async fn fetch_first_page(
        &self,
        category_id: &str,
        subcategory_id: &str,
    ) -> Result<BusinessPage, ListingError> {
        self.validate_ids(category_id, subcategory_id)?;
        self.fetch(category_id, subcategory_id, None).await
    }

    async fn fetch_next_page(
        &self,
        category_id: &str,
        subcategory_id: &str,
        cursor: &str,
    ) -> Result<BusinessPage, ListingError> {
        self.validate_ids(category_id, subcategory_id)?;
        if cursor.trim().is_empty() {
            return Err(ListingError::Invalid("cursor cannot be empty".to_string()));
        }
        self.fetch(category_id, subcategory_id, Some(cursor)).await
    }
}

impl ListingService {
    async fn fetch(
        &self,
        category_id: &str,
        subcategory_id: &str,
        cursor: Option<&str>,
    ) -> Result<BusinessPage, ListingError> {
        let page = self
            .repository
            .find_businesses_page(category_id, subcategory_id, cursor)
            .await
            .map_err(|e| {
                let err = ListingError::from(e);
                match &err {
                    ListingError::NotFound(_) => tracing::warn!(
                        error = %err,
                        category_id = %category_id,
                        subcategory_id = %subcategory_id,
                        "Business listing requested for unknown records"
                    ),
                    _ => tracing::error!(
                        error = %err,
                        category_id = %category_id,
                        subcategory_id = %subcategory_id,
                        "Business listing fetch failed"
                    ),
                }
                err
            })?;

        tracing::info!(
            category_id = %category_id,
            subcategory_id = %subcategory_id,
            continued = cursor.is_some(),
            page_len = page.businesses.len(),
            has_more = page.next_cursor.is_some(),
            "Business listing page fetched"
        );

        Ok(page)
    }

    fn validate_ids(&self, category_id: &str, subcategory_id: &str) -> Result<(), ListingError> {
        if category_id.trim().is_empty() || subcategory_id.trim().is_empty() {
            return Err(ListingError::Invalid(
                "category and subcategory ids are required".to_string(),
            ));
        }
        Ok(())
    }
}
