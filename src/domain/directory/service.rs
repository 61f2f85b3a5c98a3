use super::error::DirectoryServiceError;
use super::{Business, CategorySummary, DirectoryRepository, Subcategory};
use async_trait::async_trait;
use futures::future::try_join_all;
use std::collections::HashMap;
use std::sync::Arc;

pub struct DirectoryService {
    repository: Arc<dyn DirectoryRepository>,
}

impl DirectoryService {
    pub fn new(repository: Arc<dyn DirectoryRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
pub trait DirectoryServiceApi: Send + Sync {
    /// Categories with subcategory and business counts derived on every call
    async fn category_summaries(&self) -> Result<Vec<CategorySummary>, DirectoryServiceError>;

    async fn subcategories(
        &self,
        category_id: &str,
    ) -> Result<Vec<Subcategory>, DirectoryServiceError>;

    /// Absence is a valid outcome: a stale link renders nothing
    async fn business(&self, business_id: &str) -> Result<Option<Business>, DirectoryServiceError>;
}

#[async_trait]
impl DirectoryServiceApi for DirectoryService {
    async fn category_summaries(&self) -> Result<Vec<CategorySummary>, DirectoryServiceError> {
        let categories = self.repository.list_categories().await?;

        let subcategory_counts = try_join_all(categories.iter().map(|category| async move {
            self.repository
                .list_subcategories(&category.id)
                .await
                .map(|subs| subs.len())
        }))
        .await?;

        let businesses = self.repository.list_businesses().await?;
        let mut business_counts: HashMap<&str, usize> = HashMap::new();
        for category_id in businesses.iter().flat_map(|b| &b.category_ids) {
            *business_counts.entry(category_id.as_str()).or_insert(0) += 1;
        }

        tracing::info!(
            category_count = categories.len(),
            business_count = businesses.len(),
            "Category summaries computed"
        );

        Ok(categories
            .into_iter()
            .zip(subcategory_counts)
            .map(|(category, subcategory_count)| CategorySummary {
                business_count: business_counts
                    .get(category.id.as_str())
                    .copied()
                    .unwrap_or(0),
                subcategory_count,
                id: category.id,
                name: category.name,
                description: category.description,
                icon: category.icon,
            })
            .collect())
    }

    async fn subcategories(
        &self,
        category_id: &str,
    ) -> Result<Vec<Subcategory>, DirectoryServiceError> {
        Ok(self.repository.list_subcategories(category_id).await?)
    }

    async fn business(&self, business_id: &str) -> Result<Option<Business>, DirectoryServiceError> {
        let business = self.repository.find_business(business_id).await?;
        if business.is_none() {
            tracing::info!(business_id = %business_id, "Business not found");
        }
        Ok(business)
    }
}
