use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod error;
pub mod locale;
pub mod service;

pub use error::{DirectoryError, DirectoryServiceError};
pub use locale::{Locale, UnsupportedLocale};
pub use service::{DirectoryService, DirectoryServiceApi};

/// Top-level grouping of businesses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
}

/// Category enriched with derived counts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategorySummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub subcategory_count: usize,
    pub business_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subcategory {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Number of linked business records at fetch time
    pub business_count: usize,
    pub category_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Business {
    pub id: String,
    /// Name in the directory's default language
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_localized: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_localized: Option<String>,
    pub location: String,
    pub phone: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub is_premium: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews: Option<u32>,
    /// First linked category
    pub category_id: String,
    /// Every linked category; a business may sit in more than one
    #[serde(default)]
    pub category_ids: Vec<String>,
    pub subcategory_id: String,
}

impl Business {
    /// Name shown to a reader of the given locale.
    /// Falls back to the default-language name when no localized one exists.
    pub fn display_name(&self, locale: Locale) -> &str {
        localized(&self.name, self.name_localized.as_deref(), locale)
    }

    pub fn display_description(&self, locale: Locale) -> &str {
        localized(
            &self.description,
            self.description_localized.as_deref(),
            locale,
        )
    }
}

fn localized<'a>(default: &'a str, localized: Option<&'a str>, locale: Locale) -> &'a str {
    match localized {
        Some(value) if locale.uses_localized_fields() && !value.trim().is_empty() => value,
        _ => default,
    }
}

/// One page of a filtered business listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BusinessPage {
    pub businesses: Vec<Business>,
    /// Opaque continuation token; `None` once the listing is exhausted
    pub next_cursor: Option<String>,
}

/// Read-only access to the hosted directory tables.
/// Abstracts the underlying table service (Airtable today).
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<Category>, DirectoryError>;

    /// Subcategories linked to `category_id`, tagged with that id
    async fn list_subcategories(&self, category_id: &str)
        -> Result<Vec<Subcategory>, DirectoryError>;

    /// Every business in the table, following continuation cursors to the end
    async fn list_businesses(&self) -> Result<Vec<Business>, DirectoryError>;

    /// One page of businesses in both the category and the subcategory
    async fn find_businesses_page(
        &self,
        category_id: &str,
        subcategory_id: &str,
        cursor: Option<&str>,
    ) -> Result<BusinessPage, DirectoryError>;

    /// Returns `Ok(None)` when the record does not resolve
    async fn find_business(&self, business_id: &str) -> Result<Option<Business>, DirectoryError>;
}
