use super::{ListingError, ListingServiceApi};
use crate::domain::directory::{Business, Locale};

/// Businesses whose display name for `locale` contains `term`, case-insensitively.
/// A blank term keeps everything.
pub fn filter_by_display_name<'a>(
    businesses: impl IntoIterator<Item = &'a Business>,
    term: &str,
    locale: Locale,
) -> Vec<&'a Business> {
    let needle = term.trim().to_lowercase();
    businesses
        .into_iter()
        .filter(|b| needle.is_empty() || b.display_name(locale).to_lowercase().contains(&needle))
        .collect()
}

/// Incrementally loaded listing owned by a single view.
///
/// Pages are appended in fetch order and never reordered or deduplicated. State
/// is only touched after a page has arrived, so dropping an in-flight load
/// leaves the cursor exactly as it was.
#[derive(Debug, Clone)]
pub struct ListingCursor {
    category_id: String,
    subcategory_id: String,
    businesses: Vec<Business>,
    next_cursor: Option<String>,
    started: bool,
}

impl ListingCursor {
    pub fn new(category_id: impl Into<String>, subcategory_id: impl Into<String>) -> Self {
        Self {
            category_id: category_id.into(),
            subcategory_id: subcategory_id.into(),
            businesses: Vec::new(),
            next_cursor: None,
            started: false,
        }
    }

    pub fn businesses(&self) -> &[Business] {
        &self.businesses
    }

    pub fn next_cursor(&self) -> Option<&str> {
        self.next_cursor.as_deref()
    }

    /// Accumulated businesses narrowed to a display-name search term
    pub fn matching(&self, term: &str, locale: Locale) -> Vec<&Business> {
        filter_by_display_name(&self.businesses, term, locale)
    }

    /// False once a page arrived without a continuation cursor
    pub fn has_more(&self) -> bool {
        !self.started || self.next_cursor.is_some()
    }

    /// Load the first page, replacing anything accumulated so far.
    /// Returns the number of businesses received.
    pub async fn load_first(&mut self, service: &dyn ListingServiceApi) -> Result<usize, ListingError> {
        let page = service
            .fetch_first_page(&self.category_id, &self.subcategory_id)
            .await?;

        self.businesses = page.businesses;
        self.next_cursor = page.next_cursor;
        self.started = true;

        Ok(self.businesses.len())
    }

    /// Append the next page. Returns 0 without any remote call once exhausted.
    /// On error the accumulated businesses and cursor are left untouched.
    pub async fn load_more(&mut self, service: &dyn ListingServiceApi) -> Result<usize, ListingError> {
        if !self.started {
            return self.load_first(service).await;
        }

        let Some(cursor) = self.next_cursor.as_deref() else {
            tracing::debug!(
                category_id = %self.category_id,
                subcategory_id = %self.subcategory_id,
                "Listing exhausted - nothing to load"
            );
            return Ok(0);
        };

        let page = service
            .fetch_next_page(&self.category_id, &self.subcategory_id, cursor)
            .await?;

        let received = page.businesses.len();
        self.businesses.extend(page.businesses);
        self.next_cursor = page.next_cursor;

        Ok(received)
    }
}
