use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::directory::{Business, Subcategory};

pub mod cache;
pub mod error;
pub mod matcher;
pub mod service;

pub use cache::{Clock, SearchIndexCache, SystemClock, SEARCH_CACHE_TTL};
pub use error::SearchError;
pub use matcher::{match_suggestions, MAX_SUGGESTIONS_PER_KIND};
pub use service::{SearchService, SearchServiceApi};

/// In-memory copy of the searchable directory, replaced wholesale on expiry
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSnapshot {
    pub subcategories: Vec<Subcategory>,
    pub businesses: Vec<Business>,
    pub timestamp: DateTime<Utc>,
}

/// A search suggestion, carrying only what is needed to display and navigate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Suggestion {
    Business {
        id: String,
        name: String,
    },
    Subcategory {
        id: String,
        name: String,
        category_id: String,
    },
}
