use super::{SearchError, SearchSnapshot};
use crate::domain::directory::{DirectoryRepository, Locale};
use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;

/// Snapshots older than this are refetched
pub const SEARCH_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Source of the current time, injected so expiry can be tested deterministically
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Single-slot cache of the search snapshot.
///
/// The lock only guards reading or swapping the `Arc`. It is never held across
/// a remote call, so concurrent misses each load a snapshot and the last one to
/// finish wins the slot. Loads are read-only and idempotent.
pub struct SearchIndexCache {
    repository: Arc<dyn DirectoryRepository>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    slot: RwLock<Option<Arc<SearchSnapshot>>>,
}

impl SearchIndexCache {
    pub fn new(repository: Arc<dyn DirectoryRepository>) -> Self {
        Self::with_clock(repository, Arc::new(SystemClock))
    }

    pub fn with_clock(repository: Arc<dyn DirectoryRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            clock,
            ttl: SEARCH_CACHE_TTL,
            slot: RwLock::new(None),
        }
    }

    /// Return the cached snapshot while it is fresh, otherwise load and store a new one.
    /// A failed load is returned as is; an expired snapshot is never served.
    pub async fn get_snapshot(&self, locale: Locale) -> Result<Arc<SearchSnapshot>, SearchError> {
        if let Some(snapshot) = self.fresh_snapshot() {
            tracing::debug!(
                locale = %locale,
                snapshot_timestamp = %snapshot.timestamp,
                "Search index cache hit"
            );
            return Ok(snapshot);
        }

        tracing::info!(locale = %locale, "Search index cache miss - loading snapshot");
        let start_time = std::time::Instant::now();

        let snapshot = Arc::new(self.load_snapshot().await.map_err(|e| {
            tracing::error!(error = %e, locale = %locale, "Failed to load search index");
            e
        })?);

        *self.slot.write() = Some(snapshot.clone());

        tracing::info!(
            subcategory_count = snapshot.subcategories.len(),
            business_count = snapshot.businesses.len(),
            latency_ms = start_time.elapsed().as_millis(),
            "Search index snapshot cached"
        );

        Ok(snapshot)
    }

    fn fresh_snapshot(&self) -> Option<Arc<SearchSnapshot>> {
        let slot = self.slot.read();
        let snapshot = slot.as_ref()?;

        // A timestamp in the future (clock moved backwards) counts as stale
        let age = (self.clock.now() - snapshot.timestamp).to_std().ok()?;
        (age < self.ttl).then(|| snapshot.clone())
    }

    async fn load_snapshot(&self) -> Result<SearchSnapshot, SearchError> {
        let categories = self.repository.list_categories().await?;

        let per_category = try_join_all(categories.iter().map(|category| async move {
            let subcategories = self.repository.list_subcategories(&category.id).await?;
            Ok::<_, SearchError>(
                subcategories
                    .into_iter()
                    .map(|mut sub| {
                        sub.category_id = category.id.clone();
                        sub
                    })
                    .collect::<Vec<_>>(),
            )
        }))
        .await?;

        let businesses = self.repository.list_businesses().await?;

        Ok(SearchSnapshot {
            subcategories: per_category.into_iter().flatten().collect(),
            businesses,
            timestamp: self.clock.now(),
        })
    }
}
