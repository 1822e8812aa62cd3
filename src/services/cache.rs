use crate::models::RawFeedItem;
use std::sync::Arc;
use std::time::Duration;

/// Short-lived in-memory cache of supplier item lists
///
/// Only the raw items are cached. Ranking is cheap and always recomputed,
/// so filters and limits never go stale.
#[derive(Clone)]
pub struct FeedCache {
    items: moka::future::Cache<String, Arc<Vec<RawFeedItem>>>,
    ttl_secs: u64,
}

impl FeedCache {
    pub fn new(max_entries: u64, ttl_secs: u64) -> Self {
        let items = moka::future::CacheBuilder::new(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { items, ttl_secs }
    }

    pub async fn get(&self, key: &str) -> Option<Arc<Vec<RawFeedItem>>> {
        let hit = self.items.get(key).await;
        if hit.is_some() {
            tracing::trace!("Feed cache hit: {}", key);
        } else {
            tracing::trace!("Feed cache miss: {}", key);
        }
        hit
    }

    pub async fn insert(&self, key: &str, items: Arc<Vec<RawFeedItem>>) {
        self.items.insert(key.to_string(), items).await;
    }

    pub async fn invalidate(&self, key: &str) {
        self.items.invalidate(key).await;
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }
}

impl std::fmt::Debug for FeedCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedCache")
            .field("entries", &self.items.entry_count())
            .field("ttl_secs", &self.ttl_secs)
            .finish()
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for a supplier's item list
    pub fn source(name: &str) -> String {
        format!("feed:{}", name)
    }
}
