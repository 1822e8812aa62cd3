use crate::models::RawFeedItem;
use crate::services::cache::{CacheKey, FeedCache};
use crate::services::remote::RemoteFeedClient;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while loading feed items from a supplier
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read feed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode feed items: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Invalid source configuration: {0}")]
    InvalidConfig(String),
}

/// Where raw feed items come from
#[derive(Debug, Clone)]
pub enum FeedSource {
    /// JSON array of items on disk
    File(PathBuf),
    /// Hosted feed table
    Remote(RemoteFeedClient),
}

impl FeedSource {
    /// Stable name used for cache keys and logs
    pub fn name(&self) -> String {
        match self {
            FeedSource::File(path) => format!("file:{}", path.display()),
            FeedSource::Remote(client) => format!("remote:{}", client.table_url()),
        }
    }

    pub async fn load(&self) -> Result<Vec<RawFeedItem>, SourceError> {
        match self {
            FeedSource::File(path) => {
                let bytes = tokio::fs::read(path).await?;
                let items: Vec<RawFeedItem> = serde_json::from_slice(&bytes)?;
                tracing::debug!("Loaded {} feed items from {}", items.len(), path.display());
                Ok(items)
            }
            FeedSource::Remote(client) => client.fetch_items().await,
        }
    }
}

/// Feed supplier with a TTL cache in front of the source
#[derive(Debug, Clone)]
pub struct FeedSupplier {
    source: FeedSource,
    cache: FeedCache,
}

impl FeedSupplier {
    pub fn new(source: FeedSource, cache: FeedCache) -> Self {
        Self { source, cache }
    }

    pub fn source(&self) -> &FeedSource {
        &self.source
    }

    /// Current item list, served from cache while fresh
    pub async fn items(&self) -> Result<Arc<Vec<RawFeedItem>>, SourceError> {
        let key = CacheKey::source(&self.source.name());

        if let Some(items) = self.cache.get(&key).await {
            return Ok(items);
        }

        let items = Arc::new(self.source.load().await?);
        self.cache.insert(&key, items.clone()).await;

        Ok(items)
    }

    /// Drop the cached item list so the next call reloads the source
    pub async fn refresh(&self) {
        let key = CacheKey::source(&self.source.name());
        self.cache.invalidate(&key).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_feed(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_file_source_loads_items() {
        let file = write_feed(r#"[{"id": 1, "type": "live", "title": "Jam"}, {"id": 2}]"#);
        let source = FeedSource::File(file.path().to_path_buf());

        let items = source.load().await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].fields["title"], "Jam");
        assert_eq!(items[1].kind, None);
    }

    #[tokio::test]
    async fn test_file_source_keeps_non_integer_ids() {
        let file = write_feed(
            r#"[{"id": 1, "type": "live"}, {"id": 1.5, "type": "moop"}, {"id": 18446744073709551615, "type": "flash"}]"#,
        );
        let source = FeedSource::File(file.path().to_path_buf());

        let items = source.load().await.unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[1].id.to_string(), "1.5");
        assert_eq!(items[2].id.to_string(), "18446744073709551615");
    }

    #[tokio::test]
    async fn test_file_source_errors() {
        let missing = FeedSource::File(PathBuf::from("/nonexistent/feed.json"));
        assert!(matches!(missing.load().await, Err(SourceError::Io(_))));

        let file = write_feed("not json");
        let broken = FeedSource::File(file.path().to_path_buf());
        assert!(matches!(broken.load().await, Err(SourceError::Decode(_))));
    }

    #[tokio::test]
    async fn test_supplier_serves_cached_items_until_refresh() {
        let file = write_feed(r#"[{"id": 1, "type": "live"}]"#);
        let supplier = FeedSupplier::new(
            FeedSource::File(file.path().to_path_buf()),
            FeedCache::new(4, 300),
        );

        assert_eq!(supplier.items().await.unwrap().len(), 1);

        std::fs::write(file.path(), r#"[{"id": 1, "type": "live"}, {"id": 2, "type": "moop"}]"#)
            .unwrap();
        assert_eq!(supplier.items().await.unwrap().len(), 1);

        supplier.refresh().await;
        assert_eq!(supplier.items().await.unwrap().len(), 2);
    }
}
