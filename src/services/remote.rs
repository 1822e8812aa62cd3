use crate::models::RawFeedItem;
use crate::services::source::SourceError;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Client for a feed table hosted behind a PostgREST-style API
///
/// Fetches `GET {endpoint}/rest/v1/{table}?select=*` with the project key
/// sent both as `apikey` and as a bearer token.
#[derive(Clone)]
pub struct RemoteFeedClient {
    base_url: String,
    api_key: String,
    table: String,
    client: Client,
}

impl std::fmt::Debug for RemoteFeedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the project key
        f.debug_struct("RemoteFeedClient")
            .field("base_url", &self.base_url)
            .field("table", &self.table)
            .finish()
    }
}

impl RemoteFeedClient {
    /// Create a new client with the given request timeout
    pub fn new(
        base_url: String,
        api_key: String,
        table: String,
        timeout_secs: u64,
    ) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            table,
            client,
        })
    }

    pub fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}?select=*",
            self.base_url.trim_end_matches('/'),
            self.table
        )
    }

    /// Fetch every row of the feed table
    ///
    /// Rows that are not valid feed items (no usable `id`) are skipped.
    pub async fn fetch_items(&self) -> Result<Vec<RawFeedItem>, SourceError> {
        let url = self.table_url();

        tracing::debug!("Fetching feed items from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Feed table request failed: {} - {}", status, body);
            return Err(SourceError::Upstream(format!(
                "Failed to fetch feed items: {}",
                status
            )));
        }

        let json: Value = response.json().await?;

        let rows = json
            .as_array()
            .ok_or_else(|| SourceError::InvalidResponse("Expected an array of rows".into()))?;

        let items: Vec<RawFeedItem> = rows
            .iter()
            .filter_map(|row| serde_json::from_value(row.clone()).ok())
            .collect();

        if items.len() < rows.len() {
            tracing::warn!(
                "Skipped {} malformed rows from {}",
                rows.len() - items.len(),
                self.table
            );
        }

        tracing::debug!("Fetched {} feed items", items.len());

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemId;

    fn client_for(server: &mockito::ServerGuard) -> RemoteFeedClient {
        RemoteFeedClient::new(server.url(), "anon_key".to_string(), "feed_items".to_string(), 5)
            .unwrap()
    }

    #[test]
    fn test_table_url() {
        let client = RemoteFeedClient::new(
            "https://project.example.co/".to_string(),
            "key".to_string(),
            "feed_items".to_string(),
            10,
        )
        .unwrap();

        assert_eq!(
            client.table_url(),
            "https://project.example.co/rest/v1/feed_items?select=*"
        );
    }

    #[tokio::test]
    async fn test_fetch_items_decodes_rows() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/v1/feed_items")
            .match_query(mockito::Matcher::UrlEncoded("select".into(), "*".into()))
            .match_header("apikey", "anon_key")
            .match_header("authorization", "Bearer anon_key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"id": 1, "type": "live"}, {"type": "moop"}, {"id": "x", "type": "flash"}, {"id": 2.5, "type": "new"}]"#,
            )
            .create_async()
            .await;

        let items = client_for(&server).fetch_items().await.unwrap();

        mock.assert_async().await;
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].id, ItemId::Number(1));
        assert_eq!(items[1].id, ItemId::Text("x".to_string()));
        assert_eq!(items[2].id, ItemId::Other(serde_json::json!(2.5)));
    }

    #[tokio::test]
    async fn test_fetch_items_upstream_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/rest/v1/feed_items")
            .match_query(mockito::Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let result = client_for(&server).fetch_items().await;
        assert!(matches!(result, Err(SourceError::Upstream(_))));
    }

    #[tokio::test]
    async fn test_fetch_items_rejects_non_array() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/rest/v1/feed_items")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"message": "not rows"}"#)
            .create_async()
            .await;

        let result = client_for(&server).fetch_items().await;
        assert!(matches!(result, Err(SourceError::InvalidResponse(_))));
    }
}
