use serde::{Deserialize, Serialize};
use crate::models::domain::{RankedFeed, ScoredItem};

/// Response for the feed ranking endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankFeedResponse {
    pub items: Vec<ScoredItem>,
    pub forced_positions: Vec<usize>,
    /// Items considered after filtering
    pub total_candidates: usize,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

impl RankFeedResponse {
    pub fn new(feed: RankedFeed, total_candidates: usize) -> Self {
        Self {
            items: feed.items,
            forced_positions: feed.forced_positions,
            total_candidates,
            generated_at: chrono::Utc::now(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
