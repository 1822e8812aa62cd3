use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{FeedFilter, RawFeedItem};

/// Request to rank a caller-supplied list of feed items
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankFeedRequest {
    #[validate(length(max = 1000))]
    pub items: Vec<RawFeedItem>,
    #[serde(default)]
    pub filter: FeedFilter,
    /// Optional cap below the ranker's own limit
    #[validate(range(min = 1, max = 10))]
    #[serde(default)]
    pub limit: Option<u8>,
}

/// Query string for ranking the supplier's feed
///
/// `type` and `category` take comma-separated lists, e.g. `?type=live,moop`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct FeedQuery {
    #[serde(rename = "type")]
    pub kinds: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "maxDistanceM")]
    #[validate(range(min = 0.0))]
    pub max_distance_m: Option<f64>,
    #[validate(range(min = 1, max = 10))]
    pub limit: Option<u8>,
}

impl FeedQuery {
    pub fn to_filter(&self) -> FeedFilter {
        FeedFilter {
            kinds: split_list(self.kinds.as_deref()),
            categories: split_list(self.category.as_deref()),
            max_distance_m: self.max_distance_m,
        }
    }
}

fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_to_filter() {
        let query = FeedQuery {
            kinds: Some("live, moop,".to_string()),
            category: None,
            max_distance_m: Some(500.0),
            limit: None,
        };
        let filter = query.to_filter();

        assert_eq!(filter.kinds, vec!["live", "moop"]);
        assert!(filter.categories.is_empty());
        assert_eq!(filter.max_distance_m, Some(500.0));
    }

    #[test]
    fn test_rank_request_defaults() {
        let req: RankFeedRequest = serde_json::from_value(json!({
            "items": [{"id": 1, "type": "live"}]
        }))
        .unwrap();

        assert_eq!(req.items.len(), 1);
        assert!(req.filter.is_empty());
        assert_eq!(req.limit, None);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_rank_request_limit_validation() {
        let req: RankFeedRequest = serde_json::from_value(json!({
            "items": [],
            "limit": 11
        }))
        .unwrap();

        assert!(req.validate().is_err());
    }
}
