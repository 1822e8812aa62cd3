// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    DiscoveryEntry, FeedEntry, FeedFilter, FeedKind, FlashEntry, ItemId, LiveEntry, MoopEntry,
    RankedFeed, RankingLimits, RawFeedItem, ScoredItem, MAX_FEED_ITEMS,
};
pub use requests::{FeedQuery, RankFeedRequest};
pub use responses::{ErrorResponse, HealthResponse, RankFeedResponse};
