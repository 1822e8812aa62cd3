//! Moop Feed - ranking service for the moop social events feed
//!
//! This library scores heterogeneous feed items (live events, moops, flash
//! deals, discovery posts) and selects a short, diversity-constrained feed
//! from them. The core is a pure, synchronous transformation; the service
//! layer around it supplies items and serves the ranked result over HTTP.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{parse_distance_m, parse_minutes, score_item, select_feed, FeedRanker};
pub use models::{
    FeedFilter, RankFeedRequest, RankFeedResponse, RankedFeed, RankingLimits, RawFeedItem,
    ScoredItem,
};
