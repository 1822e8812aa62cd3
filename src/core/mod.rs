// Core algorithm exports
pub mod filters;
pub mod parse;
pub mod scoring;
pub mod selector;

pub use filters::{apply_filter, matches_filter};
pub use parse::{parse_distance_m, parse_minutes, UNKNOWN_DISTANCE_M, UNKNOWN_MINUTES};
pub use scoring::{score_entry, score_item};
pub use selector::{select_feed, FeedRanker};
