use crate::core::parse::parse_distance_m;
use crate::models::{FeedFilter, RawFeedItem};

/// Check if an item passes the feed filter
///
/// Runs before scoring. An empty filter keeps everything.
#[inline]
pub fn matches_filter(item: &RawFeedItem, filter: &FeedFilter) -> bool {
    // Check type tab
    if !filter.kinds.is_empty() {
        match item.kind.as_deref() {
            Some(kind) if filter.kinds.iter().any(|k| k == kind) => {}
            _ => return false,
        }
    }

    // Check category
    if !filter.categories.is_empty() {
        match item.category() {
            Some(category) if filter.categories.iter().any(|c| c == category) => {}
            _ => return false,
        }
    }

    // Check distance; unknown distance never passes a bound
    if let Some(max_distance_m) = filter.max_distance_m {
        if !(parse_distance_m(item.distance()) <= max_distance_m) {
            return false;
        }
    }

    true
}

/// Keep only the items that pass `filter`, preserving order
pub fn apply_filter(items: Vec<RawFeedItem>, filter: &FeedFilter) -> Vec<RawFeedItem> {
    if filter.is_empty() {
        return items;
    }

    items
        .into_iter()
        .filter(|item| matches_filter(item, filter))
        .collect()
}
