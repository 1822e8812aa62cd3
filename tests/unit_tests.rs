// Unit tests for Moop Feed

use moop_feed::core::{
    filters::matches_filter,
    parse::{parse_distance_m, parse_minutes, UNKNOWN_DISTANCE_M, UNKNOWN_MINUTES},
    scoring::{score_entry, score_item},
};
use moop_feed::models::{FeedEntry, FeedFilter, LiveEntry, RawFeedItem};
use serde_json::json;

fn live_at(distance: &str) -> RawFeedItem {
    RawFeedItem::new(1, "live")
        .with("location", json!({ "distance": distance }))
        .with("attendees", 6)
}

#[test]
fn test_distance_parsing() {
    assert_eq!(parse_distance_m(Some("45m")), 45.0);
    assert_eq!(parse_distance_m(Some("45 m")), 45.0);
    assert!((parse_distance_m(Some("1.2km")) - 1200.0).abs() < 1e-9);
}

#[test]
fn test_time_parsing() {
    assert_eq!(parse_minutes(Some("30 min")), 30);
    assert_eq!(parse_minutes(Some("2h")), 120);
}

#[test]
fn test_unparseable_strings_never_earn_bonuses() {
    for input in [None, Some(""), Some("soon")] {
        assert_eq!(parse_distance_m(input), UNKNOWN_DISTANCE_M);
        assert_eq!(parse_minutes(input), UNKNOWN_MINUTES);
    }

    // Sentinels fail every threshold in the scoring table
    assert!(!(UNKNOWN_DISTANCE_M < 1000.0));
    assert!(UNKNOWN_MINUTES >= 180);
}

#[test]
fn test_near_live_item_scores_exactly_distance_bonus_higher() {
    let near = score_item(&live_at("100m"));
    let far = score_item(&live_at("2km"));

    assert!(near >= far);
    assert_eq!(near - far, 30);
}

#[test]
fn test_missing_distance_treated_as_far() {
    let far = score_item(&live_at("2km"));
    let missing = score_item(&RawFeedItem::new(1, "live").with("attendees", 6));
    assert_eq!(far, missing);
}

#[test]
fn test_score_entry_matches_score_item() {
    let raw = RawFeedItem::new(1, "live")
        .with("distance", "100m")
        .with("endsIn", "45m")
        .with("vibeMatch", true);

    let entry = FeedEntry::Live(LiveEntry {
        distance_m: 100.0,
        attendees: 0,
        vibe_match: true,
        ends_in_min: 45,
    });

    assert_eq!(score_entry(&entry), score_item(&raw));
    assert_eq!(score_item(&raw), 160);
}

#[test]
fn test_scoring_ignores_previous_score() {
    let raw: RawFeedItem = serde_json::from_value(json!({
        "id": 2,
        "type": "moop",
        "attendees": 4,
        "time": "30 min",
        "category": "food",
        "score": 5000
    }))
    .unwrap();

    assert_eq!(score_item(&raw), 130);
}

#[test]
fn test_filter_distance_bound() {
    let filter = FeedFilter {
        max_distance_m: Some(500.0),
        ..Default::default()
    };

    assert!(matches_filter(&live_at("500m"), &filter));
    assert!(!matches_filter(&live_at("0.6km"), &filter));
    assert!(!matches_filter(&RawFeedItem::new(1, "live"), &filter));
}
