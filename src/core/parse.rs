use crate::models::{
    DiscoveryEntry, FeedEntry, FeedKind, FlashEntry, LiveEntry, MoopEntry, RawFeedItem,
};

/// Distance used when a distance string is missing or unreadable
pub const UNKNOWN_DISTANCE_M: f64 = f64::INFINITY;

/// Minutes used when a relative-time string is missing or unreadable
pub const UNKNOWN_MINUTES: u32 = u32::MAX;

/// Parse a human-readable distance into meters
///
/// Accepts `"300m"`, `"45 m"`, `"1.2km"`. Whitespace anywhere in the string
/// is ignored. Anything else yields [`UNKNOWN_DISTANCE_M`].
pub fn parse_distance_m(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else {
        return UNKNOWN_DISTANCE_M;
    };

    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    let (number, scale) = if let Some(km) = compact.strip_suffix("km") {
        (km, 1000.0)
    } else if let Some(m) = compact.strip_suffix('m') {
        (m, 1.0)
    } else {
        return UNKNOWN_DISTANCE_M;
    };

    match number.parse::<f64>() {
        Ok(value) if value.is_finite() => value * scale,
        _ => UNKNOWN_DISTANCE_M,
    }
}

/// Parse a relative time such as `"30 min"`, `"2h"` or `"20m"` into minutes
///
/// Only the first integer in the string is read, so `"1h 30min"` is one
/// minute: `min` takes precedence over `h`. Yields [`UNKNOWN_MINUTES`] when
/// no unit or no digits are found.
pub fn parse_minutes(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else {
        return UNKNOWN_MINUTES;
    };

    let Some(value) = first_integer(raw) else {
        return UNKNOWN_MINUTES;
    };

    if raw.contains("min") {
        value
    } else if raw.contains('h') {
        value.saturating_mul(60)
    } else if raw.trim_end().ends_with('m') {
        value
    } else {
        UNKNOWN_MINUTES
    }
}

/// First run of ASCII digits in `s`, saturating on overflow
fn first_integer(s: &str) -> Option<u32> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let digits = s[start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .filter_map(|c| c.to_digit(10));

    Some(digits.fold(0u32, |acc, d| acc.saturating_mul(10).saturating_add(d)))
}

impl From<&RawFeedItem> for FeedEntry {
    fn from(item: &RawFeedItem) -> Self {
        let distance_m = parse_distance_m(item.distance());

        match item.feed_kind() {
            FeedKind::Live => FeedEntry::Live(LiveEntry {
                distance_m,
                attendees: item.attendees(),
                vibe_match: item.vibe_match(),
                ends_in_min: parse_minutes(item.ends_in()),
            }),
            FeedKind::Moop => FeedEntry::Moop(MoopEntry {
                distance_m,
                attendees: item.attendees(),
                starts_in_min: parse_minutes(item.starts_in()),
                category: item.category().map(str::to_string),
            }),
            FeedKind::Flash => FeedEntry::Flash(FlashEntry {
                distance_m,
                ends_in_min: parse_minutes(item.ends_in()),
                category: item.category().map(str::to_string),
            }),
            FeedKind::Discovery => FeedEntry::Discovery(DiscoveryEntry {
                distance_m,
                is_new: item.is_new(),
                likes: item.likes(),
            }),
        }
    }
}
