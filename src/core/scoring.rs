use crate::models::{
    DiscoveryEntry, FeedEntry, FlashEntry, LiveEntry, MoopEntry, RawFeedItem,
};

/// Calculate the ranking priority of a feed item
///
/// Scoring table (bonuses are additive and only apply to their own category):
///
/// | category  | base | bonuses                                                          |
/// |-----------|------|------------------------------------------------------------------|
/// | live      | 100  | +30 < 500 m, +20 attendees ≥ 5, +10 vibe match, +20 ends < 3 h   |
/// | moop      | 70   | +25 attendees ≥ 3, +20 starts < 2 h, +15 social/food/music, +10 < 500 m |
/// | flash     | 60   | +30 ends < 1 h, +20 food/drink, +10 < 300 m                      |
/// | discovery | 40   | +20 new, +10 < 1 km, +10 likes > 50                              |
pub fn score_item(item: &RawFeedItem) -> u32 {
    score_entry(&FeedEntry::from(item))
}

/// Score an already-parsed entry
pub fn score_entry(entry: &FeedEntry) -> u32 {
    match entry {
        FeedEntry::Live(live) => score_live(live),
        FeedEntry::Moop(moop) => score_moop(moop),
        FeedEntry::Flash(flash) => score_flash(flash),
        FeedEntry::Discovery(discovery) => score_discovery(discovery),
    }
}

#[inline]
fn bonus(condition: bool, points: u32) -> u32 {
    if condition {
        points
    } else {
        0
    }
}

fn score_live(live: &LiveEntry) -> u32 {
    100 + bonus(live.distance_m < 500.0, 30)
        + bonus(live.attendees >= 5, 20)
        + bonus(live.vibe_match, 10)
        + bonus(live.ends_in_min < 180, 20)
}

fn score_moop(moop: &MoopEntry) -> u32 {
    let social = matches!(moop.category.as_deref(), Some("social" | "food" | "music"));

    70 + bonus(moop.attendees >= 3, 25)
        + bonus(moop.starts_in_min < 120, 20)
        + bonus(social, 15)
        + bonus(moop.distance_m < 500.0, 10)
}

fn score_flash(flash: &FlashEntry) -> u32 {
    let food = matches!(flash.category.as_deref(), Some("food" | "drink"));

    60 + bonus(flash.ends_in_min < 60, 30)
        + bonus(food, 20)
        + bonus(flash.distance_m < 300.0, 10)
}

fn score_discovery(discovery: &DiscoveryEntry) -> u32 {
    40 + bonus(discovery.is_new, 20)
        + bonus(discovery.distance_m < 1000.0, 10)
        + bonus(discovery.likes > 50, 10)
}
