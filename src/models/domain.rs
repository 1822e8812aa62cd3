use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Opaque feed item identifier
///
/// Integer and string ids get their own variants; any other JSON value
/// (floats, integers past `i64::MAX`) is kept as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(i64),
    Text(String),
    Other(Value),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Number(n) => write!(f, "{}", n),
            ItemId::Text(s) => f.write_str(s),
            ItemId::Other(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for ItemId {
    fn from(value: i64) -> Self {
        ItemId::Number(value)
    }
}

impl From<i32> for ItemId {
    fn from(value: i32) -> Self {
        ItemId::Number(i64::from(value))
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        ItemId::Text(value.to_string())
    }
}

/// Feed item as supplied by the data source
///
/// Only `id` and `type` are lifted out; every other field stays in `fields`
/// exactly as received so the ranked output can hand it back untouched.
/// Typed access goes through the accessor methods, which treat a missing or
/// mistyped field as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFeedItem {
    pub id: ItemId,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl RawFeedItem {
    pub fn new(id: impl Into<ItemId>, kind: &str) -> Self {
        Self {
            id: id.into(),
            kind: Some(kind.to_string()),
            fields: Map::new(),
        }
    }

    /// Builder-style field setter, mostly for fixtures and mock data
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    /// Category of this item derived from its `type` tag
    pub fn feed_kind(&self) -> FeedKind {
        FeedKind::from_tag(self.kind.as_deref())
    }

    /// Distance string, preferring `location.distance` over a top-level `distance`
    pub fn distance(&self) -> Option<&str> {
        self.fields
            .get("location")
            .and_then(|loc| loc.get("distance"))
            .and_then(Value::as_str)
            .or_else(|| self.str_field("distance"))
    }

    pub fn attendees(&self) -> u32 {
        self.count_field("attendees")
    }

    pub fn likes(&self) -> u32 {
        self.count_field("likes")
    }

    pub fn category(&self) -> Option<&str> {
        self.str_field("category")
    }

    pub fn ends_in(&self) -> Option<&str> {
        self.str_field("endsIn")
    }

    pub fn starts_in(&self) -> Option<&str> {
        self.str_field("time")
    }

    pub fn vibe_match(&self) -> bool {
        self.flag_field("vibeMatch")
    }

    pub fn is_new(&self) -> bool {
        self.flag_field("isNew")
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    fn flag_field(&self, key: &str) -> bool {
        self.fields.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Non-negative integer field; fractional values are truncated and
    /// negative or non-numeric values count as zero
    fn count_field(&self, key: &str) -> u32 {
        let Some(value) = self.fields.get(key) else {
            return 0;
        };

        if let Some(n) = value.as_u64() {
            return u32::try_from(n).unwrap_or(u32::MAX);
        }

        match value.as_f64() {
            Some(f) if f.is_finite() && f > 0.0 => f.min(u32::MAX as f64) as u32,
            _ => 0,
        }
    }
}

/// Feed categories with distinct scoring rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    Live,
    Moop,
    Flash,
    /// Catch-all for `new`, `event`, unknown or missing tags
    Discovery,
}

impl FeedKind {
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("live") => FeedKind::Live,
            Some("moop") => FeedKind::Moop,
            Some("flash") => FeedKind::Flash,
            _ => FeedKind::Discovery,
        }
    }
}

/// Typed view of a feed item with every string already parsed
///
/// Distances are meters and times are minutes. Unknown values carry the
/// sentinels from [`crate::core::parse`], which never satisfy a threshold.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEntry {
    Live(LiveEntry),
    Moop(MoopEntry),
    Flash(FlashEntry),
    Discovery(DiscoveryEntry),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiveEntry {
    pub distance_m: f64,
    pub attendees: u32,
    pub vibe_match: bool,
    pub ends_in_min: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoopEntry {
    pub distance_m: f64,
    pub attendees: u32,
    pub starts_in_min: u32,
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlashEntry {
    pub distance_m: f64,
    pub ends_in_min: u32,
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryEntry {
    pub distance_m: f64,
    pub is_new: bool,
    pub likes: u32,
}

/// Feed item with its ranking score attached
///
/// Serialises as the original item object plus a `score` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    #[serde(flatten)]
    pub item: RawFeedItem,
    pub score: u32,
}

impl ScoredItem {
    /// Pair an item with its score, dropping any stale `score` it carried in
    pub fn new(mut item: RawFeedItem, score: u32) -> Self {
        item.fields.remove("score");
        Self { item, score }
    }

    pub fn kind(&self) -> Option<&str> {
        self.item.kind.as_deref()
    }
}

/// Output of one ranking pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankedFeed {
    pub items: Vec<ScoredItem>,
    /// Output positions filled by a forced pick that broke the run cap
    #[serde(rename = "forcedPositions")]
    pub forced_positions: Vec<usize>,
}

impl RankedFeed {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|s| s.item.id.clone()).collect()
    }
}

/// Hard ceiling on the number of items in one ranked feed
pub const MAX_FEED_ITEMS: usize = 10;

/// Limits applied by the selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingLimits {
    /// Output buffer size
    pub max_items: usize,
    /// Longest allowed run of one type before a pick is forced
    pub max_consecutive: usize,
}

impl Default for RankingLimits {
    fn default() -> Self {
        Self {
            max_items: MAX_FEED_ITEMS,
            max_consecutive: 2,
        }
    }
}

/// Narrowing applied to the supplier's items before ranking
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedFilter {
    /// Allowed `type` tags; empty means any
    #[serde(default)]
    pub kinds: Vec<String>,
    /// Allowed `category` values; empty means any
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default, rename = "maxDistanceM")]
    pub max_distance_m: Option<f64>,
}

impl FeedFilter {
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty() && self.categories.is_empty() && self.max_distance_m.is_none()
    }
}
