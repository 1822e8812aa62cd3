use crate::core::scoring::score_item;
use crate::models::{RankedFeed, RankingLimits, RawFeedItem, ScoredItem, MAX_FEED_ITEMS};

/// Rank a feed with the default limits (10 items, runs of at most 2)
pub fn select_feed(items: Vec<RawFeedItem>) -> RankedFeed {
    FeedRanker::with_default_limits().rank(items)
}

/// Feed ranking orchestrator
///
/// # Pipeline Stages
/// 1. Score every item
/// 2. Stable sort by score, highest first
/// 3. Greedy selection under a same-type run cap
///
/// Selection never looks ahead. When every remaining candidate would extend
/// the current run past the cap, the highest-scored one is taken anyway and
/// its position is recorded in [`RankedFeed::forced_positions`].
#[derive(Debug, Clone)]
pub struct FeedRanker {
    limits: RankingLimits,
}

impl FeedRanker {
    /// Create a ranker, clamping `max_items` to [`MAX_FEED_ITEMS`] and the
    /// run cap to at least 1
    pub fn new(limits: RankingLimits) -> Self {
        Self {
            limits: RankingLimits {
                max_items: limits.max_items.min(MAX_FEED_ITEMS),
                max_consecutive: limits.max_consecutive.max(1),
            },
        }
    }

    pub fn with_default_limits() -> Self {
        Self::new(RankingLimits::default())
    }

    pub fn limits(&self) -> RankingLimits {
        self.limits
    }

    /// Score, sort and select items into a ranked feed
    pub fn rank(&self, items: Vec<RawFeedItem>) -> RankedFeed {
        self.rank_with_limit(items, self.limits.max_items)
    }

    /// Like [`FeedRanker::rank`] but with the output further capped at `limit`
    pub fn rank_with_limit(&self, items: Vec<RawFeedItem>, limit: usize) -> RankedFeed {
        let total = items.len();
        let capacity = limit.min(self.limits.max_items);

        let mut pool: Vec<ScoredItem> = items
            .into_iter()
            .map(|item| {
                let score = score_item(&item);
                ScoredItem::new(item, score)
            })
            .collect();

        // Vec::sort_by is stable: equal scores keep input order
        pool.sort_by(|a, b| b.score.cmp(&a.score));

        let feed = self.select(pool, capacity);

        tracing::debug!(
            "Ranked {} of {} items ({} forced picks)",
            feed.items.len(),
            total,
            feed.forced_positions.len()
        );

        feed
    }

    /// Greedy selection over a pool already sorted by descending score
    fn select(&self, mut pool: Vec<ScoredItem>, capacity: usize) -> RankedFeed {
        let mut items: Vec<ScoredItem> = Vec::with_capacity(capacity.min(pool.len()));
        let mut forced_positions = Vec::new();
        let mut run_length = 0usize;

        while items.len() < capacity && !pool.is_empty() {
            let last_kind = items.last().map(|item| item.item.kind.clone());

            let compliant = pool.iter().position(|candidate| match &last_kind {
                Some(kind) => candidate.item.kind != *kind || run_length < self.limits.max_consecutive,
                None => true,
            });

            let index = match compliant {
                Some(index) => index,
                None => {
                    tracing::trace!(
                        "Forced pick at position {}: only {:?} items remain",
                        items.len(),
                        pool[0].item.kind
                    );
                    forced_positions.push(items.len());
                    0
                }
            };

            let picked = pool.remove(index);
            run_length = match &last_kind {
                Some(kind) if *kind == picked.item.kind => run_length + 1,
                _ => 1,
            };
            items.push(picked);
        }

        RankedFeed {
            items,
            forced_positions,
        }
    }
}

impl Default for FeedRanker {
    fn default() -> Self {
        Self::with_default_limits()
    }
}
