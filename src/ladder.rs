//! One side of the book: an ordered price → level map.
//!
//! Bids traverse highest-first, asks lowest-first, so the first level in
//! traversal order is always the best price on that side. [`Ladder::take`]
//! is the sweep the matching pass drives.

use std::collections::BTreeMap;

use crate::level::PriceLevel;
use crate::types::{DepthEntry, Order, Price, Side};

/// Result of consuming liquidity from one resting order during a sweep.
///
/// `remaining == 0` means the resting order was exhausted and popped from
/// its queue; otherwise it stays at the head with `remaining` left.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Fill {
    pub(crate) order_id: u64,
    pub(crate) price: f64,
    pub(crate) quantity: u64,
    pub(crate) remaining: u64,
}

/// Price ladder for one side.
#[derive(Clone, Debug)]
pub(crate) struct Ladder {
    side: Side,
    levels: BTreeMap<Price, PriceLevel>,
}

impl Ladder {
    pub(crate) fn new(side: Side) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
        }
    }

    /// Best price on this side: highest bid, lowest ask.
    pub(crate) fn best_price(&self) -> Option<Price> {
        match self.side {
            Side::Buy => self.levels.keys().next_back().copied(),
            Side::Sell => self.levels.keys().next().copied(),
        }
    }

    pub(crate) fn level(&self, price: Price) -> Option<&PriceLevel> {
        self.levels.get(&price)
    }

    pub(crate) fn level_mut(&mut self, price: Price) -> Option<&mut PriceLevel> {
        self.levels.get_mut(&price)
    }

    /// Appends an order at the tail of its price's queue, creating the level
    /// if it does not exist yet.
    pub(crate) fn enqueue(&mut self, price: Price, order: Order) {
        self.levels
            .entry(price)
            .or_insert_with(|| PriceLevel::new(price))
            .push_back(order);
    }

    /// Drops a level that an operation has just emptied.
    pub(crate) fn remove_level(&mut self, price: Price) {
        self.levels.remove(&price);
    }

    /// Sum of level aggregates across the ladder.
    pub(crate) fn total_volume(&self) -> u64 {
        self.levels.values().map(PriceLevel::total_volume).sum()
    }

    /// Up to `levels` leading (price, aggregate) pairs, best first.
    pub(crate) fn depth(&self, levels: usize) -> Vec<DepthEntry> {
        self.iter_best_first()
            .take(levels)
            .map(|level| DepthEntry {
                price: level.price().into_inner(),
                volume: level.total_volume(),
            })
            .collect()
    }

    /// Levels in best-first order: descending prices for bids, ascending
    /// for asks.
    pub(crate) fn iter_best_first(&self) -> Box<dyn Iterator<Item = &PriceLevel> + '_> {
        match self.side {
            Side::Buy => Box::new(self.levels.values().rev()),
            Side::Sell => Box::new(self.levels.values()),
        }
    }

    /// Consumes up to `quantity` from the ladder, best level first, FIFO
    /// within each level, stopping at the first level outside `limit`
    /// (a bid ladder yields levels priced at or above it, an ask ladder at
    /// or below). Emptied levels are dropped before returning.
    ///
    /// One [`Fill`] is reported per resting order touched; index maintenance
    /// is the caller's job.
    pub(crate) fn take(&mut self, limit: Price, mut quantity: u64) -> Vec<Fill> {
        let side = self.side;
        let mut fills = Vec::new();
        let mut drained: Vec<Price> = Vec::new();

        let iter: Box<dyn Iterator<Item = (&Price, &mut PriceLevel)> + '_> = match side {
            Side::Buy => Box::new(self.levels.iter_mut().rev()),
            Side::Sell => Box::new(self.levels.iter_mut()),
        };
        for (&price, level) in iter {
            if quantity == 0 {
                break;
            }
            let crosses = match side {
                Side::Buy => price >= limit,
                Side::Sell => price <= limit,
            };
            if !crosses {
                break;
            }
            while quantity > 0 {
                let Some((order_id, filled, remaining)) = level.fill_front(quantity) else {
                    break;
                };
                quantity -= filled;
                fills.push(Fill {
                    order_id,
                    price: price.into_inner(),
                    quantity: filled,
                    remaining,
                });
            }
            if level.is_empty() {
                drained.push(price);
            }
        }
        for price in drained {
            self.levels.remove(&price);
        }
        fills
    }

    pub(crate) fn levels(&self) -> impl Iterator<Item = &PriceLevel> {
        self.levels.values()
    }
}
