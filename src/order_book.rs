//! Single-symbol order book: dual price ladders, order index, trade log.
//!
//! [`OrderBook`] is the single entry point. Submissions run through the
//! matching pass in [`crate::matching`]; residual limit quantity rests on
//! its own side. Every event (arrival or execution) is stamped from one
//! monotonic tick counter, so the trade sequence is deterministic for a
//! given call sequence.

use std::collections::HashMap;

use log::debug;
use ordered_float::OrderedFloat;

use crate::ladder::{Fill, Ladder};
use crate::level::PriceLevel;
use crate::matching;
use crate::types::{DepthEntry, Order, Price, Side, Trade};

/// Locates a resting order: its ladder, its level key, and a cached copy of
/// its remaining quantity. The level's queue owns the order itself.
#[derive(Clone, Copy, Debug)]
struct OrderHandle {
    side: Side,
    price: Price,
    remaining: u64,
}

/// In-memory limit order book for one symbol.
///
/// All operations are run-to-completion and single-threaded; wrap the whole
/// book in a mutex if it must be shared across threads. Rejected calls
/// return `false` and leave no trace.
#[derive(Debug)]
pub struct OrderBook {
    symbol: String,
    tick: u64,
    bids: Ladder,
    asks: Ladder,
    orders: HashMap<u64, OrderHandle>,
    trades: Vec<Trade>,
}

impl OrderBook {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            tick: 0,
            bids: Ladder::new(Side::Buy),
            asks: Ladder::new(Side::Sell),
            orders: HashMap::new(),
            trades: Vec::new(),
        }
    }

    /// Submits a limit order. It matches against the opposite side first;
    /// any residual rests at `price` on its own side.
    ///
    /// Rejected (returns `false`, no side effects) when `order_id` is
    /// already live, `quantity` is zero, or `price` is non-finite or not
    /// strictly positive.
    pub fn submit_limit(&mut self, order_id: u64, side: Side, price: f64, quantity: u64) -> bool {
        if self.orders.contains_key(&order_id) {
            debug!("{}: limit {} rejected: id already live", self.symbol, order_id);
            return false;
        }
        if quantity == 0 || !price.is_finite() || price <= 0.0 {
            debug!(
                "{}: limit {} rejected: price {} qty {}",
                self.symbol, order_id, price, quantity
            );
            return false;
        }
        let mut order = Order::limit(order_id, side, price, quantity, self.next_tick());
        matching::match_order(self, &mut order);
        if order.remaining > 0 {
            self.rest(order);
        }
        #[cfg(debug_assertions)]
        self.check_invariants();
        true
    }

    /// Submits a market order. It fills as far as the opposite side allows;
    /// any residual is discarded, so a market order never rests and never
    /// appears in the index.
    ///
    /// Rejected when `order_id` is already live or `quantity` is zero.
    pub fn submit_market(&mut self, order_id: u64, side: Side, quantity: u64) -> bool {
        if self.orders.contains_key(&order_id) {
            debug!("{}: market {} rejected: id already live", self.symbol, order_id);
            return false;
        }
        if quantity == 0 {
            debug!("{}: market {} rejected: zero quantity", self.symbol, order_id);
            return false;
        }
        let mut order = Order::market(order_id, side, quantity, self.next_tick());
        matching::match_order(self, &mut order);
        #[cfg(debug_assertions)]
        self.check_invariants();
        true
    }

    /// Cancels a resting order. Returns `false` for unknown ids.
    pub fn cancel(&mut self, order_id: u64) -> bool {
        let Some(handle) = self.orders.remove(&order_id) else {
            debug!("{}: cancel {} rejected: unknown id", self.symbol, order_id);
            return false;
        };
        let ladder = self.ladder_mut(handle.side);
        if let Some(level) = ladder.level_mut(handle.price) {
            let _ = level.remove(order_id);
            if level.is_empty() {
                ladder.remove_level(handle.price);
            }
        }
        #[cfg(debug_assertions)]
        self.check_invariants();
        true
    }

    /// Changes a resting order's quantity.
    ///
    /// Shrinking keeps the order's queue position; growing forfeits time
    /// priority by cancelling and resubmitting through the full match path,
    /// so the order may execute and may end up unindexed. `new_quantity` of
    /// zero cancels; an unchanged quantity is an accepted no-op.
    pub fn modify(&mut self, order_id: u64, new_quantity: u64) -> bool {
        let Some(handle) = self.orders.get(&order_id) else {
            debug!("{}: modify {} rejected: unknown id", self.symbol, order_id);
            return false;
        };
        let (side, price, remaining) = (handle.side, handle.price, handle.remaining);
        if new_quantity == 0 {
            return self.cancel(order_id);
        }
        if new_quantity > remaining {
            self.cancel(order_id);
            return self.submit_limit(order_id, side, price.into_inner(), new_quantity);
        }
        if new_quantity < remaining {
            if let Some(level) = self.ladder_mut(side).level_mut(price) {
                level.reduce(order_id, new_quantity);
            }
            if let Some(handle) = self.orders.get_mut(&order_id) {
                handle.remaining = new_quantity;
            }
            #[cfg(debug_assertions)]
            self.check_invariants();
        }
        true
    }

    /// Highest resting buy price.
    pub fn best_bid(&self) -> Option<f64> {
        self.bids.best_price().map(|p| p.into_inner())
    }

    /// Lowest resting sell price.
    pub fn best_ask(&self) -> Option<f64> {
        self.asks.best_price().map(|p| p.into_inner())
    }

    /// Midpoint of the best prices; `None` unless both sides are populated.
    pub fn mid_price(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid + ask) / 2.0),
            _ => None,
        }
    }

    /// Best ask minus best bid; `None` unless both sides are populated.
    pub fn spread(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    /// Aggregate resting quantity at an exact price, 0 when no level exists.
    pub fn volume_at(&self, side: Side, price: f64) -> u64 {
        self.ladder(side)
            .level(OrderedFloat(price))
            .map_or(0, PriceLevel::total_volume)
    }

    /// Aggregate resting quantity across one whole side.
    pub fn total_volume(&self, side: Side) -> u64 {
        self.ladder(side).total_volume()
    }

    /// Up to `levels` (price, volume) pairs, best price first.
    pub fn depth(&self, side: Side, levels: usize) -> Vec<DepthEntry> {
        self.ladder(side).depth(levels)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Number of resting (indexed) orders.
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    pub fn trade_count(&self) -> usize {
        self.trades.len()
    }

    /// The append-only trade log, oldest first. The borrow rules already
    /// guarantee the log cannot change while this slice is held.
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Owned copy of the trade log for callers that outlive the borrow.
    pub fn trades_snapshot(&self) -> Vec<Trade> {
        self.trades.clone()
    }

    /// Panics if any internal bookkeeping rule is broken: level aggregates,
    /// arrival ordering, index consistency, the no-cross rule, and trade
    /// tick monotonicity. Debug builds run this after every mutating call;
    /// tests may call it directly.
    pub fn check_invariants(&self) {
        for (side, ladder) in [(Side::Buy, &self.bids), (Side::Sell, &self.asks)] {
            for level in ladder.levels() {
                assert!(!level.is_empty(), "empty level retained at {}", level.price());
                let queued: u64 = level.orders().map(|o| o.remaining).sum();
                assert_eq!(
                    queued,
                    level.total_volume(),
                    "level aggregate out of sync at {}",
                    level.price()
                );
                let mut last_tick = None;
                for order in level.orders() {
                    assert!(order.remaining > 0, "zero-quantity order queued");
                    assert!(!order.is_market(), "market order queued");
                    assert_eq!(order.side, side);
                    assert_eq!(order.price, Some(level.price()));
                    assert!(
                        last_tick.map_or(true, |t| t < order.arrival_tick),
                        "queue out of arrival order at {}",
                        level.price()
                    );
                    last_tick = Some(order.arrival_tick);
                    let handle = self
                        .orders
                        .get(&order.order_id)
                        .expect("queued order missing from index");
                    assert_eq!(handle.remaining, order.remaining, "index remaining out of sync");
                    assert_eq!(handle.side, side);
                    assert_eq!(handle.price, level.price());
                }
            }
        }
        let queued: usize = self
            .bids
            .levels()
            .chain(self.asks.levels())
            .map(PriceLevel::len)
            .sum();
        assert_eq!(queued, self.orders.len(), "index and queues disagree on order count");
        if let (Some(bid), Some(ask)) = (self.best_bid(), self.best_ask()) {
            assert!(bid < ask, "crossed book: {} >= {}", bid, ask);
        }
        let mut last_tick = None;
        for trade in &self.trades {
            assert!(trade.quantity > 0, "zero-quantity trade recorded");
            assert!(
                last_tick.map_or(true, |t| t < trade.execution_tick),
                "execution ticks not strictly increasing"
            );
            last_tick = Some(trade.execution_tick);
        }
    }

    /// Consumes liquidity from the side opposite the aggressor.
    pub(crate) fn take_opposite(&mut self, aggressor: Side, limit: Price, quantity: u64) -> Vec<Fill> {
        self.ladder_mut(aggressor.opposite()).take(limit, quantity)
    }

    /// Syncs the index after a fill: drop exhausted passives, refresh the
    /// cached remaining for partial ones.
    pub(crate) fn settle_passive(&mut self, fill: &Fill) {
        if fill.remaining == 0 {
            self.orders.remove(&fill.order_id);
        } else if let Some(handle) = self.orders.get_mut(&fill.order_id) {
            handle.remaining = fill.remaining;
        }
    }

    pub(crate) fn next_tick(&mut self) -> u64 {
        let tick = self.tick;
        self.tick += 1;
        tick
    }

    pub(crate) fn record_trade(&mut self, trade: Trade) {
        self.trades.push(trade);
    }

    /// Rests a limit order's residual at its own price. Matching has
    /// already consumed all crossing liquidity, so resting cannot cross.
    fn rest(&mut self, order: Order) {
        let Some(price) = order.price else {
            return; // market orders never rest
        };
        self.orders.insert(
            order.order_id,
            OrderHandle {
                side: order.side,
                price,
                remaining: order.remaining,
            },
        );
        self.ladder_mut(order.side).enqueue(price, order);
    }

    fn ladder(&self, side: Side) -> &Ladder {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    fn ladder_mut(&mut self, side: Side) -> &mut Ladder {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }
}
