//! Core types for the order book.
//!
//! [`Side`], [`OrderType`], [`Trade`], and [`DepthEntry`] are the boundary
//! types; [`Order`] and [`Price`] are internal to the book.

use ordered_float::OrderedFloat;

/// Ladder key. Prices are opaque doubles; two orders share a level only when
/// their prices are bit-equal. `OrderedFloat` supplies the total order the
/// ladder map requires (NaN is rejected at submission and never enters).
pub(crate) type Price = OrderedFloat<f64>;

/// Order side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The side an incoming order matches against.
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// Order type: limit (with price) or market (take best available).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum OrderType {
    Limit,
    Market,
}

/// An order held in a price level's queue.
///
/// The queue is the single owner; the book's index only stores a locator
/// handle. `price` is `None` for market orders, which never rest.
#[derive(Clone, Debug)]
pub(crate) struct Order {
    pub(crate) order_id: u64,
    pub(crate) side: Side,
    pub(crate) kind: OrderType,
    pub(crate) price: Option<Price>,
    pub(crate) remaining: u64,
    pub(crate) arrival_tick: u64,
}

impl Order {
    pub(crate) fn limit(order_id: u64, side: Side, price: f64, quantity: u64, arrival_tick: u64) -> Self {
        Self {
            order_id,
            side,
            kind: OrderType::Limit,
            price: Some(OrderedFloat(price)),
            remaining: quantity,
            arrival_tick,
        }
    }

    pub(crate) fn market(order_id: u64, side: Side, quantity: u64, arrival_tick: u64) -> Self {
        Self {
            order_id,
            side,
            kind: OrderType::Market,
            price: None,
            remaining: quantity,
            arrival_tick,
        }
    }

    pub(crate) fn is_market(&self) -> bool {
        matches!(self.kind, OrderType::Market)
    }
}

/// One execution between a buy and a sell order.
///
/// `price` is always the passive (resting) order's limit price;
/// `execution_tick` is drawn from the same logical clock as order arrivals,
/// so trades and arrivals are totally ordered.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Trade {
    pub buy_order_id: u64,
    pub sell_order_id: u64,
    pub price: f64,
    pub quantity: u64,
    pub execution_tick: u64,
}

/// One ladder level as reported by depth queries: a price and the aggregate
/// resting quantity at it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DepthEntry {
    pub price: f64,
    pub volume: u64,
}
