//! Price-time priority matching.
//!
//! [`match_order`] runs one incoming order against the opposite ladder:
//! best level first, FIFO within a level, each execution priced at the
//! passive order's limit and stamped with a fresh tick.

use log::trace;
use ordered_float::OrderedFloat;

use crate::order_book::OrderBook;
use crate::types::{Order, Price, Side, Trade};

/// How far into the opposite ladder the order may reach. A market order
/// sweeps everything; the bounds here are internal stand-ins for its
/// unbounded price and never appear in any trade.
fn scan_limit(order: &Order) -> Price {
    match (order.side, order.price) {
        (_, Some(price)) => price,
        (Side::Buy, None) => OrderedFloat(f64::MAX),
        (Side::Sell, None) => OrderedFloat(0.0),
    }
}

/// Matches `incoming` against the book, recording one trade per passive
/// order consumed. Decrements `incoming.remaining` as it fills; the caller
/// decides what to do with any residual (rest a limit, drop a market).
pub(crate) fn match_order(book: &mut OrderBook, incoming: &mut Order) {
    let limit = scan_limit(incoming);
    let fills = book.take_opposite(incoming.side, limit, incoming.remaining);

    for fill in fills {
        incoming.remaining -= fill.quantity;
        book.settle_passive(&fill);
        let (buy_order_id, sell_order_id) = match incoming.side {
            Side::Buy => (incoming.order_id, fill.order_id),
            Side::Sell => (fill.order_id, incoming.order_id),
        };
        let execution_tick = book.next_tick();
        trace!(
            "trade {} @ {} (buy {} / sell {})",
            fill.quantity,
            fill.price,
            buy_order_id,
            sell_order_id
        );
        book.record_trade(Trade {
            buy_order_id,
            sell_order_id,
            price: fill.price,
            quantity: fill.quantity,
            execution_tick,
        });
    }
}
