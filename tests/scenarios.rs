//! End-to-end scenarios driven purely through the public API.

use lob_engine::{OrderBook, Side};

#[test]
fn empty_book_reports_nothing() {
    let book = OrderBook::new("AAPL");
    assert_eq!(book.symbol(), "AAPL");
    assert!(book.best_bid().is_none());
    assert!(book.best_ask().is_none());
    assert!(book.mid_price().is_none());
    assert!(book.spread().is_none());
    assert_eq!(book.order_count(), 0);
    assert_eq!(book.trade_count(), 0);
}

#[test]
fn price_improvement_goes_to_the_aggressor() {
    let mut book = OrderBook::new("AAPL");
    assert!(book.submit_limit(1, Side::Sell, 100.0, 50));
    assert!(book.submit_limit(2, Side::Buy, 101.0, 50));

    assert_eq!(book.trade_count(), 1);
    let trade = book.trades()[0];
    assert_eq!(trade.price, 100.0, "executes at the passive price");
    assert_eq!(trade.quantity, 50);
    assert_eq!(trade.buy_order_id, 2);
    assert_eq!(trade.sell_order_id, 1);
    assert!(book.best_bid().is_none());
    assert!(book.best_ask().is_none());
    assert_eq!(book.order_count(), 0);
}

#[test]
fn partial_fill_leaves_residual_resting() {
    let mut book = OrderBook::new("AAPL");
    book.submit_limit(1, Side::Sell, 100.0, 50);
    book.submit_limit(2, Side::Buy, 100.0, 30);

    assert_eq!(book.trade_count(), 1);
    let trade = book.trades()[0];
    assert_eq!((trade.price, trade.quantity), (100.0, 30));
    assert_eq!(book.best_ask(), Some(100.0));
    assert_eq!(book.volume_at(Side::Sell, 100.0), 20);
    assert!(book.best_bid().is_none());
    assert_eq!(book.order_count(), 1);
}

#[test]
fn market_order_fills_in_arrival_order() {
    let mut book = OrderBook::new("AAPL");
    book.submit_limit(1, Side::Buy, 100.0, 10);
    book.submit_limit(2, Side::Buy, 100.0, 20);
    book.submit_limit(3, Side::Buy, 100.0, 30);
    assert!(book.submit_market(4, Side::Sell, 25));

    let trades = book.trades();
    assert_eq!(trades.len(), 2);
    assert_eq!((trades[0].buy_order_id, trades[0].quantity, trades[0].price), (1, 10, 100.0));
    assert_eq!((trades[1].buy_order_id, trades[1].quantity, trades[1].price), (2, 15, 100.0));
    // id 2 keeps 5, id 3 keeps 30.
    assert_eq!(book.volume_at(Side::Buy, 100.0), 35);
    assert_eq!(book.order_count(), 2);
}

#[test]
fn sweep_clears_levels_until_the_limit() {
    let mut book = OrderBook::new("AAPL");
    book.submit_limit(1, Side::Sell, 100.0, 10);
    book.submit_limit(2, Side::Sell, 101.0, 20);
    book.submit_limit(3, Side::Sell, 102.0, 30);
    book.submit_limit(4, Side::Buy, 101.5, 35);

    let trades = book.trades();
    assert_eq!(trades.len(), 2);
    assert_eq!((trades[0].price, trades[0].quantity), (100.0, 10));
    assert_eq!((trades[1].price, trades[1].quantity), (101.0, 20));
    assert_eq!(book.best_bid(), Some(101.5));
    assert_eq!(book.volume_at(Side::Buy, 101.5), 5);
    assert_eq!(book.best_ask(), Some(102.0));
}

#[test]
fn growing_an_order_sends_it_to_the_back() {
    let mut book = OrderBook::new("AAPL");
    book.submit_limit(1, Side::Buy, 100.0, 50);
    book.submit_limit(2, Side::Buy, 100.0, 50);
    book.submit_limit(3, Side::Buy, 100.0, 50);
    assert!(book.modify(1, 100));
    book.submit_limit(4, Side::Sell, 100.0, 50);

    assert_eq!(book.trade_count(), 1);
    assert_eq!(book.trades()[0].buy_order_id, 2);
    assert_eq!(book.volume_at(Side::Buy, 100.0), 150);
}

#[test]
fn shrinking_an_order_keeps_its_turn() {
    let mut book = OrderBook::new("AAPL");
    book.submit_limit(1, Side::Sell, 100.0, 40);
    book.submit_limit(2, Side::Sell, 100.0, 40);
    book.submit_limit(3, Side::Sell, 100.0, 40);
    assert!(book.modify(2, 10));

    book.submit_market(4, Side::Buy, 60);
    let trades = book.trades();
    assert_eq!(trades.len(), 3);
    // Arrival order is unchanged: 1 fills fully, then 2 at its reduced
    // size, then 3 takes the rest.
    assert_eq!((trades[0].sell_order_id, trades[0].quantity), (1, 40));
    assert_eq!((trades[1].sell_order_id, trades[1].quantity), (2, 10));
    assert_eq!((trades[2].sell_order_id, trades[2].quantity), (3, 10));
    assert_eq!(book.volume_at(Side::Sell, 100.0), 30);
}

#[test]
fn submit_then_cancel_restores_the_book() {
    let mut book = OrderBook::new("AAPL");
    book.submit_limit(1, Side::Buy, 99.0, 10);
    book.submit_limit(2, Side::Sell, 101.0, 10);
    let before = (
        book.best_bid(),
        book.best_ask(),
        book.mid_price(),
        book.depth(Side::Buy, 10),
        book.depth(Side::Sell, 10),
        book.trade_count(),
    );

    assert!(book.submit_limit(3, Side::Sell, 100.5, 7));
    assert!(book.cancel(3));

    let after = (
        book.best_bid(),
        book.best_ask(),
        book.mid_price(),
        book.depth(Side::Buy, 10),
        book.depth(Side::Sell, 10),
        book.trade_count(),
    );
    assert_eq!(before, after);
}

#[test]
fn quantity_is_conserved_across_fills_and_modifies() {
    let mut book = OrderBook::new("AAPL");
    book.submit_limit(1, Side::Sell, 100.0, 50);
    book.submit_limit(2, Side::Buy, 100.0, 30);

    // id 1 has traded 30, rests with 20.
    let traded_1: u64 = book
        .trades()
        .iter()
        .filter(|t| t.sell_order_id == 1)
        .map(|t| t.quantity)
        .sum();
    assert_eq!(traded_1 + book.volume_at(Side::Sell, 100.0), 50);

    // Shrinking resets the baseline: 10 resting, nothing traded since.
    assert!(book.modify(1, 10));
    book.submit_limit(3, Side::Buy, 100.0, 25);
    let traded_after_modify: u64 = book
        .trades()
        .iter()
        .skip(1)
        .filter(|t| t.sell_order_id == 1)
        .map(|t| t.quantity)
        .sum();
    assert_eq!(traded_after_modify, 10, "only the post-modify baseline can trade");
    assert_eq!(book.volume_at(Side::Sell, 100.0), 0);
    assert_eq!(book.order_count(), 1, "id 3's residual is the only resting order");
    assert_eq!(book.volume_at(Side::Buy, 100.0), 15);

    // id 2 was a pure aggressor: everything it submitted traded.
    let traded_2: u64 = book
        .trades()
        .iter()
        .filter(|t| t.buy_order_id == 2)
        .map(|t| t.quantity)
        .sum();
    assert_eq!(traded_2, 30);
}
