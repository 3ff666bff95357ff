//! # lob-engine
//!
//! Single-symbol, in-memory limit order book with a continuous
//! double-auction matching engine under price/time priority.
//!
//! ## Entry point
//!
//! [`OrderBook`] is the single entry point: create one per symbol, then
//! drive it with [`OrderBook::submit_limit`], [`OrderBook::submit_market`],
//! [`OrderBook::cancel`], and [`OrderBook::modify`]. Executions land in the
//! book's trade log; market data comes from the query methods.
//!
//! ## Example
//!
//! ```rust
//! use lob_engine::{OrderBook, Side};
//!
//! let mut book = OrderBook::new("AAPL");
//! assert!(book.submit_limit(1, Side::Sell, 100.0, 50));
//! // A buy at 101.0 crosses and executes at the resting (passive) price.
//! assert!(book.submit_limit(2, Side::Buy, 101.0, 50));
//!
//! assert_eq!(book.trade_count(), 1);
//! let trade = &book.trades()[0];
//! assert_eq!((trade.buy_order_id, trade.sell_order_id), (2, 1));
//! assert_eq!((trade.price, trade.quantity), (100.0, 50));
//! assert!(book.best_bid().is_none() && book.best_ask().is_none());
//! ```
//!
//! The book is single-threaded by design; embedders that share it across
//! threads wrap the whole thing in one mutex.

pub mod order_book;
pub mod order_flow;
pub mod types;

mod ladder;
mod level;
mod matching;

pub use order_book::OrderBook;
pub use types::{DepthEntry, OrderType, Side, Trade};
