//! Deterministic synthetic order flow.
//!
//! Seeded action streams (submissions, cancels, modifies) for replay tests
//! and demos. Same config and seed, same sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::order_book::OrderBook;
use crate::types::{OrderType, Side};

/// One scripted call against the book.
#[derive(Clone, Debug)]
pub enum Action {
    Submit {
        order_id: u64,
        side: Side,
        kind: OrderType,
        /// `None` for market orders.
        price: Option<f64>,
        quantity: u64,
    },
    Cancel {
        order_id: u64,
    },
    Modify {
        order_id: u64,
        new_quantity: u64,
    },
}

/// Configuration for the action generator. Ratios are probabilities in
/// `0.0..=1.0`; `cancel_ratio + modify_ratio` should stay below 1.0.
#[derive(Clone, Debug)]
pub struct FlowConfig {
    /// RNG seed. Same seed, same action stream.
    pub seed: u64,
    /// Stream length for [`Flow::all_actions`].
    pub num_actions: usize,
    /// Probability a submission buys (sells otherwise).
    pub buy_ratio: f64,
    /// Probability a submission is a limit order (market otherwise).
    pub limit_ratio: f64,
    /// Probability an action cancels a previously issued id.
    pub cancel_ratio: f64,
    /// Probability an action modifies a previously issued id.
    pub modify_ratio: f64,
    /// Limit prices are drawn as `step * n` for `n` in this inclusive
    /// range, so repeated draws land on bit-identical level keys.
    pub price_step: f64,
    pub price_min: i64,
    pub price_max: i64,
    /// Quantity range, inclusive.
    pub quantity_min: u64,
    pub quantity_max: u64,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            num_actions: 1000,
            buy_ratio: 0.5,
            limit_ratio: 0.9,
            cancel_ratio: 0.15,
            modify_ratio: 0.1,
            price_step: 0.25,
            price_min: 380,
            price_max: 420,
            quantity_min: 1,
            quantity_max: 100,
        }
    }
}

/// Deterministic action stream. Cancels and modifies target ids the stream
/// has already issued; some of those will have filled or been cancelled by
/// replay time, which exercises the book's rejection paths.
pub struct Flow {
    rng: StdRng,
    config: FlowConfig,
    next_order_id: u64,
    issued: Vec<u64>,
}

impl Flow {
    pub fn new(config: FlowConfig) -> Self {
        Self {
            rng: StdRng::seed_from_u64(config.seed),
            config,
            next_order_id: 1,
            issued: Vec::new(),
        }
    }

    /// Generates the next action, advancing the RNG and id counter.
    pub fn next_action(&mut self) -> Action {
        let roll = self.rng.gen::<f64>();
        if !self.issued.is_empty() {
            if roll < self.config.cancel_ratio {
                let pick = self.rng.gen_range(0..self.issued.len());
                return Action::Cancel {
                    order_id: self.issued[pick],
                };
            }
            if roll < self.config.cancel_ratio + self.config.modify_ratio {
                let pick = self.rng.gen_range(0..self.issued.len());
                let new_quantity = self
                    .rng
                    .gen_range(self.config.quantity_min..=self.config.quantity_max);
                return Action::Modify {
                    order_id: self.issued[pick],
                    new_quantity,
                };
            }
        }

        let order_id = self.next_order_id;
        self.next_order_id += 1;
        self.issued.push(order_id);
        let side = if self.rng.gen::<f64>() < self.config.buy_ratio {
            Side::Buy
        } else {
            Side::Sell
        };
        let quantity = self
            .rng
            .gen_range(self.config.quantity_min..=self.config.quantity_max);
        if self.rng.gen::<f64>() < self.config.limit_ratio {
            let ticks = self.rng.gen_range(self.config.price_min..=self.config.price_max);
            Action::Submit {
                order_id,
                side,
                kind: OrderType::Limit,
                price: Some(ticks as f64 * self.config.price_step),
                quantity,
            }
        } else {
            Action::Submit {
                order_id,
                side,
                kind: OrderType::Market,
                price: None,
                quantity,
            }
        }
    }

    /// Returns exactly `n` actions, advancing the stream.
    pub fn take_actions(&mut self, n: usize) -> Vec<Action> {
        (0..n).map(|_| self.next_action()).collect()
    }

    /// Returns the full stream defined by `config.num_actions`.
    pub fn all_actions(&mut self) -> Vec<Action> {
        self.take_actions(self.config.num_actions)
    }
}

/// Applies one action to the book, returning its acceptance flag.
pub fn apply(book: &mut OrderBook, action: &Action) -> bool {
    match *action {
        Action::Submit {
            order_id,
            side,
            kind,
            price,
            quantity,
        } => match kind {
            OrderType::Limit => book.submit_limit(order_id, side, price.unwrap_or(f64::NAN), quantity),
            OrderType::Market => book.submit_market(order_id, side, quantity),
        },
        Action::Cancel { order_id } => book.cancel(order_id),
        Action::Modify {
            order_id,
            new_quantity,
        } => book.modify(order_id, new_quantity),
    }
}

/// Replays a stream into the book; returns how many actions were accepted.
pub fn replay(book: &mut OrderBook, actions: impl IntoIterator<Item = Action>) -> usize {
    actions
        .into_iter()
        .filter(|action| apply(book, action))
        .count()
}
