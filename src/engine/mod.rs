//! Matching engine module.
//!
//! ## Matching Rules
//!
//! - **Price-time priority**: best price first, then earliest arrival
//! - **Maker price**: every trade executes at the resting order's price
//! - **Partial fills** are supported on both the maker and the aggressor
//! - **Unfilled quantity** rests on the book as a limit order
//!
//! [`MatchingEngine`] is the single-threaded state machine;
//! [`SharedEngine`] serializes concurrent callers onto it.
//!
//! ## Example
//!
//! ```
//! use double_auction::engine::MatchingEngine;
//! use double_auction::types::Order;
//! use double_auction::EngineConfig;
//!
//! let mut engine = MatchingEngine::new(EngineConfig::new("BTC/USD"));
//!
//! engine.submit(Order::sell(1, 100, 5)).unwrap();
//! engine.submit(Order::sell(2, 100, 5)).unwrap();
//!
//! let result = engine.submit(Order::buy(3, 100, 8)).unwrap();
//! assert_eq!(result.trades.len(), 2);
//! assert_eq!(engine.order(2).unwrap().remaining, 2);
//! ```

pub mod guard;
pub mod matcher;

pub use guard::SharedEngine;
pub use matcher::{MatchResult, MatchingEngine};
