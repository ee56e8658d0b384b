//! # Double Auction
//!
//! Continuous double-auction matching engine for a single instrument.
//!
//! ## Architecture
//!
//! - **Types**: Order, Side, Trade, CancelOutcome
//! - **OrderBook**: Slab-backed FIFO price levels per side, plus an order
//!   index for cancellation
//! - **Engine**: Price-time priority matcher and the lock that serializes
//!   concurrent callers
//! - **Events**: Append-only sink for trades, rejects and cancel outcomes
//!
//! ## Design Principles
//!
//! 1. **Determinism**: The same request sequence produces the same trades
//!    and the same book
//! 2. **No Floating Point**: Prices and quantities are unsigned integers
//! 3. **Atomic Requests**: Each submit or cancel is one critical section
//! 4. **Synchronous Execution**: No background work and no async
//!
//! ## Example
//!
//! ```
//! use double_auction::{CancelOutcome, EngineConfig, Order, SharedEngine};
//!
//! let engine = SharedEngine::new(EngineConfig::default());
//!
//! engine.submit(Order::sell(1, 100, 10)).unwrap();
//! let result = engine.submit(Order::buy(2, 100, 10)).unwrap();
//!
//! assert_eq!(result.trades[0].price, 100);
//! assert_eq!(engine.cancel(1), CancelOutcome::NotFound);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Order, Trade, CancelOutcome
pub mod types;

/// Order book: price levels, sides and the order index
pub mod orderbook;

/// Matching engine and concurrency guard
pub mod engine;

/// Event sink for trades and outcomes
pub mod events;

pub mod config;
pub mod error;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use config::EngineConfig;
pub use engine::{MatchResult, MatchingEngine, SharedEngine};
pub use error::{EngineError, InvalidReason};
pub use events::{BookEvent, CallbackSink, EventLog, EventSink, RejectReason};
pub use orderbook::{BookSnapshot, LevelSnapshot, OrderBook};
pub use types::{CancelOutcome, Order, Side, Trade};
