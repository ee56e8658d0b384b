//! Core data types for the matching engine
//!
//! ## Types
//!
//! - [`Order`]: A limit order
//! - [`Side`]: Buy or Sell
//! - [`Trade`]: An executed trade between a maker and a taker
//! - [`CancelOutcome`]: Result of a cancel request
//!
//! `Order` and `Trade` implement SSZ serialization for deterministic
//! encoding; prices and quantities are unsigned integers (see [`price`]
//! for the fixed-point helpers).

mod order;
mod outcome;
mod trade;
pub mod price;

pub use order::{Order, Side};
pub use outcome::CancelOutcome;
pub use trade::Trade;
