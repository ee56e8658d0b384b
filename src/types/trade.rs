//! Trade type representing an executed match between two orders.

use rust_decimal::Decimal;
use ssz_rs::prelude::*;

use crate::types::Side;

/// A trade represents a single match between a maker and taker order.
///
/// ## Terminology
///
/// - **Maker**: The resting order that was already in the book
/// - **Taker**: The incoming (aggressor) order that triggered the match
///
/// ## Price Discovery
///
/// The trade always executes at the maker's price.
///
/// ## Example
///
/// ```
/// use double_auction::types::{Side, Trade};
///
/// let trade = Trade::new(
///     3,          // sequence
///     1,          // maker_order_id
///     2,          // taker_order_id
///     Side::Buy,  // taker side
///     100,        // price
///     10,         // quantity
/// );
/// assert_eq!(trade.buy_order_id(), 2);
/// assert_eq!(trade.sell_order_id(), 1);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Default,
    SimpleSerialize,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Trade {
    /// Global sequence number, shared with order arrivals
    pub sequence: u64,

    /// Maker order ID (the resting order)
    pub maker_order_id: u64,

    /// Taker order ID (the incoming order)
    pub taker_order_id: u64,

    /// Taker side as u8 (0=Buy, 1=Sell)
    pub taker_side_raw: u8,

    /// Execution price, always the maker's price
    pub price: u64,

    /// Executed quantity
    pub quantity: u64,
}

impl Trade {
    /// Create a new trade
    pub fn new(
        sequence: u64,
        maker_order_id: u64,
        taker_order_id: u64,
        taker_side: Side,
        price: u64,
        quantity: u64,
    ) -> Self {
        Self {
            sequence,
            maker_order_id,
            taker_order_id,
            taker_side_raw: taker_side.to_u8(),
            price,
            quantity,
        }
    }

    /// Side of the aggressor order
    pub fn taker_side(&self) -> Side {
        Side::from_u8(self.taker_side_raw).unwrap_or(Side::Buy)
    }

    /// ID of whichever order was buying
    pub fn buy_order_id(&self) -> u64 {
        match self.taker_side() {
            Side::Buy => self.taker_order_id,
            Side::Sell => self.maker_order_id,
        }
    }

    /// ID of whichever order was selling
    pub fn sell_order_id(&self) -> u64 {
        match self.taker_side() {
            Side::Buy => self.maker_order_id,
            Side::Sell => self.taker_order_id,
        }
    }

    /// Calculate the notional value of this trade (price * quantity)
    ///
    /// `None` if the product exceeds `Decimal`'s 96-bit range.
    pub fn notional(&self) -> Option<Decimal> {
        Decimal::from(self.price).checked_mul(Decimal::from(self.quantity))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
