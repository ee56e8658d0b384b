//! Order types for the matching engine.
//!
//! ## SSZ Serialization
//!
//! `Order` derives `SimpleSerialize` from ssz_rs for deterministic encoding.
//! Snapshots hash these bytes into a state root, so the layout must stay
//! fixed-size:
//! - Basic types (u64, u8): direct little-endian encoding
//! - Fixed-size composites: concatenated little-endian fields
//!
//! ## Fixed-Point Representation
//!
//! Prices and quantities are plain `u64`. Callers that need decimals scale
//! them with the helpers in [`crate::types::price`].

use ssz_rs::prelude::*;

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy or Sell
///
/// Represented as u8 for SSZ compatibility:
/// - Buy = 0
/// - Sell = 1
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy order (bid)
    #[default]
    Buy,
    /// Sell order (ask)
    Sell,
}

impl Side {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            Side::Buy => 0,
            Side::Sell => 1,
        }
    }

    /// Convert from u8 for deserialization
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Side::Buy),
            1 => Some(Side::Sell),
            _ => None,
        }
    }

    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// Whether `price` on this side is strictly better than `other`.
    ///
    /// Bids prefer higher prices, asks prefer lower prices.
    #[inline]
    pub fn is_better(self, price: u64, other: u64) -> bool {
        match self {
            Side::Buy => price > other,
            Side::Sell => price < other,
        }
    }

    /// Whether an order on this side at `price` can trade against a
    /// resting order on the opposite side at `opposite_price`.
    #[inline]
    pub fn crosses(self, price: u64, opposite_price: u64) -> bool {
        match self {
            Side::Buy => price >= opposite_price,
            Side::Sell => price <= opposite_price,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// A limit order.
///
/// `sequence` is zero until the engine accepts the order; it is then the
/// arrival sequence number used as the time-priority tie-break.
///
/// ## SSZ Layout
///
/// Fixed-size container of 8+1+8+8+8+8 = 41 bytes.
///
/// ## Example
///
/// ```
/// use double_auction::types::{Order, Side};
///
/// let order = Order::new(1, Side::Buy, 100, 10);
/// assert_eq!(order.remaining, 10);
/// assert_eq!(order.side(), Side::Buy);
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
pub struct Order {
    /// Caller-supplied identifier, unique among active orders
    pub id: u64,

    /// Order side as u8 (0=Buy, 1=Sell)
    /// Stored as u8 for SSZ compatibility
    pub side_raw: u8,

    /// Limit price
    pub price: u64,

    /// Original quantity
    pub quantity: u64,

    /// Remaining quantity, decremented as the order is matched
    pub remaining: u64,

    /// Arrival sequence assigned by the engine
    pub sequence: u64,
}

impl Order {
    /// Create a new limit order with its full quantity remaining
    ///
    /// # Arguments
    ///
    /// * `id` - Order identifier
    /// * `side` - Buy or Sell
    /// * `price` - Limit price
    /// * `quantity` - Order quantity
    pub fn new(id: u64, side: Side, price: u64, quantity: u64) -> Self {
        Self {
            id,
            side_raw: side.to_u8(),
            price,
            quantity,
            remaining: quantity,
            sequence: 0,
        }
    }

    /// Shorthand for a buy order
    pub fn buy(id: u64, price: u64, quantity: u64) -> Self {
        Self::new(id, Side::Buy, price, quantity)
    }

    /// Shorthand for a sell order
    pub fn sell(id: u64, price: u64, quantity: u64) -> Self {
        Self::new(id, Side::Sell, price, quantity)
    }

    /// Get the order side
    ///
    /// An unknown `side_raw` reads as buy here; the engine rejects such
    /// orders before they reach the book.
    pub fn side(&self) -> Side {
        Side::from_u8(self.side_raw).unwrap_or(Side::Buy)
    }

    /// Check if the order is fully filled
    pub fn is_filled(&self) -> bool {
        self.remaining == 0
    }

    /// Get the filled quantity
    pub fn filled_quantity(&self) -> u64 {
        self.quantity.saturating_sub(self.remaining)
    }

    /// Fill a portion of this order
    ///
    /// # Returns
    ///
    /// The actual quantity filled (may be less if order doesn't have enough remaining)
    pub fn fill(&mut self, fill_qty: u64) -> u64 {
        let actual_fill = fill_qty.min(self.remaining);
        self.remaining -= actual_fill;
        actual_fill
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_conversion() {
        assert_eq!(Side::Buy.to_u8(), 0);
        assert_eq!(Side::Sell.to_u8(), 1);
        assert_eq!(Side::from_u8(0), Some(Side::Buy));
        assert_eq!(Side::from_u8(1), Some(Side::Sell));
        assert_eq!(Side::from_u8(2), None);
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }

    #[test]
    fn test_side_priority() {
        assert!(Side::Buy.is_better(101, 100));
        assert!(!Side::Buy.is_better(100, 100));
        assert!(Side::Sell.is_better(99, 100));
        assert!(!Side::Sell.is_better(101, 100));
    }

    #[test]
    fn test_side_crosses() {
        // Buy at 100 crosses an ask at 100 or below
        assert!(Side::Buy.crosses(100, 100));
        assert!(Side::Buy.crosses(100, 90));
        assert!(!Side::Buy.crosses(100, 101));

        // Sell at 100 crosses a bid at 100 or above
        assert!(Side::Sell.crosses(100, 100));
        assert!(Side::Sell.crosses(100, 110));
        assert!(!Side::Sell.crosses(100, 99));
    }

    #[test]
    fn test_order_new() {
        let order = Order::new(1, Side::Sell, 100, 10);

        assert_eq!(order.id, 1);
        assert_eq!(order.side(), Side::Sell);
        assert_eq!(order.price, 100);
        assert_eq!(order.quantity, 10);
        assert_eq!(order.remaining, 10);
        assert_eq!(order.sequence, 0);
        assert!(!order.is_filled());
    }

    #[test]
    fn test_order_fill() {
        let mut order = Order::buy(1, 100, 10);

        let filled = order.fill(3);
        assert_eq!(filled, 3);
        assert_eq!(order.remaining, 7);
        assert_eq!(order.filled_quantity(), 3);
        assert!(!order.is_filled());

        let filled = order.fill(7);
        assert_eq!(filled, 7);
        assert!(order.is_filled());
    }

    #[test]
    fn test_order_overfill() {
        let mut order = Order::buy(1, 100, 10);

        let filled = order.fill(25);
        assert_eq!(filled, 10);
        assert_eq!(order.remaining, 0);
    }

    #[test]
    fn test_order_ssz_size() {
        let order = Order::sell(1, 100, 10);
        let bytes = ssz_rs::serialize(&order).expect("Failed to serialize");

        // id + side_raw + price + quantity + remaining + sequence
        assert_eq!(bytes.len(), 41);
    }

    #[test]
    fn test_order_deterministic_serialization() {
        let order = Order::buy(7, 250, 40);

        let bytes1 = ssz_rs::serialize(&order).expect("Failed to serialize");
        let bytes2 = ssz_rs::serialize(&order).expect("Failed to serialize");

        assert_eq!(bytes1, bytes2, "SSZ serialization must be deterministic");
    }
}
