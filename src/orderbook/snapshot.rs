//! Read-only view of the book for the reporting side.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::types::Order;

/// One price level as seen in a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSnapshot {
    pub price: u64,
    pub total_quantity: u128,
    /// Resting orders, oldest first
    pub orders: Vec<Order>,
}

/// The book at a point in its sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSnapshot {
    /// The instrument this book trades
    pub symbol: String,

    /// Last sequence number issued before the snapshot was taken
    pub sequence: u64,

    /// Bid levels, best (highest) first
    pub bids: Vec<LevelSnapshot>,

    /// Ask levels, best (lowest) first
    pub asks: Vec<LevelSnapshot>,
}

impl BookSnapshot {
    /// Best bid price and quantity
    pub fn best_bid(&self) -> Option<(u64, u128)> {
        self.bids
            .first()
            .map(|level| (level.price, level.total_quantity))
    }

    /// Best ask price and quantity
    pub fn best_ask(&self) -> Option<(u64, u128)> {
        self.asks
            .first()
            .map(|level| (level.price, level.total_quantity))
    }

    pub fn spread(&self) -> Option<u64> {
        match (self.best_bid(), self.best_ask()) {
            (Some((bid, _)), Some((ask, _))) if ask >= bid => Some(ask - bid),
            _ => None,
        }
    }

    /// Whether best bid >= best ask
    pub fn is_crossed(&self) -> bool {
        matches!(
            (self.best_bid(), self.best_ask()),
            (Some((bid, _)), Some((ask, _))) if bid >= ask
        )
    }

    pub fn total_bid_quantity(&self) -> u128 {
        self.bids.iter().map(|level| level.total_quantity).sum()
    }

    pub fn total_ask_quantity(&self) -> u128 {
        self.asks.iter().map(|level| level.total_quantity).sum()
    }

    /// Number of resting orders across both sides
    pub fn order_count(&self) -> usize {
        self.bids
            .iter()
            .chain(self.asks.iter())
            .map(|level| level.orders.len())
            .sum()
    }

    /// SHA-256 over the SSZ encoding of every resting order, bids then
    /// asks, each in priority order.
    ///
    /// Two books with the same resting orders in the same queue positions
    /// produce the same root.
    pub fn state_root(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.symbol.as_bytes());
        for level in self.bids.iter().chain(self.asks.iter()) {
            for order in &level.orders {
                let bytes = ssz_rs::serialize(order).expect("fixed-size order encoding");
                hasher.update(&bytes);
            }
        }
        hasher.finalize().into()
    }

    pub fn state_root_hex(&self) -> String {
        hex::encode(self.state_root())
    }
}
