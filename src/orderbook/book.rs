//! The order book: both sides plus the order index.
//!
//! ## Architecture
//!
//! - **BookSide** (x2): slab-owned orders grouped into FIFO price levels
//! - **OrderIndex**: order ID to [`Location`] for O(1) cancel lookup
//!
//! Every method that mutates a side also updates the index before
//! returning, so the two are never observable out of sync. The book does
//! not match; see [`MatchingEngine`](crate::engine::MatchingEngine).
//!
//! ## Example
//!
//! ```
//! use double_auction::orderbook::OrderBook;
//! use double_auction::types::Order;
//!
//! let mut book = OrderBook::with_capacity(16);
//! book.insert(Order::buy(1, 99, 10));
//! book.insert(Order::sell(2, 101, 10));
//!
//! assert_eq!(book.best_bid(), Some(99));
//! assert_eq!(book.best_ask(), Some(101));
//! assert_eq!(book.spread(), Some(2));
//! ```

use crate::orderbook::{BookSide, LevelSnapshot, Location, OrderIndex};
use crate::types::{Order, Side};

/// Both sides of a single instrument's book
#[derive(Debug)]
pub struct OrderBook {
    bids: BookSide,
    asks: BookSide,
    index: OrderIndex,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a book with `order_capacity` slots pre-allocated per side
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self {
            bids: BookSide::with_capacity(Side::Buy, order_capacity),
            asks: BookSide::with_capacity(Side::Sell, order_capacity),
            index: OrderIndex::with_capacity(order_capacity * 2),
        }
    }

    // ========================================================================
    // Sides
    // ========================================================================

    #[inline]
    pub fn side(&self, side: Side) -> &BookSide {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    #[inline]
    pub fn bids(&self) -> &BookSide {
        &self.bids
    }

    #[inline]
    pub fn asks(&self) -> &BookSide {
        &self.asks
    }

    #[inline]
    fn side_mut(&mut self, side: Side) -> &mut BookSide {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Rest an order and register it in the index
    ///
    /// # Panics
    ///
    /// Panics if the order ID is already active.
    pub fn insert(&mut self, order: Order) -> Location {
        let order_id = order.id;
        let location = self.side_mut(order.side()).insert(order);
        self.index.register(order_id, location);
        location
    }

    /// Reduce a resting order's remaining quantity, returning what is left
    pub fn fill(&mut self, location: &Location, quantity: u64) -> u64 {
        self.side_mut(location.side).fill(location, quantity)
    }

    /// Remove an active order by ID
    ///
    /// # Returns
    ///
    /// The removed order, or `None` if no active order has that ID
    pub fn remove(&mut self, order_id: u64) -> Option<Order> {
        let location = self.index.unregister(order_id)?;
        let order = self.side_mut(location.side).cancel(&location);
        assert_eq!(
            order.id, order_id,
            "index location for order {order_id} held order {}",
            order.id
        );
        Some(order)
    }

    /// Remove every order
    pub fn clear(&mut self) {
        self.bids.clear();
        self.asks.clear();
        self.index.clear();
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[inline]
    pub fn location(&self, order_id: u64) -> Option<Location> {
        self.index.lookup(order_id)
    }

    /// Active order by ID
    pub fn order(&self, order_id: u64) -> Option<&Order> {
        let location = self.index.lookup(order_id)?;
        self.side(location.side).order(&location)
    }

    /// Resting order at a location
    pub fn order_at(&self, location: &Location) -> Option<&Order> {
        self.side(location.side).order(location)
    }

    #[inline]
    pub fn contains_order(&self, order_id: u64) -> bool {
        self.index.contains(order_id)
    }

    /// Total number of active orders
    #[inline]
    pub fn order_count(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    #[inline]
    pub fn bid_levels(&self) -> usize {
        self.bids.level_count()
    }

    #[inline]
    pub fn ask_levels(&self) -> usize {
        self.asks.level_count()
    }

    /// Highest bid price
    #[inline]
    pub fn best_bid(&self) -> Option<u64> {
        self.bids.best_price()
    }

    /// Lowest ask price
    #[inline]
    pub fn best_ask(&self) -> Option<u64> {
        self.asks.best_price()
    }

    /// Best ask minus best bid, when both sides are populated and uncrossed
    pub fn spread(&self) -> Option<u64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) if ask >= bid => Some(ask - bid),
            _ => None,
        }
    }

    /// Whether best bid >= best ask
    pub fn is_crossed(&self) -> bool {
        matches!((self.best_bid(), self.best_ask()), (Some(bid), Some(ask)) if bid >= ask)
    }

    /// Level snapshots for one side, best first, at most `depth` levels
    pub fn level_snapshots(&self, side: Side, depth: usize) -> Vec<LevelSnapshot> {
        let book_side = self.side(side);
        book_side
            .levels()
            .take(depth)
            .map(|level| LevelSnapshot {
                price: level.price,
                total_quantity: level.total_quantity,
                orders: book_side.orders_at(level).cloned().collect(),
            })
            .collect()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
