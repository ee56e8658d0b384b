//! Order Book Side: the price levels for bids or for asks.
//!
//! Both sides share one implementation. Levels are kept in a `BTreeMap`
//! keyed by price in ascending order; the side fixed at construction
//! decides which end is "best":
//!
//! - **Bids**: best = highest price (last key)
//! - **Asks**: best = lowest price (first key)
//!
//! Each side owns its resting orders in a slab. The slab key is the
//! order's queue position and is what the [`OrderIndex`] records.
//!
//! [`OrderIndex`]: crate::orderbook::OrderIndex

use std::collections::BTreeMap;

use slab::Slab;
use tracing::trace;

use crate::orderbook::{Location, OrderNode, PriceLevel};
use crate::types::{Order, Side};

/// One side of the book.
#[derive(Debug)]
pub struct BookSide {
    side: Side,

    /// Resting orders owned by this side
    orders: Slab<OrderNode>,

    /// Price levels, ascending by price
    levels: BTreeMap<u64, PriceLevel>,
}

impl BookSide {
    /// Create an empty side with the given priority ordering
    pub fn new(side: Side) -> Self {
        Self::with_capacity(side, 0)
    }

    /// Create an empty side with pre-allocated order storage
    pub fn with_capacity(side: Side, order_capacity: usize) -> Self {
        Self {
            side,
            orders: Slab::with_capacity(order_capacity),
            levels: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Number of resting orders
    #[inline]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Number of distinct price levels
    #[inline]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Slots pre-allocated for resting orders
    #[inline]
    pub fn capacity(&self) -> usize {
        self.orders.capacity()
    }

    /// Total remaining quantity across every level
    pub fn total_quantity(&self) -> u128 {
        self.levels.values().map(|level| level.total_quantity).sum()
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Rest an order at the tail of its price level, creating the level
    /// if absent
    ///
    /// # Returns
    ///
    /// The order's location, to be registered in the order index
    pub fn insert(&mut self, order: Order) -> Location {
        debug_assert_eq!(order.side(), self.side, "order inserted on the wrong side");
        let price = order.price;
        let key = self.orders.insert(OrderNode::new(order));

        let side = self.side;
        let level = self.levels.entry(price).or_insert_with(|| {
            trace!(%side, price, "price level created");
            PriceLevel::new(price)
        });
        level.push_back(key, &mut self.orders);

        Location {
            side: self.side,
            price,
            key,
        }
    }

    /// Reduce the remaining quantity of a resting order
    ///
    /// # Returns
    ///
    /// The order's remaining quantity after the fill
    pub fn fill(&mut self, location: &Location, quantity: u64) -> u64 {
        let node = self
            .orders
            .get_mut(location.key)
            .expect("fill: location has no resting order");
        let filled = node.fill(quantity);
        debug_assert_eq!(filled, quantity, "fill larger than remaining quantity");
        let remaining = node.remaining();

        self.levels
            .get_mut(&location.price)
            .expect("fill: location has no price level")
            .reduce_quantity(filled);

        remaining
    }

    /// Remove the order at `location` from its level and free its slot.
    ///
    /// Drops the level if it became empty.
    ///
    /// # Panics
    ///
    /// Panics if the location does not point at a resting order; the index
    /// and the side are out of sync at that point.
    pub fn cancel(&mut self, location: &Location) -> Order {
        let level = self
            .levels
            .get_mut(&location.price)
            .expect("cancel: location has no price level");
        level.remove(location.key, &mut self.orders);
        self.remove_level_if_empty(location.price);

        let node = self
            .orders
            .try_remove(location.key)
            .expect("cancel: location has no resting order");
        node.order
    }

    /// Drop the level at `price` if its queue is empty
    pub fn remove_level_if_empty(&mut self, price: u64) -> bool {
        let empty = self.levels.get(&price).is_some_and(PriceLevel::is_empty);
        if empty {
            self.levels.remove(&price);
            trace!(side = %self.side, price, "price level removed");
        }
        empty
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Price level at the priority extreme for this side
    pub fn best_level(&self) -> Option<&PriceLevel> {
        match self.side {
            Side::Buy => self.levels.values().next_back(),
            Side::Sell => self.levels.values().next(),
        }
    }

    /// Best price on this side
    #[inline]
    pub fn best_price(&self) -> Option<u64> {
        self.best_level().map(|level| level.price)
    }

    /// Location of the order that would trade next on this side
    pub fn best_front(&self) -> Option<Location> {
        let level = self.best_level()?;
        let key = level.front().expect("non-empty level has a front order");
        Some(Location {
            side: self.side,
            price: level.price,
            key,
        })
    }

    /// Resting order at `location`
    pub fn order(&self, location: &Location) -> Option<&Order> {
        self.orders.get(location.key).map(|node| &node.order)
    }

    /// Price level at an exact price
    pub fn level(&self, price: u64) -> Option<&PriceLevel> {
        self.levels.get(&price)
    }

    /// Levels from best to worst
    pub fn levels(&self) -> Box<dyn Iterator<Item = &PriceLevel> + '_> {
        match self.side {
            Side::Buy => Box::new(self.levels.values().rev()),
            Side::Sell => Box::new(self.levels.values()),
        }
    }

    /// Orders at a level, oldest first
    pub fn orders_at<'a>(&'a self, level: &PriceLevel) -> impl Iterator<Item = &'a Order> + 'a {
        level.keys(&self.orders).map(move |key| &self.orders[key].order)
    }

    /// Remove every order and level
    pub fn clear(&mut self) {
        self.orders.clear();
        self.levels.clear();
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
