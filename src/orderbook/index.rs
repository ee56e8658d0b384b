//! Order Index: order ID to book location.
//!
//! The index never owns orders. A [`Location`] is a non-owning descriptor
//! (side + price + slab key) that the owning [`BookSide`] resolves.
//!
//! [`BookSide`]: crate::orderbook::BookSide

use std::collections::HashMap;

use crate::types::Side;

/// Where a resting order lives in the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    /// Side holding the order
    pub side: Side,
    /// Price level holding the order
    pub price: u64,
    /// Slab key of the order's queue node
    pub key: usize,
}

/// Mapping from active order IDs to their locations.
#[derive(Debug, Default)]
pub struct OrderIndex {
    locations: HashMap<u64, Location>,
}

impl OrderIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            locations: HashMap::with_capacity(capacity),
        }
    }

    /// Record a new active order
    ///
    /// # Panics
    ///
    /// Panics if the ID is already registered; callers check for
    /// duplicates before touching the book.
    pub fn register(&mut self, order_id: u64, location: Location) {
        let previous = self.locations.insert(order_id, location);
        assert!(previous.is_none(), "order {order_id} registered twice");
    }

    #[inline]
    pub fn lookup(&self, order_id: u64) -> Option<Location> {
        self.locations.get(&order_id).copied()
    }

    /// Move an active order to a new location
    ///
    /// # Panics
    ///
    /// Panics if the order is not registered.
    pub fn update(&mut self, order_id: u64, location: Location) {
        let entry = self
            .locations
            .get_mut(&order_id)
            .unwrap_or_else(|| panic!("update of unregistered order {order_id}"));
        *entry = location;
    }

    /// Forget an order, returning where it was
    pub fn unregister(&mut self, order_id: u64) -> Option<Location> {
        self.locations.remove(&order_id)
    }

    #[inline]
    pub fn contains(&self, order_id: u64) -> bool {
        self.locations.contains_key(&order_id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn clear(&mut self) {
        self.locations.clear();
    }
}
