//! Price Level Queue: FIFO of resting orders at one exact price.
//!
//! ## Queue Structure
//!
//! ```text
//! head (oldest) <-> order2 <-> order3 <-> tail (newest)
//! ```
//!
//! - New orders are appended at the tail
//! - Matching consumes orders from the head
//! - Any order can be unlinked in O(1) using its slab key, which doubles
//!   as the per-level index used by cancellation
//!
//! The order data lives in the owning side's slab; this struct only holds
//! the queue metadata. A level that becomes empty must be dropped by the
//! owning [`BookSide`](crate::orderbook::BookSide).

use slab::Slab;

use crate::orderbook::OrderNode;

/// All resting orders at a single price, in arrival order.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Price for this level
    pub price: u64,

    /// Total remaining quantity at this level
    ///
    /// Wider than a single order's quantity so any number of `u64` orders
    /// can share one price without overflow.
    pub total_quantity: u128,

    /// Head of the queue (oldest order, slab key)
    pub head: Option<usize>,

    /// Tail of the queue (newest order, slab key)
    pub tail: Option<usize>,

    /// Number of orders at this price level
    pub order_count: usize,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new(price: u64) -> Self {
        Self {
            price,
            total_quantity: 0,
            head: None,
            tail: None,
            order_count: 0,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order_count == 0
    }

    /// Append an order to the tail of the queue
    ///
    /// # Panics
    ///
    /// Panics if the key doesn't exist in the slab or the order's price
    /// differs from the level's price.
    pub fn push_back(&mut self, key: usize, slab: &mut Slab<OrderNode>) {
        let node = slab.get_mut(key).expect("push_back: unknown slab key");
        assert_eq!(
            node.price(),
            self.price,
            "order {} does not belong to level {}",
            node.order_id(),
            self.price
        );
        let quantity = node.remaining();

        node.prev = self.tail;
        node.next = None;

        match self.tail {
            Some(tail_key) => {
                slab.get_mut(tail_key)
                    .expect("push_back: dangling tail key")
                    .next = Some(key);
            }
            None => self.head = Some(key),
        }

        self.tail = Some(key);
        self.order_count += 1;
        self.total_quantity += u128::from(quantity);
    }

    /// Slab key of the earliest order at this price
    #[inline]
    pub fn front(&self) -> Option<usize> {
        self.head
    }

    /// Unlink the earliest order and return its slab key
    ///
    /// The node itself stays in the slab; the caller decides whether to
    /// free it.
    pub fn pop_front(&mut self, slab: &mut Slab<OrderNode>) -> Option<usize> {
        let key = self.head?;
        self.remove(key, slab);
        Some(key)
    }

    /// Unlink an arbitrary order from the queue by slab key
    ///
    /// # Returns
    ///
    /// The remaining quantity of the unlinked order
    pub fn remove(&mut self, key: usize, slab: &mut Slab<OrderNode>) -> u64 {
        let node = slab.get(key).expect("remove: unknown slab key");
        let quantity = node.remaining();
        let prev_key = node.prev;
        let next_key = node.next;

        match prev_key {
            Some(prev) => slab.get_mut(prev).expect("remove: dangling prev key").next = next_key,
            None => self.head = next_key,
        }

        match next_key {
            Some(next) => slab.get_mut(next).expect("remove: dangling next key").prev = prev_key,
            None => self.tail = prev_key,
        }

        let node = slab.get_mut(key).expect("remove: unknown slab key");
        node.prev = None;
        node.next = None;

        self.order_count -= 1;
        self.total_quantity -= u128::from(quantity);

        quantity
    }

    /// Account for a partial or full fill of one of this level's orders
    pub fn reduce_quantity(&mut self, filled_quantity: u64) {
        self.total_quantity = self
            .total_quantity
            .checked_sub(u128::from(filled_quantity))
            .expect("level quantity underflow");
    }

    /// Slab keys from head to tail
    pub fn keys<'a>(&self, slab: &'a Slab<OrderNode>) -> impl Iterator<Item = usize> + 'a {
        std::iter::successors(self.head, move |&key| slab[key].next)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
