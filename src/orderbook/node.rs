//! Slab node holding one resting order.
//!
//! Orders at the same price form a doubly-linked list whose links are
//! slab keys rather than references:
//! - `prev`: the order that arrived earlier at this price
//! - `next`: the order that arrived later at this price
//!
//! Slab keys stay valid until the node is removed, so a key is a stable
//! queue position for the lifetime of the order.

use crate::types::Order;

/// Order node stored in a [`BookSide`](crate::orderbook::BookSide) slab.
#[derive(Debug, Clone)]
pub struct OrderNode {
    /// The resting order
    pub order: Order,

    /// Next (newer) order at this price, `None` at the tail
    pub next: Option<usize>,

    /// Previous (older) order at this price, `None` at the head
    pub prev: Option<usize>,
}

impl OrderNode {
    /// Wrap an order in an unlinked node
    #[inline]
    pub fn new(order: Order) -> Self {
        Self {
            order,
            next: None,
            prev: None,
        }
    }

    /// Check if this node is unlinked (not part of any price level)
    #[inline]
    pub fn is_unlinked(&self) -> bool {
        self.next.is_none() && self.prev.is_none()
    }

    #[inline]
    pub fn order_id(&self) -> u64 {
        self.order.id
    }

    #[inline]
    pub fn price(&self) -> u64 {
        self.order.price
    }

    #[inline]
    pub fn remaining(&self) -> u64 {
        self.order.remaining
    }

    #[inline]
    pub fn sequence(&self) -> u64 {
        self.order.sequence
    }

    /// Fill a portion of the order, returning the quantity actually filled
    #[inline]
    pub fn fill(&mut self, quantity: u64) -> u64 {
        self.order.fill(quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_node_new() {
        let order = Order::buy(42, 100, 10);
        let node = OrderNode::new(order.clone());

        assert_eq!(node.order, order);
        assert!(node.is_unlinked());
        assert_eq!(node.order_id(), 42);
        assert_eq!(node.price(), 100);
        assert_eq!(node.remaining(), 10);
    }

    #[test]
    fn test_order_node_fill() {
        let mut node = OrderNode::new(Order::sell(1, 100, 10));

        assert_eq!(node.fill(4), 4);
        assert_eq!(node.remaining(), 6);
        assert_eq!(node.fill(10), 6);
        assert_eq!(node.remaining(), 0);
    }

    #[test]
    fn test_order_node_linking() {
        let mut node = OrderNode::new(Order::sell(1, 100, 10));

        node.next = Some(2);
        assert!(!node.is_unlinked());

        node.next = None;
        node.prev = Some(0);
        assert!(!node.is_unlinked());
    }
}
