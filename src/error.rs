//! Errors returned by order submission.

use thiserror::Error;

/// Which field made a submission invalid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidReason {
    #[error("price must be positive")]
    ZeroPrice,

    #[error("quantity must be positive")]
    ZeroQuantity,

    /// `side_raw` is neither 0 (buy) nor 1 (sell)
    #[error("unknown side {0}")]
    UnknownSide(u8),
}

/// Reasons a submission is rejected. A rejected order never touches the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Zero price, zero quantity or an unknown side
    #[error("invalid order {order_id}: {reason}")]
    InvalidOrder {
        order_id: u64,
        reason: InvalidReason,
    },

    /// Another active order already uses this ID
    #[error("duplicate order id {0}")]
    DuplicateOrder(u64),
}

impl EngineError {
    /// ID of the rejected order
    pub fn order_id(&self) -> u64 {
        match self {
            EngineError::InvalidOrder { order_id, .. } => *order_id,
            EngineError::DuplicateOrder(order_id) => *order_id,
        }
    }
}
