//! Outcome of a cancel request.

/// Result of cancelling an order.
///
/// `NotFound` is a normal outcome: the order may already have been
/// filled or cancelled by the time the request acquired the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CancelOutcome {
    /// The order was resting and has been removed
    Cancelled {
        /// Quantity that was still open when the order was removed
        remaining: u64,
    },
    /// No active order with that ID
    NotFound,
}

impl CancelOutcome {
    /// Whether the cancel removed an order
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CancelOutcome::Cancelled { .. })
    }
}
