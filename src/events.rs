//! Event Sink: ordered, append-only record of what the engine did.
//!
//! The engine appends events inside the same critical section as the book
//! mutation that produced them, so a sink sees one total order consistent
//! with trade and arrival sequence numbers. The engine never reads events
//! back.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::types::{Side, Trade};

/// Why a submission was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    InvalidOrder,
    DuplicateOrder,
}

impl From<&EngineError> for RejectReason {
    fn from(err: &EngineError) -> Self {
        match err {
            EngineError::InvalidOrder { .. } => RejectReason::InvalidOrder,
            EngineError::DuplicateOrder(_) => RejectReason::DuplicateOrder,
        }
    }
}

/// Something that happened to the book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BookEvent {
    /// Submission passed validation and received its arrival sequence
    Accepted {
        order_id: u64,
        side: Side,
        price: u64,
        quantity: u64,
        sequence: u64,
    },

    /// A maker and a taker traded
    Trade(Trade),

    /// Submission finished matching with quantity left resting
    Rested {
        order_id: u64,
        side: Side,
        price: u64,
        remaining: u64,
    },

    /// Submission rejected without touching the book
    Rejected { order_id: u64, reason: RejectReason },

    /// Resting order removed on request
    Cancelled { order_id: u64, remaining: u64 },

    /// Cancel for an ID with no active order
    CancelNotFound { order_id: u64 },
}

impl BookEvent {
    /// Order the event refers to; the taker for trades
    pub fn order_id(&self) -> u64 {
        match self {
            BookEvent::Accepted { order_id, .. }
            | BookEvent::Rested { order_id, .. }
            | BookEvent::Rejected { order_id, .. }
            | BookEvent::Cancelled { order_id, .. }
            | BookEvent::CancelNotFound { order_id } => *order_id,
            BookEvent::Trade(trade) => trade.taker_order_id,
        }
    }

    pub fn as_trade(&self) -> Option<&Trade> {
        match self {
            BookEvent::Trade(trade) => Some(trade),
            _ => None,
        }
    }
}

/// Consumer of engine events.
pub trait EventSink {
    /// Append one event. Called with the engine's guard held, so
    /// implementations must not block.
    fn record(&mut self, event: BookEvent);
}

/// In-memory append-only event log
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<BookEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every event in the order it was recorded
    pub fn events(&self) -> &[BookEvent] {
        &self.events
    }

    /// Trades in execution order
    pub fn trades(&self) -> impl Iterator<Item = &Trade> {
        self.events.iter().filter_map(BookEvent::as_trade)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for EventLog {
    fn record(&mut self, event: BookEvent) {
        self.events.push(event);
    }
}

/// Sink that hands each event to a callback as it happens
pub struct CallbackSink<F> {
    callback: F,
}

impl<F> CallbackSink<F>
where
    F: FnMut(&BookEvent),
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> EventSink for CallbackSink<F>
where
    F: FnMut(&BookEvent),
{
    fn record(&mut self, event: BookEvent) {
        (self.callback)(&event);
    }
}

impl<F> std::fmt::Debug for CallbackSink<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackSink").finish_non_exhaustive()
    }
}
