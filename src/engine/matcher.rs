//! Price-time priority matcher.
//!
//! ## Algorithm
//!
//! 1. Validate the submission (positive price and quantity, unused ID)
//! 2. Assign the next global sequence number and rest the order
//! 3. While best bid >= best ask, trade the aggressor against the front
//!    order of the opposite side's best level at the maker's price
//! 4. Remove every order whose remaining quantity reached zero
//!
//! The book is uncrossed before every submission, so the aggressor is the
//! only order that can cross and it always sits at the front of its own
//! side's best level while a cross exists. One loop handles both sides;
//! [`Side::crosses`] and the book sides' priority ordering supply the
//! direction.

use tracing::debug;

use crate::config::EngineConfig;
use crate::error::{EngineError, InvalidReason};
use crate::events::{BookEvent, EventLog, EventSink, RejectReason};
use crate::orderbook::{BookSnapshot, Location, OrderBook};
use crate::types::{CancelOutcome, Order, Side, Trade};

/// Outcome of a successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// ID of the submitted order
    pub order_id: u64,

    /// Trades in execution order, possibly empty
    pub trades: Vec<Trade>,

    /// Quantity left resting in the book
    pub remaining: u64,

    /// True when nothing is left resting
    pub fully_filled: bool,
}

impl MatchResult {
    /// Quantity executed across all trades
    pub fn filled_quantity(&self) -> u64 {
        self.trades.iter().map(|trade| trade.quantity).sum()
    }
}

/// Matching engine for a single instrument.
///
/// Not synchronized; wrap it in a [`SharedEngine`](crate::engine::SharedEngine)
/// to serve concurrent callers.
#[derive(Debug)]
pub struct MatchingEngine<S = EventLog> {
    symbol: String,
    book: OrderBook,
    /// Shared by order arrivals and trades
    next_sequence: u64,
    sink: S,
}

impl Default for MatchingEngine<EventLog> {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl MatchingEngine<EventLog> {
    /// Create an engine recording events into an in-memory [`EventLog`]
    pub fn new(config: EngineConfig) -> Self {
        Self::with_sink(config, EventLog::new())
    }
}

impl<S: EventSink> MatchingEngine<S> {
    /// Create an engine that reports to `sink`
    pub fn with_sink(config: EngineConfig, sink: S) -> Self {
        Self {
            symbol: config.symbol,
            book: OrderBook::with_capacity(config.order_capacity),
            next_sequence: config.starting_sequence,
            sink,
        }
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Submit a limit order and match it against the book
    ///
    /// The order's `remaining` and `sequence` fields are ignored; the
    /// engine starts it at its full quantity and assigns the sequence.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidOrder`] if price or quantity is zero, or
    ///   `side_raw` is not a known side
    /// - [`EngineError::DuplicateOrder`] if the ID is already active
    ///
    /// # Example
    ///
    /// ```
    /// use double_auction::{MatchingEngine, Order};
    ///
    /// let mut engine = MatchingEngine::default();
    /// engine.submit(Order::sell(1, 100, 10)).unwrap();
    ///
    /// let result = engine.submit(Order::buy(2, 100, 4)).unwrap();
    /// assert_eq!(result.trades.len(), 1);
    /// assert!(result.fully_filled);
    /// assert_eq!(engine.order(1).unwrap().remaining, 6);
    /// ```
    pub fn submit(&mut self, mut order: Order) -> Result<MatchResult, EngineError> {
        let side = match self.validate(&order) {
            Ok(side) => side,
            Err(err) => return self.reject(err),
        };

        let order_id = order.id;
        let price = order.price;
        order.remaining = order.quantity;
        order.sequence = self.next_sequence();

        debug!(
            symbol = %self.symbol,
            order_id,
            %side,
            price,
            quantity = order.quantity,
            sequence = order.sequence,
            "order accepted"
        );
        self.sink.record(BookEvent::Accepted {
            order_id,
            side,
            price,
            quantity: order.quantity,
            sequence: order.sequence,
        });

        let taker = self.book.insert(order);
        let (trades, remaining) = self.match_aggressor(order_id, taker);

        if remaining > 0 {
            self.sink.record(BookEvent::Rested {
                order_id,
                side,
                price,
                remaining,
            });
        }

        Ok(MatchResult {
            order_id,
            trades,
            remaining,
            fully_filled: remaining == 0,
        })
    }

    /// Cancel an active order
    ///
    /// Cancelling an unknown, filled or already cancelled ID is not an
    /// error and leaves the book untouched.
    pub fn cancel(&mut self, order_id: u64) -> CancelOutcome {
        match self.book.remove(order_id) {
            Some(order) => {
                debug!(symbol = %self.symbol, order_id, remaining = order.remaining, "order cancelled");
                self.sink.record(BookEvent::Cancelled {
                    order_id,
                    remaining: order.remaining,
                });
                CancelOutcome::Cancelled {
                    remaining: order.remaining,
                }
            }
            None => {
                debug!(symbol = %self.symbol, order_id, "cancel for unknown order");
                self.sink.record(BookEvent::CancelNotFound { order_id });
                CancelOutcome::NotFound
            }
        }
    }

    /// Full-depth view of both sides
    pub fn snapshot(&self) -> BookSnapshot {
        self.snapshot_depth(usize::MAX)
    }

    /// View of the best `depth` levels on each side
    pub fn snapshot_depth(&self, depth: usize) -> BookSnapshot {
        BookSnapshot {
            symbol: self.symbol.clone(),
            sequence: self.last_sequence(),
            bids: self.book.level_snapshots(Side::Buy, depth),
            asks: self.book.level_snapshots(Side::Sell, depth),
        }
    }

    // ========================================================================
    // Matching
    // ========================================================================

    /// Trade the freshly rested aggressor at `taker` until the book is
    /// uncrossed or the aggressor is filled.
    ///
    /// # Returns
    ///
    /// The trades produced and the aggressor's remaining quantity
    fn match_aggressor(&mut self, taker_id: u64, taker: Location) -> (Vec<Trade>, u64) {
        let taker_side = taker.side;
        let mut taker_remaining = self
            .book
            .order_at(&taker)
            .expect("aggressor was just inserted")
            .remaining;
        let mut trades = Vec::new();

        loop {
            let (Some(best_bid), Some(best_ask)) =
                (self.book.bids().best_front(), self.book.asks().best_front())
            else {
                break;
            };
            if best_bid.price < best_ask.price {
                break;
            }

            let (own, maker) = match taker_side {
                Side::Buy => (best_bid, best_ask),
                Side::Sell => (best_ask, best_bid),
            };
            assert_eq!(
                own, taker,
                "book crossed without the aggressor at the front of its side"
            );
            debug_assert!(taker_side.crosses(taker.price, maker.price));

            let maker_order = self
                .book
                .order_at(&maker)
                .expect("best level front resolves to an order");
            let maker_id = maker_order.id;
            let quantity = maker_order.remaining.min(taker_remaining);

            let sequence = self.next_sequence();
            let maker_remaining = self.book.fill(&maker, quantity);
            taker_remaining = self.book.fill(&taker, quantity);

            let trade = Trade::new(sequence, maker_id, taker_id, taker_side, maker.price, quantity);
            debug!(
                symbol = %self.symbol,
                sequence,
                maker_order_id = maker_id,
                taker_order_id = taker_id,
                price = maker.price,
                quantity,
                "trade executed"
            );
            self.sink.record(BookEvent::Trade(trade.clone()));
            trades.push(trade);

            if maker_remaining == 0 {
                self.book
                    .remove(maker_id)
                    .expect("filled maker is still indexed");
            }
            if taker_remaining == 0 {
                self.book
                    .remove(taker_id)
                    .expect("filled aggressor is still indexed");
                break;
            }
        }

        (trades, taker_remaining)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Issue the next global sequence number
    ///
    /// # Panics
    ///
    /// Panics once the `u64` sequence space is exhausted. `u64::MAX` itself
    /// is never issued, so an engine configured to start there panics on
    /// its first accepted order, before the book is touched.
    #[inline]
    fn next_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence = sequence
            .checked_add(1)
            .expect("sequence space exhausted");
        sequence
    }

    /// Last sequence number issued, or one below the starting sequence if
    /// nothing has been issued yet
    #[inline]
    pub fn last_sequence(&self) -> u64 {
        self.next_sequence.saturating_sub(1)
    }

    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[inline]
    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    /// Active order by ID
    pub fn order(&self, order_id: u64) -> Option<&Order> {
        self.book.order(order_id)
    }

    #[inline]
    pub fn best_bid(&self) -> Option<u64> {
        self.book.best_bid()
    }

    #[inline]
    pub fn best_ask(&self) -> Option<u64> {
        self.book.best_ask()
    }

    #[inline]
    pub fn spread(&self) -> Option<u64> {
        self.book.spread()
    }

    #[inline]
    pub fn order_count(&self) -> usize {
        self.book.order_count()
    }

    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[inline]
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Check a submission against the book without touching it
    fn validate(&self, order: &Order) -> Result<Side, EngineError> {
        let invalid = |reason| EngineError::InvalidOrder {
            order_id: order.id,
            reason,
        };

        let side = Side::from_u8(order.side_raw)
            .ok_or_else(|| invalid(InvalidReason::UnknownSide(order.side_raw)))?;
        if order.price == 0 {
            return Err(invalid(InvalidReason::ZeroPrice));
        }
        if order.quantity == 0 {
            return Err(invalid(InvalidReason::ZeroQuantity));
        }
        if self.book.contains_order(order.id) {
            return Err(EngineError::DuplicateOrder(order.id));
        }
        Ok(side)
    }

    fn reject(&mut self, err: EngineError) -> Result<MatchResult, EngineError> {
        debug!(symbol = %self.symbol, order_id = err.order_id(), error = %err, "order rejected");
        self.sink.record(BookEvent::Rejected {
            order_id: err.order_id(),
            reason: RejectReason::from(&err),
        });
        Err(err)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
