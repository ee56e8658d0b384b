//! Concurrency guard around one engine.
//!
//! Every request takes the single lock once and holds it until matching,
//! index updates and event recording are all done, so no caller can
//! observe a half-applied request. Work under the lock is in-memory and
//! bounded by the number of levels a submission crosses, which is why a
//! plain mutex is used rather than anything that yields.
//!
//! Scaling to many instruments means one `SharedEngine` per instrument,
//! never finer-grained locks inside a book.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::EngineConfig;
use crate::engine::{MatchResult, MatchingEngine};
use crate::error::EngineError;
use crate::events::{EventLog, EventSink};
use crate::orderbook::BookSnapshot;
use crate::types::{CancelOutcome, Order};

/// Cloneable, thread-safe handle to a [`MatchingEngine`].
///
/// ```
/// use double_auction::{EngineConfig, Order, SharedEngine};
///
/// let engine = SharedEngine::new(EngineConfig::default());
/// let handle = engine.clone();
///
/// std::thread::spawn(move || {
///     handle.submit(Order::sell(1, 100, 10)).unwrap();
/// })
/// .join()
/// .unwrap();
///
/// let result = engine.submit(Order::buy(2, 100, 10)).unwrap();
/// assert_eq!(result.trades.len(), 1);
/// ```
pub struct SharedEngine<S = EventLog> {
    inner: Arc<Mutex<MatchingEngine<S>>>,
}

impl<S> Clone for SharedEngine<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl SharedEngine<EventLog> {
    pub fn new(config: EngineConfig) -> Self {
        Self::from_engine(MatchingEngine::new(config))
    }
}

impl<S: EventSink> SharedEngine<S> {
    pub fn with_sink(config: EngineConfig, sink: S) -> Self {
        Self::from_engine(MatchingEngine::with_sink(config, sink))
    }

    pub fn from_engine(engine: MatchingEngine<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// See [`MatchingEngine::submit`]
    pub fn submit(&self, order: Order) -> Result<MatchResult, EngineError> {
        self.inner.lock().submit(order)
    }

    /// See [`MatchingEngine::cancel`]
    pub fn cancel(&self, order_id: u64) -> CancelOutcome {
        self.inner.lock().cancel(order_id)
    }

    /// Full-depth snapshot taken under the guard
    pub fn snapshot(&self) -> BookSnapshot {
        self.inner.lock().snapshot()
    }

    pub fn snapshot_depth(&self, depth: usize) -> BookSnapshot {
        self.inner.lock().snapshot_depth(depth)
    }

    pub fn best_bid(&self) -> Option<u64> {
        self.inner.lock().best_bid()
    }

    pub fn best_ask(&self) -> Option<u64> {
        self.inner.lock().best_ask()
    }

    pub fn order_count(&self) -> usize {
        self.inner.lock().order_count()
    }

    /// Run `f` with exclusive access to the engine
    ///
    /// Keep `f` short: every other caller waits while it runs.
    pub fn with_engine<R>(&self, f: impl FnOnce(&mut MatchingEngine<S>) -> R) -> R {
        let mut engine = self.inner.lock();
        f(&mut engine)
    }
}

impl<S> std::fmt::Debug for SharedEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedEngine")
            .field("handles", &Arc::strong_count(&self.inner))
            .finish_non_exhaustive()
    }
}
