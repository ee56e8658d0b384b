//! Stress tests for the matching engine.
//!
//! These tests verify:
//! 1. The book stays consistent under large seeded workloads
//! 2. Determinism: the same sequence yields the same state root
//! 3. Cancels mixed with matching keep the index and sides in sync
//!
//! ## Running Stress Tests
//!
//! ```bash
//! cargo test --release --test stress_test -- --nocapture
//! ```

use std::time::Instant;

use double_auction::{EngineConfig, MatchingEngine, Order, Side};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

const STRESS_ORDER_COUNT: usize = 200_000;

const BASE_PRICE: u64 = 10_000;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Generate deterministic orders. Same seed = same orders.
fn generate_deterministic_orders(count: usize, seed: u64, spread: u64) -> Vec<Order> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    (0..count)
        .map(|i| {
            let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
            let price = rng.gen_range(BASE_PRICE - spread..=BASE_PRICE + spread);
            let quantity = rng.gen_range(1..=1_000);
            Order::new((i + 1) as u64, side, price, quantity)
        })
        .collect()
}

fn engine_for(count: usize) -> MatchingEngine {
    MatchingEngine::new(EngineConfig::new("STRESS").with_order_capacity(count))
}

/// Run a deterministic order sequence and return the final state root.
fn run_deterministic_sequence(seed: u64, count: usize) -> [u8; 32] {
    let mut engine = engine_for(count);

    for order in generate_deterministic_orders(count, seed, 100) {
        engine.submit(order).expect("generated IDs are unique");
    }

    engine.snapshot().state_root()
}

fn assert_consistent(engine: &MatchingEngine) {
    let book = engine.book();
    if let (Some(bid), Some(ask)) = (book.best_bid(), book.best_ask()) {
        assert!(bid < ask, "crossed book: {bid} >= {ask}");
    }
    assert_eq!(
        book.order_count(),
        book.bids().order_count() + book.asks().order_count(),
        "index and sides disagree"
    );
}

// ============================================================================
// STRESS TESTS
// ============================================================================

#[test]
fn stress_large_order_flow() {
    let orders = generate_deterministic_orders(STRESS_ORDER_COUNT, 42, 100);
    let mut engine = engine_for(STRESS_ORDER_COUNT);

    let start = Instant::now();
    let mut trade_count = 0;
    for order in orders {
        trade_count += engine.submit(order).unwrap().trades.len();
    }
    let elapsed = start.elapsed();

    println!("  Orders processed:  {:>12}", STRESS_ORDER_COUNT);
    println!("  Trades generated:  {:>12}", trade_count);
    println!("  Final book size:   {:>12}", engine.order_count());
    println!("  Elapsed time:      {:>12.2?}", elapsed);
    println!(
        "  Throughput:        {:>12.0} orders/sec",
        STRESS_ORDER_COUNT as f64 / elapsed.as_secs_f64()
    );

    assert!(trade_count > 0, "Expected some trades to occur");
    assert_eq!(engine.sink().trades().count(), trade_count);
    assert_consistent(&engine);
}

/// Same input sequence must produce an identical final book.
#[test]
fn verify_determinism() {
    const TEST_COUNT: usize = 10_000;
    const SEED: u64 = 12345;

    let root1 = run_deterministic_sequence(SEED, TEST_COUNT);
    let root2 = run_deterministic_sequence(SEED, TEST_COUNT);
    assert_eq!(root1, root2, "State roots must match for determinism");

    let root3 = run_deterministic_sequence(SEED + 1, TEST_COUNT);
    assert_ne!(root1, root3, "Different seeds should produce different roots");
}

#[test]
fn stress_cancellations() {
    const ORDER_COUNT: usize = 50_000;
    const CANCEL_RATE: f64 = 0.3;

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut engine = engine_for(ORDER_COUNT);
    let mut resting_order_ids: Vec<u64> = Vec::new();
    let mut cancelled = 0;
    let mut not_found = 0;

    for order in generate_deterministic_orders(ORDER_COUNT, 7, 50) {
        if !resting_order_ids.is_empty() && rng.gen_bool(CANCEL_RATE) {
            let idx = rng.gen_range(0..resting_order_ids.len());
            let order_id = resting_order_ids.swap_remove(idx);
            // Orders that rested may have been filled since
            if engine.cancel(order_id).is_cancelled() {
                cancelled += 1;
            } else {
                not_found += 1;
            }
        }

        let order_id = order.id;
        if !engine.submit(order).unwrap().fully_filled {
            resting_order_ids.push(order_id);
        }
    }

    println!("  Cancelled: {cancelled}  Already gone: {not_found}");
    assert!(cancelled > 0);
    assert_consistent(&engine);
}

/// Cancelling everything that is still resting must leave an empty book.
#[test]
fn stress_drain_book() {
    const ORDER_COUNT: usize = 20_000;

    let mut engine = engine_for(ORDER_COUNT);
    for order in generate_deterministic_orders(ORDER_COUNT, 99, 25) {
        engine.submit(order).unwrap();
    }
    assert_consistent(&engine);

    let snapshot = engine.snapshot();
    let resting: Vec<u64> = snapshot
        .bids
        .iter()
        .chain(snapshot.asks.iter())
        .flat_map(|level| level.orders.iter().map(|o| o.id))
        .collect();
    for order_id in &resting {
        assert!(engine.cancel(*order_id).is_cancelled());
    }

    assert_eq!(engine.order_count(), 0);
    assert_eq!(engine.book().bid_levels(), 0);
    assert_eq!(engine.book().ask_levels(), 0);
}
