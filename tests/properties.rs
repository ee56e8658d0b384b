//! Randomized invariant checks over arbitrary submit/cancel sequences.

use std::collections::HashMap;

use double_auction::{CancelOutcome, EngineConfig, MatchingEngine, Order, Side};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

#[derive(Debug, Clone)]
enum Op {
    Submit {
        id: u64,
        side: Side,
        price: u64,
        quantity: u64,
    },
    Cancel {
        id: u64,
    },
}

fn op_strategy(quantity: BoxedStrategy<u64>) -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u64..40, any::<bool>(), 90u64..=110, quantity).prop_map(|(id, buy, price, quantity)| {
            Op::Submit {
                id,
                side: if buy { Side::Buy } else { Side::Sell },
                price,
                quantity,
            }
        }),
        1 => (0u64..40).prop_map(|id| Op::Cancel { id }),
    ]
}

fn small_ops() -> impl Strategy<Value = Op> {
    op_strategy((1u64..=25).boxed())
}

/// Mostly quantities close to `u64::MAX`, so level totals pass it
fn large_ops() -> impl Strategy<Value = Op> {
    op_strategy(prop_oneof![1u64..=25, (u64::MAX - 1_000)..=u64::MAX].boxed())
}

fn total_resting(engine: &MatchingEngine) -> u128 {
    engine.book().bids().total_quantity() + engine.book().asks().total_quantity()
}

fn check_invariants(ops: Vec<Op>) -> Result<(), TestCaseError> {
    let mut engine = MatchingEngine::new(EngineConfig::new("PROP"));
    // Price of every order the book currently holds, by ID
    let mut resting_price: HashMap<u64, u64> = HashMap::new();

    for op in ops {
        match op {
            Op::Submit { id, side, price, quantity } => {
                let before = total_resting(&engine);
                let active = engine.order(id).is_some();
                let result = engine.submit(Order::new(id, side, price, quantity));

                if active {
                    prop_assert!(result.is_err());
                    continue;
                }
                let result = result.unwrap();

                let mut last_maker_price = None;
                for trade in &result.trades {
                    // Maker price: the resting order's price, never the aggressor's
                    let maker_price = resting_price.get(&trade.maker_order_id).copied();
                    prop_assert_eq!(Some(trade.price), maker_price);
                    prop_assert!(side.crosses(price, trade.price));
                    prop_assert_eq!(trade.taker_order_id, id);
                    prop_assert!(trade.quantity > 0);

                    // Aggressor walks from better to worse prices
                    if let Some(last) = last_maker_price {
                        prop_assert!(!side.opposite().is_better(trade.price, last));
                    }
                    last_maker_price = Some(trade.price);

                    if engine.order(trade.maker_order_id).is_none() {
                        resting_price.remove(&trade.maker_order_id);
                    }
                }

                let after = total_resting(&engine);
                prop_assert_eq!(
                    after,
                    before + u128::from(quantity) - 2 * u128::from(result.filled_quantity())
                );
                prop_assert_eq!(result.remaining, quantity - result.filled_quantity());

                if result.remaining > 0 {
                    resting_price.insert(id, price);
                }
            }
            Op::Cancel { id } => {
                let was_active = resting_price.remove(&id).is_some();
                let outcome = engine.cancel(id);
                prop_assert_eq!(outcome.is_cancelled(), was_active);
                // A second cancel is always benign
                prop_assert_eq!(engine.cancel(id), CancelOutcome::NotFound);
            }
        }

        // No crossed book at rest
        if let (Some(bid), Some(ask)) = (engine.best_bid(), engine.best_ask()) {
            prop_assert!(bid < ask);
        }
        prop_assert_eq!(engine.order_count(), resting_price.len());

        // Level totals always match the orders queued in them
        let snapshot = engine.snapshot();
        for level in snapshot.bids.iter().chain(snapshot.asks.iter()) {
            let queued: u128 = level.orders.iter().map(|o| u128::from(o.remaining)).sum();
            prop_assert_eq!(level.total_quantity, queued);
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_book_invariants_hold_after_every_request(ops in prop::collection::vec(small_ops(), 1..200)) {
        check_invariants(ops)?;
    }

    #[test]
    fn prop_book_invariants_hold_near_u64_max(ops in prop::collection::vec(large_ops(), 1..100)) {
        check_invariants(ops)?;
    }

    #[test]
    fn prop_same_input_same_book(ops in prop::collection::vec(small_ops(), 1..100)) {
        let run = |ops: &[Op]| {
            let mut engine = MatchingEngine::new(EngineConfig::new("PROP"));
            for op in ops {
                match *op {
                    Op::Submit { id, side, price, quantity } => {
                        let _ = engine.submit(Order::new(id, side, price, quantity));
                    }
                    Op::Cancel { id } => {
                        engine.cancel(id);
                    }
                }
            }
            let trades: Vec<_> = engine.sink().trades().cloned().collect();
            (engine.snapshot().state_root(), trades)
        };

        prop_assert_eq!(run(&ops), run(&ops));
    }
}
