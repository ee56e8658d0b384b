//! Double Auction - demo harness
//!
//! Two client threads share one engine: client 1 sells, client 2 buys.
//! Each places three orders 100 ms apart, then the harness cancels one
//! order that may still rest and one that never existed, and prints the
//! final book as JSON.
//!
//! ```bash
//! RUST_LOG=double_auction=debug cargo run
//! ```

use std::thread;
use std::time::Duration;

use double_auction::{BookEvent, CallbackSink, EngineConfig, Order, Side, SharedEngine};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

type ReportingEngine = SharedEngine<CallbackSink<fn(&BookEvent)>>;

const ORDERS_PER_CLIENT: u64 = 3;
const CLIENT_PAUSE: Duration = Duration::from_millis(100);

/// Reporting side of the event sink: log what the engine did
fn report(event: &BookEvent) {
    match event {
        BookEvent::Trade(trade) => info!(
            buy_order = trade.buy_order_id(),
            sell_order = trade.sell_order_id(),
            price = trade.price,
            quantity = trade.quantity,
            "trade executed"
        ),
        BookEvent::Cancelled { order_id, remaining } => {
            info!(order_id = *order_id, remaining = *remaining, "order cancelled")
        }
        BookEvent::CancelNotFound { order_id } => {
            info!(order_id = *order_id, "order not found")
        }
        BookEvent::Rejected { order_id, reason } => {
            warn!(order_id = *order_id, ?reason, "order rejected")
        }
        BookEvent::Accepted { .. } | BookEvent::Rested { .. } => {}
    }
}

/// Even clients buy, odd clients sell
fn run_client(engine: ReportingEngine, client_id: u64) {
    let side = if client_id % 2 == 0 { Side::Buy } else { Side::Sell };

    for i in 0..ORDERS_PER_CLIENT {
        let order = Order::new(client_id * 10 + i, side, 100 + i * 10, 10 + i);
        if let Err(err) = engine.submit(order) {
            warn!(client_id, %err, "submission failed");
        }
        thread::sleep(CLIENT_PAUSE);
    }
}

fn main() -> Result<(), serde_json::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("double_auction=info")),
        )
        .with_target(false)
        .init();

    let config = EngineConfig::new("DEMO").with_order_capacity(64);
    info!(symbol = %config.symbol, "starting engine");
    let engine: ReportingEngine =
        SharedEngine::with_sink(config, CallbackSink::new(report as fn(&BookEvent)));

    let clients: Vec<_> = [1u64, 2]
        .into_iter()
        .map(|client_id| {
            let engine = engine.clone();
            thread::spawn(move || run_client(engine, client_id))
        })
        .collect();

    for client in clients {
        if client.join().is_err() {
            error!("client thread panicked");
        }
    }

    engine.cancel(10);
    engine.cancel(99);

    let snapshot = engine.snapshot();
    info!(
        orders = snapshot.order_count(),
        best_bid = ?snapshot.best_bid(),
        best_ask = ?snapshot.best_ask(),
        state_root = %snapshot.state_root_hex(),
        "final book"
    );
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
