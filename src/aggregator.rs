//! Periodic simulation loop over the latest book snapshot.

use crate::book::BookSnapshot;
use crate::simulate::{OrderDescriptor, simulate};
use tokio::sync::watch;
use tracing;

/// Spawn the main simulation loop.
///
/// Each tick reads the latest snapshot and logs the impact estimate for
/// `order`. Simulation failures are logged and the loop keeps running; no
/// outcome here is fatal.
pub fn spawn_simulation_loop(
    book_rx: watch::Receiver<Option<BookSnapshot>>,
    order: OrderDescriptor,
    interval_secs: u64,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(std::time::Duration::from_secs(interval_secs.max(1)));
        let mut ticks: u64 = 0;

        loop {
            ticker.tick().await;
            ticks += 1;

            let book = book_rx.borrow().clone();
            let book = match book {
                Some(book) => book,
                None => {
                    if ticks % 5 == 0 {
                        tracing::info!("[HEARTBEAT] waiting for first snapshot");
                    }
                    continue;
                }
            };

            match simulate(&book, &order) {
                Ok(metrics) => {
                    tracing::info!(
                        venue = %book.venue(),
                        symbol = book.symbol(),
                        spread = book.spread(),
                        fill_pct = metrics.estimated_fill_percentage,
                        levels = metrics.levels_consumed,
                        slippage_pct = metrics.slippage_percentage,
                        time_to_fill_s = metrics.time_to_fill_seconds,
                        "[SIM] impact estimate"
                    );
                }
                Err(e) => tracing::warn!(error = %e, "[SIM] simulation failed"),
            }
        }
    })
}
