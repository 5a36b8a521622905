use anyhow::Result;
use book_impact::{aggregator, config::AppConfig, feed, models::Venue, utils};
use std::time::Duration;
use tokio::sync::watch;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    utils::init_logging();

    let config = AppConfig::load()?;
    tracing::info!(
        venue = %config.venue,
        symbol = %config.symbol,
        quantity = config.order.quantity,
        poll_interval_secs = config.poll_interval_secs,
        "[INIT] book-impact starting"
    );

    // Latest-snapshot channel between the feed producer and the simulator.
    let (book_tx, book_rx) = watch::channel::<Option<book_impact::book::BookSnapshot>>(None);

    // Feed producer: OKX streams full snapshots over WebSocket; the other
    // venues only publish delta channels, so they poll REST instead. A
    // failed stream connect also degrades to polling.
    let feed_task = match config.venue {
        Venue::Okx => match feed::spawn_book_stream_watcher(&config.symbol, book_tx.clone()).await
        {
            Ok(handle) => handle,
            Err(e) => {
                tracing::warn!(error = %e, "[INIT] websocket connect failed, falling back to polling");
                let client = reqwest::Client::builder()
                    .timeout(Duration::from_secs(5))
                    .build()?;
                feed::spawn_book_watcher(
                    client,
                    config.venue,
                    config.symbol.clone(),
                    config.poll_interval_secs,
                    book_tx.clone(),
                )
            }
        },
        _ => {
            let client = reqwest::Client::builder()
                .timeout(Duration::from_secs(5))
                .build()?;
            feed::spawn_book_watcher(
                client,
                config.venue,
                config.symbol.clone(),
                config.poll_interval_secs,
                book_tx.clone(),
            )
        }
    };

    let sim_task =
        aggregator::spawn_simulation_loop(book_rx, config.order.clone(), config.poll_interval_secs);

    // Wait indefinitely for producer tasks (they never finish)
    let _ = futures::join!(feed_task, sim_task);
    Ok(())
}
