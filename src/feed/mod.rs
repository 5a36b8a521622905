//! Venue order-book feeds.
//!
//! Responsibilities:
//! • Fetch book snapshots from each venue's public REST endpoint.
//! • Stream full-snapshot updates over WebSocket where the venue offers them.
//! • Map the canonical symbol to each venue's native instrument name.
//! • Fall back to generated data when a venue cannot be reached.

use crate::book::BookSnapshot;
use crate::errors::Result;
use crate::models::Venue;
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::watch;
use tracing::warn;

pub mod bybit;
pub mod deribit;
pub mod mock;
pub mod okx;

/// Venue-native instrument name for a canonical symbol.
///
/// Unmapped symbols pass through unchanged so less common instruments can
/// still be requested verbatim.
pub fn map_symbol(venue: Venue, symbol: &str) -> String {
    let mapped = match venue {
        Venue::Okx => match symbol {
            "BTC-USD" => "BTC-USDT",
            "ETH-USD" => "ETH-USDT",
            "SOL-USD" => "SOL-USDT",
            "ADA-USD" => "ADA-USDT",
            other => other,
        },
        Venue::Bybit => match symbol {
            "BTC-USD" => "BTCUSDT",
            "ETH-USD" => "ETHUSDT",
            "SOL-USD" => "SOLUSDT",
            "ADA-USD" => "ADAUSDT",
            other => other,
        },
        Venue::Deribit => match symbol {
            "BTC-USD" => "BTC-PERPETUAL",
            "ETH-USD" => "ETH-PERPETUAL",
            "SOL-USD" => "SOL-PERPETUAL",
            "ADA-USD" => "ADA-PERPETUAL",
            other => other,
        },
    };
    mapped.to_string()
}

/// Fetch one snapshot from `venue` for the canonical `symbol`.
pub async fn fetch_book(
    client: &reqwest::Client,
    venue: Venue,
    symbol: &str,
) -> Result<BookSnapshot> {
    let instrument = map_symbol(venue, symbol);
    match venue {
        Venue::Okx => okx::fetch_book(client, &instrument).await,
        Venue::Bybit => bybit::fetch_book(client, &instrument).await,
        Venue::Deribit => deribit::fetch_book(client, &instrument).await,
    }
}

/// Spawn a background task that polls `venue` on a fixed interval and
/// publishes each fresh snapshot on `tx`.
///
/// A failed poll logs a warning and publishes a generated book instead, so
/// downstream consumers always see a construction-valid snapshot.
pub fn spawn_book_watcher(
    client: reqwest::Client,
    venue: Venue,
    symbol: String,
    interval_secs: u64,
    tx: watch::Sender<Option<BookSnapshot>>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
        loop {
            ticker.tick().await;
            match fetch_book(&client, venue, &symbol).await {
                Ok(book) => {
                    let _ = tx.send(Some(book));
                }
                Err(e) => {
                    warn!(%venue, symbol = %symbol, error = %e, "[FEED] fetch failed, using generated book");
                    match mock::generate_book(venue, &symbol) {
                        Ok(book) => {
                            let _ = tx.send(Some(book));
                        }
                        Err(e) => warn!(error = %e, "[FEED] fallback generation failed"),
                    }
                }
            }
        }
    })
}

/// Spawn a background task that streams OKX full snapshots into `tx`.
///
/// OKX's public `books5` channel re-sends the whole book on every update;
/// Bybit and Deribit only expose delta channels publicly, so those venues go
/// through the polling watcher instead.
pub async fn spawn_book_stream_watcher(
    symbol: &str,
    tx: watch::Sender<Option<BookSnapshot>>,
) -> Result<tokio::task::JoinHandle<()>> {
    let instrument = map_symbol(Venue::Okx, symbol);
    let stream = okx::connect_and_stream(&instrument).await?;

    let handle = tokio::spawn(async move {
        futures::pin_mut!(stream);
        while let Some(book) = stream.next().await {
            let _ = tx.send(Some(book));
        }
        warn!("[FEED] OKX stream ended");
    });

    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_symbols_map_per_venue() {
        assert_eq!(map_symbol(Venue::Okx, "BTC-USD"), "BTC-USDT");
        assert_eq!(map_symbol(Venue::Bybit, "BTC-USD"), "BTCUSDT");
        assert_eq!(map_symbol(Venue::Deribit, "BTC-USD"), "BTC-PERPETUAL");
        assert_eq!(map_symbol(Venue::Bybit, "SOL-USD"), "SOLUSDT");
    }

    #[test]
    fn unmapped_symbols_pass_through() {
        assert_eq!(map_symbol(Venue::Okx, "DOGE-USDT"), "DOGE-USDT");
        assert_eq!(map_symbol(Venue::Deribit, "XRP_USDC"), "XRP_USDC");
    }
}
