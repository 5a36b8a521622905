//! Generated fallback books for when a venue cannot be reached.

use crate::book::BookSnapshot;
use crate::errors::Result;
use crate::models::Venue;
use rand::Rng;
use std::time::{SystemTime, UNIX_EPOCH};

const LEVELS_PER_SIDE: usize = 20;

/// Reference price seeding generated books for a symbol family.
fn base_price(symbol: &str) -> f64 {
    if symbol.contains("BTC") {
        45_000.0
    } else if symbol.contains("ETH") {
        3_000.0
    } else if symbol.contains("SOL") {
        100.0
    } else {
        0.5
    }
}

/// Generate a construction-valid book around the symbol's reference price.
///
/// The mid wanders within ±0.5% of the reference, the spread is 0.1% of it,
/// and sizes are uniform in 0.1..10.1. The two sides open half a spread away
/// from the mid so a generated book is never crossed.
pub fn generate_book(venue: Venue, symbol: &str) -> Result<BookSnapshot> {
    let mut rng = rand::thread_rng();
    let base = base_price(symbol);
    let spread = base * 0.001;
    let mid = base + (rng.r#gen::<f64>() - 0.5) * base * 0.01;

    let mut bids = Vec::with_capacity(LEVELS_PER_SIDE);
    let mut asks = Vec::with_capacity(LEVELS_PER_SIDE);
    for i in 0..LEVELS_PER_SIDE {
        let offset = i as f64 * spread / 10.0;
        bids.push((mid - spread / 2.0 - offset, rng.gen_range(0.1..10.1)));
        asks.push((mid + spread / 2.0 + offset, rng.gen_range(0.1..10.1)));
    }

    let timestamp_millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    BookSnapshot::from_raw_levels(venue, symbol, timestamp_millis, bids, asks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_book_is_construction_valid() {
        let book = generate_book(Venue::Okx, "BTC-USD").expect("valid book");
        assert_eq!(book.bids().len(), LEVELS_PER_SIDE);
        assert_eq!(book.asks().len(), LEVELS_PER_SIDE);
        assert!(book.best_ask().price > book.best_bid().price);
        assert!(book.spread() > 0.0);
    }

    #[test]
    fn generated_sides_are_ordered_best_first() {
        let book = generate_book(Venue::Deribit, "ETH-USD").expect("valid book");
        let bid_prices: Vec<f64> = book.bids().iter().map(|l| l.price).collect();
        let ask_prices: Vec<f64> = book.asks().iter().map(|l| l.price).collect();
        assert!(bid_prices.windows(2).all(|w| w[0] > w[1]));
        assert!(ask_prices.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn generated_totals_are_monotonic() {
        let book = generate_book(Venue::Bybit, "SOL-USD").expect("valid book");
        let totals: Vec<f64> = book.asks().iter().map(|l| l.total).collect();
        assert!(totals.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn base_price_tracks_symbol_family() {
        assert_eq!(base_price("BTC-PERPETUAL"), 45_000.0);
        assert_eq!(base_price("ETHUSDT"), 3_000.0);
        assert_eq!(base_price("ADA-USD"), 0.5);
    }
}
