//! Normalized order-book snapshot model.

use crate::errors::{AppError, Result};
use crate::models::{OrderLevel, Side, Venue};

/// Immutable, validated snapshot of one venue's book for one symbol.
///
/// Bids are held best-first (descending price), asks best-first (ascending
/// price). Cumulative totals are recomputed at construction so they are
/// monotonic within a side regardless of what the venue reported. A
/// non-crossed book (`best_ask > best_bid`) is a precondition on the feed,
/// not enforced here.
#[derive(Debug, Clone)]
pub struct BookSnapshot {
    venue: Venue,
    symbol: String,
    timestamp_millis: u64,
    bids: Vec<OrderLevel>,
    asks: Vec<OrderLevel>,
    spread: f64,
    spread_percentage: f64,
}

impl BookSnapshot {
    /// Build a snapshot from raw (price, size) pairs, best price first.
    ///
    /// Fails with [`AppError::MalformedBook`] when either side is empty.
    pub fn from_raw_levels(
        venue: Venue,
        symbol: impl Into<String>,
        timestamp_millis: u64,
        bids: Vec<(f64, f64)>,
        asks: Vec<(f64, f64)>,
    ) -> Result<Self> {
        let symbol = symbol.into();
        if bids.is_empty() || asks.is_empty() {
            let side = if bids.is_empty() { "bid" } else { "ask" };
            return Err(AppError::MalformedBook(format!(
                "{venue} {symbol}: empty {side} side"
            )));
        }

        let bids = cumulate(bids);
        let asks = cumulate(asks);
        let spread = asks[0].price - bids[0].price;
        let spread_percentage = spread / bids[0].price * 100.0;

        Ok(Self {
            venue,
            symbol,
            timestamp_millis,
            bids,
            asks,
            spread,
            spread_percentage,
        })
    }

    pub fn venue(&self) -> Venue {
        self.venue
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn timestamp_millis(&self) -> u64 {
        self.timestamp_millis
    }

    /// Highest resting buy level.
    pub fn best_bid(&self) -> &OrderLevel {
        &self.bids[0]
    }

    /// Lowest resting sell level.
    pub fn best_ask(&self) -> &OrderLevel {
        &self.asks[0]
    }

    /// Bid levels, descending by price.
    pub fn bids(&self) -> &[OrderLevel] {
        &self.bids
    }

    /// Ask levels, ascending by price.
    pub fn asks(&self) -> &[OrderLevel] {
        &self.asks
    }

    /// Levels an order on `taker_side` would consume, best price first.
    pub fn opposing_levels(&self, taker_side: Side) -> &[OrderLevel] {
        match taker_side {
            Side::Buy => &self.asks,
            Side::Sell => &self.bids,
        }
    }

    /// Total resting size available to an order on `taker_side`.
    pub fn depth(&self, taker_side: Side) -> f64 {
        self.opposing_levels(taker_side)
            .last()
            .map(|level| level.total)
            .unwrap_or(0.0)
    }

    pub fn spread(&self) -> f64 {
        self.spread
    }

    /// Spread relative to the best bid, in percent.
    pub fn spread_percentage(&self) -> f64 {
        self.spread_percentage
    }

    pub fn mid_price(&self) -> f64 {
        (self.asks[0].price + self.bids[0].price) / 2.0
    }
}

fn cumulate(levels: Vec<(f64, f64)>) -> Vec<OrderLevel> {
    let mut total = 0.0;
    levels
        .into_iter()
        .map(|(price, size)| {
            total += size;
            OrderLevel { price, size, total }
        })
        .collect()
}
