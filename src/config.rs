//! Configuration loader and application settings.

use crate::errors::Result;
use crate::models::{OrderKind, Side, TimingBucket, Venue};
use crate::simulate::OrderDescriptor;

/// Consolidated application configuration.
///
/// This is also the translation step between the stringly env/form surface
/// and the typed order descriptor the engine consumes.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Venue whose book is watched.
    pub venue: Venue,
    /// Canonical symbol (e.g., "BTC-USD"); per-venue mapping happens in the feed.
    pub symbol: String,
    /// Hypothetical order evaluated against each snapshot.
    pub order: OrderDescriptor,
    /// Seconds between REST polls and simulation ticks.
    pub poll_interval_secs: u64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let venue: Venue = std::env::var("VENUE")
            .unwrap_or_else(|_| "OKX".into())
            .parse()?;
        let symbol = std::env::var("SYMBOL").unwrap_or_else(|_| "BTC-USD".into());

        let side: Side = std::env::var("ORDER_SIDE")
            .unwrap_or_else(|_| "buy".into())
            .parse()?;
        let kind: OrderKind = std::env::var("ORDER_KIND")
            .unwrap_or_else(|_| "market".into())
            .parse()?;
        let quantity: f64 = std::env::var("ORDER_QUANTITY")
            .unwrap_or_else(|_| "1.0".into())
            .parse()?;
        let limit_price = match std::env::var("ORDER_LIMIT_PRICE") {
            Ok(raw) => Some(raw.parse()?),
            Err(_) => None,
        };
        let timing: TimingBucket = std::env::var("ORDER_TIMING")
            .unwrap_or_else(|_| "immediate".into())
            .parse()?;

        let poll_interval_secs = std::env::var("POLL_INTERVAL_SECS")
            .unwrap_or_else(|_| "2".into())
            .parse()
            .unwrap_or(2);

        Ok(Self {
            venue,
            symbol,
            order: OrderDescriptor {
                side,
                kind,
                quantity,
                limit_price,
                timing,
            },
            poll_interval_secs,
        })
    }
}
