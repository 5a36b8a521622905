//! Shared data structures used throughout the application.

use crate::errors::AppError;
use std::fmt;
use std::str::FromStr;

/// Exchange venue serving an order book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Venue {
    Okx,
    Bybit,
    Deribit,
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Venue::Okx => write!(f, "OKX"),
            Venue::Bybit => write!(f, "Bybit"),
            Venue::Deribit => write!(f, "Deribit"),
        }
    }
}

impl FromStr for Venue {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "OKX" => Ok(Venue::Okx),
            "BYBIT" => Ok(Venue::Bybit),
            "DERIBIT" => Ok(Venue::Deribit),
            other => Err(AppError::Config(format!(
                "unknown venue '{other}', expected one of: OKX, Bybit, Deribit"
            ))),
        }
    }
}

/// Side of a hypothetical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

impl FromStr for Side {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(Side::Buy),
            "sell" => Ok(Side::Sell),
            other => Err(AppError::Config(format!(
                "unknown order side '{other}', expected 'buy' or 'sell'"
            ))),
        }
    }
}

/// One of the two resting sides of a book, as displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookSide {
    Bid,
    Ask,
}

/// Execution style of a hypothetical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderKind {
    Market,
    Limit,
}

impl FromStr for OrderKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "market" => Ok(OrderKind::Market),
            "limit" => Ok(OrderKind::Limit),
            other => Err(AppError::Config(format!(
                "unknown order kind '{other}', expected 'market' or 'limit'"
            ))),
        }
    }
}

/// Coarse execution-delay label attached to a simulated order.
///
/// This is a nominal label, not a scheduler: it maps one-to-one onto the
/// reported time-to-fill and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimingBucket {
    Immediate,
    FiveSeconds,
    TenSeconds,
    ThirtySeconds,
}

impl TimingBucket {
    /// Nominal time-to-fill in seconds.
    pub fn seconds(self) -> u32 {
        match self {
            TimingBucket::Immediate => 0,
            TimingBucket::FiveSeconds => 5,
            TimingBucket::TenSeconds => 10,
            TimingBucket::ThirtySeconds => 30,
        }
    }
}

impl FromStr for TimingBucket {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "immediate" => Ok(TimingBucket::Immediate),
            "5s" => Ok(TimingBucket::FiveSeconds),
            "10s" => Ok(TimingBucket::TenSeconds),
            "30s" => Ok(TimingBucket::ThirtySeconds),
            other => Err(AppError::Config(format!(
                "unknown timing '{other}', expected one of: immediate, 5s, 10s, 30s"
            ))),
        }
    }
}

/// One price tier of an order book side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderLevel {
    pub price: f64,
    /// Liquidity available at this tier alone.
    pub size: f64,
    /// Cumulative liquidity from the best price through this tier.
    pub total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn venue_parses_case_insensitively() {
        assert_eq!("okx".parse::<Venue>().unwrap(), Venue::Okx);
        assert_eq!("BYBIT".parse::<Venue>().unwrap(), Venue::Bybit);
        assert_eq!(" Deribit ".parse::<Venue>().unwrap(), Venue::Deribit);
        assert!("Binance".parse::<Venue>().is_err());
    }

    #[test]
    fn side_and_kind_parse_form_vocabulary() {
        assert_eq!("Buy".parse::<Side>().unwrap(), Side::Buy);
        assert_eq!("sell".parse::<Side>().unwrap(), Side::Sell);
        assert_eq!("market".parse::<OrderKind>().unwrap(), OrderKind::Market);
        assert_eq!("LIMIT".parse::<OrderKind>().unwrap(), OrderKind::Limit);
        assert!("stop".parse::<OrderKind>().is_err());
    }

    #[test]
    fn timing_bucket_maps_to_seconds() {
        assert_eq!(TimingBucket::Immediate.seconds(), 0);
        assert_eq!(TimingBucket::FiveSeconds.seconds(), 5);
        assert_eq!(TimingBucket::TenSeconds.seconds(), 10);
        assert_eq!(TimingBucket::ThirtySeconds.seconds(), 30);
        assert_eq!("10s".parse::<TimingBucket>().unwrap(), TimingBucket::TenSeconds);
        assert!("1m".parse::<TimingBucket>().is_err());
    }
}
