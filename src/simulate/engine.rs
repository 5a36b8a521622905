use super::types::{ImpactMetrics, OrderDescriptor, WalkOutcome};
use crate::book::BookSnapshot;
use crate::errors::{AppError, Result};
use crate::models::{BookSide, OrderKind, OrderLevel, Side};

/// Tolerance for matching a displayed level to a resting limit price.
pub const PRICE_EPSILON: f64 = 0.01;

/// Estimate how `order` would execute against `snapshot`.
///
/// Market orders walk the opposing side best price first, filling partially
/// across levels until the quantity or the book is exhausted; running out of
/// depth is a normal partial-fill result, not an error. Limit orders are
/// either immediately marketable against the opposite best price or they
/// rest; they never partially walk the book.
pub fn simulate(snapshot: &BookSnapshot, order: &OrderDescriptor) -> Result<ImpactMetrics> {
    if order.quantity <= 0.0 {
        return Err(AppError::InvalidOrder(format!(
            "quantity must be positive, got {}",
            order.quantity
        )));
    }

    let time_to_fill_seconds = order.timing.seconds();

    match order.kind {
        OrderKind::Market => {
            let levels = snapshot.opposing_levels(order.side);
            let best_price = match levels.first() {
                Some(level) => level.price,
                // Unreachable through a validated snapshot; a zero-depth
                // walk is still a defined zero-fill result.
                None => {
                    return Ok(ImpactMetrics {
                        estimated_fill_percentage: 0.0,
                        levels_consumed: 0,
                        slippage_percentage: 0.0,
                        time_to_fill_seconds,
                    });
                }
            };

            let outcome = walk_levels(levels, order.quantity);
            let average_price = outcome.average_price(best_price);
            let slippage = match order.side {
                Side::Buy => (average_price - best_price) / best_price * 100.0,
                Side::Sell => (best_price - average_price) / best_price * 100.0,
            };

            Ok(ImpactMetrics {
                estimated_fill_percentage: outcome.filled_quantity / order.quantity * 100.0,
                levels_consumed: outcome.levels_consumed,
                slippage_percentage: slippage.max(0.0),
                time_to_fill_seconds,
            })
        }
        OrderKind::Limit => {
            let limit_price = order.limit_price.ok_or_else(|| {
                AppError::InvalidOrder("limit order without a limit price".into())
            })?;

            let marketable = match order.side {
                Side::Buy => limit_price >= snapshot.best_ask().price,
                Side::Sell => limit_price <= snapshot.best_bid().price,
            };

            let (estimated_fill_percentage, levels_consumed) =
                if marketable { (100.0, 1) } else { (0.0, 0) };

            Ok(ImpactMetrics {
                estimated_fill_percentage,
                levels_consumed,
                slippage_percentage: 0.0,
                time_to_fill_seconds,
            })
        }
    }
}

/// Walk `levels` best price first, filling up to `quantity`.
///
/// Defined for an empty slice: returns a zero outcome.
pub fn walk_levels(levels: &[OrderLevel], quantity: f64) -> WalkOutcome {
    let mut remaining = quantity;
    let mut notional = 0.0;
    let mut levels_consumed = 0usize;

    for level in levels {
        if remaining <= 0.0 {
            break;
        }
        let fill = remaining.min(level.size);
        notional += fill * level.price;
        remaining -= fill;
        levels_consumed += 1;
    }

    WalkOutcome {
        filled_quantity: quantity - remaining,
        notional,
        levels_consumed,
    }
}

/// Whether the displayed level at `level_price` coincides with a simulated
/// limit order's price. Market orders never highlight, and a buy only marks
/// bid-side levels (a sell only ask-side ones).
pub fn is_resting_level(level_price: f64, book_side: BookSide, order: &OrderDescriptor) -> bool {
    if order.kind != OrderKind::Limit {
        return false;
    }
    let limit_price = match order.limit_price {
        Some(price) => price,
        None => return false,
    };
    match (book_side, order.side) {
        (BookSide::Bid, Side::Buy) | (BookSide::Ask, Side::Sell) => {
            (level_price - limit_price).abs() < PRICE_EPSILON
        }
        _ => false,
    }
}
