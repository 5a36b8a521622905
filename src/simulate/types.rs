use crate::models::{OrderKind, Side, TimingBucket};

/// Hypothetical order to run against a book snapshot.
///
/// This is the pure engine input; form or request state maps into it at the
/// boundary and never reaches the simulator directly.
#[derive(Debug, Clone)]
pub struct OrderDescriptor {
    pub side: Side,
    pub kind: OrderKind,
    pub quantity: f64,
    /// Present iff `kind` is [`OrderKind::Limit`].
    pub limit_price: Option<f64>,
    pub timing: TimingBucket,
}

/// Execution estimate for one (snapshot, order) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactMetrics {
    /// 0–100; below 100 means the book lacked depth.
    pub estimated_fill_percentage: f64,
    pub levels_consumed: usize,
    /// Never negative; deviation favorable to the taker reports as zero.
    pub slippage_percentage: f64,
    pub time_to_fill_seconds: u32,
}

/// Raw outcome of walking a level sequence with a quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkOutcome {
    pub filled_quantity: f64,
    /// Sum of fill × price across consumed levels.
    pub notional: f64,
    pub levels_consumed: usize,
}

impl WalkOutcome {
    /// Volume-weighted fill price, or `fallback` when nothing filled.
    pub fn average_price(&self, fallback: f64) -> f64 {
        if self.filled_quantity > 0.0 {
            self.notional / self.filled_quantity
        } else {
            fallback
        }
    }
}
