pub mod engine;
pub mod types;

pub use engine::{PRICE_EPSILON, is_resting_level, simulate, walk_levels};
pub use types::{ImpactMetrics, OrderDescriptor, WalkOutcome};
