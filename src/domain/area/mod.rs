//! Area module - Area Profiles built from raw period statistics.
//!
//! An Area Profile aggregates one area's transactions for one unit type over
//! a window, then derives its financing estimate and signals (lease risk,
//! stability, pricing response). Profiles are immutable once built.

mod financing;
mod period_stats;
mod profile;
mod signals;

pub use financing::FinancingEstimate;
pub use period_stats::{PeriodStats, StatsWindow};
pub use profile::{build_area_profile, AreaMetrics, AreaProfile, AreaProfiler};
pub use signals::{
    classify_pricing_response, classify_stability, AreaSignals, PricingResponse, Stability,
};
