//! Area signals - Classifications derived from an area's aggregate metrics.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::profile::AreaMetrics;
use crate::domain::indices::{calculate_lease_risk, LeaseRiskAssessment, LeaseRiskLevel};

/// Window volume below which the market is too thin to read.
pub const FRAGILE_VOLUME_BELOW: u64 = 12;

/// Coefficient of variation at or above which prices are volatile.
pub const VOLATILE_CV_FROM: f64 = 0.08;

/// Relative move of the latest period against the window median that counts as a shift.
pub const PRICING_SHIFT: f64 = 0.03;

/// Market stability classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stability {
    Stable,
    Volatile,
    Fragile,
}

impl fmt::Display for Stability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stability::Stable => "stable",
            Stability::Volatile => "volatile",
            Stability::Fragile => "fragile",
        };
        write!(f, "{}", s)
    }
}

/// How recent prices respond relative to the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingResponse {
    /// Prices softening where lease risk is already elevated.
    EarlyDiscount,
    Stable,
    Premium,
}

impl fmt::Display for PricingResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PricingResponse::EarlyDiscount => "early_discount",
            PricingResponse::Stable => "stable",
            PricingResponse::Premium => "premium",
        };
        write!(f, "{}", s)
    }
}

/// Signals attached to an Area Profile. Never set directly; see [`AreaSignals::derive`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaSignals {
    pub lease_risk: LeaseRiskAssessment,
    pub stability: Stability,
    pub pricing_response: PricingResponse,
}

impl AreaSignals {
    /// Derives every signal from the metrics alone.
    pub fn derive(metrics: &AreaMetrics) -> Self {
        let lease_risk = calculate_lease_risk(
            metrics.median_lease_years,
            metrics.frac_below_critical,
            metrics.frac_below_high,
        );
        let stability = classify_stability(metrics.transaction_volume, metrics.volatility);
        let pricing_response = classify_pricing_response(
            metrics.latest_median_price,
            metrics.median_price,
            lease_risk.level,
        );

        Self {
            lease_risk,
            stability,
            pricing_response,
        }
    }
}

/// Thin markets are fragile regardless of volatility.
pub fn classify_stability(transaction_volume: u64, volatility: f64) -> Stability {
    if transaction_volume < FRAGILE_VOLUME_BELOW {
        Stability::Fragile
    } else if volatility >= VOLATILE_CV_FROM {
        Stability::Volatile
    } else {
        Stability::Stable
    }
}

/// Compares the latest period against the window median.
///
/// A discount only counts as early when lease risk is high or critical;
/// otherwise a softening is treated as noise.
pub fn classify_pricing_response(
    latest_median_price: f64,
    window_median_price: f64,
    lease_risk: LeaseRiskLevel,
) -> PricingResponse {
    if window_median_price <= 0.0 || !latest_median_price.is_finite() {
        return PricingResponse::Stable;
    }

    let change = (latest_median_price - window_median_price) / window_median_price;
    if change <= -PRICING_SHIFT && lease_risk.is_elevated() {
        PricingResponse::EarlyDiscount
    } else if change >= PRICING_SHIFT {
        PricingResponse::Premium
    } else {
        PricingResponse::Stable
    }
}
