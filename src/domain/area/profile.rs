//! Area Profile - One area, one unit type, one window of transactions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::financing::FinancingEstimate;
use super::period_stats::PeriodStats;
use super::signals::AreaSignals;
use crate::domain::foundation::{AreaId, UnitType};
use crate::domain::indices::{LEASE_CRITICAL_YEARS, LEASE_HIGH_YEARS};

/// Aggregated window metrics. Everything an Area Profile is derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaMetrics {
    pub area_id: AreaId,
    pub unit_type: UnitType,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    /// Transaction-weighted median of per-period median prices.
    pub median_price: f64,
    pub median_price_per_area: f64,
    pub median_lease_years: f64,
    pub frac_below_critical: f64,
    pub frac_below_high: f64,
    pub transaction_volume: u64,
    pub period_count: usize,
    /// Coefficient of variation of per-period median prices.
    pub volatility: f64,
    /// Median price of the most recent period in the window.
    pub latest_median_price: f64,
    #[serde(default)]
    pub median_rent: Option<f64>,
}

impl AreaMetrics {
    /// Annual rent as a percentage of the median price.
    pub fn gross_rental_yield(&self) -> Option<f64> {
        let rent = self.median_rent?;
        if self.median_price <= 0.0 {
            return None;
        }
        Some(rent * 12.0 / self.median_price * 100.0)
    }
}

/// Area Profile with its derived financing estimate and signals.
///
/// Built once per request and never mutated; the derived parts are
/// recomputed by [`AreaProfile::new`] from the metrics alone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaProfile {
    #[serde(flatten)]
    metrics: AreaMetrics,
    financing: FinancingEstimate,
    gross_rental_yield: Option<f64>,
    signals: AreaSignals,
}

impl AreaProfile {
    pub fn new(metrics: AreaMetrics) -> Self {
        let financing = FinancingEstimate::estimate(metrics.median_price, metrics.median_lease_years);
        let gross_rental_yield = metrics.gross_rental_yield();
        let signals = AreaSignals::derive(&metrics);
        Self {
            metrics,
            financing,
            gross_rental_yield,
            signals,
        }
    }

    pub fn metrics(&self) -> &AreaMetrics {
        &self.metrics
    }

    pub fn area_id(&self) -> &AreaId {
        &self.metrics.area_id
    }

    pub fn financing(&self) -> &FinancingEstimate {
        &self.financing
    }

    pub fn gross_rental_yield(&self) -> Option<f64> {
        self.gross_rental_yield
    }

    pub fn signals(&self) -> &AreaSignals {
        &self.signals
    }
}

/// Aggregates raw period rows into Area Profiles.
pub struct AreaProfiler;

impl AreaProfiler {
    /// Builds the profile for one area and unit type from the window's rows.
    ///
    /// # Algorithm
    /// - Rows with no transactions are ignored
    /// - Price, price per area and lease use transaction-weighted medians
    /// - Threshold fractions use the row counts when present; otherwise a row
    ///   counts entirely below a threshold when its median lease is below it
    /// - Volatility is the coefficient of variation of per-period medians
    ///
    /// # Edge Cases
    /// - No usable rows: returns `None`
    /// - One period, or a zero mean price: volatility 0
    pub fn build(area_id: AreaId, unit_type: UnitType, rows: &[PeriodStats]) -> Option<AreaProfile> {
        let usable: Vec<&PeriodStats> = rows.iter().filter(|r| r.tx_count > 0).collect();
        if usable.is_empty() {
            tracing::debug!(area_id = %area_id, unit_type = %unit_type, "no transactions in window");
            return None;
        }

        let volume = saturating_total(usable.iter().map(|r| r.tx_count));

        let median_price = weighted_median(usable.iter().map(|r| (r.median_price, r.tx_count)));
        let median_price_per_area =
            weighted_median(usable.iter().map(|r| (r.median_price_per_area, r.tx_count)));
        let median_lease_years =
            weighted_median(usable.iter().map(|r| (r.median_lease_years, r.tx_count)));

        let below_critical = saturating_total(
            usable
                .iter()
                .map(|r| count_below(r, r.tx_below_critical, LEASE_CRITICAL_YEARS)),
        );
        let below_high = saturating_total(
            usable
                .iter()
                .map(|r| count_below(r, r.tx_below_high, LEASE_HIGH_YEARS)),
        );

        let per_period = per_period_medians(&usable);
        let volatility = coefficient_of_variation(per_period.values().copied());
        let latest_median_price = per_period
            .values()
            .next_back()
            .copied()
            .unwrap_or(median_price);
        let (period_start, period_end) = match (per_period.keys().next(), per_period.keys().next_back()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return None,
        };

        let rent_rows: Vec<(f64, u64)> = usable
            .iter()
            .filter_map(|r| r.median_rent.map(|rent| (rent, r.tx_count)))
            .collect();
        let median_rent = if rent_rows.is_empty() {
            None
        } else {
            Some(weighted_median(rent_rows))
        };

        let metrics = AreaMetrics {
            area_id,
            unit_type,
            period_start,
            period_end,
            median_price,
            median_price_per_area,
            median_lease_years,
            frac_below_critical: below_critical as f64 / volume as f64,
            frac_below_high: below_high as f64 / volume as f64,
            transaction_volume: volume,
            period_count: per_period.len(),
            volatility,
            latest_median_price,
            median_rent,
        };

        let profile = AreaProfile::new(metrics);
        tracing::debug!(
            area_id = %profile.area_id(),
            periods = profile.metrics().period_count,
            volume,
            lease_risk = %profile.signals().lease_risk.level,
            stability = %profile.signals().stability,
            "area profile built"
        );
        Some(profile)
    }
}

/// Free-function form of [`AreaProfiler::build`].
pub fn build_area_profile(
    area_id: AreaId,
    unit_type: UnitType,
    rows: &[PeriodStats],
) -> Option<AreaProfile> {
    AreaProfiler::build(area_id, unit_type, rows)
}

fn count_below(row: &PeriodStats, counted: Option<u64>, threshold: f64) -> u64 {
    match counted {
        Some(n) => n.min(row.tx_count),
        None if row.median_lease_years < threshold => row.tx_count,
        None => 0,
    }
}

/// One median price per period; duplicate rows for a period are merged by weighted median.
fn per_period_medians(rows: &[&PeriodStats]) -> BTreeMap<NaiveDate, f64> {
    let mut grouped: BTreeMap<NaiveDate, Vec<(f64, u64)>> = BTreeMap::new();
    for row in rows {
        grouped
            .entry(row.period)
            .or_default()
            .push((row.median_price, row.tx_count));
    }
    grouped
        .into_iter()
        .map(|(period, values)| (period, weighted_median(values)))
        .collect()
}

/// Lower weighted median: the smallest value whose cumulative weight reaches half the total.
fn weighted_median(values: impl IntoIterator<Item = (f64, u64)>) -> f64 {
    let mut values: Vec<(f64, u64)> = values.into_iter().filter(|(v, _)| v.is_finite()).collect();
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.0.total_cmp(&b.0));

    let total = saturating_total(values.iter().map(|(_, w)| *w));
    let mut cumulative = 0u64;
    for (value, weight) in &values {
        cumulative = cumulative.saturating_add(*weight);
        if cumulative >= total.saturating_sub(cumulative) {
            return *value;
        }
    }
    values[values.len() - 1].0
}

/// Transaction counts from a snapshot are untrusted; sums stop at `u64::MAX`.
fn saturating_total(counts: impl IntoIterator<Item = u64>) -> u64 {
    counts.into_iter().fold(0u64, u64::saturating_add)
}

fn coefficient_of_variation(values: impl Iterator<Item = f64>) -> f64 {
    let values: Vec<f64> = values.collect();
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    if mean == 0.0 {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt() / mean.abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::area::{PricingResponse, Stability};
    use crate::domain::indices::LeaseRiskLevel;

    fn month(m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, 1).unwrap()
    }

    fn area(id: &str) -> AreaId {
        AreaId::new(id).unwrap()
    }

    fn unit() -> UnitType {
        UnitType::new("4 room").unwrap()
    }

    fn row(m: u32, tx: u64, price: f64, lease: f64) -> PeriodStats {
        PeriodStats::new(month(m), tx, price, price / 95.0, lease)
    }

    #[test]
    fn no_rows_yields_none() {
        assert!(build_area_profile(area("Bedok"), unit(), &[]).is_none());
    }

    #[test]
    fn rows_without_transactions_are_ignored() {
        let rows = vec![row(1, 0, 900_000.0, 40.0)];
        assert!(build_area_profile(area("Bedok"), unit(), &rows).is_none());
    }

    #[test]
    fn medians_are_transaction_weighted() {
        let rows = vec![
            row(1, 11, 500_000.0, 80.0),
            row(2, 1, 900_000.0, 40.0),
            row(3, 10, 510_000.0, 79.0),
        ];
        let profile = build_area_profile(area("Bedok"), unit(), &rows).unwrap();
        let m = profile.metrics();
        assert_eq!(m.transaction_volume, 22);
        assert_eq!(m.median_price, 500_000.0);
        assert_eq!(m.median_lease_years, 79.0);
        assert_eq!(m.period_count, 3);
        assert_eq!(m.period_start, month(1));
        assert_eq!(m.period_end, month(3));
    }

    #[test]
    fn fractions_prefer_explicit_counts() {
        let rows = vec![
            row(1, 10, 400_000.0, 58.0).with_lease_counts(4, 10),
            row(2, 10, 400_000.0, 58.0),
        ];
        let profile = build_area_profile(area("Bedok"), unit(), &rows).unwrap();
        let m = profile.metrics();
        // Row 2 has no counts: median 58 is below 60 but not below 55
        assert!((m.frac_below_critical - 0.2).abs() < 1e-9);
        assert!((m.frac_below_high - 1.0).abs() < 1e-9);
    }

    #[test]
    fn volatility_is_coefficient_of_variation() {
        let rows = vec![row(1, 20, 90.0, 80.0), row(2, 20, 110.0, 80.0)];
        let profile = build_area_profile(area("Bedok"), unit(), &rows).unwrap();
        assert!((profile.metrics().volatility - 0.1).abs() < 1e-9);
        assert_eq!(profile.signals().stability, Stability::Volatile);
    }

    #[test]
    fn single_period_has_zero_volatility() {
        let rows = vec![row(1, 30, 500_000.0, 80.0)];
        let profile = build_area_profile(area("Bedok"), unit(), &rows).unwrap();
        assert_eq!(profile.metrics().volatility, 0.0);
        assert_eq!(profile.signals().stability, Stability::Stable);
    }

    #[test]
    fn thin_window_is_fragile() {
        let rows = vec![row(1, 5, 500_000.0, 80.0), row(2, 5, 500_000.0, 80.0)];
        let profile = build_area_profile(area("Bedok"), unit(), &rows).unwrap();
        assert_eq!(profile.signals().stability, Stability::Fragile);
    }

    #[test]
    fn old_estate_softening_is_early_discount() {
        let rows = vec![
            row(1, 20, 400_000.0, 52.0),
            row(2, 20, 400_000.0, 52.0),
            row(3, 20, 380_000.0, 52.0),
        ];
        let profile = build_area_profile(area("Queenstown"), unit(), &rows).unwrap();
        assert_eq!(profile.signals().lease_risk.level, LeaseRiskLevel::Critical);
        assert_eq!(profile.metrics().latest_median_price, 380_000.0);
        assert_eq!(profile.signals().pricing_response, PricingResponse::EarlyDiscount);
    }

    #[test]
    fn rent_produces_gross_yield() {
        let rows = vec![row(1, 20, 480_000.0, 80.0).with_rent(2_800.0)];
        let profile = build_area_profile(area("Bedok"), unit(), &rows).unwrap();
        assert_eq!(profile.metrics().median_rent, Some(2_800.0));
        let yield_pct = profile.gross_rental_yield().unwrap();
        assert!((yield_pct - 7.0).abs() < 1e-9);
    }

    #[test]
    fn no_rent_rows_means_no_yield() {
        let rows = vec![row(1, 20, 480_000.0, 80.0)];
        let profile = build_area_profile(area("Bedok"), unit(), &rows).unwrap();
        assert!(profile.gross_rental_yield().is_none());
    }

    #[test]
    fn rebuilding_is_idempotent() {
        let rows = vec![
            row(1, 14, 610_000.0, 66.0).with_lease_counts(1, 3),
            row(2, 9, 640_000.0, 64.0),
        ];
        let first = build_area_profile(area("Clementi"), unit(), &rows).unwrap();
        let second = build_area_profile(area("Clementi"), unit(), &rows).unwrap();
        assert_eq!(first, second);
        assert_eq!(AreaProfile::new(first.metrics().clone()), first);
    }

    #[test]
    fn weighted_median_handles_even_split() {
        assert_eq!(weighted_median(vec![(1.0, 1), (2.0, 1)]), 1.0);
        assert_eq!(weighted_median(vec![(3.0, 1), (1.0, 1), (2.0, 1)]), 2.0);
    }

    #[test]
    fn huge_transaction_counts_do_not_overflow() {
        assert_eq!(weighted_median(vec![(1.0, u64::MAX), (2.0, u64::MAX)]), 1.0);
        assert_eq!(weighted_median(vec![(1.0, 1), (2.0, u64::MAX)]), 2.0);

        let rows = vec![
            row(1, u64::MAX, 500_000.0, 50.0),
            row(2, u64::MAX, 520_000.0, 80.0),
        ];
        let profile = build_area_profile(area("Bedok"), unit(), &rows).unwrap();
        let m = profile.metrics();
        assert_eq!(m.transaction_volume, u64::MAX);
        assert_eq!(m.median_price, 500_000.0);
        assert!((0.0..=1.0).contains(&m.frac_below_critical));
    }
}
