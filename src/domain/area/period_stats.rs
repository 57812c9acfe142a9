//! Raw per-period transaction aggregates for one area and unit type.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Pre-aggregated statistics for one calendar period (month).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodStats {
    /// First day of the period.
    pub period: NaiveDate,
    pub tx_count: u64,
    pub median_price: f64,
    pub median_price_per_area: f64,
    pub median_lease_years: f64,
    /// Transactions with less than the critical lease remaining, when the source counts them.
    #[serde(default)]
    pub tx_below_critical: Option<u64>,
    /// Transactions with less than the high-risk lease remaining, when the source counts them.
    #[serde(default)]
    pub tx_below_high: Option<u64>,
    /// Median monthly rent for the same period, when rental data exists.
    #[serde(default)]
    pub median_rent: Option<f64>,
}

impl PeriodStats {
    /// Creates a row with no threshold counts and no rent.
    pub fn new(
        period: NaiveDate,
        tx_count: u64,
        median_price: f64,
        median_price_per_area: f64,
        median_lease_years: f64,
    ) -> Self {
        Self {
            period,
            tx_count,
            median_price,
            median_price_per_area,
            median_lease_years,
            tx_below_critical: None,
            tx_below_high: None,
            median_rent: None,
        }
    }

    pub fn with_lease_counts(mut self, below_critical: u64, below_high: u64) -> Self {
        self.tx_below_critical = Some(below_critical);
        self.tx_below_high = Some(below_high);
        self
    }

    pub fn with_rent(mut self, median_rent: f64) -> Self {
        self.median_rent = Some(median_rent);
        self
    }
}

/// Inclusive range of periods to aggregate over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl StatsWindow {
    /// Creates a window, rejecting one that ends before it starts.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if end < start {
            return Err(ValidationError::invalid_format(
                "window",
                format!("end {} is before start {}", end, start),
            ));
        }
        Ok(Self { start, end })
    }

    /// The `months` calendar months ending with (and including) the month of `end`.
    pub fn trailing_months(end: NaiveDate, months: u32) -> Self {
        let end_month = end.with_day(1).unwrap_or(end);
        let start = end_month
            .checked_sub_months(Months::new(months.saturating_sub(1)))
            .unwrap_or(NaiveDate::MIN);
        Self {
            start,
            end: end_month,
        }
    }

    pub fn contains(&self, period: NaiveDate) -> bool {
        period >= self.start && period <= self.end
    }
}
