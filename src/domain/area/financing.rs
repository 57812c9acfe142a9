//! Financing estimate - Indicative mortgage cost for a median-priced unit.

use serde::{Deserialize, Serialize};

/// Share of the purchase price assumed to be borrowed.
pub const LOAN_TO_VALUE: f64 = 0.75;

/// Assumed annual interest rate.
pub const ANNUAL_INTEREST_RATE: f64 = 0.026;

/// Longest loan tenure considered.
pub const MAX_TENURE_YEARS: u32 = 25;

/// Shortest loan tenure considered.
pub const MIN_TENURE_YEARS: u32 = 5;

/// Lease that must remain when the loan is fully repaid.
pub const LEASE_BUFFER_AT_MATURITY: f64 = 20.0;

/// Indicative financing cost for buying at the area's median price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancingEstimate {
    pub loan_amount: f64,
    pub annual_rate: f64,
    pub tenure_years: u32,
    pub monthly_instalment: f64,
    pub total_interest: f64,
}

impl FinancingEstimate {
    /// Estimates a standard annuity loan for the given price and remaining lease.
    ///
    /// # Algorithm
    /// - Loan = 75% of price
    /// - Tenure = remaining lease minus a 20-year buffer, clamped to 5..=25 years
    /// - Instalment = `L·r / (1 − (1 + r)^−n)` with monthly rate r over n months
    ///
    /// # Edge Cases
    /// - Non-positive or non-finite price: zero loan, zero instalment
    pub fn estimate(price: f64, median_lease_years: f64) -> Self {
        let tenure_years = tenure_for_lease(median_lease_years);

        if !price.is_finite() || price <= 0.0 {
            return Self {
                loan_amount: 0.0,
                annual_rate: ANNUAL_INTEREST_RATE,
                tenure_years,
                monthly_instalment: 0.0,
                total_interest: 0.0,
            };
        }

        let loan_amount = price * LOAN_TO_VALUE;
        let monthly_rate = ANNUAL_INTEREST_RATE / 12.0;
        let months = f64::from(tenure_years * 12);
        let monthly_instalment =
            loan_amount * monthly_rate / (1.0 - (1.0 + monthly_rate).powf(-months));
        let total_interest = monthly_instalment * months - loan_amount;

        Self {
            loan_amount,
            annual_rate: ANNUAL_INTEREST_RATE,
            tenure_years,
            monthly_instalment,
            total_interest,
        }
    }
}

fn tenure_for_lease(median_lease_years: f64) -> u32 {
    if !median_lease_years.is_finite() {
        return MIN_TENURE_YEARS;
    }
    let available = (median_lease_years - LEASE_BUFFER_AT_MATURITY).floor();
    available.clamp(f64::from(MIN_TENURE_YEARS), f64::from(MAX_TENURE_YEARS)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_lease_gets_full_tenure() {
        let estimate = FinancingEstimate::estimate(500_000.0, 90.0);
        assert_eq!(estimate.tenure_years, 25);
        assert!((estimate.loan_amount - 375_000.0).abs() < 1e-6);
    }

    #[test]
    fn short_lease_shortens_tenure() {
        assert_eq!(FinancingEstimate::estimate(400_000.0, 38.9).tenure_years, 18);
        assert_eq!(FinancingEstimate::estimate(400_000.0, 22.0).tenure_years, 5);
    }

    #[test]
    fn instalment_matches_annuity_formula() {
        let estimate = FinancingEstimate::estimate(400_000.0, 95.0);
        // 300k over 25 years at 2.6% is roughly 1,361 per month
        assert!((estimate.monthly_instalment - 1361.0).abs() < 2.0);
        let repaid = estimate.monthly_instalment * 300.0;
        assert!((repaid - estimate.loan_amount - estimate.total_interest).abs() < 1e-6);
    }

    #[test]
    fn shorter_tenure_costs_more_per_month_but_less_interest() {
        let long = FinancingEstimate::estimate(400_000.0, 95.0);
        let short = FinancingEstimate::estimate(400_000.0, 40.0);
        assert!(short.monthly_instalment > long.monthly_instalment);
        assert!(short.total_interest < long.total_interest);
    }

    #[test]
    fn zero_price_yields_zero_cost() {
        let estimate = FinancingEstimate::estimate(0.0, 80.0);
        assert_eq!(estimate.monthly_instalment, 0.0);
        assert_eq!(estimate.total_interest, 0.0);
    }
}
