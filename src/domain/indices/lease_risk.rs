//! Lease Risk Calculator - Rule-based scoring of remaining-lease exposure.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Remaining lease below which financing and resale are severely restricted.
pub const LEASE_CRITICAL_YEARS: f64 = 55.0;

/// Remaining lease below which loan quantum starts to be cut.
pub const LEASE_HIGH_YEARS: f64 = 60.0;

/// Remaining lease below which buyers begin to price in lease decay.
pub const LEASE_MODERATE_YEARS: f64 = 70.0;

/// Share of sub-critical transactions treated as a heavy concentration.
pub const CRITICAL_SHARE_HEAVY: f64 = 0.30;

/// Share of sub-critical transactions treated as a noticeable concentration.
pub const CRITICAL_SHARE_NOTICEABLE: f64 = 0.10;

/// Share of sub-high transactions treated as a majority.
pub const HIGH_SHARE_MAJORITY: f64 = 0.50;

/// Lease risk classification, ordered from safest to riskiest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaseRiskLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl LeaseRiskLevel {
    /// Maps a cumulative rule score to a level.
    pub fn from_score(score: u8) -> Self {
        match score {
            5.. => LeaseRiskLevel::Critical,
            3..=4 => LeaseRiskLevel::High,
            1..=2 => LeaseRiskLevel::Moderate,
            0 => LeaseRiskLevel::Low,
        }
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            LeaseRiskLevel::Low => "low",
            LeaseRiskLevel::Moderate => "moderate",
            LeaseRiskLevel::High => "high",
            LeaseRiskLevel::Critical => "critical",
        }
    }

    /// Returns true for high or critical.
    pub fn is_elevated(&self) -> bool {
        *self >= LeaseRiskLevel::High
    }
}

impl fmt::Display for LeaseRiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Result of a lease risk calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaseRiskAssessment {
    pub level: LeaseRiskLevel,
    /// Cumulative rule score the level was derived from.
    pub score: u8,
    /// One explanation per triggered rule, in evaluation order.
    pub reasons: Vec<String>,
}

/// Lease risk scoring functions.
pub struct LeaseRiskCalculator;

impl LeaseRiskCalculator {
    /// Scores lease exposure for one area.
    ///
    /// # Algorithm
    /// - Median lease: +3 below critical, else +2 below high, else +1 below moderate
    /// - Share below critical: +2 if heavy, else +1 if noticeable
    /// - Share below high: +1 if a majority
    ///
    /// Score >= 5 is critical, >= 3 high, >= 1 moderate, otherwise low.
    ///
    /// # Edge Cases
    /// - Fractions outside 0.0-1.0 are clamped; NaN fractions count as 0
    /// - Never fails; a low level carries no reasons
    pub fn calculate(
        median_lease_years: f64,
        frac_below_critical: f64,
        frac_below_high: f64,
    ) -> LeaseRiskAssessment {
        let frac_below_critical = clamp_fraction(frac_below_critical);
        let frac_below_high = clamp_fraction(frac_below_high);

        let mut score: u8 = 0;
        let mut reasons = Vec::new();

        if median_lease_years < LEASE_CRITICAL_YEARS {
            score += 3;
            reasons.push(format!(
                "Median remaining lease of {:.0} years is below the {:.0}-year critical threshold",
                median_lease_years, LEASE_CRITICAL_YEARS
            ));
        } else if median_lease_years < LEASE_HIGH_YEARS {
            score += 2;
            reasons.push(format!(
                "Median remaining lease of {:.0} years is below the {:.0}-year financing threshold",
                median_lease_years, LEASE_HIGH_YEARS
            ));
        } else if median_lease_years < LEASE_MODERATE_YEARS {
            score += 1;
            reasons.push(format!(
                "Median remaining lease of {:.0} years is below {:.0} years, where lease decay starts to show in prices",
                median_lease_years, LEASE_MODERATE_YEARS
            ));
        }

        if frac_below_critical >= CRITICAL_SHARE_HEAVY {
            score += 2;
            reasons.push(format!(
                "{:.0}% of transactions had under {:.0} years of lease left",
                frac_below_critical * 100.0,
                LEASE_CRITICAL_YEARS
            ));
        } else if frac_below_critical >= CRITICAL_SHARE_NOTICEABLE {
            score += 1;
            reasons.push(format!(
                "A noticeable share ({:.0}%) of transactions had under {:.0} years of lease left",
                frac_below_critical * 100.0,
                LEASE_CRITICAL_YEARS
            ));
        }

        if frac_below_high >= HIGH_SHARE_MAJORITY {
            score += 1;
            reasons.push(format!(
                "Most transactions ({:.0}%) had under {:.0} years of lease left",
                frac_below_high * 100.0,
                LEASE_HIGH_YEARS
            ));
        }

        let level = LeaseRiskLevel::from_score(score);
        tracing::trace!(median_lease_years, score, risk = %level, "lease risk calculated");

        LeaseRiskAssessment {
            level,
            score,
            reasons,
        }
    }
}

/// Free-function form of [`LeaseRiskCalculator::calculate`].
pub fn calculate_lease_risk(
    median_lease_years: f64,
    frac_below_critical: f64,
    frac_below_high: f64,
) -> LeaseRiskAssessment {
    LeaseRiskCalculator::calculate(median_lease_years, frac_below_critical, frac_below_high)
}

fn clamp_fraction(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_lease_with_no_exposure_is_low() {
        let result = calculate_lease_risk(85.0, 0.0, 0.0);
        assert_eq!(result.level, LeaseRiskLevel::Low);
        assert_eq!(result.score, 0);
        assert!(result.reasons.is_empty());
    }

    #[test]
    fn worked_example_is_critical_with_three_reasons() {
        // 3 (median) + 2 (share below critical) + 1 (share below high) = 6
        let result = calculate_lease_risk(52.0, 0.35, 0.55);
        assert_eq!(result.score, 6);
        assert_eq!(result.level, LeaseRiskLevel::Critical);
        assert_eq!(result.reasons.len(), 3);
        assert!(result.reasons[0].contains("critical threshold"));
        assert!(result.reasons[1].contains("35%"));
        assert!(result.reasons[2].contains("55%"));
    }

    #[test]
    fn median_rules_are_mutually_exclusive() {
        assert_eq!(calculate_lease_risk(54.9, 0.0, 0.0).score, 3);
        assert_eq!(calculate_lease_risk(57.0, 0.0, 0.0).score, 2);
        assert_eq!(calculate_lease_risk(65.0, 0.0, 0.0).score, 1);
        assert_eq!(calculate_lease_risk(70.0, 0.0, 0.0).score, 0);
    }

    #[test]
    fn thresholds_are_strict_for_median() {
        // Exactly at a threshold is not "below" it
        assert_eq!(calculate_lease_risk(55.0, 0.0, 0.0).score, 2);
        assert_eq!(calculate_lease_risk(60.0, 0.0, 0.0).score, 1);
    }

    #[test]
    fn share_cutoffs_are_inclusive() {
        assert_eq!(calculate_lease_risk(90.0, 0.30, 0.0).score, 2);
        assert_eq!(calculate_lease_risk(90.0, 0.10, 0.0).score, 1);
        assert_eq!(calculate_lease_risk(90.0, 0.09, 0.0).score, 0);
        assert_eq!(calculate_lease_risk(90.0, 0.0, 0.50).score, 1);
    }

    #[test]
    fn score_maps_to_levels() {
        assert_eq!(LeaseRiskLevel::from_score(0), LeaseRiskLevel::Low);
        assert_eq!(LeaseRiskLevel::from_score(1), LeaseRiskLevel::Moderate);
        assert_eq!(LeaseRiskLevel::from_score(2), LeaseRiskLevel::Moderate);
        assert_eq!(LeaseRiskLevel::from_score(3), LeaseRiskLevel::High);
        assert_eq!(LeaseRiskLevel::from_score(4), LeaseRiskLevel::High);
        assert_eq!(LeaseRiskLevel::from_score(5), LeaseRiskLevel::Critical);
        assert_eq!(LeaseRiskLevel::from_score(6), LeaseRiskLevel::Critical);
    }

    #[test]
    fn out_of_range_fractions_are_clamped() {
        let result = calculate_lease_risk(90.0, 4.0, -1.0);
        assert_eq!(result.score, 2);
        let nan = calculate_lease_risk(90.0, f64::NAN, f64::NAN);
        assert_eq!(nan.level, LeaseRiskLevel::Low);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let first = calculate_lease_risk(58.0, 0.12, 0.6);
        let second = calculate_lease_risk(58.0, 0.12, 0.6);
        assert_eq!(first, second);
    }

    #[test]
    fn elevated_covers_high_and_critical() {
        assert!(!LeaseRiskLevel::Moderate.is_elevated());
        assert!(LeaseRiskLevel::High.is_elevated());
        assert!(LeaseRiskLevel::Critical.is_elevated());
    }

    #[test]
    fn level_serializes_snake_case() {
        let json = serde_json::to_string(&LeaseRiskLevel::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
    }
}
