//! IndexScore value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A score between 0 and 100 inclusive.
///
/// Every index, sub-score, and pairwise dimension score in the engine is an
/// `IndexScore`, so out-of-range and NaN values can never leak into results.
/// Deserialization goes through [`IndexScore::try_new`] and rejects
/// out-of-range input rather than clamping it.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct IndexScore(f64);

impl IndexScore {
    /// Zero.
    pub const ZERO: Self = Self(0.0);

    /// Neutral midpoint used when data is missing or degenerate.
    pub const NEUTRAL: Self = Self(50.0);

    /// One hundred.
    pub const MAX: Self = Self(100.0);

    /// Creates a new IndexScore, clamping to valid range. NaN becomes zero.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 100.0))
    }

    /// Creates an IndexScore, returning error if out of range.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !(0.0..=100.0).contains(&value) {
            return Err(ValidationError::out_of_range("index_score", 0.0, 100.0, value));
        }
        Ok(Self(value))
    }

    /// Creates an IndexScore from a 0.0-1.0 fraction.
    pub fn from_fraction(fraction: f64) -> Self {
        Self::new(fraction * 100.0)
    }

    /// Returns the raw value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns the value as a fraction (0.0 to 1.0).
    pub fn as_fraction(&self) -> f64 {
        self.0 / 100.0
    }

    /// Returns the value rounded to one decimal place, for display.
    pub fn rounded(&self) -> f64 {
        (self.0 * 10.0).round() / 10.0
    }
}

impl TryFrom<f64> for IndexScore {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<IndexScore> for f64 {
    fn from(score: IndexScore) -> Self {
        score.0
    }
}

impl Default for IndexScore {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for IndexScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_score_new_accepts_valid_values() {
        assert_eq!(IndexScore::new(0.0).value(), 0.0);
        assert_eq!(IndexScore::new(42.5).value(), 42.5);
        assert_eq!(IndexScore::new(100.0).value(), 100.0);
    }

    #[test]
    fn index_score_new_clamps_out_of_range() {
        assert_eq!(IndexScore::new(-3.0).value(), 0.0);
        assert_eq!(IndexScore::new(180.0).value(), 100.0);
        assert_eq!(IndexScore::new(f64::INFINITY).value(), 100.0);
    }

    #[test]
    fn index_score_new_maps_nan_to_zero() {
        assert_eq!(IndexScore::new(f64::NAN).value(), 0.0);
    }

    #[test]
    fn index_score_try_new_rejects_over_100() {
        match IndexScore::try_new(100.5) {
            Err(ValidationError::OutOfRange { field, actual, .. }) => {
                assert_eq!(field, "index_score");
                assert_eq!(actual, 100.5);
            }
            _ => panic!("Expected OutOfRange error"),
        }
    }

    #[test]
    fn index_score_from_fraction_scales() {
        assert_eq!(IndexScore::from_fraction(0.25).value(), 25.0);
        assert_eq!(IndexScore::from_fraction(1.5).value(), 100.0);
    }

    #[test]
    fn index_score_displays_one_decimal() {
        assert_eq!(format!("{}", IndexScore::new(62.54)), "62.5");
        assert_eq!(format!("{}", IndexScore::NEUTRAL), "50.0");
    }

    #[test]
    fn index_score_rounded_for_display() {
        assert_eq!(IndexScore::new(33.333).rounded(), 33.3);
    }

    #[test]
    fn index_score_serializes_transparently() {
        let json = serde_json::to_string(&IndexScore::new(12.5)).unwrap();
        assert_eq!(json, "12.5");
    }

    #[test]
    fn index_score_ordering_works() {
        assert!(IndexScore::new(25.0) < IndexScore::new(75.0));
    }

    #[test]
    fn deserialize_rejects_out_of_range() {
        let score: IndexScore = serde_json::from_str("42.5").unwrap();
        assert_eq!(score.value(), 42.5);
        assert!(serde_json::from_str::<IndexScore>("150.0").is_err());
        assert!(serde_json::from_str::<IndexScore>("-1").is_err());
        assert_eq!(serde_json::to_string(&IndexScore::new(70.0)).unwrap(), "70.0");
    }
}
