//! Significance thresholds and magnitude bands used by the comparator.
//!
//! These values are hard-coded judgement calls carried over as named
//! defaults. They are overridable through configuration and should be
//! reviewed against real buyer outcomes before being treated as calibrated.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Price difference (currency) at which price leads the headline.
pub const PRICE_SIGNIFICANT: f64 = 50_000.0;

/// EPI difference (points) that must be exceeded for education pressure to
/// lead the headline; a gap of exactly this size does not qualify.
pub const EPI_SIGNIFICANT: f64 = 10.0;

/// Overall-score gap at or above which one area is a clear winner.
pub const CLEAR_WINNER_GAP: f64 = 20.0;

/// Overall-score gap at or above which the answer depends on preference.
pub const PREFERENCE_GAP: f64 = 8.0;

/// How large a difference is, for choosing a phrasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Magnitude {
    NotSignificant,
    Minor,
    Moderate,
    Major,
}

/// Lower bounds of the minor, moderate and major bands for one measure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MagnitudeBands {
    pub minor_from: f64,
    pub moderate_from: f64,
    pub major_from: f64,
}

impl MagnitudeBands {
    pub const fn new(minor_from: f64, moderate_from: f64, major_from: f64) -> Self {
        Self {
            minor_from,
            moderate_from,
            major_from,
        }
    }

    /// Classifies the absolute size of a difference.
    pub fn classify(&self, difference: f64) -> Magnitude {
        let size = difference.abs();
        if size >= self.major_from {
            Magnitude::Major
        } else if size >= self.moderate_from {
            Magnitude::Moderate
        } else if size >= self.minor_from {
            Magnitude::Minor
        } else {
            Magnitude::NotSignificant
        }
    }

    /// Bands must be positive and strictly ascending.
    pub fn validate(&self, field: &str) -> Result<(), ValidationError> {
        if !(self.minor_from > 0.0 && self.minor_from.is_finite()) {
            return Err(ValidationError::invalid_format(
                field,
                "minor band must be positive",
            ));
        }
        if !(self.minor_from < self.moderate_from && self.moderate_from < self.major_from) {
            return Err(ValidationError::invalid_format(
                field,
                "bands must be strictly ascending",
            ));
        }
        Ok(())
    }
}

pub const PRICE_BANDS: MagnitudeBands = MagnitudeBands::new(20_000.0, 50_000.0, 150_000.0);
pub const LEASE_BANDS: MagnitudeBands = MagnitudeBands::new(3.0, 8.0, 15.0);
pub const EPI_BANDS: MagnitudeBands = MagnitudeBands::new(5.0, 10.0, 20.0);
pub const CBI_BANDS: MagnitudeBands = MagnitudeBands::new(5.0, 10.0, 20.0);

/// Every tunable the comparator reads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonThresholds {
    pub price_significant: f64,
    pub epi_significant: f64,
    pub clear_winner_gap: f64,
    pub preference_gap: f64,
    pub price_bands: MagnitudeBands,
    pub lease_bands: MagnitudeBands,
    pub epi_bands: MagnitudeBands,
    pub cbi_bands: MagnitudeBands,
}

impl Default for ComparisonThresholds {
    fn default() -> Self {
        Self {
            price_significant: PRICE_SIGNIFICANT,
            epi_significant: EPI_SIGNIFICANT,
            clear_winner_gap: CLEAR_WINNER_GAP,
            preference_gap: PREFERENCE_GAP,
            price_bands: PRICE_BANDS,
            lease_bands: LEASE_BANDS,
            epi_bands: EPI_BANDS,
            cbi_bands: CBI_BANDS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_uses_absolute_size() {
        assert_eq!(PRICE_BANDS.classify(-19_999.0), Magnitude::NotSignificant);
        assert_eq!(PRICE_BANDS.classify(-20_000.0), Magnitude::Minor);
        assert_eq!(PRICE_BANDS.classify(60_000.0), Magnitude::Moderate);
        assert_eq!(PRICE_BANDS.classify(150_000.0), Magnitude::Major);
    }

    #[test]
    fn default_bands_validate() {
        for bands in [PRICE_BANDS, LEASE_BANDS, EPI_BANDS, CBI_BANDS] {
            assert!(bands.validate("bands").is_ok());
        }
    }

    #[test]
    fn descending_bands_are_rejected() {
        assert!(MagnitudeBands::new(10.0, 5.0, 20.0).validate("x").is_err());
        assert!(MagnitudeBands::new(0.0, 5.0, 20.0).validate("x").is_err());
    }
}
