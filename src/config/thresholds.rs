//! Comparator threshold configuration
//!
//! Defaults equal the named constants in `domain::comparison`; any of them
//! can be overridden, e.g. `HOME_COMPASS__THRESHOLDS__PRICE_SIGNIFICANT=80000`.
//! A band is overridden as a whole: set all three of
//! `HOME_COMPASS__THRESHOLDS__LEASE_BANDS__{MINOR,MODERATE,MAJOR}_FROM`.

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::comparison::{
    ComparisonThresholds, MagnitudeBands, CBI_BANDS, CLEAR_WINNER_GAP,
    EPI_BANDS, EPI_SIGNIFICANT, LEASE_BANDS, PREFERENCE_GAP, PRICE_BANDS, PRICE_SIGNIFICANT,
};

#[derive(Debug, Clone, Deserialize)]
pub struct ThresholdConfig {
    /// Price gap (currency) at which price leads the headline
    #[serde(default = "default_price_significant")]
    pub price_significant: f64,

    /// EPI gap (points) at which education leads the headline
    #[serde(default = "default_epi_significant")]
    pub epi_significant: f64,

    #[serde(default = "default_clear_winner_gap")]
    pub clear_winner_gap: f64,

    #[serde(default = "default_preference_gap")]
    pub preference_gap: f64,

    #[serde(default = "default_price_bands")]
    pub price_bands: MagnitudeBands,

    #[serde(default = "default_lease_bands")]
    pub lease_bands: MagnitudeBands,

    #[serde(default = "default_epi_bands")]
    pub epi_bands: MagnitudeBands,

    #[serde(default = "default_cbi_bands")]
    pub cbi_bands: MagnitudeBands,
}

impl ThresholdConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        positive("price_significant", self.price_significant)?;
        positive("epi_significant", self.epi_significant)?;
        if !(self.preference_gap > 0.0 && self.preference_gap < self.clear_winner_gap) {
            return Err(ValidationError::InvalidConfidenceGaps);
        }

        let bands = [
            ("price_bands", &self.price_bands),
            ("lease_bands", &self.lease_bands),
            ("epi_bands", &self.epi_bands),
            ("cbi_bands", &self.cbi_bands),
        ];
        for (field, band) in bands {
            band.validate(field)
                .map_err(|_| ValidationError::InvalidBands(field))?;
        }
        Ok(())
    }

    /// The comparator's view of these settings.
    pub fn to_thresholds(&self) -> ComparisonThresholds {
        ComparisonThresholds {
            price_significant: self.price_significant,
            epi_significant: self.epi_significant,
            clear_winner_gap: self.clear_winner_gap,
            preference_gap: self.preference_gap,
            price_bands: self.price_bands,
            lease_bands: self.lease_bands,
            epi_bands: self.epi_bands,
            cbi_bands: self.cbi_bands,
        }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            price_significant: default_price_significant(),
            epi_significant: default_epi_significant(),
            clear_winner_gap: default_clear_winner_gap(),
            preference_gap: default_preference_gap(),
            price_bands: default_price_bands(),
            lease_bands: default_lease_bands(),
            epi_bands: default_epi_bands(),
            cbi_bands: default_cbi_bands(),
        }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonPositiveThreshold(field))
    }
}

fn default_price_significant() -> f64 {
    PRICE_SIGNIFICANT
}

fn default_epi_significant() -> f64 {
    EPI_SIGNIFICANT
}

fn default_clear_winner_gap() -> f64 {
    CLEAR_WINNER_GAP
}

fn default_preference_gap() -> f64 {
    PREFERENCE_GAP
}

fn default_price_bands() -> MagnitudeBands {
    PRICE_BANDS
}

fn default_lease_bands() -> MagnitudeBands {
    LEASE_BANDS
}

fn default_epi_bands() -> MagnitudeBands {
    EPI_BANDS
}

fn default_cbi_bands() -> MagnitudeBands {
    CBI_BANDS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_comparator_defaults() {
        let config = ThresholdConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.to_thresholds(), ComparisonThresholds::default());
    }

    #[test]
    fn rejects_non_positive_significance() {
        let config = ThresholdConfig {
            price_significant: 0.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::NonPositiveThreshold("price_significant"))
        );
    }

    #[test]
    fn rejects_inverted_confidence_gaps() {
        let config = ThresholdConfig {
            clear_winner_gap: 5.0,
            preference_gap: 8.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidConfidenceGaps));
    }

    #[test]
    fn rejects_unordered_bands() {
        let config = ThresholdConfig {
            lease_bands: MagnitudeBands::new(8.0, 3.0, 15.0),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidBands("lease_bands")));
    }
}
