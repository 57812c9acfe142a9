//! Preference modes - Named weight vectors with their rules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::hard_rules::HardRule;
use super::school_rules::SchoolRule;
use super::weights::Weights;
use crate::domain::foundation::ValidationError;

/// Identifier of a preference mode (the user's lens).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeId {
    CostFirst,
    LeaseSafetyFirst,
    LowSchoolPressure,
    Balanced,
    LongTerm,
    RentalYield,
}

impl ModeId {
    pub const ALL: [ModeId; 6] = [
        ModeId::CostFirst,
        ModeId::LeaseSafetyFirst,
        ModeId::LowSchoolPressure,
        ModeId::Balanced,
        ModeId::LongTerm,
        ModeId::RentalYield,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModeId::CostFirst => "cost_first",
            ModeId::LeaseSafetyFirst => "lease_safety_first",
            ModeId::LowSchoolPressure => "low_school_pressure",
            ModeId::Balanced => "balanced",
            ModeId::LongTerm => "long_term",
            ModeId::RentalYield => "rental_yield",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            ModeId::CostFirst => 0,
            ModeId::LeaseSafetyFirst => 1,
            ModeId::LowSchoolPressure => 2,
            ModeId::Balanced => 3,
            ModeId::LongTerm => 4,
            ModeId::RentalYield => 5,
        }
    }

    /// Whether a long holding period may replace this lens with the long-term mode.
    pub fn yields_to_long_term(&self) -> bool {
        !matches!(self, ModeId::LowSchoolPressure)
    }
}

impl fmt::Display for ModeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ModeId {
    type Err = ValidationError;

    /// Accepts snake_case or kebab-case ids, case-insensitively, plus a few common aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        match key.as_str() {
            "cost_first" | "cost" => Ok(ModeId::CostFirst),
            "lease_safety_first" | "lease_first" | "lease" => Ok(ModeId::LeaseSafetyFirst),
            "low_school_pressure" | "low_pressure_first" | "school" => Ok(ModeId::LowSchoolPressure),
            "balanced" => Ok(ModeId::Balanced),
            "long_term" => Ok(ModeId::LongTerm),
            "rental_yield" | "rental" => Ok(ModeId::RentalYield),
            _ => Err(ValidationError::invalid_format(
                "lens",
                format!("unknown preference lens '{}'", s.trim()),
            )),
        }
    }
}

/// A weight vector with its bullet budget and rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreferenceMode {
    pub id: ModeId,
    pub weights: Weights,
    /// Most trade-off bullets shown under this mode.
    pub max_bullets: usize,
    pub hard_rules: Vec<HardRule>,
    pub school_rules: Vec<SchoolRule>,
}

impl PreferenceMode {
    pub fn new(id: ModeId, weights: Weights, max_bullets: usize) -> Self {
        Self {
            id,
            weights,
            max_bullets,
            hard_rules: Vec::new(),
            school_rules: Vec::new(),
        }
    }

    pub fn with_hard_rule(mut self, rule: HardRule) -> Self {
        self.hard_rules.push(rule);
        self
    }

    pub fn with_school_rule(mut self, rule: SchoolRule) -> Self {
        self.school_rules.push(rule);
        self
    }

    /// A copy of this mode carrying different weights.
    pub fn with_weights(&self, weights: Weights) -> Self {
        Self {
            weights,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_snake_and_kebab_case() {
        assert_eq!("cost_first".parse::<ModeId>().unwrap(), ModeId::CostFirst);
        assert_eq!("Lease-Safety-First".parse::<ModeId>().unwrap(), ModeId::LeaseSafetyFirst);
        assert_eq!(" low-pressure-first ".parse::<ModeId>().unwrap(), ModeId::LowSchoolPressure);
    }

    #[test]
    fn unknown_lens_is_rejected() {
        let err = "vibes".parse::<ModeId>().unwrap_err();
        assert!(err.to_string().contains("vibes"));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for id in ModeId::ALL {
            assert_eq!(id.to_string().parse::<ModeId>().unwrap(), id);
        }
    }

    #[test]
    fn indices_are_distinct() {
        let mut seen: Vec<usize> = ModeId::ALL.iter().map(|m| m.index()).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), ModeId::ALL.len());
    }

    #[test]
    fn only_school_lens_resists_long_term() {
        assert!(!ModeId::LowSchoolPressure.yields_to_long_term());
        assert!(ModeId::CostFirst.yields_to_long_term());
    }
}
