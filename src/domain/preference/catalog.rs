//! Preference catalog - The fixed table of preference modes.

use once_cell::sync::Lazy;

use super::hard_rules::{HardRule, HardRuleCondition, RuleEffect};
use super::mode::{ModeId, PreferenceMode};
use super::school_rules::{SchoolCondition, SchoolImpact, SchoolRule};
use super::weights::Weights;
use crate::domain::indices::{LEASE_CRITICAL_YEARS, LEASE_HIGH_YEARS, LEASE_MODERATE_YEARS};

/// Price gap above which a cost-first buyer is warned.
pub const COST_FIRST_PRICE_GAP: f64 = 150_000.0;

/// EPI at or above which a low-school-pressure buyer is warned.
pub const LOW_PRESSURE_EPI_CEILING: f64 = 70.0;

/// Points deducted from an area that will not hold up over a long holding period.
pub const LONG_TERM_LEASE_PENALTY: f64 = 10.0;

const LEASE_FINANCING_WARNING: &str =
    "{area} has a median remaining lease of {value} years, below the point where loans are cut back.";
const LEASE_CRITICAL_WARNING: &str =
    "{area} has a median remaining lease of only {value} years; resale and financing will be heavily restricted.";
const LEASE_CRITICAL_OVERRIDE: &str =
    "{area}'s median remaining lease of {value} years rules it out for this priority.";
const LEASE_DECAY_PENALTY: &str =
    "{area}'s median remaining lease of {value} years will erode noticeably over a long hold.";
const PRICE_GAP_WARNING: &str =
    "{area} costs {value} more at the median; check this fits the budget before anything else.";
const EPI_CEILING_WARNING: &str =
    "{area} has high education pressure (EPI {value}); expect stiff competition for school places.";

/// Every preference mode, constructed once.
#[derive(Debug, Clone)]
pub struct PreferenceCatalog {
    modes: [PreferenceMode; 6],
}

static STANDARD_CATALOG: Lazy<PreferenceCatalog> = Lazy::new(|| PreferenceCatalog {
    modes: ModeId::ALL.map(define_mode),
});

impl PreferenceCatalog {
    pub fn standard() -> &'static PreferenceCatalog {
        &STANDARD_CATALOG
    }

    pub fn get(&self, id: ModeId) -> &PreferenceMode {
        &self.modes[id.index()]
    }

    pub fn modes(&self) -> impl Iterator<Item = &PreferenceMode> {
        self.modes.iter()
    }

    /// The mode for a lens, switched to long-term when requested and allowed.
    pub fn resolve(&self, lens: ModeId, long_term: bool) -> &PreferenceMode {
        if long_term && lens.yields_to_long_term() {
            self.get(ModeId::LongTerm)
        } else {
            self.get(lens)
        }
    }
}

fn define_mode(id: ModeId) -> PreferenceMode {
    match id {
        ModeId::CostFirst => PreferenceMode::new(id, Weights::new(0.55, 0.25, 0.15, 0.05), 3)
            .with_hard_rule(HardRule::new(
                HardRuleCondition::PriceGapAbove(COST_FIRST_PRICE_GAP),
                RuleEffect::Warning,
                PRICE_GAP_WARNING,
            ))
            .with_school_rule(SchoolRule::new(
                SchoolCondition::EpiGapAtLeast(20.0),
                SchoolImpact::Minor,
            )),

        ModeId::LeaseSafetyFirst => PreferenceMode::new(id, Weights::new(0.20, 0.50, 0.15, 0.15), 4)
            .with_hard_rule(HardRule::new(
                HardRuleCondition::LeaseBelow(LEASE_HIGH_YEARS),
                RuleEffect::Warning,
                LEASE_FINANCING_WARNING,
            ))
            .with_hard_rule(HardRule::new(
                HardRuleCondition::LeaseBelow(LEASE_CRITICAL_YEARS),
                RuleEffect::Override,
                LEASE_CRITICAL_OVERRIDE,
            ))
            .with_school_rule(SchoolRule::new(
                SchoolCondition::EpiGapAtLeast(20.0),
                SchoolImpact::Minor,
            ))
            .with_school_rule(SchoolRule::new(
                SchoolCondition::EitherLevelHigh,
                SchoolImpact::Significant,
            )),

        ModeId::LowSchoolPressure => PreferenceMode::new(id, Weights::new(0.20, 0.15, 0.50, 0.15), 4)
            .with_hard_rule(HardRule::new(
                HardRuleCondition::EpiAtLeast(LOW_PRESSURE_EPI_CEILING),
                RuleEffect::Warning,
                EPI_CEILING_WARNING,
            ))
            .with_school_rule(SchoolRule::new(
                SchoolCondition::EpiGapAtLeast(10.0),
                SchoolImpact::Significant,
            ))
            .with_school_rule(SchoolRule::new(
                SchoolCondition::EitherLevelHigh,
                SchoolImpact::Significant,
            ))
            .with_school_rule(SchoolRule::new(
                SchoolCondition::LevelsDiffer,
                SchoolImpact::Decisive,
            )),

        ModeId::Balanced => PreferenceMode::new(id, Weights::new(0.30, 0.30, 0.25, 0.15), 4)
            .with_hard_rule(HardRule::new(
                HardRuleCondition::LeaseBelow(LEASE_CRITICAL_YEARS),
                RuleEffect::Warning,
                LEASE_CRITICAL_WARNING,
            ))
            .with_school_rule(SchoolRule::new(
                SchoolCondition::EpiGapAtLeast(10.0),
                SchoolImpact::Minor,
            ))
            .with_school_rule(SchoolRule::new(
                SchoolCondition::LevelsDiffer,
                SchoolImpact::Significant,
            )),

        ModeId::LongTerm => PreferenceMode::new(id, Weights::new(0.20, 0.40, 0.15, 0.25), 4)
            .with_hard_rule(HardRule::new(
                HardRuleCondition::LeaseBelow(LEASE_MODERATE_YEARS),
                RuleEffect::Penalty(LONG_TERM_LEASE_PENALTY),
                LEASE_DECAY_PENALTY,
            ))
            .with_hard_rule(HardRule::new(
                HardRuleCondition::LeaseBelow(LEASE_CRITICAL_YEARS),
                RuleEffect::Override,
                LEASE_CRITICAL_OVERRIDE,
            ))
            .with_school_rule(SchoolRule::new(
                SchoolCondition::EpiGapAtLeast(15.0),
                SchoolImpact::Minor,
            ))
            .with_school_rule(SchoolRule::new(
                SchoolCondition::LevelsDiffer,
                SchoolImpact::Significant,
            )),

        ModeId::RentalYield => {
            PreferenceMode::new(id, Weights::new(0.30, 0.20, 0.05, 0.15).with_rent(0.30), 4)
                .with_hard_rule(HardRule::new(
                    HardRuleCondition::LeaseBelow(LEASE_HIGH_YEARS),
                    RuleEffect::Warning,
                    LEASE_FINANCING_WARNING,
                ))
                .with_school_rule(SchoolRule::new(
                    SchoolCondition::EpiGapAtLeast(20.0),
                    SchoolImpact::Minor,
                ))
        }
    }
}

/// Looks up the mode for a lens id, switching to long-term when `long_term` is set.
///
/// Unknown lens ids fall back to the balanced mode. The low-school-pressure
/// lens is never replaced by long-term.
pub fn get_preference_mode(lens: &str, long_term: bool) -> PreferenceMode {
    let id = match lens.parse::<ModeId>() {
        Ok(id) => id,
        Err(err) => {
            tracing::debug!(lens, error = %err, "unknown lens, using balanced");
            ModeId::Balanced
        }
    };
    PreferenceCatalog::standard().resolve(id, long_term).clone()
}
