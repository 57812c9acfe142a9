//! Family profile - Structured questionnaire mapped to a rule profile.
//!
//! A family profile picks a base mode and accumulates small additive weight
//! adjustments. The total adjustment is capped so that a profile can tilt a
//! mode but never replace it.

use serde::{Deserialize, Serialize};

use super::catalog::{get_preference_mode, PreferenceCatalog};
use super::mode::{ModeId, PreferenceMode};
use super::weights::{Dimension, WeightDeltas};

/// Largest total absolute adjustment a family profile may apply.
pub const MAX_TOTAL_DELTA: f64 = 0.30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeStage {
    SingleOrCouple,
    YoungChildren,
    SchoolAgeChildren,
    EmptyNest,
}

/// How long the buyer expects to hold the home.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldingHorizon {
    Short,
    #[default]
    Medium,
    Long,
}

/// What the buyer values more when cost and value pull apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuePriority {
    LowestEntryCost,
    Balanced,
    LongTermValue,
    SchoolAccess,
}

impl ValuePriority {
    fn base_mode(&self) -> ModeId {
        match self {
            ValuePriority::LowestEntryCost => ModeId::CostFirst,
            ValuePriority::Balanced => ModeId::Balanced,
            ValuePriority::LongTermValue => ModeId::LeaseSafetyFirst,
            ValuePriority::SchoolAccess => ModeId::LowSchoolPressure,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchoolSensitivity {
    Low,
    #[default]
    Medium,
    High,
}

/// Answers to the family questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyProfile {
    pub life_stage: LifeStage,
    #[serde(default)]
    pub holding_horizon: HoldingHorizon,
    pub value_priority: ValuePriority,
    #[serde(default)]
    pub school_sensitivity: SchoolSensitivity,
}

/// A base mode plus bounded weight adjustments derived from a family profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleProfile {
    pub base_mode: ModeId,
    pub deltas: WeightDeltas,
    pub life_stage: LifeStage,
    pub holding_horizon: HoldingHorizon,
}

/// Maps questionnaire answers to a rule profile.
///
/// # Algorithm
/// - Base mode from the value priority; a long horizon switches it to
///   long-term unless the base is the low-school-pressure mode
/// - Deltas accumulate from life stage, horizon and school sensitivity
/// - If the total absolute delta exceeds [`MAX_TOTAL_DELTA`], every delta is
///   scaled down proportionally
pub fn map_family_profile_to_rule_profile(profile: &FamilyProfile) -> RuleProfile {
    let mut base_mode = profile.value_priority.base_mode();
    if profile.holding_horizon == HoldingHorizon::Long && base_mode.yields_to_long_term() {
        base_mode = ModeId::LongTerm;
    }

    let mut deltas = WeightDeltas::default();

    match profile.life_stage {
        LifeStage::SingleOrCouple => deltas.add(Dimension::Cost, 0.05),
        LifeStage::YoungChildren => {
            deltas.add(Dimension::School, 0.05);
            deltas.add(Dimension::Stability, 0.05);
        }
        LifeStage::SchoolAgeChildren => deltas.add(Dimension::School, 0.10),
        LifeStage::EmptyNest => {
            deltas.add(Dimension::School, -0.10);
            deltas.add(Dimension::Cost, 0.05);
        }
    }

    match profile.holding_horizon {
        HoldingHorizon::Short => {
            deltas.add(Dimension::Cost, 0.05);
            deltas.add(Dimension::Lease, -0.05);
        }
        HoldingHorizon::Medium => {}
        HoldingHorizon::Long => {
            deltas.add(Dimension::Lease, 0.10);
            deltas.add(Dimension::Stability, 0.05);
        }
    }

    match profile.school_sensitivity {
        SchoolSensitivity::High => deltas.add(Dimension::School, 0.10),
        SchoolSensitivity::Medium => {}
        SchoolSensitivity::Low => deltas.add(Dimension::School, -0.05),
    }

    let deltas = deltas.capped(MAX_TOTAL_DELTA);
    tracing::debug!(base_mode = %base_mode, magnitude = deltas.magnitude(), "family profile mapped");

    RuleProfile {
        base_mode,
        deltas,
        life_stage: profile.life_stage,
        holding_horizon: profile.holding_horizon,
    }
}

/// Applies the profile's deltas to a mode: add, clamp to [0, 1], renormalise.
pub fn apply_rule_profile(mode: &PreferenceMode, rule_profile: &RuleProfile) -> PreferenceMode {
    mode.with_weights(mode.weights.adjusted(&rule_profile.deltas))
}

/// The base mode of the profile with its deltas applied.
pub fn resolve_rule_profile_mode(rule_profile: &RuleProfile) -> PreferenceMode {
    let base = PreferenceCatalog::standard().get(rule_profile.base_mode);
    apply_rule_profile(base, rule_profile)
}

/// Picks the effective mode for a request.
///
/// A family profile, when given, takes precedence over the lens and the
/// long-term flag; the returned rule profile then frames the headline.
pub fn select_preference_mode(
    lens: &str,
    long_term: bool,
    family: Option<&FamilyProfile>,
) -> (PreferenceMode, Option<RuleProfile>) {
    match family {
        Some(family) => {
            let rule_profile = map_family_profile_to_rule_profile(family);
            (resolve_rule_profile_mode(&rule_profile), Some(rule_profile))
        }
        None => (get_preference_mode(lens, long_term), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(
        life_stage: LifeStage,
        holding_horizon: HoldingHorizon,
        value_priority: ValuePriority,
        school_sensitivity: SchoolSensitivity,
    ) -> FamilyProfile {
        FamilyProfile {
            life_stage,
            holding_horizon,
            value_priority,
            school_sensitivity,
        }
    }

    #[test]
    fn value_priority_picks_base_mode() {
        let cases = [
            (ValuePriority::LowestEntryCost, ModeId::CostFirst),
            (ValuePriority::Balanced, ModeId::Balanced),
            (ValuePriority::LongTermValue, ModeId::LeaseSafetyFirst),
            (ValuePriority::SchoolAccess, ModeId::LowSchoolPressure),
        ];
        for (priority, expected) in cases {
            let p = profile(LifeStage::SingleOrCouple, HoldingHorizon::Medium, priority, SchoolSensitivity::Medium);
            assert_eq!(map_family_profile_to_rule_profile(&p).base_mode, expected);
        }
    }

    #[test]
    fn long_horizon_switches_to_long_term() {
        let p = profile(
            LifeStage::SingleOrCouple,
            HoldingHorizon::Long,
            ValuePriority::LowestEntryCost,
            SchoolSensitivity::Medium,
        );
        assert_eq!(map_family_profile_to_rule_profile(&p).base_mode, ModeId::LongTerm);
    }

    #[test]
    fn long_horizon_keeps_school_access() {
        let p = profile(
            LifeStage::SchoolAgeChildren,
            HoldingHorizon::Long,
            ValuePriority::SchoolAccess,
            SchoolSensitivity::High,
        );
        assert_eq!(map_family_profile_to_rule_profile(&p).base_mode, ModeId::LowSchoolPressure);
    }

    #[test]
    fn deltas_accumulate_from_each_answer() {
        let p = profile(
            LifeStage::YoungChildren,
            HoldingHorizon::Short,
            ValuePriority::Balanced,
            SchoolSensitivity::Medium,
        );
        let rule = map_family_profile_to_rule_profile(&p);
        assert!((rule.deltas.school - 0.05).abs() < 1e-12);
        assert!((rule.deltas.stability - 0.05).abs() < 1e-12);
        assert!((rule.deltas.cost - 0.05).abs() < 1e-12);
        assert!((rule.deltas.lease + 0.05).abs() < 1e-12);
    }

    #[test]
    fn total_delta_is_capped() {
        // school +0.10 +0.10, lease +0.10, stability +0.05 = 0.35 before capping
        let p = profile(
            LifeStage::SchoolAgeChildren,
            HoldingHorizon::Long,
            ValuePriority::SchoolAccess,
            SchoolSensitivity::High,
        );
        let rule = map_family_profile_to_rule_profile(&p);
        assert!((rule.deltas.magnitude() - MAX_TOTAL_DELTA).abs() < 1e-12);
        assert!(rule.deltas.school > rule.deltas.lease);
    }

    #[test]
    fn applying_profile_keeps_weights_normalized() {
        let base = PreferenceCatalog::standard().get(ModeId::CostFirst);
        let rule = RuleProfile {
            base_mode: ModeId::CostFirst,
            deltas: WeightDeltas {
                school: 0.10,
                lease: 0.05,
                ..Default::default()
            },
            life_stage: LifeStage::SchoolAgeChildren,
            holding_horizon: HoldingHorizon::Medium,
        };
        let adjusted = apply_rule_profile(base, &rule);
        assert!(adjusted.weights.is_normalized());
        assert_eq!(adjusted.id, ModeId::CostFirst);
        assert_eq!(adjusted.hard_rules, base.hard_rules);
    }

    #[test]
    fn empty_nest_lowers_school_weight() {
        let p = profile(
            LifeStage::EmptyNest,
            HoldingHorizon::Medium,
            ValuePriority::Balanced,
            SchoolSensitivity::Low,
        );
        let mode = resolve_rule_profile_mode(&map_family_profile_to_rule_profile(&p));
        let balanced = PreferenceCatalog::standard().get(ModeId::Balanced);
        assert!(mode.weights.school < balanced.weights.school);
        assert!(mode.weights.is_normalized());
    }

    #[test]
    fn profile_deserializes_with_defaults() {
        let json = r#"{"life_stage": "young_children", "value_priority": "balanced"}"#;
        let p: FamilyProfile = serde_json::from_str(json).unwrap();
        assert_eq!(p.holding_horizon, HoldingHorizon::Medium);
        assert_eq!(p.school_sensitivity, SchoolSensitivity::Medium);
    }

    #[test]
    fn family_profile_takes_precedence_over_lens() {
        let p = profile(
            LifeStage::SchoolAgeChildren,
            HoldingHorizon::Medium,
            ValuePriority::SchoolAccess,
            SchoolSensitivity::High,
        );
        let (mode, rule_profile) = select_preference_mode("cost_first", true, Some(&p));
        assert_eq!(mode.id, ModeId::LowSchoolPressure);
        assert!(rule_profile.is_some());
        assert!(mode.weights.is_normalized());
    }

    #[test]
    fn lens_used_without_family_profile() {
        let (mode, rule_profile) = select_preference_mode("cost_first", false, None);
        assert_eq!(mode.id, ModeId::CostFirst);
        assert!(rule_profile.is_none());
    }
}
