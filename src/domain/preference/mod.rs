//! Preference module - Turning what the buyer cares about into weights and rules.
//!
//! - `weights` - Weight vectors and signed adjustments
//! - `mode` / `catalog` - Named preference modes and their fixed table
//! - `family` - Family questionnaire to rule profile mapping
//! - `hard_rules` / `school_rules` - Conditions evaluated against a comparison

mod catalog;
mod family;
mod hard_rules;
mod metrics;
mod mode;
mod school_rules;
mod weights;

pub use catalog::{
    get_preference_mode, PreferenceCatalog, COST_FIRST_PRICE_GAP, LONG_TERM_LEASE_PENALTY,
    LOW_PRESSURE_EPI_CEILING,
};
pub use family::{
    apply_rule_profile, map_family_profile_to_rule_profile, resolve_rule_profile_mode,
    select_preference_mode,
    FamilyProfile, HoldingHorizon, LifeStage, RuleProfile, SchoolSensitivity, ValuePriority,
    MAX_TOTAL_DELTA,
};
pub use hard_rules::{check_hard_rules, HardRule, HardRuleCondition, HardRuleViolation, RuleEffect};
pub use metrics::{ComparisonMetrics, SideMetrics};
pub use mode::{ModeId, PreferenceMode};
pub use school_rules::{evaluate_school_rules, SchoolCondition, SchoolImpact, SchoolRule};
pub use weights::{Dimension, WeightDeltas, Weights, WEIGHT_SUM_TOLERANCE};
