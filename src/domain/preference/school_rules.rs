//! School rules - How much the school picture should weigh on the verdict.

use serde::{Deserialize, Serialize};

use super::metrics::ComparisonMetrics;
use crate::domain::indices::PressureLevel;

/// How strongly the school difference bears on the decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchoolImpact {
    Minor,
    Significant,
    Decisive,
}

/// What a school rule checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "points", rename_all = "snake_case")]
pub enum SchoolCondition {
    /// Both EPIs known and at least this many points apart.
    EpiGapAtLeast(f64),
    /// Either known EPI is at the high level.
    EitherLevelHigh,
    /// Both EPIs known and at different levels.
    LevelsDiffer,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SchoolRule {
    pub condition: SchoolCondition,
    pub impact: SchoolImpact,
}

impl SchoolRule {
    pub const fn new(condition: SchoolCondition, impact: SchoolImpact) -> Self {
        Self { condition, impact }
    }

    pub fn applies(&self, metrics: &ComparisonMetrics) -> bool {
        let level_a = metrics.a.pressure_level();
        let level_b = metrics.b.pressure_level();

        match self.condition {
            SchoolCondition::EpiGapAtLeast(points) => {
                metrics.epi_gap().is_some_and(|gap| gap >= points)
            }
            SchoolCondition::EitherLevelHigh => {
                level_a == Some(PressureLevel::High) || level_b == Some(PressureLevel::High)
            }
            SchoolCondition::LevelsDiffer => match (level_a, level_b) {
                (Some(a), Some(b)) => a != b,
                _ => false,
            },
        }
    }
}

/// The strongest impact among the rules that apply; `None` when none do.
pub fn evaluate_school_rules(metrics: &ComparisonMetrics, rules: &[SchoolRule]) -> Option<SchoolImpact> {
    rules
        .iter()
        .filter(|rule| rule.applies(metrics))
        .map(|rule| rule.impact)
        .max()
}
