//! Hard rules - Fixed conditions a preference mode refuses to trade away.

use serde::Serialize;

use super::metrics::ComparisonMetrics;
use super::mode::PreferenceMode;
use crate::domain::foundation::{format_currency, format_years, AreaSide};

/// What a hard rule checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "threshold", rename_all = "snake_case")]
pub enum HardRuleCondition {
    /// An area's median remaining lease is below the threshold (years).
    LeaseBelow(f64),
    /// The two median prices differ by more than the threshold.
    PriceGapAbove(f64),
    /// An area's EPI is at or above the threshold.
    EpiAtLeast(f64),
}

/// What happens when a hard rule triggers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "points", rename_all = "snake_case")]
pub enum RuleEffect {
    /// Attach the message.
    Warning,
    /// Subtract points from the violating area's overall score.
    Penalty(f64),
    /// Steer the decision hint to the other area.
    Override,
}

/// A condition, its effect, and a message template using `{area}` and `{value}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HardRule {
    pub condition: HardRuleCondition,
    pub effect: RuleEffect,
    pub message: &'static str,
}

impl HardRule {
    pub const fn new(condition: HardRuleCondition, effect: RuleEffect, message: &'static str) -> Self {
        Self {
            condition,
            effect,
            message,
        }
    }

    /// Returns one violation per offending side, A before B.
    pub fn evaluate(&self, metrics: &ComparisonMetrics) -> Vec<HardRuleViolation> {
        match self.condition {
            HardRuleCondition::LeaseBelow(threshold) => [AreaSide::A, AreaSide::B]
                .into_iter()
                .filter(|side| metrics.side(*side).median_lease_years < threshold)
                .map(|side| {
                    let value = format_years(metrics.side(side).median_lease_years);
                    self.violation(metrics, side, &value)
                })
                .collect(),
            HardRuleCondition::EpiAtLeast(threshold) => [AreaSide::A, AreaSide::B]
                .into_iter()
                .filter_map(|side| {
                    let epi = metrics.side(side).epi?;
                    (epi.value() >= threshold)
                        .then(|| self.violation(metrics, side, &format!("{:.0}", epi.value())))
                })
                .collect(),
            HardRuleCondition::PriceGapAbove(threshold) => {
                let gap = metrics.price_gap();
                match metrics.pricier_side() {
                    Some(side) if gap > threshold => {
                        vec![self.violation(metrics, side, &format_currency(gap))]
                    }
                    _ => Vec::new(),
                }
            }
        }
    }

    fn violation(&self, metrics: &ComparisonMetrics, side: AreaSide, value: &str) -> HardRuleViolation {
        let message = self
            .message
            .replace("{area}", metrics.side(side).area_id.as_str())
            .replace("{value}", value);
        HardRuleViolation {
            effect: self.effect,
            side,
            message,
        }
    }
}

/// A triggered hard rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HardRuleViolation {
    pub effect: RuleEffect,
    /// The area that violated the rule.
    pub side: AreaSide,
    pub message: String,
}

/// Evaluates every hard rule of the mode, in declaration order.
pub fn check_hard_rules(metrics: &ComparisonMetrics, mode: &PreferenceMode) -> Vec<HardRuleViolation> {
    let violations: Vec<HardRuleViolation> = mode
        .hard_rules
        .iter()
        .flat_map(|rule| rule.evaluate(metrics))
        .collect();

    if !violations.is_empty() {
        tracing::debug!(mode = %mode.id, count = violations.len(), "hard rules triggered");
    }
    violations
}
