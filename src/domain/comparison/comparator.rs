//! Comparator - Scores two areas against each other and writes the verdict.

use super::bullets::build_bullets;
use super::context::{AreaInput, ComparisonContext, DimensionPairs};
use super::headline::select_headline;
use super::horizon::apply_horizon;
use super::normalization::{normalize_pair, Better, PairScores};
use super::post_process::{apply_post_processing, VerdictDraft};
use super::result::{
    ComparisonResult, Confidence, DataCoverage, DimensionScores, RawDeltas, SideCoverage,
};
use super::templates::{fill, hint_template, HintKind};
use super::thresholds::ComparisonThresholds;
use crate::domain::foundation::{AreaSide, IndexScore};
use crate::domain::preference::{
    check_hard_rules, evaluate_school_rules, ComparisonMetrics, Dimension, HardRuleViolation,
    HoldingHorizon, PreferenceMode, RuleEffect, RuleProfile, SideMetrics, Weights,
};

/// Pairwise comparison engine.
///
/// Holds only read-only thresholds; every call is independent.
#[derive(Debug, Clone, Default)]
pub struct Comparator {
    thresholds: ComparisonThresholds,
}

impl Comparator {
    pub fn new(thresholds: ComparisonThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ComparisonThresholds {
        &self.thresholds
    }

    /// Compares area A against area B.
    ///
    /// `mode` is the effective mode (any rule profile deltas already applied);
    /// `rule_profile`, when present, only frames the headline.
    ///
    /// # Algorithm
    /// 1. Raw A − B deltas for price, lease, EPI and CBI
    /// 2. Pairwise min-max per dimension (price, EPI and volatility inverted)
    /// 3. Mode weights, rent dropped when yield is unknown, horizon multipliers, renormalised
    /// 4. Overall = weighted sum, less any hard-rule penalties (floored at 0)
    /// 5. Confidence from the overall gap
    /// 6. Headline, then bullets truncated to the mode's budget
    /// 7. Post-processing rules (hard-rule outcomes, school mention)
    ///
    /// # Edge Cases
    /// - Missing EPI on either side: both school scores are 50
    /// - Missing optional data never fails; it is reported as not available
    pub fn compare(
        &self,
        a: &AreaInput,
        b: &AreaInput,
        mode: &PreferenceMode,
        rule_profile: Option<&RuleProfile>,
        horizon: HoldingHorizon,
    ) -> ComparisonResult {
        let ctx = self.score(a, b, mode, rule_profile, horizon);

        let mut bullets = build_bullets(&ctx);
        bullets.truncate(mode.max_bullets);

        let mut draft = VerdictDraft {
            headline: select_headline(&ctx),
            bullets,
            decision_hint: verdict_hint(&ctx),
            overridden: false,
            warnings: Vec::new(),
        };
        apply_post_processing(&ctx, &mut draft);

        tracing::debug!(
            area_a = %a.profile.area_id(),
            area_b = %b.profile.area_id(),
            mode = %mode.id,
            overall_a = ctx.overall_a.value(),
            overall_b = ctx.overall_b.value(),
            confidence = %ctx.confidence,
            overridden = draft.overridden,
            "comparison completed"
        );

        ComparisonResult {
            area_a: a.profile.area_id().clone(),
            area_b: b.profile.area_id().clone(),
            mode: mode.id,
            horizon,
            weights: ctx.weights,
            scores_a: side_scores(&ctx.pairs, AreaSide::A),
            scores_b: side_scores(&ctx.pairs, AreaSide::B),
            overall_a: ctx.overall_a,
            overall_b: ctx.overall_b,
            winner: ctx.winner,
            confidence: ctx.confidence,
            headline: draft.headline,
            bullets: draft.bullets,
            decision_hint: draft.decision_hint,
            overridden: draft.overridden,
            warnings: draft.warnings,
            school_impact: ctx.school_impact,
            deltas: ctx.deltas,
            data_coverage: ctx.coverage,
            landscape_a: a.landscape.clone(),
            landscape_b: b.landscape.clone(),
        }
    }

    /// Steps 1-5: everything numeric.
    fn score<'a>(
        &'a self,
        a: &'a AreaInput,
        b: &'a AreaInput,
        mode: &'a PreferenceMode,
        rule_profile: Option<&'a RuleProfile>,
        horizon: HoldingHorizon,
    ) -> ComparisonContext<'a> {
        let metrics_a = a.profile.metrics();
        let metrics_b = b.profile.metrics();

        let epi_a = a.epi.as_ref().map(|e| e.epi().value());
        let epi_b = b.epi.as_ref().map(|e| e.epi().value());
        let cbi_a = a.cbi.as_ref().map(|c| c.cbi.value());
        let cbi_b = b.cbi.as_ref().map(|c| c.cbi.value());
        let yield_a = a.profile.gross_rental_yield();
        let yield_b = b.profile.gross_rental_yield();

        let deltas = RawDeltas {
            price: metrics_a.median_price - metrics_b.median_price,
            lease_years: metrics_a.median_lease_years - metrics_b.median_lease_years,
            epi: both(epi_a, epi_b).map(|(x, y)| x - y),
            cbi: both(cbi_a, cbi_b).map(|(x, y)| x - y),
        };

        let coverage = DataCoverage {
            epi: SideCoverage::new(epi_a.is_some(), epi_b.is_some()),
            cbi: SideCoverage::new(cbi_a.is_some(), cbi_b.is_some()),
            landscape: SideCoverage::new(a.landscape.is_some(), b.landscape.is_some()),
            rent: SideCoverage::new(yield_a.is_some(), yield_b.is_some()),
        };

        let pairs = DimensionPairs {
            cost: normalize_pair(metrics_a.median_price, metrics_b.median_price, Better::Lower),
            lease: normalize_pair(
                metrics_a.median_lease_years,
                metrics_b.median_lease_years,
                Better::Higher,
            ),
            school: both(epi_a, epi_b)
                .map(|(x, y)| normalize_pair(x, y, Better::Lower))
                .unwrap_or(PairScores::EVEN),
            stability: normalize_pair(metrics_a.volatility, metrics_b.volatility, Better::Lower),
            rent: both(yield_a, yield_b)
                .map(|(x, y)| normalize_pair(x, y, Better::Higher)),
        };

        let base = if pairs.rent.is_some() {
            mode.weights
        } else {
            mode.weights.without(Dimension::Rent)
        };
        let weights = apply_horizon(&base, horizon);

        let metrics = ComparisonMetrics::new(
            SideMetrics::from_profile(&a.profile, a.epi.as_ref()),
            SideMetrics::from_profile(&b.profile, b.epi.as_ref()),
        );
        let violations = check_hard_rules(&metrics, mode);
        let school_impact = evaluate_school_rules(&metrics, &mode.school_rules);

        let overall_a = penalized(weighted_overall(&pairs, &weights, AreaSide::A), &violations, AreaSide::A);
        let overall_b = penalized(weighted_overall(&pairs, &weights, AreaSide::B), &violations, AreaSide::B);

        let winner = if overall_a > overall_b {
            Some(AreaSide::A)
        } else if overall_b > overall_a {
            Some(AreaSide::B)
        } else {
            None
        };
        let confidence = Confidence::classify(overall_a.value() - overall_b.value(), &self.thresholds);

        if epi_a.is_none() || epi_b.is_none() {
            tracing::debug!(area_a = %metrics_a.area_id, area_b = %metrics_b.area_id, "school dimension scored neutral");
        }

        ComparisonContext {
            a,
            b,
            mode,
            rule_profile,
            horizon,
            thresholds: &self.thresholds,
            metrics,
            deltas,
            coverage,
            weights,
            pairs,
            overall_a,
            overall_b,
            winner,
            confidence,
            violations,
            school_impact,
        }
    }
}

/// Compares two areas with the default thresholds.
pub fn compare(
    a: &AreaInput,
    b: &AreaInput,
    mode: &PreferenceMode,
    rule_profile: Option<&RuleProfile>,
    horizon: HoldingHorizon,
) -> ComparisonResult {
    Comparator::default().compare(a, b, mode, rule_profile, horizon)
}

fn both(a: Option<f64>, b: Option<f64>) -> Option<(f64, f64)> {
    Some((a?, b?))
}

fn weighted_overall(pairs: &DimensionPairs, weights: &Weights, side: AreaSide) -> f64 {
    Dimension::ALL
        .iter()
        .filter_map(|d| pairs.get(*d).map(|pair| weights.get(*d) * pair.side(side).value()))
        .sum()
}

fn penalized(overall: f64, violations: &[HardRuleViolation], side: AreaSide) -> IndexScore {
    let penalty: f64 = violations
        .iter()
        .filter(|v| v.side == side)
        .filter_map(|v| match v.effect {
            RuleEffect::Penalty(points) => Some(points),
            _ => None,
        })
        .sum();
    IndexScore::new((overall - penalty).max(0.0))
}

fn side_scores(pairs: &DimensionPairs, side: AreaSide) -> DimensionScores {
    DimensionScores {
        cost: pairs.cost.side(side),
        lease: pairs.lease.side(side),
        school: pairs.school.side(side),
        stability: pairs.stability.side(side),
        rent: pairs.rent.map(|r| r.side(side)),
    }
}

fn verdict_hint(ctx: &ComparisonContext<'_>) -> String {
    let mode = ctx.mode.id.as_str().replace('_', " ");
    match ctx.winner {
        Some(winner) if ctx.confidence != Confidence::Balanced => fill(
            hint_template(HintKind::Verdict(ctx.confidence)),
            &[("winner", ctx.name(winner)), ("mode", &mode)],
        ),
        _ => fill(
            hint_template(HintKind::Verdict(Confidence::Balanced)),
            &[("mode", &mode)],
        ),
    }
}

#[cfg(test)]
#[path = "comparator_test.rs"]
mod comparator_test;
