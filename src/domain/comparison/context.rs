//! Inputs and scored facts shared by the comparator's text stages.

use super::normalization::PairScores;
use super::result::{Confidence, DataCoverage, RawDeltas};
use super::thresholds::ComparisonThresholds;
use crate::domain::area::AreaProfile;
use crate::domain::foundation::{AreaSide, IndexScore};
use crate::domain::indices::{CommuteBurdenIndex, EducationPressureIndex, LandscapeSummary};
use crate::domain::preference::{
    ComparisonMetrics, Dimension, HardRuleViolation, HoldingHorizon, PreferenceMode, RuleProfile,
    SchoolImpact, Weights,
};

/// One area's required profile plus whatever optional data could be resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaInput {
    pub profile: AreaProfile,
    pub epi: Option<EducationPressureIndex>,
    pub landscape: Option<LandscapeSummary>,
    pub cbi: Option<CommuteBurdenIndex>,
}

impl AreaInput {
    pub fn new(profile: AreaProfile) -> Self {
        Self {
            profile,
            epi: None,
            landscape: None,
            cbi: None,
        }
    }

    pub fn with_epi(mut self, epi: Option<EducationPressureIndex>) -> Self {
        self.epi = epi;
        self
    }

    pub fn with_landscape(mut self, landscape: Option<LandscapeSummary>) -> Self {
        self.landscape = landscape;
        self
    }

    pub fn with_cbi(mut self, cbi: Option<CommuteBurdenIndex>) -> Self {
        self.cbi = cbi;
        self
    }

    pub fn name(&self) -> &str {
        self.profile.area_id().as_str()
    }
}

/// Pairwise scores for every dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionPairs {
    pub cost: PairScores,
    pub lease: PairScores,
    pub school: PairScores,
    pub stability: PairScores,
    pub rent: Option<PairScores>,
}

impl DimensionPairs {
    pub fn get(&self, dimension: Dimension) -> Option<PairScores> {
        match dimension {
            Dimension::Cost => Some(self.cost),
            Dimension::Lease => Some(self.lease),
            Dimension::School => Some(self.school),
            Dimension::Stability => Some(self.stability),
            Dimension::Rent => self.rent,
        }
    }
}

/// Everything decided before any text is chosen.
#[derive(Debug)]
pub struct ComparisonContext<'a> {
    pub a: &'a AreaInput,
    pub b: &'a AreaInput,
    pub mode: &'a PreferenceMode,
    pub rule_profile: Option<&'a RuleProfile>,
    pub horizon: HoldingHorizon,
    pub thresholds: &'a ComparisonThresholds,
    pub metrics: ComparisonMetrics,
    pub deltas: RawDeltas,
    pub coverage: DataCoverage,
    pub weights: Weights,
    pub pairs: DimensionPairs,
    pub overall_a: IndexScore,
    pub overall_b: IndexScore,
    pub winner: Option<AreaSide>,
    pub confidence: Confidence,
    pub violations: Vec<HardRuleViolation>,
    pub school_impact: Option<SchoolImpact>,
}

impl<'a> ComparisonContext<'a> {
    pub fn side(&self, side: AreaSide) -> &'a AreaInput {
        match side {
            AreaSide::A => self.a,
            AreaSide::B => self.b,
        }
    }

    pub fn name(&self, side: AreaSide) -> &'a str {
        self.side(side).name()
    }

    /// True when both EPIs exist and their gap strictly exceeds the threshold.
    pub fn epi_gap_is_significant(&self) -> bool {
        self.deltas
            .epi
            .is_some_and(|gap| gap.abs() > self.thresholds.epi_significant)
    }

    /// The dimension contributing most to the winner's lead; earlier dimensions win ties.
    pub fn driver(&self, winner: AreaSide) -> Dimension {
        let mut best = Dimension::Cost;
        let mut best_contribution = f64::NEG_INFINITY;
        for dimension in Dimension::ALL {
            let Some(pair) = self.pairs.get(dimension) else {
                continue;
            };
            let lead = pair.side(winner).value() - pair.side(winner.other()).value();
            let contribution = self.weights.get(dimension) * lead;
            if contribution > best_contribution {
                best = dimension;
                best_contribution = contribution;
            }
        }
        best
    }
}
