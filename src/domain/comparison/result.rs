//! Comparison Result - The verdict for Area A vs Area B under one mode.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::thresholds::{ComparisonThresholds, Magnitude};
use super::templates::Topic;
use crate::domain::foundation::{AreaId, AreaSide, IndexScore};
use crate::domain::indices::LandscapeSummary;
use crate::domain::preference::{HoldingHorizon, ModeId, SchoolImpact, Weights};

/// How decisive the overall-score gap is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    ClearWinner,
    Balanced,
    DependsOnPreference,
}

impl Confidence {
    /// Classifies the absolute overall-score gap.
    pub fn classify(gap: f64, thresholds: &ComparisonThresholds) -> Self {
        let gap = gap.abs();
        if gap >= thresholds.clear_winner_gap {
            Confidence::ClearWinner
        } else if gap >= thresholds.preference_gap {
            Confidence::DependsOnPreference
        } else {
            Confidence::Balanced
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Confidence::ClearWinner => "clear_winner",
            Confidence::Balanced => "balanced",
            Confidence::DependsOnPreference => "depends_on_preference",
        };
        write!(f, "{}", s)
    }
}

/// One area's pairwise scores per dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionScores {
    pub cost: IndexScore,
    pub lease: IndexScore,
    pub school: IndexScore,
    pub stability: IndexScore,
    /// Absent when rental yield is not known for both areas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rent: Option<IndexScore>,
}

/// Raw A − B differences the verdict is based on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawDeltas {
    pub price: f64,
    pub lease_years: f64,
    pub epi: Option<f64>,
    pub cbi: Option<f64>,
}

/// Whether an optional input was present for each area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SideCoverage {
    pub a: bool,
    pub b: bool,
}

impl SideCoverage {
    pub fn new(a: bool, b: bool) -> Self {
        Self { a, b }
    }

    pub fn both(&self) -> bool {
        self.a && self.b
    }

    pub fn neither(&self) -> bool {
        !self.a && !self.b
    }

    /// The only side with data, when exactly one has it.
    pub fn only(&self) -> Option<AreaSide> {
        match (self.a, self.b) {
            (true, false) => Some(AreaSide::A),
            (false, true) => Some(AreaSide::B),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DataCoverage {
    pub epi: SideCoverage,
    pub cbi: SideCoverage,
    pub landscape: SideCoverage,
    pub rent: SideCoverage,
}

/// One trade-off line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeoffBullet {
    pub topic: Topic,
    /// `None` when the data needed to size the difference is missing.
    pub magnitude: Option<Magnitude>,
    /// The area this bullet favours, if any.
    pub favors: Option<AreaSide>,
    pub text: String,
}

/// Output of comparing two areas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub area_a: AreaId,
    pub area_b: AreaId,
    pub mode: ModeId,
    pub horizon: HoldingHorizon,
    /// Weights actually used after horizon and data-coverage adjustments.
    pub weights: Weights,
    pub scores_a: DimensionScores,
    pub scores_b: DimensionScores,
    pub overall_a: IndexScore,
    pub overall_b: IndexScore,
    /// `None` when the overall scores are exactly equal.
    pub winner: Option<AreaSide>,
    pub confidence: Confidence,
    pub headline: String,
    pub bullets: Vec<TradeoffBullet>,
    pub decision_hint: String,
    /// True when a hard rule steered the decision hint.
    pub overridden: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_impact: Option<SchoolImpact>,
    pub deltas: RawDeltas,
    pub data_coverage: DataCoverage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landscape_a: Option<LandscapeSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landscape_b: Option<LandscapeSummary>,
}

impl ComparisonResult {
    pub fn area(&self, side: AreaSide) -> &AreaId {
        match side {
            AreaSide::A => &self.area_a,
            AreaSide::B => &self.area_b,
        }
    }

    pub fn overall(&self, side: AreaSide) -> IndexScore {
        match side {
            AreaSide::A => self.overall_a,
            AreaSide::B => self.overall_b,
        }
    }

    pub fn mentions(&self, topic: Topic) -> bool {
        self.bullets.iter().any(|b| b.topic == topic)
    }
}
