//! Education Pressure Index (EPI) - School-admission competitiveness of an area.
//!
//! The composite is always recomputed from its four sub-scores:
//!
//! - **Demand pressure (D)**: share of schools in the high cutoff band, through a sigmoid
//! - **Choice constraint (C)**: how few schools there are to choose from
//! - **Uncertainty (U)**: year-over-year volatility of cutoff bands
//! - **Crowding (R)**: recent transaction volume against a reference maximum

use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde::Deserialize;
use std::fmt;

use super::school_landscape::{CutoffBand, SchoolLandscape};
use crate::domain::foundation::{AreaId, IndexScore};

pub const WEIGHT_DEMAND: f64 = 0.35;
pub const WEIGHT_CHOICE: f64 = 0.25;
pub const WEIGHT_UNCERTAINTY: f64 = 0.20;
pub const WEIGHT_CROWDING: f64 = 0.20;

/// High-band share at which demand pressure sits at the sigmoid midpoint.
pub const DEMAND_SIGMOID_CENTER: f64 = 0.30;
pub const DEMAND_SIGMOID_SCALE: f64 = 0.10;

/// School count at which choice stops being a constraint.
pub const CHOICE_REFERENCE_COUNT: f64 = 10.0;

/// Years of cutoff history considered for uncertainty.
pub const UNCERTAINTY_HISTORY_YEARS: usize = 3;

/// Largest possible stddev of band values {0, 0.5, 1}.
pub const UNCERTAINTY_DIVISOR: f64 = 0.5;

/// Transaction volume treated as maximally crowded.
pub const CROWDING_REFERENCE_VOLUME: f64 = 400.0;

/// Composite below this is low pressure.
pub const LEVEL_MEDIUM_FROM: f64 = 40.0;
/// Composite at or above this is high pressure.
pub const LEVEL_HIGH_FROM: f64 = 70.0;

/// Sub-score below this selects the "below" sentence.
pub const FACTOR_LOW_BAND: f64 = 35.0;
/// Sub-score above this selects the "above" sentence.
pub const FACTOR_HIGH_BAND: f64 = 65.0;

/// Education pressure classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressureLevel {
    Low,
    Medium,
    High,
}

impl PressureLevel {
    pub fn from_epi(epi: IndexScore) -> Self {
        if epi.value() >= LEVEL_HIGH_FROM {
            PressureLevel::High
        } else if epi.value() >= LEVEL_MEDIUM_FROM {
            PressureLevel::Medium
        } else {
            PressureLevel::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PressureLevel::Low => "low",
            PressureLevel::Medium => "medium",
            PressureLevel::High => "high",
        }
    }
}

impl fmt::Display for PressureLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The four EPI sub-scores, in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressureFactor {
    DemandPressure,
    ChoiceConstraint,
    Uncertainty,
    Crowding,
}

impl PressureFactor {
    pub const ALL: [PressureFactor; 4] = [
        PressureFactor::DemandPressure,
        PressureFactor::ChoiceConstraint,
        PressureFactor::Uncertainty,
        PressureFactor::Crowding,
    ];

    /// Parent-facing name of the factor.
    pub fn label(&self) -> &'static str {
        match self {
            PressureFactor::DemandPressure => "demand for popular schools",
            PressureFactor::ChoiceConstraint => "a limited choice of schools",
            PressureFactor::Uncertainty => "unpredictable cutoffs",
            PressureFactor::Crowding => "crowding from new families",
        }
    }
}

/// Where a sub-score falls relative to the sentence bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorBand {
    Below,
    Within,
    Above,
}

impl FactorBand {
    pub fn of(score: IndexScore) -> Self {
        if score.value() < FACTOR_LOW_BAND {
            FactorBand::Below
        } else if score.value() > FACTOR_HIGH_BAND {
            FactorBand::Above
        } else {
            FactorBand::Within
        }
    }
}

/// Education Pressure Index for one area.
#[derive(Debug, Clone, PartialEq)]
pub struct EducationPressureIndex {
    pub area_id: AreaId,
    pub demand_pressure: IndexScore,
    pub choice_constraint: IndexScore,
    pub uncertainty: IndexScore,
    pub crowding: IndexScore,
    pub school_count: usize,
}

impl EducationPressureIndex {
    /// Weighted composite of the four sub-scores.
    pub fn epi(&self) -> IndexScore {
        IndexScore::new(
            WEIGHT_DEMAND * self.demand_pressure.value()
                + WEIGHT_CHOICE * self.choice_constraint.value()
                + WEIGHT_UNCERTAINTY * self.uncertainty.value()
                + WEIGHT_CROWDING * self.crowding.value(),
        )
    }

    pub fn level(&self) -> PressureLevel {
        PressureLevel::from_epi(self.epi())
    }

    pub fn factor_score(&self, factor: PressureFactor) -> IndexScore {
        match factor {
            PressureFactor::DemandPressure => self.demand_pressure,
            PressureFactor::ChoiceConstraint => self.choice_constraint,
            PressureFactor::Uncertainty => self.uncertainty,
            PressureFactor::Crowding => self.crowding,
        }
    }

    /// Highest sub-score; ties go to the earlier factor.
    pub fn dominant_factor(&self) -> PressureFactor {
        let mut dominant = PressureFactor::DemandPressure;
        for factor in PressureFactor::ALL {
            if self.factor_score(factor) > self.factor_score(dominant) {
                dominant = factor;
            }
        }
        dominant
    }

    /// One-sentence explanation keyed by the dominant factor.
    pub fn explanation(&self) -> &'static str {
        dominant_sentence(self.dominant_factor())
    }

    /// Three or four parent-facing bullets.
    ///
    /// Factors outside the middle band come first (highest score first), then
    /// middle-band factors pad the list to at least three.
    pub fn why(&self) -> Vec<&'static str> {
        let mut scored: Vec<(PressureFactor, IndexScore, FactorBand)> = PressureFactor::ALL
            .iter()
            .map(|f| {
                let score = self.factor_score(*f);
                (*f, score, FactorBand::of(score))
            })
            .collect();

        // Stable sort keeps tie-break order for equal scores
        scored.sort_by(|a, b| b.1.value().total_cmp(&a.1.value()));

        let (mut notable, within): (Vec<_>, Vec<_>) =
            scored.into_iter().partition(|(_, _, band)| *band != FactorBand::Within);

        let wanted = notable.len().clamp(3, 4);
        notable.extend(within);
        notable
            .into_iter()
            .take(wanted)
            .map(|(factor, _, band)| why_sentence(factor, band))
            .collect()
    }
}

impl Serialize for EducationPressureIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("EducationPressureIndex", 11)?;
        state.serialize_field("area_id", &self.area_id)?;
        state.serialize_field("epi", &self.epi().rounded())?;
        state.serialize_field("level", &self.level())?;
        state.serialize_field("demand_pressure", &self.demand_pressure.rounded())?;
        state.serialize_field("choice_constraint", &self.choice_constraint.rounded())?;
        state.serialize_field("uncertainty", &self.uncertainty.rounded())?;
        state.serialize_field("crowding", &self.crowding.rounded())?;
        state.serialize_field("dominant_factor", &self.dominant_factor())?;
        state.serialize_field("explanation", self.explanation())?;
        state.serialize_field("why", &self.why())?;
        state.serialize_field("school_count", &self.school_count)?;
        state.end()
    }
}

/// EPI computation functions.
pub struct EducationPressureCalculator;

impl EducationPressureCalculator {
    /// Computes the EPI for a resolved landscape.
    ///
    /// `recent_volume` is the area's transaction count in the comparison window.
    ///
    /// # Edge Cases
    /// - No landscape: returns `None`
    /// - Zero schools: D = 50, C = 100, U = 50
    /// - No school with two or more years of history: U = 50
    /// - No volume (or zero): R = 50
    pub fn calculate(
        landscape: Option<&SchoolLandscape>,
        recent_volume: Option<u64>,
    ) -> Option<EducationPressureIndex> {
        let landscape = landscape?;

        let index = EducationPressureIndex {
            area_id: landscape.area_id.clone(),
            demand_pressure: Self::demand_pressure(landscape),
            choice_constraint: Self::choice_constraint(landscape.school_count()),
            uncertainty: Self::uncertainty(landscape),
            crowding: Self::crowding(recent_volume),
            school_count: landscape.school_count(),
        };

        tracing::debug!(
            area_id = %index.area_id,
            epi = index.epi().value(),
            pressure = %index.level(),
            "education pressure index computed"
        );

        Some(index)
    }

    /// Sigmoid of the high-band share, scaled to 0-100.
    pub fn demand_pressure(landscape: &SchoolLandscape) -> IndexScore {
        if landscape.schools.is_empty() {
            return IndexScore::NEUTRAL;
        }

        let high = landscape
            .schools
            .iter()
            .filter(|s| s.latest_cutoff().map(|c| c.band()) == Some(CutoffBand::High))
            .count();
        let share = high as f64 / landscape.schools.len() as f64;

        let z = (share - DEMAND_SIGMOID_CENTER) / DEMAND_SIGMOID_SCALE;
        IndexScore::new(100.0 / (1.0 + (-z).exp()))
    }

    /// `100 * (1 - min(1, ln(1+n) / ln(1+n_ref)))`.
    pub fn choice_constraint(school_count: usize) -> IndexScore {
        let ratio = (1.0 + school_count as f64).ln() / (1.0 + CHOICE_REFERENCE_COUNT).ln();
        IndexScore::new(100.0 * (1.0 - ratio.min(1.0)))
    }

    /// Mean per-school stddev of recent bands, scaled by the divisor.
    pub fn uncertainty(landscape: &SchoolLandscape) -> IndexScore {
        let deviations: Vec<f64> = landscape
            .schools
            .iter()
            .map(|s| s.recent_bands(UNCERTAINTY_HISTORY_YEARS))
            .filter(|bands| bands.len() >= 2)
            .map(|bands| population_std_dev(&bands.iter().map(|b| b.value()).collect::<Vec<_>>()))
            .collect();

        if deviations.is_empty() {
            return IndexScore::NEUTRAL;
        }

        let mean = deviations.iter().sum::<f64>() / deviations.len() as f64;
        IndexScore::new(mean / UNCERTAINTY_DIVISOR * 100.0)
    }

    /// Volume against the reference maximum.
    pub fn crowding(recent_volume: Option<u64>) -> IndexScore {
        match recent_volume {
            Some(volume) if volume > 0 => {
                IndexScore::new(volume as f64 / CROWDING_REFERENCE_VOLUME * 100.0)
            }
            _ => IndexScore::NEUTRAL,
        }
    }
}

/// Free-function form of [`EducationPressureCalculator::calculate`].
pub fn calculate_education_pressure_index(
    landscape: Option<&SchoolLandscape>,
    recent_volume: Option<u64>,
) -> Option<EducationPressureIndex> {
    EducationPressureCalculator::calculate(landscape, recent_volume)
}

fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

fn dominant_sentence(factor: PressureFactor) -> &'static str {
    match factor {
        PressureFactor::DemandPressure => {
            "Pressure here is driven mainly by how many nearby schools are heavily oversubscribed."
        }
        PressureFactor::ChoiceConstraint => {
            "Pressure here is driven mainly by having few schools to choose from."
        }
        PressureFactor::Uncertainty => {
            "Pressure here is driven mainly by cutoffs that swing from year to year."
        }
        PressureFactor::Crowding => {
            "Pressure here is driven mainly by the number of families moving into the area."
        }
    }
}

fn why_sentence(factor: PressureFactor, band: FactorBand) -> &'static str {
    match (factor, band) {
        (PressureFactor::DemandPressure, FactorBand::Above) => {
            "Several nearby schools sit in the most competitive cutoff band."
        }
        (PressureFactor::DemandPressure, FactorBand::Within) => {
            "Some nearby schools are competitive, but not most of them."
        }
        (PressureFactor::DemandPressure, FactorBand::Below) => {
            "Few nearby schools are in the most competitive cutoff band."
        }
        (PressureFactor::ChoiceConstraint, FactorBand::Above) => {
            "There are only a handful of schools to choose from nearby."
        }
        (PressureFactor::ChoiceConstraint, FactorBand::Within) => {
            "There is a moderate number of schools to choose from nearby."
        }
        (PressureFactor::ChoiceConstraint, FactorBand::Below) => {
            "There are plenty of schools to choose from nearby."
        }
        (PressureFactor::Uncertainty, FactorBand::Above) => {
            "Cutoffs have moved a lot in recent years, so outcomes are hard to predict."
        }
        (PressureFactor::Uncertainty, FactorBand::Within) => {
            "Cutoffs have shifted somewhat in recent years."
        }
        (PressureFactor::Uncertainty, FactorBand::Below) => {
            "Cutoffs have been steady in recent years, so outcomes are fairly predictable."
        }
        (PressureFactor::Crowding, FactorBand::Above) => {
            "Many households have moved in recently, adding to demand for places."
        }
        (PressureFactor::Crowding, FactorBand::Within) => {
            "A typical number of households have moved in recently."
        }
        (PressureFactor::Crowding, FactorBand::Below) => {
            "Relatively few households have moved in recently."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indices::school_landscape::SchoolRecord;

    fn area() -> AreaId {
        AreaId::new("Bishan").unwrap()
    }

    fn empty_landscape() -> SchoolLandscape {
        SchoolLandscape::new(area(), vec![])
    }

    fn index(d: f64, c: f64, u: f64, r: f64) -> EducationPressureIndex {
        EducationPressureIndex {
            area_id: area(),
            demand_pressure: IndexScore::new(d),
            choice_constraint: IndexScore::new(c),
            uncertainty: IndexScore::new(u),
            crowding: IndexScore::new(r),
            school_count: 3,
        }
    }

    #[test]
    fn weights_sum_to_one() {
        let sum = WEIGHT_DEMAND + WEIGHT_CHOICE + WEIGHT_UNCERTAINTY + WEIGHT_CROWDING;
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn no_landscape_yields_none() {
        assert!(calculate_education_pressure_index(None, Some(100)).is_none());
    }

    #[test]
    fn zero_schools_uses_degenerate_fallbacks() {
        let landscape = empty_landscape();
        let epi = calculate_education_pressure_index(Some(&landscape), None).unwrap();
        assert_eq!(epi.choice_constraint.value(), 100.0);
        assert_eq!(epi.demand_pressure.value(), 50.0);
        assert_eq!(epi.uncertainty.value(), 50.0);
        assert!(epi.epi().value() >= 50.0);
        assert!(epi.level() >= PressureLevel::Medium);
    }

    #[test]
    fn zero_schools_with_zero_crowding_still_medium() {
        let landscape = empty_landscape();
        let mut epi = calculate_education_pressure_index(Some(&landscape), None).unwrap();
        epi.crowding = IndexScore::ZERO;
        assert!(epi.epi().value() >= 50.0);
        assert_eq!(epi.level(), PressureLevel::Medium);
    }

    #[test]
    fn demand_pressure_is_sigmoid_of_high_share() {
        // 3 of 10 high-band schools sits exactly at the centre
        let mut schools = Vec::new();
        for i in 0..10 {
            let cutoff = if i < 3 { 255.0 } else { 220.0 };
            schools.push(SchoolRecord::new(format!("s{i}"), format!("School {i}")).with_cutoff(2023, cutoff));
        }
        let landscape = SchoolLandscape::new(area(), schools);
        let d = EducationPressureCalculator::demand_pressure(&landscape);
        assert!((d.value() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn demand_pressure_rises_with_high_share() {
        let all_high = SchoolLandscape::new(
            area(),
            vec![
                SchoolRecord::new("a", "A").with_cutoff(2023, 260.0),
                SchoolRecord::new("b", "B").with_cutoff(2023, 270.0),
            ],
        );
        let none_high = SchoolLandscape::new(
            area(),
            vec![
                SchoolRecord::new("a", "A").with_cutoff(2023, 200.0),
                SchoolRecord::new("b", "B").with_cutoff(2023, 210.0),
            ],
        );
        let high = EducationPressureCalculator::demand_pressure(&all_high);
        let low = EducationPressureCalculator::demand_pressure(&none_high);
        assert!(high.value() > 99.0);
        assert!(low.value() < 5.0);
    }

    #[test]
    fn choice_constraint_falls_with_more_schools() {
        assert_eq!(EducationPressureCalculator::choice_constraint(0).value(), 100.0);
        let three = EducationPressureCalculator::choice_constraint(3).value();
        let six = EducationPressureCalculator::choice_constraint(6).value();
        assert!(three > six);
        assert_eq!(EducationPressureCalculator::choice_constraint(10).value(), 0.0);
        assert_eq!(EducationPressureCalculator::choice_constraint(25).value(), 0.0);
    }

    #[test]
    fn uncertainty_is_neutral_without_history() {
        let landscape = SchoolLandscape::new(
            area(),
            vec![SchoolRecord::new("a", "A").with_cutoff(2023, 260.0)],
        );
        assert_eq!(EducationPressureCalculator::uncertainty(&landscape).value(), 50.0);
    }

    #[test]
    fn uncertainty_is_zero_for_steady_cutoffs() {
        let landscape = SchoolLandscape::new(
            area(),
            vec![SchoolRecord::new("a", "A")
                .with_cutoff(2021, 255.0)
                .with_cutoff(2022, 258.0)
                .with_cutoff(2023, 252.0)],
        );
        assert_eq!(EducationPressureCalculator::uncertainty(&landscape).value(), 0.0);
    }

    #[test]
    fn uncertainty_is_max_for_alternating_extremes() {
        let landscape = SchoolLandscape::new(
            area(),
            vec![SchoolRecord::new("a", "A")
                .with_cutoff(2022, 200.0)
                .with_cutoff(2023, 260.0)],
        );
        // stddev of {0, 1} is 0.5, which maps to 100
        assert_eq!(EducationPressureCalculator::uncertainty(&landscape).value(), 100.0);
    }

    #[test]
    fn crowding_scales_against_reference() {
        assert_eq!(EducationPressureCalculator::crowding(None).value(), 50.0);
        assert_eq!(EducationPressureCalculator::crowding(Some(0)).value(), 50.0);
        assert_eq!(EducationPressureCalculator::crowding(Some(200)).value(), 50.0);
        assert_eq!(EducationPressureCalculator::crowding(Some(1000)).value(), 100.0);
    }

    #[test]
    fn composite_is_weighted_sum() {
        let epi = index(80.0, 40.0, 20.0, 60.0);
        let expected = 0.35 * 80.0 + 0.25 * 40.0 + 0.20 * 20.0 + 0.20 * 60.0;
        assert!((epi.epi().value() - expected).abs() < 1e-9);
    }

    #[test]
    fn composite_tracks_sub_score_changes() {
        let mut epi = index(10.0, 10.0, 10.0, 10.0);
        let before = epi.epi();
        epi.demand_pressure = IndexScore::new(90.0);
        assert!(epi.epi() > before);
    }

    #[test]
    fn levels_follow_cut_points() {
        assert_eq!(PressureLevel::from_epi(IndexScore::new(18.0)), PressureLevel::Low);
        assert_eq!(PressureLevel::from_epi(IndexScore::new(40.0)), PressureLevel::Medium);
        assert_eq!(PressureLevel::from_epi(IndexScore::new(69.9)), PressureLevel::Medium);
        assert_eq!(PressureLevel::from_epi(IndexScore::new(70.0)), PressureLevel::High);
    }

    #[test]
    fn dominant_factor_is_argmax_with_tie_break() {
        assert_eq!(index(10.0, 90.0, 20.0, 30.0).dominant_factor(), PressureFactor::ChoiceConstraint);
        assert_eq!(index(50.0, 50.0, 50.0, 50.0).dominant_factor(), PressureFactor::DemandPressure);
        assert_eq!(index(10.0, 20.0, 30.0, 30.0).dominant_factor(), PressureFactor::Uncertainty);
    }

    #[test]
    fn explanation_follows_dominant_factor() {
        let epi = index(10.0, 20.0, 90.0, 30.0);
        assert!(epi.explanation().contains("swing"));
    }

    #[test]
    fn why_has_three_or_four_bullets() {
        assert_eq!(index(50.0, 50.0, 50.0, 50.0).why().len(), 3);
        assert_eq!(index(90.0, 10.0, 50.0, 50.0).why().len(), 3);
        assert_eq!(index(90.0, 10.0, 80.0, 20.0).why().len(), 4);
    }

    #[test]
    fn why_leads_with_out_of_band_factors() {
        let why = index(50.0, 95.0, 50.0, 50.0).why();
        assert_eq!(why[0], "There are only a handful of schools to choose from nearby.");
    }

    #[test]
    fn serializes_derived_fields() {
        let json = serde_json::to_value(index(80.0, 40.0, 20.0, 60.0)).unwrap();
        assert_eq!(json["level"], "medium");
        assert_eq!(json["dominant_factor"], "demand_pressure");
        assert!(json["epi"].as_f64().unwrap() > 0.0);
        assert!(json["why"].as_array().unwrap().len() >= 3);
    }
}
