//! CompareAreasHandler - Query handler comparing two residential areas.
//!
//! Fetches both areas' raw data concurrently, derives profiles and indices,
//! resolves the preference mode, then hands everything to the comparator.

use serde::Deserialize;
use std::sync::Arc;

use crate::domain::area::{build_area_profile, StatsWindow};
use crate::domain::comparison::{AreaInput, Comparator, ComparisonResult};
use crate::domain::foundation::{AreaId, DomainError, ErrorCode, UnitType};
use crate::domain::indices::{
    calculate_commute_burden_index, calculate_education_pressure_index, CommuteTable,
};
use crate::domain::preference::{select_preference_mode, FamilyProfile, HoldingHorizon};
use crate::ports::{AreaStatsReader, ReaderError, SchoolLandscapeReader};

/// Query to compare two areas for one unit type over one window.
#[derive(Debug, Clone, Deserialize)]
pub struct CompareAreasQuery {
    pub area_a: AreaId,
    pub area_b: AreaId,
    pub unit_type: UnitType,
    pub window: StatsWindow,
    /// Preference lens id; unknown ids fall back to balanced.
    #[serde(default = "default_lens")]
    pub lens: String,
    #[serde(default)]
    pub long_term: bool,
    /// Takes precedence over `lens` and `long_term` when present.
    #[serde(default)]
    pub family_profile: Option<FamilyProfile>,
    /// Defaults to the family profile's horizon, then medium.
    #[serde(default)]
    pub horizon: Option<HoldingHorizon>,
}

fn default_lens() -> String {
    "balanced".to_string()
}

impl CompareAreasQuery {
    pub fn new(area_a: AreaId, area_b: AreaId, unit_type: UnitType, window: StatsWindow) -> Self {
        Self {
            area_a,
            area_b,
            unit_type,
            window,
            lens: default_lens(),
            long_term: false,
            family_profile: None,
            horizon: None,
        }
    }

    pub fn with_lens(mut self, lens: impl Into<String>, long_term: bool) -> Self {
        self.lens = lens.into();
        self.long_term = long_term;
        self
    }

    pub fn with_family_profile(mut self, profile: FamilyProfile) -> Self {
        self.family_profile = Some(profile);
        self
    }

    pub fn with_horizon(mut self, horizon: HoldingHorizon) -> Self {
        self.horizon = Some(horizon);
        self
    }

    fn effective_horizon(&self) -> HoldingHorizon {
        self.horizon
            .or(self.family_profile.map(|p| p.holding_horizon))
            .unwrap_or_default()
    }
}

/// Result of a successful comparison query.
pub type CompareAreasResult = ComparisonResult;

#[derive(Debug, thiserror::Error)]
pub enum CompareAreasError {
    #[error("No transactions for {area_id} ({unit_type}) in the requested window")]
    AreaNotFound { area_id: AreaId, unit_type: UnitType },

    #[error(transparent)]
    Reader(#[from] ReaderError),
}

impl From<CompareAreasError> for DomainError {
    fn from(err: CompareAreasError) -> Self {
        match err {
            CompareAreasError::AreaNotFound { ref area_id, .. } => {
                let area = area_id.clone();
                DomainError::new(ErrorCode::AreaNotFound, err.to_string()).for_area(area)
            }
            CompareAreasError::Reader(reader) => reader.into(),
        }
    }
}

/// Handler for area comparison queries.
pub struct CompareAreasHandler {
    stats: Arc<dyn AreaStatsReader>,
    schools: Arc<dyn SchoolLandscapeReader>,
    commute: Arc<CommuteTable>,
    comparator: Comparator,
}

impl CompareAreasHandler {
    /// Uses the standard commute table and default thresholds.
    pub fn new(stats: Arc<dyn AreaStatsReader>, schools: Arc<dyn SchoolLandscapeReader>) -> Self {
        Self {
            stats,
            schools,
            commute: Arc::new(CommuteTable::standard().clone()),
            comparator: Comparator::default(),
        }
    }

    pub fn with_comparator(mut self, comparator: Comparator) -> Self {
        self.comparator = comparator;
        self
    }

    pub fn with_commute_table(mut self, table: Arc<CommuteTable>) -> Self {
        self.commute = table;
        self
    }

    pub async fn handle(
        &self,
        query: CompareAreasQuery,
    ) -> Result<CompareAreasResult, CompareAreasError> {
        let (a, b) = tokio::try_join!(
            self.load_area(&query.area_a, &query.unit_type, &query.window),
            self.load_area(&query.area_b, &query.unit_type, &query.window),
        )?;

        let (mode, rule_profile) =
            select_preference_mode(&query.lens, query.long_term, query.family_profile.as_ref());
        let horizon = query.effective_horizon();

        tracing::debug!(
            area_a = %query.area_a,
            area_b = %query.area_b,
            mode = %mode.id,
            family = rule_profile.is_some(),
            horizon = ?horizon,
            "comparing areas"
        );

        Ok(self
            .comparator
            .compare(&a, &b, &mode, rule_profile.as_ref(), horizon))
    }

    /// Builds the comparator input for one area.
    ///
    /// A missing profile is an error; missing school or commute data only
    /// degrades the comparison.
    async fn load_area(
        &self,
        area_id: &AreaId,
        unit_type: &UnitType,
        window: &StatsWindow,
    ) -> Result<AreaInput, CompareAreasError> {
        let (rows, landscape) = tokio::join!(
            self.stats.period_stats(area_id, unit_type, window),
            self.schools.landscape(area_id),
        );
        let rows = rows?;
        tracing::debug!(area_id = %area_id, rows = rows.len(), "period stats fetched");

        let profile = build_area_profile(area_id.clone(), unit_type.clone(), &rows).ok_or_else(|| {
            CompareAreasError::AreaNotFound {
                area_id: area_id.clone(),
                unit_type: unit_type.clone(),
            }
        })?;

        let landscape = landscape.unwrap_or_else(|err| {
            tracing::warn!(area_id = %area_id, error = %err, "school landscape fetch failed");
            None
        });

        let volume = profile.metrics().transaction_volume;
        let epi = calculate_education_pressure_index(landscape.as_ref(), Some(volume));
        if epi.is_none() {
            tracing::warn!(area_id = %area_id, "no schools resolved; school comparison degraded");
        }

        let cbi = calculate_commute_burden_index(area_id, &self.commute);
        if cbi.is_none() {
            tracing::warn!(area_id = %area_id, "area not in commute table; commute comparison degraded");
        }

        Ok(AreaInput::new(profile)
            .with_epi(epi)
            .with_landscape(landscape.map(|l| l.summary()))
            .with_cbi(cbi))
    }
}
