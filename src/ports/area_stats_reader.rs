use async_trait::async_trait;

use super::ReaderError;
use crate::domain::area::{PeriodStats, StatsWindow};
use crate::domain::foundation::{AreaId, UnitType};

/// Read-only port for pre-aggregated transaction statistics.
#[async_trait]
pub trait AreaStatsReader: Send + Sync {
    /// Per-period rows for an area and unit type whose period falls in the window.
    ///
    /// Area ids match ignoring case. An unknown area yields an empty list.
    async fn period_stats(
        &self,
        area_id: &AreaId,
        unit_type: &UnitType,
        window: &StatsWindow,
    ) -> Result<Vec<PeriodStats>, ReaderError>;
}
