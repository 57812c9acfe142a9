//! In-Memory Area Stats Adapter
//!
//! Holds per-period rows keyed by case-folded area id and unit type.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::area::{PeriodStats, StatsWindow};
use crate::domain::foundation::{AreaId, UnitType};
use crate::ports::{AreaStatsReader, ReaderError};

type StatsKey = (String, UnitType);

#[derive(Debug, Clone, Default)]
pub struct InMemoryAreaStats {
    rows: Arc<RwLock<HashMap<StatsKey, Vec<PeriodStats>>>>,
}

impl InMemoryAreaStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends rows for an area and unit type.
    pub async fn insert(&self, area_id: &AreaId, unit_type: &UnitType, rows: Vec<PeriodStats>) {
        let mut all = self.rows.write().await;
        all.entry((area_id.lookup_key(), unit_type.clone()))
            .or_default()
            .extend(rows);
    }

    /// Clear all stored rows (useful for tests)
    pub async fn clear(&self) {
        self.rows.write().await.clear();
    }

    /// Number of area/unit-type series held
    pub async fn series_count(&self) -> usize {
        self.rows.read().await.len()
    }
}

#[async_trait]
impl AreaStatsReader for InMemoryAreaStats {
    async fn period_stats(
        &self,
        area_id: &AreaId,
        unit_type: &UnitType,
        window: &StatsWindow,
    ) -> Result<Vec<PeriodStats>, ReaderError> {
        let rows = self.rows.read().await;
        let key = (area_id.lookup_key(), unit_type.clone());
        Ok(rows
            .get(&key)
            .map(|series| {
                series
                    .iter()
                    .filter(|row| window.contains(row.period))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn month(m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, 1).unwrap()
    }

    fn row(m: u32) -> PeriodStats {
        PeriodStats::new(month(m), 10, 500_000.0, 5_400.0, 80.0)
    }

    #[tokio::test]
    async fn filters_rows_by_window() {
        let store = InMemoryAreaStats::new();
        let area = AreaId::new("Bishan").unwrap();
        let unit = UnitType::new("4 room").unwrap();
        store.insert(&area, &unit, vec![row(1), row(6), row(12)]).await;

        let window = StatsWindow::new(month(3), month(12)).unwrap();
        let rows = store.period_stats(&area, &unit, &window).await.unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn area_lookup_ignores_case() {
        let store = InMemoryAreaStats::new();
        let unit = UnitType::new("4 ROOM").unwrap();
        store
            .insert(&AreaId::new("ANG MO KIO").unwrap(), &unit, vec![row(2)])
            .await;

        let window = StatsWindow::new(month(1), month(12)).unwrap();
        let rows = store
            .period_stats(&AreaId::new("Ang Mo Kio").unwrap(), &unit, &window)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn unknown_area_is_empty_not_error() {
        let store = InMemoryAreaStats::new();
        let window = StatsWindow::new(month(1), month(12)).unwrap();
        let rows = store
            .period_stats(
                &AreaId::new("Nowhere").unwrap(),
                &UnitType::new("3 ROOM").unwrap(),
                &window,
            )
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn unit_types_are_kept_apart() {
        let store = InMemoryAreaStats::new();
        let area = AreaId::new("Bedok").unwrap();
        store.insert(&area, &UnitType::new("3 ROOM").unwrap(), vec![row(1)]).await;
        store.insert(&area, &UnitType::new("5 ROOM").unwrap(), vec![row(1)]).await;
        assert_eq!(store.series_count().await, 2);

        store.clear().await;
        assert_eq!(store.series_count().await, 0);
    }
}
