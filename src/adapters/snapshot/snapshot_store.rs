//! File-backed snapshot store.
//!
//! The whole snapshot is read once and held immutably; lookups never touch disk.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tokio::fs;

use crate::domain::area::{PeriodStats, StatsWindow};
use crate::domain::foundation::{AreaId, UnitType};
use crate::domain::indices::{SchoolDirectory, SchoolLandscape};
use crate::ports::{AreaStatsReader, ReaderError, SchoolLandscapeReader};

/// Raw per-period rows for one area and unit type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaSeries {
    pub area_id: AreaId,
    pub unit_type: UnitType,
    #[serde(default)]
    pub periods: Vec<PeriodStats>,
}

/// Everything the comparison engine is fed, in one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSnapshot {
    #[serde(default)]
    pub areas: Vec<AreaSeries>,
    #[serde(default)]
    pub schools: SchoolDirectory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    /// Picks the format from the file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                SnapshotFormat::Yaml
            }
            _ => SnapshotFormat::Json,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SnapshotStore {
    snapshot: Arc<DataSnapshot>,
}

impl SnapshotStore {
    pub fn from_snapshot(snapshot: DataSnapshot) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
        }
    }

    /// Reads and parses a snapshot file.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, ReaderError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .await
            .map_err(|e| ReaderError::Unreadable(format!("{}: {}", path.display(), e)))?;

        let store = Self::parse(&text, SnapshotFormat::from_path(path))?;
        tracing::info!(
            path = %path.display(),
            areas = store.snapshot.areas.len(),
            landscapes = store.snapshot.schools.landscapes.len(),
            "snapshot loaded"
        );
        Ok(store)
    }

    pub fn parse(text: &str, format: SnapshotFormat) -> Result<Self, ReaderError> {
        let snapshot: DataSnapshot = match format {
            SnapshotFormat::Json => {
                serde_json::from_str(text).map_err(|e| ReaderError::Malformed(e.to_string()))?
            }
            SnapshotFormat::Yaml => {
                serde_yaml::from_str(text).map_err(|e| ReaderError::Malformed(e.to_string()))?
            }
        };
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn snapshot(&self) -> &DataSnapshot {
        &self.snapshot
    }
}

#[async_trait]
impl AreaStatsReader for SnapshotStore {
    async fn period_stats(
        &self,
        area_id: &AreaId,
        unit_type: &UnitType,
        window: &StatsWindow,
    ) -> Result<Vec<PeriodStats>, ReaderError> {
        Ok(self
            .snapshot
            .areas
            .iter()
            .filter(|series| series.unit_type == *unit_type)
            .filter(|series| area_id.matches_ignore_case(series.area_id.as_str()))
            .flat_map(|series| series.periods.iter())
            .filter(|row| window.contains(row.period))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SchoolLandscapeReader for SnapshotStore {
    async fn landscape(&self, area_id: &AreaId) -> Result<Option<SchoolLandscape>, ReaderError> {
        Ok(self.snapshot.schools.resolve(area_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;

    const SNAPSHOT_JSON: &str = r#"{
        "areas": [
            {
                "area_id": "BISHAN",
                "unit_type": "4 room",
                "periods": [
                    {"period": "2024-01-01", "tx_count": 12, "median_price": 650000.0,
                     "median_price_per_area": 6900.0, "median_lease_years": 62.0},
                    {"period": "2023-01-01", "tx_count": 9, "median_price": 610000.0,
                     "median_price_per_area": 6500.0, "median_lease_years": 63.0}
                ]
            }
        ],
        "schools": {
            "landscapes": [],
            "unattached": [
                {"school_id": "s1", "name": "Ai Tong", "area_name": "Bishan",
                 "cutoffs": [{"year": 2024, "cutoff": 262.0}]}
            ]
        }
    }"#;

    fn window() -> StatsWindow {
        StatsWindow::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(SnapshotFormat::from_path(Path::new("a.yml")), SnapshotFormat::Yaml);
        assert_eq!(SnapshotFormat::from_path(Path::new("a.YAML")), SnapshotFormat::Yaml);
        assert_eq!(SnapshotFormat::from_path(Path::new("a.json")), SnapshotFormat::Json);
        assert_eq!(SnapshotFormat::from_path(Path::new("snapshot")), SnapshotFormat::Json);
    }

    #[tokio::test]
    async fn serves_rows_inside_window() {
        let store = SnapshotStore::parse(SNAPSHOT_JSON, SnapshotFormat::Json).unwrap();
        let rows = store
            .period_stats(
                &AreaId::new("Bishan").unwrap(),
                &UnitType::new("4 ROOM").unwrap(),
                &window(),
            )
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].tx_count, 12);
    }

    #[tokio::test]
    async fn resolves_landscape_from_school_names() {
        let store = SnapshotStore::parse(SNAPSHOT_JSON, SnapshotFormat::Json).unwrap();
        let landscape = store
            .landscape(&AreaId::new("bishan").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(landscape.summary().high_band_count, 1);
    }

    #[test]
    fn malformed_snapshot_is_reported() {
        let err = SnapshotStore::parse("{ not json", SnapshotFormat::Json).unwrap_err();
        assert!(matches!(err, ReaderError::Malformed(_)));
    }

    #[test]
    fn yaml_snapshot_parses() {
        let yaml = "areas:\n  - area_id: Bedok\n    unit_type: 3 ROOM\n";
        let store = SnapshotStore::parse(yaml, SnapshotFormat::Yaml).unwrap();
        assert_eq!(store.snapshot().areas.len(), 1);
        assert!(store.snapshot().areas[0].periods.is_empty());
    }

    #[tokio::test]
    async fn loads_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(SNAPSHOT_JSON.as_bytes()).unwrap();

        let store = SnapshotStore::load(file.path()).await.unwrap();
        assert_eq!(store.snapshot().areas.len(), 1);
    }

    #[tokio::test]
    async fn missing_file_is_unreadable() {
        let err = SnapshotStore::load("/nonexistent/snapshot.json").await.unwrap_err();
        assert!(matches!(err, ReaderError::Unreadable(_)));
    }
}
