//! School landscape - Schools serving an area and their admission-cutoff history.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::AreaId;

/// Cutoff score at or above which a school is in the high band.
pub const HIGH_BAND_MIN_CUTOFF: f64 = 250.0;

/// Cutoff score at or above which a school is in the medium band.
pub const MEDIUM_BAND_MIN_CUTOFF: f64 = 230.0;

/// Competitiveness band of one year's admission cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutoffBand {
    Low,
    Medium,
    High,
}

impl CutoffBand {
    /// Classifies a cutoff score (higher means harder to get in).
    pub fn from_cutoff(score: f64) -> Self {
        if score >= HIGH_BAND_MIN_CUTOFF {
            CutoffBand::High
        } else if score >= MEDIUM_BAND_MIN_CUTOFF {
            CutoffBand::Medium
        } else {
            CutoffBand::Low
        }
    }

    /// Numeric value used for year-over-year uncertainty.
    pub fn value(&self) -> f64 {
        match self {
            CutoffBand::Low => 0.0,
            CutoffBand::Medium => 0.5,
            CutoffBand::High => 1.0,
        }
    }
}

/// One year's admission cutoff for a school.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutoffRecord {
    pub year: i32,
    pub cutoff: f64,
}

impl CutoffRecord {
    pub fn new(year: i32, cutoff: f64) -> Self {
        Self { year, cutoff }
    }

    pub fn band(&self) -> CutoffBand {
        CutoffBand::from_cutoff(self.cutoff)
    }
}

/// A school and its cutoff history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolRecord {
    pub school_id: String,
    pub name: String,
    /// Free-text area name as recorded by the school directory.
    #[serde(default)]
    pub area_name: Option<String>,
    #[serde(default)]
    pub cutoffs: Vec<CutoffRecord>,
}

impl SchoolRecord {
    /// Creates a school with no history.
    pub fn new(school_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            school_id: school_id.into(),
            name: name.into(),
            area_name: None,
            cutoffs: Vec::new(),
        }
    }

    /// Sets the directory area name.
    pub fn in_area(mut self, area_name: impl Into<String>) -> Self {
        self.area_name = Some(area_name.into());
        self
    }

    /// Adds one year's cutoff.
    pub fn with_cutoff(mut self, year: i32, cutoff: f64) -> Self {
        self.cutoffs.push(CutoffRecord::new(year, cutoff));
        self
    }

    /// The cutoff of the most recent year on record.
    pub fn latest_cutoff(&self) -> Option<&CutoffRecord> {
        self.cutoffs.iter().max_by_key(|c| c.year)
    }

    /// Bands for the most recent `years` distinct years, newest first.
    ///
    /// When a year appears twice, the first record for it wins.
    pub fn recent_bands(&self, years: usize) -> Vec<CutoffBand> {
        let mut sorted: Vec<&CutoffRecord> = self.cutoffs.iter().collect();
        sorted.sort_by(|a, b| b.year.cmp(&a.year));

        let mut seen_years = Vec::new();
        let mut bands = Vec::new();
        for record in sorted {
            if seen_years.contains(&record.year) {
                continue;
            }
            seen_years.push(record.year);
            bands.push(record.band());
            if bands.len() == years {
                break;
            }
        }
        bands
    }
}

/// The schools serving one area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolLandscape {
    pub area_id: AreaId,
    #[serde(default)]
    pub schools: Vec<SchoolRecord>,
}

impl SchoolLandscape {
    pub fn new(area_id: AreaId, schools: Vec<SchoolRecord>) -> Self {
        Self { area_id, schools }
    }

    pub fn school_count(&self) -> usize {
        self.schools.len()
    }

    /// Condensed view for the comparison result.
    pub fn summary(&self) -> LandscapeSummary {
        let high_band_count = self
            .schools
            .iter()
            .filter(|s| s.latest_cutoff().map(|c| c.band()) == Some(CutoffBand::High))
            .count();

        let most_competitive = self
            .schools
            .iter()
            .filter_map(|s| s.latest_cutoff().map(|c| (s, c.cutoff)))
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(s, _)| s.name.clone());

        LandscapeSummary {
            school_count: self.schools.len(),
            high_band_count,
            most_competitive,
        }
    }
}

/// Short description of an area's schools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandscapeSummary {
    pub school_count: usize,
    pub high_band_count: usize,
    pub most_competitive: Option<String>,
}

/// Every known landscape plus schools not yet attached to one.
///
/// Resolution order for an area:
/// 1. A landscape whose id equals the area id exactly
/// 2. A landscape whose id matches ignoring case
/// 3. Unattached schools whose directory area name matches ignoring case
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchoolDirectory {
    #[serde(default)]
    pub landscapes: Vec<SchoolLandscape>,
    #[serde(default)]
    pub unattached: Vec<SchoolRecord>,
}

impl SchoolDirectory {
    pub fn new(landscapes: Vec<SchoolLandscape>, unattached: Vec<SchoolRecord>) -> Self {
        Self {
            landscapes,
            unattached,
        }
    }

    /// Resolves the landscape for an area, or `None` if nothing matches.
    pub fn resolve(&self, area_id: &AreaId) -> Option<SchoolLandscape> {
        if let Some(exact) = self.landscapes.iter().find(|l| l.area_id == *area_id) {
            return Some(exact.clone());
        }

        if let Some(folded) = self
            .landscapes
            .iter()
            .find(|l| area_id.matches_ignore_case(l.area_id.as_str()))
        {
            tracing::debug!(area_id = %area_id, matched = %folded.area_id, "landscape resolved by case-insensitive match");
            return Some(folded.clone());
        }

        let by_name: Vec<SchoolRecord> = self
            .unattached
            .iter()
            .filter(|s| {
                s.area_name
                    .as_deref()
                    .is_some_and(|name| area_id.matches_ignore_case(name))
            })
            .cloned()
            .collect();

        if by_name.is_empty() {
            return None;
        }

        tracing::debug!(area_id = %area_id, schools = by_name.len(), "landscape assembled from school area names");
        Some(SchoolLandscape::new(area_id.clone(), by_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(id: &str) -> AreaId {
        AreaId::new(id).unwrap()
    }

    #[test]
    fn cutoff_bands_follow_thresholds() {
        assert_eq!(CutoffBand::from_cutoff(260.0), CutoffBand::High);
        assert_eq!(CutoffBand::from_cutoff(250.0), CutoffBand::High);
        assert_eq!(CutoffBand::from_cutoff(240.0), CutoffBand::Medium);
        assert_eq!(CutoffBand::from_cutoff(229.9), CutoffBand::Low);
    }

    #[test]
    fn latest_cutoff_picks_most_recent_year() {
        let school = SchoolRecord::new("s1", "North Primary")
            .with_cutoff(2021, 255.0)
            .with_cutoff(2023, 231.0)
            .with_cutoff(2022, 248.0);
        assert_eq!(school.latest_cutoff().unwrap().year, 2023);
    }

    #[test]
    fn recent_bands_are_newest_first_and_limited() {
        let school = SchoolRecord::new("s1", "North Primary")
            .with_cutoff(2020, 200.0)
            .with_cutoff(2023, 255.0)
            .with_cutoff(2022, 240.0)
            .with_cutoff(2021, 210.0);
        let bands = school.recent_bands(3);
        assert_eq!(bands, vec![CutoffBand::High, CutoffBand::Medium, CutoffBand::Low]);
    }

    #[test]
    fn recent_bands_skip_duplicate_years() {
        let school = SchoolRecord::new("s1", "North Primary")
            .with_cutoff(2023, 255.0)
            .with_cutoff(2023, 200.0);
        assert_eq!(school.recent_bands(3).len(), 1);
    }

    #[test]
    fn summary_counts_high_band_and_names_most_competitive() {
        let landscape = SchoolLandscape::new(
            area("Bishan"),
            vec![
                SchoolRecord::new("s1", "Ai Tong").with_cutoff(2023, 262.0),
                SchoolRecord::new("s2", "Kuo Chuan").with_cutoff(2023, 251.0),
                SchoolRecord::new("s3", "Catholic High").with_cutoff(2023, 238.0),
                SchoolRecord::new("s4", "New School"),
            ],
        );
        let summary = landscape.summary();
        assert_eq!(summary.school_count, 4);
        assert_eq!(summary.high_band_count, 2);
        assert_eq!(summary.most_competitive.as_deref(), Some("Ai Tong"));
    }

    #[test]
    fn directory_prefers_exact_match() {
        let directory = SchoolDirectory::new(
            vec![
                SchoolLandscape::new(area("BISHAN"), vec![SchoolRecord::new("a", "Upper")]),
                SchoolLandscape::new(area("Bishan"), vec![SchoolRecord::new("b", "Exact")]),
            ],
            vec![],
        );
        let resolved = directory.resolve(&area("Bishan")).unwrap();
        assert_eq!(resolved.schools[0].name, "Exact");
    }

    #[test]
    fn directory_falls_back_to_case_insensitive_id() {
        let directory = SchoolDirectory::new(
            vec![SchoolLandscape::new(area("ANG MO KIO"), vec![SchoolRecord::new("a", "Mayflower")])],
            vec![],
        );
        let resolved = directory.resolve(&area("Ang Mo Kio")).unwrap();
        assert_eq!(resolved.school_count(), 1);
    }

    #[test]
    fn directory_falls_back_to_school_area_names() {
        let directory = SchoolDirectory::new(
            vec![],
            vec![
                SchoolRecord::new("a", "Rosyth").in_area("SERANGOON"),
                SchoolRecord::new("b", "Zhonghua").in_area("Serangoon"),
                SchoolRecord::new("c", "Elsewhere").in_area("Hougang"),
            ],
        );
        let resolved = directory.resolve(&area("serangoon")).unwrap();
        assert_eq!(resolved.area_id.as_str(), "serangoon");
        assert_eq!(resolved.school_count(), 2);
    }

    #[test]
    fn directory_returns_none_when_nothing_matches() {
        let directory = SchoolDirectory::default();
        assert!(directory.resolve(&area("Nowhere")).is_none());
    }
}
