//! Commute Burden Index (CBI) - Structural commute difficulty of an area.
//!
//! CBI is not derived from transactions. It is a weighted sum over a static
//! per-area structural table that is built once and passed by reference.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::domain::foundation::{AreaId, IndexScore};

pub const WEIGHT_CENTRAL_ACCESS: f64 = 0.40;
pub const WEIGHT_TRANSFER: f64 = 0.25;
pub const WEIGHT_REDUNDANCY: f64 = 0.20;
pub const WEIGHT_FRICTION: f64 = 0.15;

pub const LEVEL_MODERATE_FROM: f64 = 30.0;
pub const LEVEL_HIGH_FROM: f64 = 50.0;
pub const LEVEL_VERY_HIGH_FROM: f64 = 70.0;

/// Commute burden classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommuteLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl CommuteLevel {
    pub fn from_cbi(cbi: IndexScore) -> Self {
        let value = cbi.value();
        if value >= LEVEL_VERY_HIGH_FROM {
            CommuteLevel::VeryHigh
        } else if value >= LEVEL_HIGH_FROM {
            CommuteLevel::High
        } else if value >= LEVEL_MODERATE_FROM {
            CommuteLevel::Moderate
        } else {
            CommuteLevel::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CommuteLevel::Low => "low",
            CommuteLevel::Moderate => "moderate",
            CommuteLevel::High => "high",
            CommuteLevel::VeryHigh => "very high",
        }
    }
}

impl fmt::Display for CommuteLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Structural sub-scores for one area. Higher is more burdensome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CommuteStructure {
    /// Distance and time to the central business district.
    pub central_access: IndexScore,
    /// Typical number of line changes for common trips.
    pub transfer: IndexScore,
    /// Lack of alternative lines or routes when one is disrupted.
    pub redundancy: IndexScore,
    /// First/last-mile friction: feeder buses, walking distance to stations.
    pub friction: IndexScore,
}

impl CommuteStructure {
    pub fn new(central_access: f64, transfer: f64, redundancy: f64, friction: f64) -> Self {
        Self {
            central_access: IndexScore::new(central_access),
            transfer: IndexScore::new(transfer),
            redundancy: IndexScore::new(redundancy),
            friction: IndexScore::new(friction),
        }
    }

    /// `0.40·A + 0.25·T + 0.20·N + 0.15·F`.
    pub fn composite(&self) -> IndexScore {
        IndexScore::new(
            WEIGHT_CENTRAL_ACCESS * self.central_access.value()
                + WEIGHT_TRANSFER * self.transfer.value()
                + WEIGHT_REDUNDANCY * self.redundancy.value()
                + WEIGHT_FRICTION * self.friction.value(),
        )
    }
}

/// Commute Burden Index for one area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommuteBurdenIndex {
    pub area_id: AreaId,
    pub cbi: IndexScore,
    pub level: CommuteLevel,
    pub structure: CommuteStructure,
}

impl CommuteBurdenIndex {
    pub fn from_structure(area_id: AreaId, structure: CommuteStructure) -> Self {
        let cbi = structure.composite();
        Self {
            area_id,
            cbi,
            level: CommuteLevel::from_cbi(cbi),
            structure,
        }
    }
}

/// Read-only structural commute table keyed case-insensitively by area.
#[derive(Debug, Clone, Default)]
pub struct CommuteTable {
    entries: HashMap<String, (AreaId, CommuteStructure)>,
}

static STANDARD_TABLE: Lazy<CommuteTable> = Lazy::new(CommuteTable::build_standard);

impl CommuteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from explicit entries. Later duplicates replace earlier ones.
    pub fn from_entries(entries: impl IntoIterator<Item = (AreaId, CommuteStructure)>) -> Self {
        let mut table = Self::new();
        for (area_id, structure) in entries {
            table.entries.insert(area_id.lookup_key(), (area_id, structure));
        }
        table
    }

    /// The bundled table, constructed on first use and shared thereafter.
    pub fn standard() -> &'static CommuteTable {
        &STANDARD_TABLE
    }

    pub fn get(&self, area_id: &AreaId) -> Option<&CommuteStructure> {
        self.entries
            .get(&area_id.lookup_key())
            .map(|(_, structure)| structure)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn build_standard() -> CommuteTable {
        // (area, central access, transfer, redundancy, friction)
        const ROWS: &[(&str, f64, f64, f64, f64)] = &[
            ("Ang Mo Kio", 35.0, 25.0, 40.0, 30.0),
            ("Bedok", 45.0, 30.0, 35.0, 35.0),
            ("Bishan", 25.0, 15.0, 15.0, 25.0),
            ("Bukit Batok", 55.0, 45.0, 55.0, 45.0),
            ("Bukit Merah", 15.0, 20.0, 20.0, 25.0),
            ("Bukit Panjang", 60.0, 50.0, 50.0, 55.0),
            ("Choa Chu Kang", 70.0, 45.0, 55.0, 50.0),
            ("Clementi", 40.0, 30.0, 45.0, 30.0),
            ("Hougang", 45.0, 35.0, 40.0, 45.0),
            ("Jurong West", 75.0, 55.0, 60.0, 55.0),
            ("Pasir Ris", 75.0, 50.0, 65.0, 45.0),
            ("Punggol", 70.0, 55.0, 60.0, 50.0),
            ("Queenstown", 15.0, 20.0, 25.0, 20.0),
            ("Sengkang", 60.0, 45.0, 50.0, 50.0),
            ("Serangoon", 35.0, 15.0, 20.0, 30.0),
            ("Tampines", 60.0, 35.0, 30.0, 35.0),
            ("Toa Payoh", 20.0, 25.0, 30.0, 20.0),
            ("Woodlands", 85.0, 45.0, 55.0, 45.0),
            ("Yishun", 70.0, 45.0, 60.0, 40.0),
        ];

        let entries = ROWS.iter().filter_map(|(name, a, t, n, f)| {
            AreaId::new(*name)
                .ok()
                .map(|id| (id, CommuteStructure::new(*a, *t, *n, *f)))
        });
        CommuteTable::from_entries(entries)
    }
}

/// Looks up the area's structure and scores it; `None` if the area is not in the table.
pub fn calculate_commute_burden_index(
    area_id: &AreaId,
    table: &CommuteTable,
) -> Option<CommuteBurdenIndex> {
    let structure = table.get(area_id)?;
    Some(CommuteBurdenIndex::from_structure(area_id.clone(), *structure))
}
